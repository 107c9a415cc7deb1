//! Date-range filtering of a snapshot series.
//!
//! Accepted expressions, for both ends of the range:
//!
//! | Expression            | Meaning                          |
//! |-----------------------|----------------------------------|
//! | `today`, `yesterday`  | that calendar day (UTC)          |
//! | `3 days ago`, `12h ago` | `now` minus a humantime duration |
//! | `2020-03-30`, `2020/03/30`, `03/30/2020`, `Mar 30 2020` | a calendar day |
//! | `2020-03-30T16:46:22+00:00` | an exact RFC 3339 instant  |
//!
//! A day used as the lower bound starts at midnight; a day used as the upper
//! bound includes all of it.

use crate::errors::bad_date;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use hspdelta_core::errors::{HspError, Result};
use hspdelta_core::snapshot::{CanonicalSnapshot, SnapshotSeries};
use std::fmt;

const DAY_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d %Y"];

/// Naive timestamp layouts accepted in `captured_date` when it is not RFC 3339.
const NAIVE_CAPTURE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const AGO_SUFFIX: &str = " ago";

/// A parsed range endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Point {
    Day(NaiveDate),
    Instant(DateTime<Utc>),
}

impl Point {
    fn start(self) -> DateTime<Utc> {
        match self {
            Point::Day(day) => day.and_time(NaiveTime::MIN).and_utc(),
            Point::Instant(at) => at,
        }
    }

    /// First instant no longer covered when this point is the upper bound.
    fn end_exclusive(self) -> DateTime<Utc> {
        match self {
            Point::Day(day) => day
                .succ_opt()
                .map(|next| next.and_time(NaiveTime::MIN).and_utc())
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            Point::Instant(at) => at + Duration::nanoseconds(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Bound {
    expression: String,
    at: DateTime<Utc>,
}

/// Optional `[from, to]` window over capture timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateRange {
    from: Option<Bound>,
    /// Exclusive.
    to: Option<Bound>,
}

impl DateRange {
    /// No bounds: every snapshot is kept.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Parse the `--from` / `--to` expressions relative to `now`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an unrecognized expression or a `from` later than
    /// `to`.
    pub fn parse(from: Option<&str>, to: Option<&str>, now: DateTime<Utc>) -> Result<Self> {
        let from = from
            .map(|expr| {
                parse_point("from", expr, now).map(|point| Bound {
                    expression: expr.trim().to_string(),
                    at: point.start(),
                })
            })
            .transpose()?;
        let to = to
            .map(|expr| {
                parse_point("to", expr, now).map(|point| Bound {
                    expression: expr.trim().to_string(),
                    at: point.end_exclusive(),
                })
            })
            .transpose()?;

        if let (Some(from), Some(to)) = (&from, &to) {
            if from.at >= to.at {
                return Err(HspError::InvalidInput {
                    reason: format!(
                        "--from {:?} is not before --to {:?}",
                        from.expression, to.expression
                    ),
                });
            }
        }

        Ok(Self { from, to })
    }

    pub fn is_bounded(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// Whether an instant falls inside the window.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.as_ref().map_or(true, |from| at >= from.at)
            && self.to.as_ref().map_or(true, |to| at < to.at)
    }

    /// Keep the snapshots captured inside the window, order preserved.
    ///
    /// # Errors
    ///
    /// `MalformedSnapshot` if a bounded range meets a `captured_date` that is
    /// not a recognizable timestamp.
    pub fn filter(&self, series: SnapshotSeries) -> Result<SnapshotSeries> {
        if !self.is_bounded() {
            return Ok(series);
        }
        series.try_filter(|snapshot| Ok(self.contains(captured_at(snapshot)?)))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let from = self
            .from
            .as_ref()
            .map_or("the earliest profile", |b| b.expression.as_str());
        let to = self
            .to
            .as_ref()
            .map_or("the latest profile", |b| b.expression.as_str());
        write!(f, "{from} and {to}")
    }
}

fn parse_point(flag: &str, expression: &str, now: DateTime<Utc>) -> Result<Point> {
    let expr = expression.trim();
    let lower = expr.to_ascii_lowercase();

    match lower.as_str() {
        "" => return Err(bad_date(flag, expression, "empty expression")),
        "today" => return Ok(Point::Day(now.date_naive())),
        "yesterday" => {
            return now
                .date_naive()
                .pred_opt()
                .map(Point::Day)
                .ok_or_else(|| bad_date(flag, expression, "date out of range"))
        }
        _ => {}
    }

    if let Some(amount) = lower.strip_suffix(AGO_SUFFIX) {
        let compact: String = amount.chars().filter(|c| !c.is_whitespace()).collect();
        let elapsed = humantime::parse_duration(&compact)
            .map_err(|err| bad_date(flag, expression, &err.to_string()))?;
        let elapsed = Duration::from_std(elapsed)
            .map_err(|err| bad_date(flag, expression, &err.to_string()))?;
        return now
            .checked_sub_signed(elapsed)
            .map(Point::Instant)
            .ok_or_else(|| bad_date(flag, expression, "date out of range"));
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(expr) {
        return Ok(Point::Instant(at.with_timezone(&Utc)));
    }

    DAY_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(expr, format).ok())
        .map(Point::Day)
        .ok_or_else(|| bad_date(flag, expression, "unrecognized date format"))
}

/// Parse a snapshot's `captured_date`; naive timestamps are taken as UTC.
fn captured_at(snapshot: &CanonicalSnapshot) -> Result<DateTime<Utc>> {
    let raw = snapshot.captured_date();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }
    NAIVE_CAPTURE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            HspError::malformed("captured_date", format!("not a timestamp: {raw:?}"))
        })
}
