//! Change-report orchestration.
//!
//! ## Pipeline (in order):
//! 1. Resolve the host and fetch its raw history
//! 2. Normalize every snapshot and sort by capture timestamp
//! 3. Apply the date range (empty result short-circuits, not an error)
//! 4. Title line, then one rendered block per consecutive pair

use crate::date_range::DateRange;
use crate::errors::{in_op, Result};
use hspdelta_client::fetcher::fetch_host_history;
use hspdelta_client::ProfileService;
use hspdelta_core::render::{render_pairs, render_title, ReportView};
use hspdelta_core::snapshot::SnapshotSeries;
use hspdelta_core::{log_op_end, log_op_error, log_op_start};
use hspdelta_core_types::RequestId;
use std::time::Instant;

/// What to render and over which window.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub view: ReportView,
    pub range: DateRange,
}

/// Outcome of a report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Title plus per-pair output, ready to print.
    Rendered { display_name: String, lines: Vec<String> },
    /// The explicit date range matched no profiles.
    EmptyRange { message: String },
}

impl ReportOutcome {
    /// Everything the caller should print, in order.
    pub fn lines(&self) -> Vec<String> {
        match self {
            ReportOutcome::Rendered { lines, .. } => lines.clone(),
            ReportOutcome::EmptyRange { message } => vec![message.clone()],
        }
    }
}

/// Run one change report for `host` (UUID or display name).
///
/// # Errors
///
/// Any fetch, normalization or rendering failure aborts the run. The error
/// carries the failing operation and the run's request id.
pub fn run_report<S>(service: &S, host: &str, options: &ReportOptions) -> Result<ReportOutcome>
where
    S: ProfileService + ?Sized,
{
    let request_id = RequestId::new();
    let span = tracing::info_span!("report", request_id = %request_id);
    let _guard = span.enter();

    let start = Instant::now();
    log_op_start!("run_report", host = host, view = ?options.view);

    let result = run_pipeline(service, host, options, &request_id);
    let duration_ms = start.elapsed().as_millis() as u64;

    match &result {
        Ok(_) => {
            log_op_end!("run_report", duration_ms = duration_ms);
        }
        Err(err) => {
            log_op_error!("run_report", err.clone(), duration_ms = duration_ms);
        }
    }
    result
}

fn run_pipeline<S>(
    service: &S,
    host: &str,
    options: &ReportOptions,
    request_id: &RequestId,
) -> Result<ReportOutcome>
where
    S: ProfileService + ?Sized,
{
    let history = fetch_host_history(service, host).map_err(in_op("fetch_history", request_id))?;

    let series = SnapshotSeries::normalize_all(&history.snapshots)
        .map_err(in_op("normalize", request_id))?;
    let series = options
        .range
        .filter(series)
        .map_err(in_op("filter_date_range", request_id))?;

    if series.is_empty() {
        return Ok(ReportOutcome::EmptyRange {
            message: format!("no historical profiles found between {}", options.range),
        });
    }
    tracing::info!(
        snapshot_count = series.len(),
        pair_count = series.len().saturating_sub(1),
        "rendering report"
    );

    let mut lines = render_title(&history.display_name, &series);
    lines.extend(render_pairs(&series, options.view).map_err(in_op("render", request_id))?);

    Ok(ReportOutcome::Rendered {
        display_name: history.display_name,
        lines,
    })
}
