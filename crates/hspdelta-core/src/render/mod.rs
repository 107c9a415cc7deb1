//! Report rendering.
//!
//! Two views over a [`SnapshotSeries`]:
//!
//! - [`ReportView::Structured`]: one block of CHANGED / ADDED / REMOVED
//!   entries per consecutive pair, built from [`crate::diff::compute_diff`]
//! - [`ReportView::UnifiedDiff`]: a line diff of each pair's canonical JSON,
//!   bypassing the differ entirely
//!
//! Renderers only produce ordered text lines; printing is the caller's job.

pub mod report;
pub mod unified;

use crate::diff::compute_diff;
use crate::errors::Result;
use crate::snapshot::SnapshotSeries;

/// Which rendering the caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportView {
    #[default]
    Structured,
    UnifiedDiff,
}

/// Render every consecutive pair of the series in the requested view.
///
/// # Errors
///
/// `Serialization` if a canonical snapshot cannot be serialized (unified view).
pub fn render_pairs(series: &SnapshotSeries, view: ReportView) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for (older, newer) in series.pairs() {
        match view {
            ReportView::Structured => {
                lines.extend(report::render_delta(&compute_diff(older, newer)));
            }
            ReportView::UnifiedDiff => {
                lines.extend(unified::render_unified(older, newer)?);
            }
        }
    }
    Ok(lines)
}

/// Title line plus a blank separator, shared by both views.
pub fn render_title(display_name: &str, series: &SnapshotSeries) -> Vec<String> {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) => vec![
            format!(
                "Change report for {display_name} from {} to {}",
                first.captured_date(),
                last.captured_date()
            ),
            String::new(),
        ],
        _ => Vec::new(),
    }
}
