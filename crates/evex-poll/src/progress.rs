//! Advisory progress derivation for the poll loop.

use evex_types::TaskStatus;
use tokio::time::Instant;

/// Estimated time to completion for a polled task.
///
/// Derived from the most recent observed progress rate between two polls,
/// not a cumulative average since job start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Eta {
    /// The server did not report a total, so no estimate is computable.
    Unknown,
    /// A total is known but no valid rate has been observed yet.
    Calculating,
    /// Estimated seconds remaining.
    Seconds(f64),
}

/// Advisory progress information for one poll iteration.
///
/// Purely observational; never affects the poll loop's control flow.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// Server-reported state, for display.
    pub state_label: String,
    /// Items completed so far.
    pub completed: u64,
    /// Total items expected (0 means unknown).
    pub total: u64,
    /// Completion percentage, present only when the total is known.
    pub percent: Option<f64>,
    /// Remaining-time estimate.
    pub eta: Eta,
}

/// Derives the advisory update for the current sample.
///
/// The ETA uses a sliding two-sample rate: it is only numeric when a
/// previous sample exists and the progress count strictly advanced since
/// then. Every ratio is gated on a positive denominator.
pub(crate) fn derive_update(
    status: &TaskStatus,
    prev: Option<(u64, Instant)>,
    now: Instant,
) -> ProgressUpdate {
    let (percent, eta) = if status.total > 0 {
        let percent = 100.0 * status.progress_count as f64 / status.total as f64;
        (Some(percent), derive_eta(status, prev, now))
    } else {
        (None, Eta::Unknown)
    };

    ProgressUpdate {
        state_label: status.state.label().to_string(),
        completed: status.progress_count,
        total: status.total,
        percent,
        eta,
    }
}

fn derive_eta(status: &TaskStatus, prev: Option<(u64, Instant)>, now: Instant) -> Eta {
    let Some((prev_count, prev_time)) = prev else {
        return Eta::Calculating;
    };
    if status.progress_count <= prev_count {
        return Eta::Calculating;
    }

    let elapsed = now.duration_since(prev_time).as_secs_f64();
    if elapsed <= 0.0 {
        return Eta::Calculating;
    }

    let rate = (status.progress_count - prev_count) as f64 / elapsed;
    if rate > 0.0 {
        let remaining = status.total.saturating_sub(status.progress_count);
        Eta::Seconds(remaining as f64 / rate)
    } else {
        Eta::Calculating
    }
}
