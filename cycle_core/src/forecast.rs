//! Next-cycle forecasting.
//!
//! Predictions assume every future cycle has exactly the average length,
//! counted forward from the baseline start date.

use chrono::{Duration, NaiveDate};

/// Where today stands relative to the predicted next start
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextCycleStatus {
    /// Next start is this many days away
    Upcoming(i64),
    DueToday,
    /// Predicted start passed this many days ago
    Late(i64),
}

/// Predicted start of the cycle following the baseline
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NextCycle {
    pub next_start: NaiveDate,
    /// Signed days from `today` to `next_start`
    pub days_until: i64,
    pub status: NextCycleStatus,
}

/// Forecast the start of the cycle after `baseline`, as seen from `today`
///
/// Returns `None` when no cycle has been recorded or the predicted start
/// falls outside the representable date range.
pub fn forecast_next(
    today: NaiveDate,
    baseline: Option<NaiveDate>,
    cycle_length: u32,
) -> Option<NextCycle> {
    let baseline = baseline?;
    let next_start = baseline.checked_add_signed(Duration::days(i64::from(cycle_length)))?;
    let days_until = (next_start - today).num_days();

    let status = match days_until {
        d if d > 0 => NextCycleStatus::Upcoming(d),
        0 => NextCycleStatus::DueToday,
        d => NextCycleStatus::Late(-d),
    };

    if let NextCycleStatus::Late(days) = status {
        tracing::debug!("Predicted start {} is {} days late", next_start, days);
    }

    Some(NextCycle {
        next_start,
        days_until,
        status,
    })
}

/// Start of the predicted cycle that follows the one containing `query`
///
/// Works on either side of the baseline by stepping whole cycles.
/// Returns `None` if that start is past the representable date range.
pub fn next_start_from(
    query: NaiveDate,
    baseline: NaiveDate,
    cycle_length: u32,
) -> Option<NaiveDate> {
    let length = i64::from(cycle_length.max(1));
    let raw = (query - baseline).num_days();
    baseline
        .checked_add_signed(Duration::days(raw - raw.rem_euclid(length)))?
        .checked_add_signed(Duration::days(length))
}
