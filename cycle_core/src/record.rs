//! Recording new cycles into a profile.
//!
//! Recording never mutates the profile it is given. A successful call
//! returns the updated profile, which the caller persists and keeps.

use crate::{CycleProfile, CycleRecord, PhaseRules};
use chrono::{Duration, NaiveDate};

/// Reason a new cycle was refused
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecordRejection {
    #[error("New start date {start} must be later than the latest recorded start {latest}")]
    NotAfterLatest { start: NaiveDate, latest: NaiveDate },

    #[error("Cannot record a cycle starting in the future ({start} is after {today})")]
    StartInFuture { start: NaiveDate, today: NaiveDate },
}

/// Non-fatal adjustment applied while recording
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordWarning {
    /// End preceded start and was moved onto the start date
    EndBeforeStart { requested_end: NaiveDate },
}

impl std::fmt::Display for RecordWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordWarning::EndBeforeStart { requested_end } => write!(
                f,
                "End date {} cannot be earlier than the start date; using the start date instead",
                requested_end
            ),
        }
    }
}

/// Outcome of a successful recording
#[derive(Clone, Debug)]
pub struct RecordedCycle {
    pub profile: CycleProfile,
    pub record: CycleRecord,
    pub warnings: Vec<RecordWarning>,
}

/// Default end date for a cycle starting on `start`
///
/// Clamped to the last representable date.
pub fn default_end(start: NaiveDate, rules: &PhaseRules) -> NaiveDate {
    start
        .checked_add_signed(Duration::days(i64::from(rules.period_length.saturating_sub(1))))
        .unwrap_or(NaiveDate::MAX)
}

impl CycleProfile {
    /// Validate and append a new cycle, returning the updated profile
    ///
    /// Without an explicit `end`, the cycle is assumed to last
    /// `period_length` days.
    pub fn record_cycle(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
        today: NaiveDate,
        rules: &PhaseRules,
    ) -> std::result::Result<RecordedCycle, RecordRejection> {
        if let Some(latest) = self.baseline() {
            if start <= latest {
                tracing::info!("Rejected start {} (latest is {})", start, latest);
                return Err(RecordRejection::NotAfterLatest { start, latest });
            }
        }

        if start > today {
            tracing::info!("Rejected future start {} (today is {})", start, today);
            return Err(RecordRejection::StartInFuture { start, today });
        }

        let mut warnings = Vec::new();
        let end = match end.unwrap_or_else(|| default_end(start, rules)) {
            requested_end if requested_end < start => {
                warnings.push(RecordWarning::EndBeforeStart { requested_end });
                start
            }
            end => end,
        };

        let record = CycleRecord::new(start, Some(end));
        let mut history = self.history.clone();
        history.push(record.clone());
        let profile = CycleProfile::from_records(history);

        tracing::info!(
            "Recorded cycle starting {}; average length now {} days",
            start,
            profile.average_length
        );

        Ok(RecordedCycle {
            profile,
            record,
            warnings,
        })
    }
}
