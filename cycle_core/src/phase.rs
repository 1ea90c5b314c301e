//! Phase classification for a single date.
//!
//! A date is located inside an infinitely repeating cycle anchored at the
//! baseline start date:
//! - Dates before the baseline are not wrapped backwards
//! - Dates on or after it get a 1-based day index via `raw mod length + 1`
//! - The day index is matched against the menstrual, ovulation,
//!   follicular and luteal ranges in that order
//!
//! With the default constants a 28-day cycle splits into menstrual 1-5,
//! follicular 6-12, ovulation 13-16 and luteal 17-28.

use crate::{ColorTag, Phase, PhaseReading, PhaseRules};
use chrono::NaiveDate;

const ADVICE_AWAITING: &str = "Set a baseline start date first.";
const ADVICE_NOT_STARTED: &str = "The query date precedes the baseline start date.";
const ADVICE_MENSTRUAL: &str = "Rest more, keep warm and avoid strenuous exercise.";
const ADVICE_OVULATION: &str =
    "Fertile window. Body signals tend to be stronger over these days, pay attention to them.";
const ADVICE_FOLLICULAR: &str =
    "Energy is recovering and mood is good, a fine time for important plans and exercise.";
const ADVICE_LUTEAL: &str =
    "Mood may fluctuate as the body prepares for the next period. Keep calm and eat lightly.";
const ADVICE_UNCLASSIFIED: &str = "Within cycle range. Keep up healthy habits.";

/// 1-based day within the repeating cycle, or `None` before the baseline
///
/// A zero cycle length is treated as one day.
pub fn day_in_cycle(query: NaiveDate, baseline: NaiveDate, cycle_length: u32) -> Option<u32> {
    let raw = (query - baseline).num_days();
    if raw < 0 {
        return None;
    }
    let length = i64::from(cycle_length.max(1));
    Some((raw % length) as u32 + 1)
}

/// Classify `query` against a cycle of `cycle_length` days starting at `baseline`
pub fn classify(
    query: NaiveDate,
    baseline: Option<NaiveDate>,
    cycle_length: u32,
    rules: &PhaseRules,
) -> PhaseReading {
    let Some(baseline) = baseline else {
        return reading(Phase::AwaitingFirstRecord, None);
    };

    let Some(day) = day_in_cycle(query, baseline, cycle_length) else {
        return reading(Phase::CycleNotYetStarted, None);
    };

    let phase = phase_for_day(day, cycle_length.max(1), rules);
    if phase == Phase::Unclassified {
        tracing::warn!(
            day,
            cycle_length,
            ?rules,
            "Day in cycle matched no phase range; phase constants are inconsistent"
        );
    }

    reading(phase, Some(day))
}

/// Match a day index in `[1, cycle_length]` against the phase ranges
fn phase_for_day(day: u32, cycle_length: u32, rules: &PhaseRules) -> Phase {
    let day = i64::from(day);
    let length = i64::from(cycle_length);
    let period = i64::from(rules.period_length);

    if (1..=period).contains(&day) {
        return Phase::Menstrual;
    }

    // Offsets may exceed the cycle length, so these can go negative
    let ovulation_start = length - i64::from(rules.ovulation_window_start_offset) + 1;
    let ovulation_end = length - i64::from(rules.ovulation_window_end_offset) + 1;

    // Half-open window: the closing day belongs to the luteal phase
    if (ovulation_start..ovulation_end).contains(&day) {
        Phase::Ovulation
    } else if period < day && day < ovulation_start {
        Phase::Follicular
    } else if (ovulation_end..=length).contains(&day) {
        Phase::Luteal
    } else {
        Phase::Unclassified
    }
}

fn reading(phase: Phase, day_in_cycle: Option<u32>) -> PhaseReading {
    let (advice, color) = match phase {
        Phase::AwaitingFirstRecord => (ADVICE_AWAITING, ColorTag::Neutral),
        Phase::CycleNotYetStarted => (ADVICE_NOT_STARTED, ColorTag::Neutral),
        Phase::Menstrual => (ADVICE_MENSTRUAL, ColorTag::Red),
        Phase::Ovulation => (ADVICE_OVULATION, ColorTag::Green),
        Phase::Follicular => (ADVICE_FOLLICULAR, ColorTag::Blue),
        Phase::Luteal => (ADVICE_LUTEAL, ColorTag::Purple),
        Phase::Unclassified => (ADVICE_UNCLASSIFIED, ColorTag::Neutral),
    };

    PhaseReading {
        phase,
        advice,
        color,
        day_in_cycle,
    }
}
