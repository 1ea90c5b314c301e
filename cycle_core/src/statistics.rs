//! Average cycle length estimation.
//!
//! The average is the arithmetic mean of the gaps between consecutive
//! recorded start dates, rounded half-up to whole days.

use crate::CycleRecord;
use chrono::NaiveDate;

/// Cycle length assumed until at least two usable starts are recorded
pub const DEFAULT_CYCLE_LENGTH: u32 = 28;

/// Gaps in days between consecutive starts, keeping only positive ones
fn positive_gaps(history: &[CycleRecord]) -> Vec<i64> {
    history
        .windows(2)
        .map(|w| (w[1].start - w[0].start).num_days())
        .filter(|&gap| gap > 0)
        .collect()
}

/// Compute the average cycle length from a history sorted by start date
///
/// Returns [`DEFAULT_CYCLE_LENGTH`] when fewer than two records exist or
/// when no positive gap remains after discarding duplicates and
/// out-of-order pairs.
pub fn compute_average_length(history: &[CycleRecord]) -> u32 {
    if history.len() < 2 {
        return DEFAULT_CYCLE_LENGTH;
    }

    let gaps = positive_gaps(history);
    if gaps.is_empty() {
        tracing::debug!("No positive gaps in {} records, using default", history.len());
        return DEFAULT_CYCLE_LENGTH;
    }

    let mean = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
    // Every gap is >= 1, so the rounded mean is too
    mean.round() as u32
}

/// Summary figures for the history view
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleSummary {
    pub total_records: usize,
    pub gap_count: usize,
    pub shortest_gap: Option<i64>,
    pub longest_gap: Option<i64>,
    pub average_length: u32,
    pub latest_start: Option<NaiveDate>,
    pub latest_end: Option<NaiveDate>,
}

/// Summarize a history sorted by start date
pub fn cycle_summary(history: &[CycleRecord]) -> CycleSummary {
    let gaps = positive_gaps(history);
    let latest = history.last();

    CycleSummary {
        total_records: history.len(),
        gap_count: gaps.len(),
        shortest_gap: gaps.iter().copied().min(),
        longest_gap: gaps.iter().copied().max(),
        average_length: compute_average_length(history),
        latest_start: latest.map(|c| c.start),
        latest_end: latest.and_then(|c| c.end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn starts(dates: &[&str]) -> Vec<CycleRecord> {
        dates
            .iter()
            .map(|d| CycleRecord::new(date(d), None))
            .collect()
    }

    #[test]
    fn test_empty_history_uses_default() {
        assert_eq!(compute_average_length(&[]), 28);
    }

    #[test]
    fn test_single_record_uses_default() {
        assert_eq!(compute_average_length(&starts(&["2024-01-01"])), 28);
    }

    #[test]
    fn test_equal_gaps_return_gap() {
        for gap in [21, 26, 30, 35] {
            let base = date("2023-06-01");
            let history: Vec<_> = (0..5)
                .map(|i| CycleRecord::new(base + Duration::days(i * gap), None))
                .collect();
            assert_eq!(compute_average_length(&history), gap as u32);
        }
    }

    #[test]
    fn test_mean_is_rounded() {
        // Gaps 28, 30, 31 -> 29.67
        let history = starts(&["2024-01-01", "2024-01-29", "2024-02-28", "2024-03-30"]);
        assert_eq!(compute_average_length(&history), 30);

        // Gaps 27, 28, 28 -> 27.67
        let history = starts(&["2024-01-01", "2024-01-28", "2024-02-25", "2024-03-24"]);
        assert_eq!(compute_average_length(&history), 28);
    }

    #[test]
    fn test_duplicate_starts_are_discarded() {
        let history = starts(&["2024-01-01", "2024-01-01", "2024-01-31"]);
        assert_eq!(compute_average_length(&history), 30);
    }

    #[test]
    fn test_all_gaps_discarded_uses_default() {
        let history = starts(&["2024-01-05", "2024-01-05", "2024-01-01"]);
        assert_eq!(compute_average_length(&history), DEFAULT_CYCLE_LENGTH);
    }

    #[test]
    fn test_summary() {
        let mut history = starts(&["2024-01-01", "2024-01-27", "2024-02-26"]);
        history[2].end = Some(date("2024-03-01"));

        let summary = cycle_summary(&history);
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.gap_count, 2);
        assert_eq!(summary.shortest_gap, Some(26));
        assert_eq!(summary.longest_gap, Some(30));
        assert_eq!(summary.average_length, 28);
        assert_eq!(summary.latest_start, Some(date("2024-02-26")));
        assert_eq!(summary.latest_end, Some(date("2024-03-01")));
    }

    #[test]
    fn test_summary_of_empty_history() {
        let summary = cycle_summary(&[]);
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.shortest_gap, None);
        assert_eq!(summary.average_length, DEFAULT_CYCLE_LENGTH);
    }
}
