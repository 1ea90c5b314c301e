//! Core domain types for the Luna cycle tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Cycle records and the ordered history
//! - The in-memory profile (history + derived average)
//! - Phase labels, colour tags and classification readings

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Cycle Records
// ============================================================================

/// A single recorded cycle
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleRecord {
    pub start: NaiveDate,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl CycleRecord {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Inclusive length of the bleed in days, if an end was recorded
    pub fn period_days(&self) -> Option<i64> {
        self.end.map(|end| (end - self.start).num_days() + 1)
    }
}

/// Ordered cycle history, ascending by start date
pub type CycleHistory = Vec<CycleRecord>;

// ============================================================================
// Profile
// ============================================================================

/// Cycle history plus the derived average cycle length
///
/// Persisted as `{"cycles": [...], "avg_cycle": n}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleProfile {
    #[serde(rename = "cycles", default)]
    pub history: CycleHistory,

    #[serde(rename = "avg_cycle", default = "default_average_length")]
    pub average_length: u32,
}

fn default_average_length() -> u32 {
    crate::statistics::DEFAULT_CYCLE_LENGTH
}

impl Default for CycleProfile {
    fn default() -> Self {
        Self {
            history: Vec::new(),
            average_length: default_average_length(),
        }
    }
}

impl CycleProfile {
    /// Build a profile from records in any order, deriving the average
    pub fn from_records(mut history: CycleHistory) -> Self {
        history.sort_by_key(|c| c.start);
        let average_length = crate::statistics::compute_average_length(&history);
        Self {
            history,
            average_length,
        }
    }

    /// Start date of the most recent cycle, the anchor for all phase math
    pub fn baseline(&self) -> Option<NaiveDate> {
        self.history.last().map(|c| c.start)
    }

    pub fn latest(&self) -> Option<&CycleRecord> {
        self.history.last()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

// ============================================================================
// Phases
// ============================================================================

/// Outcome label of a phase classification
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No cycle has been recorded yet
    AwaitingFirstRecord,
    /// The queried date lies before the baseline start
    CycleNotYetStarted,
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
    /// Day fell outside every named range
    Unclassified,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::AwaitingFirstRecord => "Awaiting first record",
            Phase::CycleNotYetStarted => "Cycle not yet started",
            Phase::Menstrual => "Menstrual phase",
            Phase::Follicular => "Follicular phase",
            Phase::Ovulation => "Ovulation window",
            Phase::Luteal => "Luteal phase",
            Phase::Unclassified => "Within cycle range",
        }
    }

    /// True for the four named phases of a running cycle
    pub fn is_named(&self) -> bool {
        matches!(
            self,
            Phase::Menstrual | Phase::Follicular | Phase::Ovulation | Phase::Luteal
        )
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Display colour associated with a phase
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColorTag {
    Neutral,
    Red,
    Green,
    Blue,
    Purple,
}

impl ColorTag {
    pub fn name(&self) -> &'static str {
        match self {
            ColorTag::Neutral => "gray",
            ColorTag::Red => "red",
            ColorTag::Green => "green",
            ColorTag::Blue => "blue",
            ColorTag::Purple => "purple",
        }
    }

    /// ANSI SGR foreground code for terminal rendering
    pub fn ansi_code(&self) -> u8 {
        match self {
            ColorTag::Neutral => 90,
            ColorTag::Red => 31,
            ColorTag::Green => 32,
            ColorTag::Blue => 34,
            ColorTag::Purple => 35,
        }
    }
}

/// Result of classifying a date against a cycle
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseReading {
    pub phase: Phase,
    pub advice: &'static str,
    pub color: ColorTag,
    /// 1-based day within the repeating cycle, when one applies
    pub day_in_cycle: Option<u32>,
}
