//! Conversions between the 10-point and 4-point scales.
//!
//! Two discrete tables coexist and are deliberately kept apart:
//!
//! - [`ConversionPolicy::StandardTable`] is the 8-tier table where 8.5 and above maps to 4.0.
//! - [`ConversionPolicy::SemesterTable`] is the 9-tier table used for semester GPA, where
//!   4.0 needs 9.0 and the 8.5 band maps to 3.7 (grade "A").
//!
//! The same 10-point score can therefore convert differently (8.7 gives 4.0 under the
//! standard table and 3.7 under the semester table). Callers pick the policy explicitly.

use super::rounding::round_hundredths;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One row of a discrete conversion table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeBand {
    /// Inclusive lower bound on the 10-point scale.
    pub min_score10: f64,
    pub score4: f64,
    /// Human-readable 10-point range covered by the band.
    pub range_label: &'static str,
    pub letter: &'static str,
}

const fn band(
    min_score10: f64,
    score4: f64,
    range_label: &'static str,
    letter: &'static str,
) -> GradeBand {
    GradeBand {
        min_score10,
        score4,
        range_label,
        letter,
    }
}

const STANDARD_BANDS: [GradeBand; 8] = [
    band(8.5, 4.0, "8.5 - 10.0", "A"),
    band(8.0, 3.5, "8.0 - 8.4", "B+"),
    band(7.0, 3.0, "7.0 - 7.9", "B"),
    band(6.5, 2.5, "6.5 - 6.9", "C+"),
    band(5.5, 2.0, "5.5 - 6.4", "C"),
    band(5.0, 1.5, "5.0 - 5.4", "D+"),
    band(4.0, 1.0, "4.0 - 4.9", "D"),
    band(0.0, 0.0, "0.0 - 3.9", "F"),
];

const SEMESTER_BANDS: [GradeBand; 9] = [
    band(9.0, 4.0, "9.0 - 10.0", "A+"),
    band(8.5, 3.7, "8.5 - 8.9", "A"),
    band(8.0, 3.5, "8.0 - 8.4", "B+"),
    band(7.0, 3.0, "7.0 - 7.9", "B"),
    band(6.5, 2.5, "6.5 - 6.9", "C+"),
    band(5.5, 2.0, "5.5 - 6.4", "C"),
    band(5.0, 1.5, "5.0 - 5.4", "D+"),
    band(4.0, 1.0, "4.0 - 4.9", "D"),
    band(0.0, 0.0, "0.0 - 3.9", "F"),
];

const UNKNOWN_RANGE: &str = "Unknown";

fn lookup_four(bands: &[GradeBand], score10: f64) -> f64 {
    bands
        .iter()
        .find(|band| score10 >= band.min_score10)
        .map(|band| band.score4)
        .unwrap_or(0.0)
}

fn lookup_range(bands: &[GradeBand], score4: f64) -> &'static str {
    bands
        .iter()
        .find(|band| score4 >= band.score4)
        .map(|band| band.range_label)
        .unwrap_or(UNKNOWN_RANGE)
}

/// Standard table, 10-point score to 4-point score.
pub fn table_to_four(score10: f64) -> f64 {
    lookup_four(&STANDARD_BANDS, score10)
}

/// Standard table, 4-point score to the 10-point range it came from.
pub fn table_to_ten(score4: f64) -> &'static str {
    lookup_range(&STANDARD_BANDS, score4)
}

pub fn semester_table_to_four(score10: f64) -> f64 {
    lookup_four(&SEMESTER_BANDS, score10)
}

pub fn semester_table_to_ten(score4: f64) -> &'static str {
    lookup_range(&SEMESTER_BANDS, score4)
}

pub fn linear_to_four(score10: f64) -> f64 {
    score10 / 10.0 * 4.0
}

pub fn linear_to_ten(score4: f64) -> f64 {
    score4 / 4.0 * 10.0
}

/// Named conversion policy selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionPolicy {
    Linear,
    StandardTable,
    #[default]
    SemesterTable,
}

/// 10-point equivalent of a 4-point score. Tables are lossy and only yield a range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TenPointEquivalent {
    Exact(f64),
    Range(&'static str),
}

impl fmt::Display for TenPointEquivalent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TenPointEquivalent::Exact(value) => write!(f, "{value:.2}"),
            TenPointEquivalent::Range(label) => f.write_str(label),
        }
    }
}

impl ConversionPolicy {
    pub const ALL: [ConversionPolicy; 3] = [
        ConversionPolicy::Linear,
        ConversionPolicy::StandardTable,
        ConversionPolicy::SemesterTable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConversionPolicy::Linear => "linear",
            ConversionPolicy::StandardTable => "standard_table",
            ConversionPolicy::SemesterTable => "semester_table",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConversionPolicy::Linear => "Linear (score / 10 * 4)",
            ConversionPolicy::StandardTable => "Standard table (8 tiers)",
            ConversionPolicy::SemesterTable => "Semester table (9 tiers)",
        }
    }

    /// Reference table rows, highest band first. Empty for the linear policy.
    pub fn bands(self) -> &'static [GradeBand] {
        match self {
            ConversionPolicy::Linear => &[],
            ConversionPolicy::StandardTable => &STANDARD_BANDS,
            ConversionPolicy::SemesterTable => &SEMESTER_BANDS,
        }
    }

    pub fn to_four(self, score10: f64) -> f64 {
        match self {
            ConversionPolicy::Linear => linear_to_four(score10),
            ConversionPolicy::StandardTable => table_to_four(score10),
            ConversionPolicy::SemesterTable => semester_table_to_four(score10),
        }
    }

    pub fn to_ten(self, score4: f64) -> TenPointEquivalent {
        match self {
            ConversionPolicy::Linear => TenPointEquivalent::Exact(linear_to_ten(score4)),
            ConversionPolicy::StandardTable => TenPointEquivalent::Range(table_to_ten(score4)),
            ConversionPolicy::SemesterTable => {
                TenPointEquivalent::Range(semester_table_to_ten(score4))
            }
        }
    }

    /// 4-point figure reported next to an aggregated GPA. Linear results are kept at
    /// the same two-decimal precision as the 10-point GPA.
    pub fn gpa_to_four(self, gpa10: f64) -> f64 {
        match self {
            ConversionPolicy::Linear => round_hundredths(linear_to_four(gpa10)),
            table => table.to_four(gpa10),
        }
    }

    pub fn letter_grade(self, score10: f64) -> Option<&'static str> {
        let bands = self.bands();
        if bands.is_empty() {
            return None;
        }

        Some(
            bands
                .iter()
                .find(|band| score10 >= band.min_score10)
                .map(|band| band.letter)
                .unwrap_or("F"),
        )
    }
}

impl fmt::Display for ConversionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown conversion policy '{0}' (expected linear, standard_table or semester_table)")]
pub struct ParsePolicyError(pub String);

impl FromStr for ConversionPolicy {
    type Err = ParsePolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "linear" => Ok(Self::Linear),
            "standard" | "standard_table" => Ok(Self::StandardTable),
            "semester" | "semester_table" => Ok(Self::SemesterTable),
            _ => Err(ParsePolicyError(value.to_string())),
        }
    }
}
