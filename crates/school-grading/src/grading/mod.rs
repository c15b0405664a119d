//! Curriculum grading engine.
//!
//! Graders are stateless and side-effect free: every call maps raw marks to a fresh
//! [`GradeResult`] carrying the letter grade, a derivation trace for audits, and the
//! fingerprint of the rule revision that produced it.

mod codes;
mod fingerprint;
mod papers;
mod selector;
mod weighted;

#[cfg(test)]
mod tests;

pub use codes::{map_mark_to_code, OrdinalCode};
pub use fingerprint::{RuleVersion, RuleVersionHash};
pub use papers::PaperAggregationGrader;
pub use selector::{select_grader, Curriculum, Grader};
pub use weighted::WeightedGrader;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Final grade token. Weighted curricula use `A..=E`; paper aggregation adds `O` and the
/// `F` sentinel for an invalid paper count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    E,
    O,
    F,
}

impl LetterGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::E => "E",
            LetterGrade::O => "O",
            LetterGrade::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const WEIGHTED_ALPHABET: [LetterGrade; 5] = [
    LetterGrade::A,
    LetterGrade::B,
    LetterGrade::C,
    LetterGrade::D,
    LetterGrade::E,
];

pub const PAPER_ALPHABET: [LetterGrade; 7] = [
    LetterGrade::A,
    LetterGrade::B,
    LetterGrade::C,
    LetterGrade::D,
    LetterGrade::E,
    LetterGrade::O,
    LetterGrade::F,
];

/// Outcome of one grading call. Fields are read-only once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    final_grade: LetterGrade,
    computation_reason: String,
    rule_version_hash: RuleVersionHash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    paper_codes: Option<BTreeMap<String, OrdinalCode>>,
}

impl GradeResult {
    pub(crate) fn new(
        final_grade: LetterGrade,
        computation_reason: String,
        rule_version: RuleVersion,
    ) -> Self {
        Self {
            final_grade,
            computation_reason,
            rule_version_hash: rule_version.fingerprint(),
            paper_codes: None,
        }
    }

    pub(crate) fn with_paper_codes(mut self, paper_codes: BTreeMap<String, OrdinalCode>) -> Self {
        self.paper_codes = Some(paper_codes);
        self
    }

    pub fn final_grade(&self) -> LetterGrade {
        self.final_grade
    }

    pub fn computation_reason(&self) -> &str {
        &self.computation_reason
    }

    pub fn rule_version_hash(&self) -> &RuleVersionHash {
        &self.rule_version_hash
    }

    /// Per-paper codes keyed `Paper1..PaperN`; only set by paper aggregation.
    pub fn paper_codes(&self) -> Option<&BTreeMap<String, OrdinalCode>> {
        self.paper_codes.as_ref()
    }
}

/// Raw marks in the shape a grader consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GradingInput {
    Components {
        component_a: f64,
        component_b: f64,
        max_a: f64,
        max_b: f64,
    },
    Papers { marks: Vec<f64> },
}

impl GradingInput {
    pub fn shape(&self) -> &'static str {
        match self {
            GradingInput::Components { .. } => "weighted components",
            GradingInput::Papers { .. } => "paper marks",
        }
    }
}

/// Contract shared by every curriculum grader.
pub trait CurriculumGrader {
    fn curriculum(&self) -> Curriculum;

    fn rule_version(&self) -> RuleVersion;

    /// Every grade this grader can emit.
    fn alphabet(&self) -> &'static [LetterGrade];

    fn grade(&self, input: &GradingInput) -> Result<GradeResult, GradingError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradingError {
    #[error("{curriculum} grading expects {expected}, got {received}")]
    InputShapeMismatch {
        curriculum: Curriculum,
        expected: &'static str,
        received: &'static str,
    },
}
