use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    CurriculumGrader, GradeResult, GradingError, GradingInput, LetterGrade,
    PaperAggregationGrader, RuleVersion, WeightedGrader,
};

/// Curriculum families; each has its own input shape, thresholds and rule version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curriculum {
    LowerPrimary,
    LowerSecondary,
    AdvancedSecondary,
}

impl Curriculum {
    /// Partitions class levels: `P4..P7`, `S1..S4` and `S5..S6`. Trimmed and
    /// case-insensitive; anything else has no curriculum.
    pub fn from_level(level: &str) -> Option<Self> {
        match level.trim().to_ascii_uppercase().as_str() {
            "P4" | "P5" | "P6" | "P7" => Some(Curriculum::LowerPrimary),
            "S1" | "S2" | "S3" | "S4" => Some(Curriculum::LowerSecondary),
            "S5" | "S6" => Some(Curriculum::AdvancedSecondary),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Curriculum::LowerPrimary => "lower-primary",
            Curriculum::LowerSecondary => "lower-secondary",
            Curriculum::AdvancedSecondary => "advanced-secondary",
        }
    }

    pub fn grader(&self) -> Grader {
        match self {
            Curriculum::LowerPrimary => Grader::LowerPrimary(WeightedGrader::lower_primary()),
            Curriculum::LowerSecondary => {
                Grader::LowerSecondary(WeightedGrader::lower_secondary())
            }
            Curriculum::AdvancedSecondary => Grader::AdvancedSecondary(PaperAggregationGrader),
        }
    }

    pub fn rule_version(&self) -> RuleVersion {
        self.grader().rule_version()
    }
}

impl fmt::Display for Curriculum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Grader for one curriculum family, dispatched by exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Grader {
    LowerPrimary(WeightedGrader),
    LowerSecondary(WeightedGrader),
    AdvancedSecondary(PaperAggregationGrader),
}

impl Grader {
    fn inner(&self) -> &dyn CurriculumGrader {
        match self {
            Grader::LowerPrimary(grader) | Grader::LowerSecondary(grader) => grader,
            Grader::AdvancedSecondary(grader) => grader,
        }
    }
}

impl CurriculumGrader for Grader {
    fn curriculum(&self) -> Curriculum {
        self.inner().curriculum()
    }

    fn rule_version(&self) -> RuleVersion {
        self.inner().rule_version()
    }

    fn alphabet(&self) -> &'static [LetterGrade] {
        self.inner().alphabet()
    }

    fn grade(&self, input: &GradingInput) -> Result<GradeResult, GradingError> {
        self.inner().grade(input)
    }
}

/// Returns the grader for a class level, or `None` when the level has no curriculum.
pub fn select_grader(level: &str) -> Option<Grader> {
    Curriculum::from_level(level).map(|curriculum| curriculum.grader())
}
