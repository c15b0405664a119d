use super::selector::Curriculum;
use super::{
    CurriculumGrader, GradeResult, GradingError, GradingInput, LetterGrade, RuleVersion,
    WEIGHTED_ALPHABET,
};

/// Inclusive lower bounds on the weighted total, shared by both weighted curricula.
const LETTER_FLOORS: [(f64, LetterGrade); 4] = [
    (80.0, LetterGrade::A),
    (65.0, LetterGrade::B),
    (50.0, LetterGrade::C),
    (35.0, LetterGrade::D),
];

/// Two-component grader: each component is scaled against its maximum and weighted, and
/// the weighted total is mapped onto `A..=E`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedGrader {
    curriculum: Curriculum,
    rule_version: RuleVersion,
    label_a: &'static str,
    label_b: &'static str,
    weight_a: f64,
    weight_b: f64,
}

impl WeightedGrader {
    /// Continuous assessment 40%, examination 60%.
    pub const fn lower_primary() -> Self {
        Self {
            curriculum: Curriculum::LowerPrimary,
            rule_version: RuleVersion::PrimaryV1,
            label_a: "CA",
            label_b: "Exam",
            weight_a: 40.0,
            weight_b: 60.0,
        }
    }

    /// School-based assessment 20%, external assessment 80%.
    pub const fn lower_secondary() -> Self {
        Self {
            curriculum: Curriculum::LowerSecondary,
            rule_version: RuleVersion::NcdcV1,
            label_a: "School-Based",
            label_b: "External",
            weight_a: 20.0,
            weight_b: 80.0,
        }
    }

    pub fn weights(&self) -> (f64, f64) {
        (self.weight_a, self.weight_b)
    }

    /// Maxima must be positive; that is the caller's precondition and is not re-checked.
    pub fn compute_grade(
        &self,
        component_a: f64,
        component_b: f64,
        max_a: f64,
        max_b: f64,
    ) -> GradeResult {
        let percent_a = component_a * self.weight_a / max_a;
        let percent_b = component_b * self.weight_b / max_b;
        let total = percent_a + percent_b;
        let grade = letter_for_total(total);

        let reason = format!(
            "{}: {:.2}/{:.0} ({:.0}%) = {:.2}, {}: {:.2}/{:.0} ({:.0}%) = {:.2}, Total: {:.2} -> Grade {}",
            self.label_a,
            component_a,
            max_a,
            self.weight_a,
            percent_a,
            self.label_b,
            component_b,
            max_b,
            self.weight_b,
            percent_b,
            total,
            grade
        );

        GradeResult::new(grade, reason, self.rule_version)
    }
}

impl CurriculumGrader for WeightedGrader {
    fn curriculum(&self) -> Curriculum {
        self.curriculum
    }

    fn rule_version(&self) -> RuleVersion {
        self.rule_version
    }

    fn alphabet(&self) -> &'static [LetterGrade] {
        &WEIGHTED_ALPHABET
    }

    fn grade(&self, input: &GradingInput) -> Result<GradeResult, GradingError> {
        match input {
            GradingInput::Components {
                component_a,
                component_b,
                max_a,
                max_b,
            } => Ok(self.compute_grade(*component_a, *component_b, *max_a, *max_b)),
            other => Err(GradingError::InputShapeMismatch {
                curriculum: self.curriculum,
                expected: "weighted components",
                received: other.shape(),
            }),
        }
    }
}

pub(crate) fn letter_for_total(total: f64) -> LetterGrade {
    LETTER_FLOORS
        .iter()
        .find(|(floor, _)| total >= *floor)
        .map(|(_, grade)| *grade)
        .unwrap_or(LetterGrade::E)
}
