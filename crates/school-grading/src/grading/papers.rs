use std::collections::BTreeMap;

use super::codes::{map_mark_to_code, OrdinalCode};
use super::selector::Curriculum;
use super::{
    CurriculumGrader, GradeResult, GradingError, GradingInput, LetterGrade, RuleVersion,
    PAPER_ALPHABET,
};

/// Inclusive upper bounds on a two-code sum; anything above the last ceiling is `O`.
const SUM_CEILINGS: [(u8, LetterGrade); 5] = [
    (6, LetterGrade::A),
    (10, LetterGrade::B),
    (12, LetterGrade::C),
    (15, LetterGrade::D),
    (18, LetterGrade::E),
];

const MIN_PAPERS: usize = 2;
const MAX_PAPERS: usize = 4;

/// Advanced-secondary grader: every paper is coded 1 to 9 and the best two codes decide
/// the subject grade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaperAggregationGrader;

impl PaperAggregationGrader {
    pub fn map_mark_to_code(&self, mark: f64) -> OrdinalCode {
        map_mark_to_code(mark)
    }

    /// Grades 2, 3 or 4 paper percentages. Any other count yields the `F` sentinel.
    pub fn compute_grade_from_papers(&self, paper_marks: &[f64]) -> GradeResult {
        let count = paper_marks.len();
        if !(MIN_PAPERS..=MAX_PAPERS).contains(&count) {
            return GradeResult::new(
                LetterGrade::F,
                format!(
                    "Invalid number of papers: {count} (expected {MIN_PAPERS} to {MAX_PAPERS})"
                ),
                RuleVersion::UaceV1,
            );
        }

        let codes: Vec<OrdinalCode> = paper_marks
            .iter()
            .map(|mark| self.map_mark_to_code(*mark))
            .collect();
        let paper_codes: BTreeMap<String, OrdinalCode> = codes
            .iter()
            .enumerate()
            .map(|(index, code)| (format!("Paper{}", index + 1), *code))
            .collect();

        let mut sorted = codes.clone();
        sorted.sort_unstable();

        let (grade, rule) = match count {
            2 => two_paper_rule(&sorted),
            3 => three_paper_rule(&sorted),
            _ => four_paper_rule(&sorted),
        };

        let reason = format!(
            "Papers: [{}] -> Codes: [{}] -> {} -> Grade {}",
            join(paper_marks),
            join(&codes),
            rule,
            grade
        );

        GradeResult::new(grade, reason, RuleVersion::UaceV1).with_paper_codes(paper_codes)
    }
}

impl CurriculumGrader for PaperAggregationGrader {
    fn curriculum(&self) -> Curriculum {
        Curriculum::AdvancedSecondary
    }

    fn rule_version(&self) -> RuleVersion {
        RuleVersion::UaceV1
    }

    fn alphabet(&self) -> &'static [LetterGrade] {
        &PAPER_ALPHABET
    }

    fn grade(&self, input: &GradingInput) -> Result<GradeResult, GradingError> {
        match input {
            GradingInput::Papers { marks } => Ok(self.compute_grade_from_papers(marks)),
            other => Err(GradingError::InputShapeMismatch {
                curriculum: Curriculum::AdvancedSecondary,
                expected: "paper marks",
                received: other.shape(),
            }),
        }
    }
}

/// Codes are expected in ascending order; the first two are the best.
fn best_two_sum(codes: &[OrdinalCode]) -> u8 {
    codes[0].value() + codes[1].value()
}

pub(super) fn grade_for_sum(sum: u8) -> (LetterGrade, String) {
    match SUM_CEILINGS.iter().find(|(ceiling, _)| sum <= *ceiling) {
        Some((ceiling, grade)) => (*grade, format!("{sum} <= {ceiling}")),
        None => {
            let (last, _) = SUM_CEILINGS[SUM_CEILINGS.len() - 1];
            (LetterGrade::O, format!("{sum} > {last}"))
        }
    }
}

pub(super) fn two_paper_rule(codes: &[OrdinalCode]) -> (LetterGrade, String) {
    let (grade, detail) = grade_for_sum(best_two_sum(codes));
    (grade, format!("Sum {detail}"))
}

/// Weak-but-passing third paper carve-out: two 9s among the best codes with the remaining
/// code at 7 or better forces `E`. Checked before the sum table.
pub(super) fn science_exception_applies(codes: &[OrdinalCode]) -> bool {
    codes.len() == 3 && codes[0].value() == 9 && codes[1].value() == 9 && codes[2].value() <= 7
}

pub(super) fn three_paper_rule(codes: &[OrdinalCode]) -> (LetterGrade, String) {
    let sum = best_two_sum(codes);
    if science_exception_applies(codes) {
        return (
            LetterGrade::E,
            format!(
                "Science exception: codes [{}], best 2 sum {sum} with third code <= 7",
                join(codes)
            ),
        );
    }

    let (grade, detail) = grade_for_sum(sum);
    (grade, format!("Best 2 sum {detail}"))
}

pub(super) fn four_paper_rule(codes: &[OrdinalCode]) -> (LetterGrade, String) {
    let (grade, detail) = grade_for_sum(best_two_sum(codes));
    (grade, format!("Best 2 sum {detail}"))
}

fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
