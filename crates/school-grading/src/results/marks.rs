use std::collections::BTreeMap;

use super::domain::{ComponentKind, MarkEntry};
use crate::grading::{Curriculum, GradingInput};

/// Marks that cannot be handed to a grader.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarksError {
    #[error("{component} score must be a finite, non-negative number")]
    InvalidScore { component: ComponentKind },
    #[error("{component} maximum must be a finite number greater than zero")]
    InvalidMaximum { component: ComponentKind },
    #[error("{component} score {score} exceeds its maximum {max}")]
    ScoreAboveMaximum {
        component: ComponentKind,
        score: f64,
        max: f64,
    },
    #[error("{curriculum} grading requires at least one {component} mark")]
    MissingComponent {
        curriculum: Curriculum,
        component: ComponentKind,
    },
    #[error("{component} marks are not used by {curriculum} grading")]
    UnexpectedComponent {
        curriculum: Curriculum,
        component: ComponentKind,
    },
    #[error("paper {number} was recorded more than once")]
    DuplicatePaper { number: u8 },
}

/// Rejects marks the graders assume never reach them: non-finite or negative scores,
/// non-positive maxima and scores above their maximum.
pub fn validate_entries(entries: &[MarkEntry]) -> Result<(), MarksError> {
    for entry in entries {
        if !entry.max.is_finite() || entry.max <= 0.0 {
            return Err(MarksError::InvalidMaximum {
                component: entry.component,
            });
        }
        if !entry.score.is_finite() || entry.score < 0.0 {
            return Err(MarksError::InvalidScore {
                component: entry.component,
            });
        }
        if entry.score > entry.max {
            return Err(MarksError::ScoreAboveMaximum {
                component: entry.component,
                score: entry.score,
                max: entry.max,
            });
        }
    }
    Ok(())
}

/// Validates recorded marks and folds them into the input shape of the curriculum's grader.
///
/// Weighted curricula sum every coursework entry into the first component and every
/// examination entry into the second, maxima included. Advanced-secondary converts each
/// paper to a percentage and orders papers by number; the paper count is left to the
/// grader.
pub fn merge_components(
    curriculum: Curriculum,
    entries: &[MarkEntry],
) -> Result<GradingInput, MarksError> {
    validate_entries(entries)?;

    match curriculum {
        Curriculum::LowerPrimary | Curriculum::LowerSecondary => {
            merge_weighted(curriculum, entries)
        }
        Curriculum::AdvancedSecondary => merge_papers(entries),
    }
}

fn merge_weighted(
    curriculum: Curriculum,
    entries: &[MarkEntry],
) -> Result<GradingInput, MarksError> {
    let mut coursework: Option<(f64, f64)> = None;
    let mut examination: Option<(f64, f64)> = None;

    for entry in entries {
        let slot = match entry.component {
            ComponentKind::Coursework => &mut coursework,
            ComponentKind::Examination => &mut examination,
            component @ ComponentKind::Paper { .. } => {
                return Err(MarksError::UnexpectedComponent {
                    curriculum,
                    component,
                })
            }
        };
        let (score, max) = slot.get_or_insert((0.0, 0.0));
        *score += entry.score;
        *max += entry.max;
    }

    let (component_a, max_a) = coursework.ok_or(MarksError::MissingComponent {
        curriculum,
        component: ComponentKind::Coursework,
    })?;
    let (component_b, max_b) = examination.ok_or(MarksError::MissingComponent {
        curriculum,
        component: ComponentKind::Examination,
    })?;

    Ok(GradingInput::Components {
        component_a,
        component_b,
        max_a,
        max_b,
    })
}

fn merge_papers(entries: &[MarkEntry]) -> Result<GradingInput, MarksError> {
    let mut papers = BTreeMap::new();

    for entry in entries {
        let number = match entry.component {
            ComponentKind::Paper { number } => number,
            component => {
                return Err(MarksError::UnexpectedComponent {
                    curriculum: Curriculum::AdvancedSecondary,
                    component,
                })
            }
        };
        let percentage = entry.score * 100.0 / entry.max;
        if papers.insert(number, percentage).is_some() {
            return Err(MarksError::DuplicatePaper { number });
        }
    }

    Ok(GradingInput::Papers {
        marks: papers.into_values().collect(),
    })
}
