use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for enrolled students.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Identifier wrapper for standard curriculum subjects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectId(pub String);

/// Identifier assigned to a stored subject result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultId(pub String);

/// Academic term label, e.g. `"Term 1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Term(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One stored result per student, subject, term and year. The store enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectResultKey {
    pub student_id: StudentId,
    pub subject_id: SubjectId,
    pub term: Term,
    pub year: i32,
}

/// Which assessment a recorded mark belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentKind {
    /// Continuous or school-based assessment.
    Coursework,
    /// End-of-term or external examination.
    Examination,
    Paper { number: u8 },
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Coursework => f.write_str("coursework"),
            ComponentKind::Examination => f.write_str("examination"),
            ComponentKind::Paper { number } => write!(f, "paper {number}"),
        }
    }
}

/// A single mark recorded by the marks-collection collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkEntry {
    pub component: ComponentKind,
    pub score: f64,
    pub max: f64,
}

impl MarkEntry {
    pub fn new(component: ComponentKind, score: f64, max: f64) -> Self {
        Self {
            component,
            score,
            max,
        }
    }
}

/// Everything the assembler needs to grade one student in one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingRequest {
    pub student_id: StudentId,
    pub subject_id: SubjectId,
    pub level: String,
    pub term: Term,
    pub year: i32,
    pub marks: Vec<MarkEntry>,
}

impl GradingRequest {
    pub fn key(&self) -> SubjectResultKey {
        SubjectResultKey {
            student_id: self.student_id.clone(),
            subject_id: self.subject_id.clone(),
            term: self.term.clone(),
            year: self.year,
        }
    }
}

/// Optional narrowing when listing a student's results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermFilter {
    #[serde(default)]
    pub term: Option<Term>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl TermFilter {
    pub fn matches(&self, key: &SubjectResultKey) -> bool {
        self.term.as_ref().map_or(true, |term| term == &key.term)
            && self.year.map_or(true, |year| year == key.year)
    }
}
