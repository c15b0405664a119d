use std::fmt;

use serde::{Deserialize, Serialize};

/// Achievement code for a single advanced-secondary paper; 1 is best, 9 is worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OrdinalCode(u8);

impl OrdinalCode {
    pub const BEST: OrdinalCode = OrdinalCode(1);
    pub const WORST: OrdinalCode = OrdinalCode(9);

    pub fn new(value: u8) -> Option<Self> {
        (1..=9).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for OrdinalCode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        OrdinalCode::new(value).ok_or_else(|| format!("ordinal code {value} outside 1..=9"))
    }
}

impl From<OrdinalCode> for u8 {
    fn from(code: OrdinalCode) -> Self {
        code.0
    }
}

impl fmt::Display for OrdinalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive lower bound of each code band, best first.
const CODE_BANDS: [(f64, u8); 8] = [
    (75.0, 1),
    (70.0, 2),
    (65.0, 3),
    (60.0, 4),
    (55.0, 5),
    (50.0, 6),
    (45.0, 7),
    (40.0, 8),
];

/// Maps a percentage mark to its ordinal code. Total on every `f64`; anything below 40,
/// including NaN, lands on code 9.
pub fn map_mark_to_code(mark: f64) -> OrdinalCode {
    CODE_BANDS
        .iter()
        .find(|(floor, _)| mark >= *floor)
        .map(|(_, code)| OrdinalCode(*code))
        .unwrap_or(OrdinalCode::WORST)
}
