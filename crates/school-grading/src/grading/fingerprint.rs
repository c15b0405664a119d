use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Fixed identifier of a grading formula revision. Changing a formula means adding a new
/// identifier so results computed under the old rules stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleVersion {
    #[serde(rename = "PRIMARY_V1")]
    PrimaryV1,
    #[serde(rename = "NCDC_V1")]
    NcdcV1,
    #[serde(rename = "UACE_V1")]
    UaceV1,
}

impl RuleVersion {
    pub fn identifier(&self) -> &'static str {
        match self {
            RuleVersion::PrimaryV1 => "PRIMARY_V1",
            RuleVersion::NcdcV1 => "NCDC_V1",
            RuleVersion::UaceV1 => "UACE_V1",
        }
    }

    pub fn fingerprint(&self) -> RuleVersionHash {
        RuleVersionHash::of(self.identifier())
    }
}

impl fmt::Display for RuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// First 8 bytes of the SHA-256 digest of a rule identifier, as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleVersionHash(String);

impl RuleVersionHash {
    const DIGEST_BYTES: usize = 8;

    pub fn of(identifier: &str) -> Self {
        let digest = Sha256::digest(identifier.as_bytes());
        let hex = digest[..Self::DIGEST_BYTES]
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect();
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleVersionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
