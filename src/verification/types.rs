//! Verification input and report types
//!
//! Serialized field names follow the presentation contract (camelCase), so a
//! verdict can be handed to a front-end as JSON without remapping.

use crate::games::{CoinChoice, ProcessStep};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A placed bet as reported by the bet record source.
///
/// Every field is optional; presence is re-validated by the verifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationInput {
    #[serde(default)]
    pub vrf_output: Option<String>,
    #[serde(default)]
    pub vrf_proof: Option<String>,
    /// Reported for completeness only, never consumed by derivation
    #[serde(default)]
    pub vrf_public_key: Option<String>,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub game_type: Option<String>,
    /// Outcome the server claims, e.g. "heads"
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub block: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<u64>,
}

/// Completeness of the four required fields, ordered Missing < Partial < Complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PresenceStatus {
    Missing,
    Partial,
    Complete,
}

/// Which required fields are present and non-blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPresenceReport {
    pub status: PresenceStatus,
    pub vrf_output: bool,
    pub vrf_proof: bool,
    pub tx_hash: bool,
    pub game_result: bool,
    /// One line per missing field, in field order
    pub details: Vec<String>,
}

impl DataPresenceReport {
    pub fn present_count(&self) -> usize {
        [self.vrf_output, self.vrf_proof, self.tx_hash, self.game_result]
            .iter()
            .filter(|present| **present)
            .count()
    }
}

/// Outcome recomputed from the VRF output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DerivedOutcome {
    Coin(CoinChoice),
}

impl DerivedOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DerivedOutcome::Coin(choice) => choice.as_str(),
        }
    }
}

impl fmt::Display for DerivedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of re-deriving the game result.
///
/// Three shapes occur:
/// - derived: `supported`, `calculated_result`, `actual_result`, `matches`, `process`
/// - failed: `supported`, `error`, and a `process` holding the failure
/// - unsupported: `!supported` and `error`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDerivationReport {
    pub supported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated_result: Option<DerivedOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub process: Vec<ProcessStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResultDerivationReport {
    pub fn unsupported(error: impl Into<String>) -> Self {
        Self {
            supported: false,
            calculated_result: None,
            actual_result: None,
            matches: None,
            process: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            supported: true,
            calculated_result: None,
            actual_result: None,
            matches: None,
            process: vec![ProcessStep::failure(error.clone())],
            error: Some(error),
        }
    }

    /// Compare a derived outcome with the claimed one, ignoring case.
    pub fn derived(
        calculated: DerivedOutcome,
        actual: Option<String>,
        process: Vec<ProcessStep>,
    ) -> Self {
        let matches = actual
            .as_deref()
            .map(|claimed| claimed.to_lowercase() == calculated.as_str().to_lowercase())
            .unwrap_or(false);
        Self {
            supported: true,
            calculated_result: Some(calculated),
            actual_result: actual,
            matches: Some(matches),
            process,
            error: None,
        }
    }
}

/// Top-level verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverallStatus {
    Verified,
    Partial,
    Failed,
    Incomplete,
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OverallStatus::Verified => "Verified",
            OverallStatus::Partial => "Partial",
            OverallStatus::Failed => "Failed",
            OverallStatus::Incomplete => "Incomplete",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationVerdict {
    pub data_presence: DataPresenceReport,
    pub result_derivation: ResultDerivationReport,
    pub overall_status: OverallStatus,
    pub message: String,
}

impl VerificationVerdict {
    pub fn is_verified(&self) -> bool {
        self.overall_status == OverallStatus::Verified
    }
}
