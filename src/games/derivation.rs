//! Outcome derivation from a published VRF output
//!
//! The coin-flip rule is part of the betting protocol: anyone holding only the
//! VRF output must reach the same side.
//!
//! ```text
//! bytes  = base64_decode(vrf_output)
//! digest = SHA-256(bytes)
//! side   = heads if digest[0] & 1 == 0 else tails
//! ```
//!
//! Changing the hash, the byte picked, or the bit picked invalidates every
//! bet already issued.

use crate::errors::EnvironmentError;
use crate::games::{codec, hasher::Sha256Provider, types::CoinChoice};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Characters of the raw VRF output echoed in the first step
const INPUT_FINGERPRINT_CHARS: usize = 20;

/// Digest bytes echoed (as hex) in the hash step
const DIGEST_FINGERPRINT_BYTES: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum DerivationError {
    #[error("Invalid base64 format: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error(transparent)]
    Environment(#[from] EnvironmentError),
}

/// Machine-readable payload attached to a derivation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepDetail {
    InputPrefix { prefix: String },
    ByteLength { length: usize },
    HashPrefix { hex: String },
    FirstByte { value: u8, hex: String },
    LeastSignificantBit { value: u8 },
    Outcome { result: CoinChoice },
}

/// One entry of the audit trail shown next to a verdict.
///
/// `Display` renders `"<index>. <description>"`; failure records carry no
/// index and render as the bare description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStep {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u8>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<StepDetail>,
}

impl ProcessStep {
    pub fn failure(description: impl Into<String>) -> Self {
        Self {
            index: None,
            description: description.into(),
            detail: None,
        }
    }
}

impl fmt::Display for ProcessStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}. {}", index, self.description),
            None => f.write_str(&self.description),
        }
    }
}

/// Numbered step recorder
#[derive(Debug, Default)]
struct ProcessLog {
    steps: Vec<ProcessStep>,
}

impl ProcessLog {
    fn record(&mut self, description: String, detail: Option<StepDetail>) {
        let index = self.steps.len() as u8 + 1;
        self.steps.push(ProcessStep {
            index: Some(index),
            description,
            detail,
        });
    }

    fn into_steps(self) -> Vec<ProcessStep> {
        self.steps
    }
}

/// Result of the coin-flip rule together with its audit trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinFlipDerivation {
    pub result: CoinChoice,
    pub process: Vec<ProcessStep>,
}

/// Derive the coin-flip side for a base64 VRF output.
pub fn derive_coin_flip_result(
    vrf_output: &str,
    hasher: &dyn Sha256Provider,
) -> Result<CoinFlipDerivation, DerivationError> {
    let mut log = ProcessLog::default();

    let prefix: String = vrf_output.chars().take(INPUT_FINGERPRINT_CHARS).collect();
    log.record(
        format!("Decode base64 VRF output: {}...", prefix),
        Some(StepDetail::InputPrefix { prefix }),
    );
    let vrf_bytes = codec::decode_base64(vrf_output)?;
    log.record(
        format!("Raw bytes length: {}", vrf_bytes.len()),
        Some(StepDetail::ByteLength { length: vrf_bytes.len() }),
    );

    log.record("Calculate SHA256 hash of VRF output".to_string(), None);
    let digest = hasher.digest(&vrf_bytes)?;
    let digest_prefix = hex::encode(&digest[..DIGEST_FINGERPRINT_BYTES]);
    log.record(
        format!("SHA256 result: {}...", digest_prefix),
        Some(StepDetail::HashPrefix { hex: digest_prefix }),
    );

    let first_byte = digest[0];
    let first_byte_hex = format!("{:02x}", first_byte);
    log.record(
        format!("First byte: 0x{} ({} decimal)", first_byte_hex, first_byte),
        Some(StepDetail::FirstByte {
            value: first_byte,
            hex: first_byte_hex,
        }),
    );

    let lsb = first_byte & 1;
    log.record(
        format!("Least Significant Bit (LSB): {}", lsb),
        Some(StepDetail::LeastSignificantBit { value: lsb }),
    );

    let result = CoinChoice::from_lsb(lsb);
    let branch = match result {
        CoinChoice::Heads => "0 (even) = HEADS",
        CoinChoice::Tails => "1 (odd) = TAILS",
    };
    log.record(
        format!("Result: {}", branch),
        Some(StepDetail::Outcome { result }),
    );

    debug!(
        bytes = vrf_bytes.len(),
        first_byte,
        %result,
        hasher = hasher.name(),
        "derived coin flip result"
    );

    Ok(CoinFlipDerivation {
        result,
        process: log.into_steps(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hasher::{Sha2Provider, SHA256_LEN};

    /// Returns the same digest for every input
    struct FixedDigest([u8; SHA256_LEN]);

    impl Sha256Provider for FixedDigest {
        fn name(&self) -> &str {
            "fixed"
        }

        fn digest(&self, _data: &[u8]) -> Result<[u8; SHA256_LEN], EnvironmentError> {
            Ok(self.0)
        }
    }

    struct Broken;

    impl Sha256Provider for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn digest(&self, _data: &[u8]) -> Result<[u8; SHA256_LEN], EnvironmentError> {
            Err(EnvironmentError::HashUnavailable { provider: "broken".into() })
        }
    }

    const ZEROS_32: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

    #[test]
    fn test_first_byte_zero_is_heads() {
        let derivation = derive_coin_flip_result(ZEROS_32, &FixedDigest([0x00; 32])).unwrap();
        assert_eq!(derivation.result, CoinChoice::Heads);
    }

    #[test]
    fn test_first_byte_one_is_tails() {
        let mut digest = [0xaa; 32];
        digest[0] = 0x01;
        let derivation = derive_coin_flip_result(ZEROS_32, &FixedDigest(digest)).unwrap();
        assert_eq!(derivation.result, CoinChoice::Tails);
    }

    #[test]
    fn test_only_lowest_bit_matters() {
        let even = derive_coin_flip_result(ZEROS_32, &FixedDigest([0xfe; 32])).unwrap();
        let odd = derive_coin_flip_result(ZEROS_32, &FixedDigest([0xff; 32])).unwrap();
        assert_eq!(even.result, CoinChoice::Heads);
        assert_eq!(odd.result, CoinChoice::Tails);
    }

    #[test]
    fn test_process_log_matches_audit_format() {
        let derivation = derive_coin_flip_result(ZEROS_32, &Sha2Provider).unwrap();
        let lines: Vec<String> = derivation.process.iter().map(|s| s.to_string()).collect();

        // SHA-256 of 32 zero bytes starts with 66687aadf862bd77
        assert_eq!(
            lines,
            vec![
                "1. Decode base64 VRF output: AAAAAAAAAAAAAAAAAAAA...",
                "2. Raw bytes length: 32",
                "3. Calculate SHA256 hash of VRF output",
                "4. SHA256 result: 66687aadf862bd77...",
                "5. First byte: 0x66 (102 decimal)",
                "6. Least Significant Bit (LSB): 0",
                "7. Result: 0 (even) = HEADS",
            ]
        );
        assert_eq!(derivation.result, CoinChoice::Heads);
    }

    #[test]
    fn test_process_details_are_structured() {
        let derivation = derive_coin_flip_result(ZEROS_32, &Sha2Provider).unwrap();
        assert_eq!(
            derivation.process[4].detail,
            Some(StepDetail::FirstByte { value: 0x66, hex: "66".into() })
        );
        assert_eq!(derivation.process[2].detail, None);
        assert_eq!(
            derivation.process[6].detail,
            Some(StepDetail::Outcome { result: CoinChoice::Heads })
        );
    }

    #[test]
    fn test_odd_digest_with_real_hash() {
        // 32 bytes of 0x02 hash to 0x75...
        let derivation =
            derive_coin_flip_result("AgICAgICAgICAgICAgICAgICAgICAgICAgICAgICAgI=", &Sha2Provider)
                .unwrap();
        assert_eq!(derivation.result, CoinChoice::Tails);
        assert_eq!(derivation.process[6].to_string(), "7. Result: 1 (odd) = TAILS");
    }

    #[test]
    fn test_invalid_base64_reports_decoder_message() {
        let err = derive_coin_flip_result("not-valid-base64!!", &Sha2Provider).unwrap_err();
        assert!(matches!(err, DerivationError::InvalidBase64(_)));
        assert!(err.to_string().starts_with("Invalid base64 format: "));
        assert!(err.to_string().len() > "Invalid base64 format: ".len());
    }

    #[test]
    fn test_hash_failure_is_environment_error() {
        let err = derive_coin_flip_result(ZEROS_32, &Broken).unwrap_err();
        assert!(matches!(err, DerivationError::Environment(_)));
    }

    #[test]
    fn test_short_input_fingerprint() {
        let derivation = derive_coin_flip_result("AQID", &Sha2Provider).unwrap();
        assert_eq!(derivation.process[0].to_string(), "1. Decode base64 VRF output: AQID...");
        assert_eq!(derivation.process[1].to_string(), "2. Raw bytes length: 3");
    }
}
