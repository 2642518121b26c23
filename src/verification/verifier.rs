//! Bet result verifier
//!
//! Re-derives a game outcome from the published VRF output and compares it to
//! the outcome the server reported.
//!
//! Only the output is checked. The VRF proof is never validated against the
//! public key, so a forged output without a valid proof passes as long as its
//! hash-derived bit agrees with the claimed result.

use crate::errors::EnvironmentError;
use crate::games::{
    derive_coin_flip_result, DerivationError, GameType, Sha256Provider, Sha2Provider,
};
use crate::verification::{
    presence::{check_presence, is_present},
    types::{
        DataPresenceReport, DerivedOutcome, OverallStatus, PresenceStatus,
        ResultDerivationReport, VerificationInput, VerificationVerdict,
    },
};
use std::sync::Arc;
use tracing::{info, warn};

/// Stateless verifier; cheap to clone and safe to share between tasks.
#[derive(Clone)]
pub struct VrfVerifier {
    hasher: Arc<dyn Sha256Provider>,
}

impl Default for VrfVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VrfVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VrfVerifier")
            .field("hasher", &self.hasher.name())
            .finish()
    }
}

impl VrfVerifier {
    /// Verifier backed by the `sha2` crate
    pub fn new() -> Self {
        Self {
            hasher: Arc::new(Sha2Provider),
        }
    }

    /// Verifier backed by an injected hash primitive.
    ///
    /// Fails when the primitive reports itself unavailable.
    pub fn with_hasher(hasher: Arc<dyn Sha256Provider>) -> Result<Self, EnvironmentError> {
        if !hasher.is_available() {
            return Err(EnvironmentError::HashUnavailable {
                provider: hasher.name().to_string(),
            });
        }
        Ok(Self { hasher })
    }

    pub fn hasher_name(&self) -> &str {
        self.hasher.name()
    }

    pub fn check_presence(&self, input: &VerificationInput) -> DataPresenceReport {
        check_presence(input)
    }

    /// Recompute the outcome for the declared game type.
    ///
    /// Decode failures are folded into the report; only a failing hash
    /// primitive is returned as an error.
    pub fn validate_result_derivation(
        &self,
        input: &VerificationInput,
    ) -> Result<ResultDerivationReport, EnvironmentError> {
        let vrf_output = match input.vrf_output.as_deref() {
            Some(output) if is_present(Some(output)) => output,
            _ => return Ok(ResultDerivationReport::unsupported("VRF output not available")),
        };
        // Whitespace-only counts as absent, same as the presence check.
        let raw_game_type = match input.game_type.as_deref() {
            Some(game_type) if is_present(Some(game_type)) => game_type,
            _ => return Ok(ResultDerivationReport::unsupported("Game type not specified")),
        };

        match GameType::parse(raw_game_type) {
            GameType::CoinFlip => match derive_coin_flip_result(vrf_output, self.hasher.as_ref()) {
                Ok(derivation) => Ok(ResultDerivationReport::derived(
                    DerivedOutcome::Coin(derivation.result),
                    input.result.clone(),
                    derivation.process,
                )),
                Err(DerivationError::Environment(e)) => Err(e),
                Err(e) => Ok(ResultDerivationReport::failed(format!(
                    "Failed to derive result: {}",
                    e
                ))),
            },
            GameType::Slots | GameType::Unknown(_) => Ok(ResultDerivationReport::unsupported(
                format!("Game type \"{}\" not supported for verification", raw_game_type),
            )),
        }
    }

    /// Run both checks and combine them into a verdict.
    pub fn verify(
        &self,
        input: &VerificationInput,
    ) -> Result<VerificationVerdict, EnvironmentError> {
        let data_presence = self.check_presence(input);
        let result_derivation = self.validate_result_derivation(input)?;
        let (overall_status, message) = decide(&data_presence, &result_derivation);

        let tx_hash = input.tx_hash.as_deref().unwrap_or("");
        match overall_status {
            OverallStatus::Verified => info!(tx_hash, %overall_status, "bet verified"),
            OverallStatus::Failed => warn!(
                tx_hash,
                %overall_status,
                reason = %message,
                "bet verification failed"
            ),
            _ => info!(
                tx_hash,
                %overall_status,
                reason = %message,
                "bet verification inconclusive"
            ),
        }

        Ok(VerificationVerdict {
            data_presence,
            result_derivation,
            overall_status,
            message,
        })
    }
}

/// Verdict decision table; first matching row wins.
fn decide(
    presence: &DataPresenceReport,
    derivation: &ResultDerivationReport,
) -> (OverallStatus, String) {
    if presence.status == PresenceStatus::Missing {
        return (
            OverallStatus::Incomplete,
            "VRF data is missing or incomplete".to_string(),
        );
    }
    if presence.status == PresenceStatus::Partial {
        return (
            OverallStatus::Incomplete,
            format!("Missing required data: {}", presence.details.join(", ")),
        );
    }
    if !derivation.supported {
        return (
            OverallStatus::Partial,
            format!(
                "Data present but verification not supported: {}",
                derivation.error.as_deref().unwrap_or("Unknown reason")
            ),
        );
    }
    if let Some(error) = &derivation.error {
        return (OverallStatus::Failed, format!("Verification failed: {}", error));
    }
    if derivation.matches == Some(false) {
        return (
            OverallStatus::Failed,
            format!(
                "Result mismatch: Expected {}, calculated {}",
                derivation.actual_result.as_deref().unwrap_or("unknown"),
                derivation
                    .calculated_result
                    .map(|outcome| outcome.as_str())
                    .unwrap_or("unknown")
            ),
        );
    }
    (
        OverallStatus::Verified,
        "All checks passed - result verified successfully".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{hasher::SHA256_LEN, CoinChoice};

    struct Unavailable;

    impl Sha256Provider for Unavailable {
        fn name(&self) -> &str {
            "webcrypto"
        }

        fn is_available(&self) -> bool {
            false
        }

        fn digest(&self, _data: &[u8]) -> Result<[u8; SHA256_LEN], EnvironmentError> {
            Err(EnvironmentError::HashUnavailable { provider: "webcrypto".into() })
        }
    }

    /// Available at construction but fails on use
    struct FailsOnUse;

    impl Sha256Provider for FailsOnUse {
        fn name(&self) -> &str {
            "flaky"
        }

        fn digest(&self, _data: &[u8]) -> Result<[u8; SHA256_LEN], EnvironmentError> {
            Err(EnvironmentError::HashUnavailable { provider: "flaky".into() })
        }
    }

    fn coin_flip(result: &str) -> VerificationInput {
        VerificationInput {
            vrf_output: Some("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=".into()),
            vrf_proof: Some("cHJvb2Y=".into()),
            tx_hash: Some("tx-1".into()),
            game_type: Some("coin_flip".into()),
            result: Some(result.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_unavailable_hasher_rejected_at_construction() {
        let err = VrfVerifier::with_hasher(Arc::new(Unavailable)).unwrap_err();
        assert_eq!(err, EnvironmentError::HashUnavailable { provider: "webcrypto".into() });
    }

    #[test]
    fn test_hash_failure_propagates() {
        let verifier = VrfVerifier::with_hasher(Arc::new(FailsOnUse)).unwrap();
        assert!(verifier.verify(&coin_flip("heads")).is_err());
    }

    #[test]
    fn test_missing_output_is_unsupported() {
        let verifier = VrfVerifier::new();
        let input = VerificationInput { vrf_output: None, ..coin_flip("heads") };
        let report = verifier.validate_result_derivation(&input).unwrap();
        assert!(!report.supported);
        assert_eq!(report.error.as_deref(), Some("VRF output not available"));
    }

    #[test]
    fn test_missing_game_type_is_unsupported() {
        let verifier = VrfVerifier::new();
        let input = VerificationInput { game_type: None, ..coin_flip("heads") };
        let report = verifier.validate_result_derivation(&input).unwrap();
        assert!(!report.supported);
        assert_eq!(report.error.as_deref(), Some("Game type not specified"));
    }

    #[test]
    fn test_blank_game_type_is_not_specified() {
        let verifier = VrfVerifier::new();
        let input = VerificationInput { game_type: Some("  ".into()), ..coin_flip("heads") };
        let report = verifier.validate_result_derivation(&input).unwrap();
        assert_eq!(report.error.as_deref(), Some("Game type not specified"));
    }

    #[test]
    fn test_unknown_game_type_keeps_original_spelling() {
        let verifier = VrfVerifier::new();
        let input = VerificationInput { game_type: Some("Plinko".into()), ..coin_flip("heads") };
        let report = verifier.validate_result_derivation(&input).unwrap();
        assert!(!report.supported);
        assert_eq!(
            report.error.as_deref(),
            Some("Game type \"Plinko\" not supported for verification")
        );
        assert!(report.calculated_result.is_none());
    }

    #[test]
    fn test_coin_flip_derivation_report() {
        let verifier = VrfVerifier::new();
        let report = verifier.validate_result_derivation(&coin_flip("Heads")).unwrap();
        assert!(report.supported);
        assert_eq!(report.calculated_result, Some(DerivedOutcome::Coin(CoinChoice::Heads)));
        assert_eq!(report.actual_result.as_deref(), Some("Heads"));
        assert_eq!(report.matches, Some(true));
        assert_eq!(report.process.len(), 7);
    }

    #[test]
    fn test_decision_table_rows() {
        let verifier = VrfVerifier::new();

        let verdict = verifier.verify(&coin_flip("heads")).unwrap();
        assert_eq!(verdict.overall_status, OverallStatus::Verified);
        assert_eq!(verdict.message, "All checks passed - result verified successfully");

        let verdict = verifier.verify(&coin_flip("tails")).unwrap();
        assert_eq!(verdict.overall_status, OverallStatus::Failed);
        assert_eq!(verdict.message, "Result mismatch: Expected tails, calculated heads");

        let input = VerificationInput { game_type: None, ..coin_flip("heads") };
        let verdict = verifier.verify(&input).unwrap();
        assert_eq!(verdict.overall_status, OverallStatus::Partial);
        assert_eq!(
            verdict.message,
            "Data present but verification not supported: Game type not specified"
        );

        let input = VerificationInput {
            vrf_output: Some("####".into()),
            ..coin_flip("heads")
        };
        let verdict = verifier.verify(&input).unwrap();
        assert_eq!(verdict.overall_status, OverallStatus::Failed);
        assert!(verdict
            .message
            .starts_with("Verification failed: Failed to derive result: Invalid base64 format: "));
    }

    #[test]
    fn test_presence_rows_take_precedence_over_derivation() {
        let verifier = VrfVerifier::new();
        let input = VerificationInput {
            tx_hash: None,
            vrf_output: Some("!!!!".into()),
            ..coin_flip("heads")
        };
        let verdict = verifier.verify(&input).unwrap();
        assert_eq!(verdict.overall_status, OverallStatus::Incomplete);
        assert_eq!(verdict.message, "Missing required data: Transaction Hash missing");
        // derivation still ran and recorded the failure
        assert!(verdict.result_derivation.error.is_some());
    }
}
