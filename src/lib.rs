//! Atomiq Verify - provably fair bet verification
//!
//! Independently re-derives the outcome of an Atomiq casino bet from its
//! published VRF output and compares it with the outcome the server reported.
//!
//! ```no_run
//! use atomiq_verify::{VerificationInput, VrfVerifier};
//!
//! let verifier = VrfVerifier::new();
//! let verdict = verifier.verify(&VerificationInput {
//!     vrf_output: Some("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=".into()),
//!     vrf_proof: Some("cHJvb2Y=".into()),
//!     tx_hash: Some("tx-1".into()),
//!     game_type: Some("coin_flip".into()),
//!     result: Some("heads".into()),
//!     ..Default::default()
//! })?;
//! println!("{}: {}", verdict.overall_status, verdict.message);
//! # Ok::<(), atomiq_verify::errors::EnvironmentError>(())
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod format;
pub mod games;
pub mod verification;

pub use errors::{AtomiqError, AtomiqResult};
pub use games::{CoinChoice, GameType, Sha256Provider, Sha2Provider};
pub use verification::{
    DataPresenceReport, OverallStatus, PresenceStatus, ResultDerivationReport,
    VerificationInput, VerificationVerdict, VrfVerifier,
};
