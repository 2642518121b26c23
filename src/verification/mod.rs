//! Client-side bet verification
//!
//! A verification is a pure function of one bet record: a completeness check
//! over the record's fields and an independent re-derivation of the outcome,
//! combined into a single verdict.

pub mod presence;
pub mod render;
pub mod types;
pub mod verifier;

pub use presence::check_presence;
pub use render::{render_report, StatusIcon, StatusTone};
pub use types::*;
pub use verifier::VrfVerifier;
