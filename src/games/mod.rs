pub mod codec;
pub mod derivation;
pub mod hasher;
pub mod types;

pub use derivation::{
    derive_coin_flip_result, CoinFlipDerivation, DerivationError, ProcessStep, StepDetail,
};
pub use hasher::{Sha256Provider, Sha2Provider};
pub use types::*;
