//! Casino API access
//!
//! Wire models, the REST client, and the bet source abstraction the
//! verification flow reads records through.

pub mod client;
pub mod models;
pub mod source;

pub use client::CasinoApiClient;
pub use models::*;
pub use source::{verify_transaction, BetSource, InMemoryBetSource};
