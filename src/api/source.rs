//! Bet record sources
//!
//! The verifier only needs one record at a time. It can come from the REST API
//! or from records that were already fetched (a saved page, a JSON export).

use crate::api::client::CasinoApiClient;
use crate::api::models::BetRecord;
use crate::errors::{AtomiqResult, ClientError, InputError};
use crate::verification::{VerificationInput, VerificationVerdict, VrfVerifier};
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait BetSource: Send + Sync {
    /// Look up a bet by transaction hash
    async fn find_bet(&self, tx_hash: &str) -> Result<Option<BetRecord>, ClientError>;
}

#[async_trait]
impl BetSource for CasinoApiClient {
    async fn find_bet(&self, tx_hash: &str) -> Result<Option<BetRecord>, ClientError> {
        CasinoApiClient::find_bet(self, tx_hash).await
    }
}

/// Records held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryBetSource {
    bets: Vec<BetRecord>,
}

impl InMemoryBetSource {
    pub fn new(bets: Vec<BetRecord>) -> Self {
        Self { bets }
    }

    /// Parse a JSON document holding a single record, an array of records,
    /// or a `/v1/bets` page.
    ///
    /// A page only needs its `bets` array. A single record must carry
    /// `tx_hash`; any other object is rejected.
    pub fn from_json(text: &str) -> AtomiqResult<Self> {
        let bets: Vec<BetRecord> = match serde_json::from_str::<Value>(text)? {
            document @ Value::Array(_) => serde_json::from_value(document)?,
            Value::Object(mut object) => {
                if let Some(bets) = object.remove("bets") {
                    serde_json::from_value(bets)?
                } else if object.contains_key("tx_hash") {
                    vec![serde_json::from_value(Value::Object(object))?]
                } else {
                    return Err(InputError::ParseFailed(
                        "expected a bet record, an array of bet records, or a bets page".into(),
                    )
                    .into());
                }
            }
            _ => {
                return Err(InputError::ParseFailed(
                    "expected a JSON object or array of bet records".into(),
                )
                .into())
            }
        };
        if bets.is_empty() {
            return Err(InputError::Empty.into());
        }
        Ok(Self { bets })
    }

    pub fn bets(&self) -> &[BetRecord] {
        &self.bets
    }
}

#[async_trait]
impl BetSource for InMemoryBetSource {
    async fn find_bet(&self, tx_hash: &str) -> Result<Option<BetRecord>, ClientError> {
        Ok(self.bets.iter().find(|bet| bet.tx_hash == tx_hash).cloned())
    }
}

/// Fetch a bet from `source` and verify it.
pub async fn verify_transaction(
    source: &dyn BetSource,
    verifier: &VrfVerifier,
    tx_hash: &str,
) -> AtomiqResult<(BetRecord, VerificationVerdict)> {
    let bet = source
        .find_bet(tx_hash)
        .await?
        .ok_or_else(|| ClientError::NotFound {
            tx_hash: tx_hash.to_string(),
        })?;
    let verdict = verifier.verify(&VerificationInput::from(&bet))?;
    Ok((bet, verdict))
}
