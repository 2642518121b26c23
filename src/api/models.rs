//! Casino API Models
//!
//! Request and response types for the casino REST API endpoints.

use crate::games::CoinChoice;
use crate::verification::VerificationInput;
use serde::{Deserialize, Serialize};

/// Casino statistics (GET /v1/stats)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub current_block: u64,
    pub total_bets: u64,
    /// Lamports
    pub total_wagered: f64,
    /// Lamports
    pub total_won: f64,
    /// Already a percentage (e.g. 98.5)
    pub gross_rtp: f64,
    pub house_edge: f64,
}

/// One settled bet as listed by GET /v1/bets.
///
/// Fields default when absent; the verifier re-checks presence itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BetRecord {
    pub tx_hash: String,
    pub block: u64,
    /// Lamports
    pub amount_wagered: u64,
    pub won: bool,
    pub result: String,
    /// Lamports
    pub payout: u64,
    /// Unix seconds
    pub timestamp: u64,
    pub game_type: String,
    pub vrf_proof: String,
    pub vrf_output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vrf_public_key: Option<String>,
}

impl From<&BetRecord> for VerificationInput {
    fn from(bet: &BetRecord) -> Self {
        VerificationInput {
            vrf_output: Some(bet.vrf_output.clone()),
            vrf_proof: Some(bet.vrf_proof.clone()),
            vrf_public_key: bet.vrf_public_key.clone(),
            tx_hash: Some(bet.tx_hash.clone()),
            game_type: Some(bet.game_type.clone()),
            result: Some(bet.result.clone()),
            block: Some(bet.block),
            timestamp: Some(bet.timestamp),
        }
    }
}

/// Bet history page (GET /v1/bets)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedBets {
    pub bets: Vec<BetRecord>,
    pub total_count: u64,
    pub has_more: bool,
    pub page: u64,
    pub per_page: u64,
}

/// Game selector for POST /v1/bet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetGame {
    CoinFlip,
    Slots,
}

/// Multi-game bet request (POST /v1/bet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetRequest {
    pub wallet: String,
    pub amount: u64,
    pub nonce: u64,
    pub game_type: BetGame,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<CoinChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<u32>,
}

impl BetRequest {
    pub fn coin_flip(
        wallet: impl Into<String>,
        amount: u64,
        nonce: u64,
        choice: CoinChoice,
    ) -> Self {
        Self {
            wallet: wallet.into(),
            amount,
            nonce,
            game_type: BetGame::CoinFlip,
            choice: Some(choice),
            lines: None,
        }
    }

    pub fn slots(wallet: impl Into<String>, amount: u64, nonce: u64, lines: u32) -> Self {
        Self {
            wallet: wallet.into(),
            amount,
            nonce,
            game_type: BetGame::Slots,
            choice: None,
            lines: Some(lines),
        }
    }
}

/// Settled bet returned by POST /v1/bet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetResponse {
    pub tx_hash: String,
    pub height: u64,
    pub result: String,
    pub won: bool,
    pub payout: u64,
    pub net_result: i64,
    pub game_type: String,
    pub vrf_proof: String,
    pub vrf_output: String,
    pub vrf_public_key: String,
}

impl From<&BetResponse> for VerificationInput {
    fn from(bet: &BetResponse) -> Self {
        VerificationInput {
            vrf_output: Some(bet.vrf_output.clone()),
            vrf_proof: Some(bet.vrf_proof.clone()),
            vrf_public_key: Some(bet.vrf_public_key.clone()),
            tx_hash: Some(bet.tx_hash.clone()),
            game_type: Some(bet.game_type.clone()),
            result: Some(bet.result.clone()),
            block: Some(bet.height),
            timestamp: None,
        }
    }
}
