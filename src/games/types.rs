use serde::{Deserialize, Serialize};
use std::fmt;

/// Game types known to the betting flow.
///
/// Only some of them carry a derivation rule; see
/// [`GameType::is_verifiable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameType {
    CoinFlip,
    Slots,
    Unknown(String),
}

impl GameType {
    /// Parse a declared game type. Matching is case-insensitive and
    /// `coin_flip` / `coinflip` are aliases of the same game.
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "coin_flip" | "coinflip" => GameType::CoinFlip,
            "slots" => GameType::Slots,
            _ => GameType::Unknown(raw.to_string()),
        }
    }

    /// Whether an outcome for this game can be re-derived from a VRF output.
    pub fn is_verifiable(&self) -> bool {
        matches!(self, GameType::CoinFlip)
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameType::CoinFlip => write!(f, "coin_flip"),
            GameType::Slots => write!(f, "slots"),
            GameType::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

/// Coin flip side
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CoinChoice {
    Heads,
    Tails,
}

impl CoinChoice {
    /// Map a single bit to a side: 0 is heads, 1 is tails.
    pub fn from_lsb(lsb: u8) -> Self {
        if lsb & 1 == 0 {
            CoinChoice::Heads
        } else {
            CoinChoice::Tails
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoinChoice::Heads => "heads",
            CoinChoice::Tails => "tails",
        }
    }
}

impl fmt::Display for CoinChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
