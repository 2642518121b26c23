//! Display helpers for bet history and stats

use crate::api::models::BetRecord;
use serde::Serialize;

pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Group the integer part with commas and keep up to three fraction digits.
fn locale_string(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// Abbreviate with K/M/B suffixes, e.g. 1_500_000 -> "1.5M"
pub fn format_number(num: f64) -> String {
    if num == 0.0 {
        return "0".to_string();
    }
    let abs = num.abs();
    let sign = if num < 0.0 { "-" } else { "" };

    if abs >= 1_000_000_000.0 {
        format!("{}{:.1}B", sign, abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{}{:.1}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}{:.1}K", sign, abs / 1_000.0)
    } else {
        format!("{}{}", sign, locale_string(abs))
    }
}

pub fn format_number_with_commas(num: u64) -> String {
    locale_string(num as f64)
}

/// First 6 and last 4 characters, e.g. "abcdef...7890"
pub fn truncate_hash(hash: &str) -> String {
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() <= 10 {
        return hash.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Age of `timestamp` relative to `now`, both unix seconds
pub fn format_relative_time(timestamp: i64, now: i64) -> String {
    let diff = now - timestamp;
    if diff < 60 {
        format!("{}s ago", diff)
    } else if diff < 3_600 {
        format!("{}m ago", diff / 60)
    } else if diff < 86_400 {
        format!("{}h ago", diff / 3_600)
    } else {
        format!("{}d ago", diff / 86_400)
    }
}

/// More decimals for small amounts
pub fn format_amount(amount: f64, decimals: usize) -> String {
    if amount == 0.0 {
        "0".to_string()
    } else if amount < 0.01 {
        format!("{:.6}", amount)
    } else if amount < 1.0 {
        format!("{:.4}", amount)
    } else {
        format!("{:.*}", decimals, amount)
    }
}

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL
}

pub fn format_sol_amount(lamports: u64) -> String {
    format_amount(lamports_to_sol(lamports), 2)
}

/// `value` is already a percentage (98.5 means 98.5%)
pub fn format_percentage(value: f64) -> String {
    if value == 0.0 {
        "0%".to_string()
    } else if value < 1.0 {
        format!("{:.2}%", value)
    } else {
        format!("{:.1}%", value)
    }
}

/// Bet row ready for a history table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayBet {
    pub id: String,
    pub block: String,
    pub hash: String,
    pub token: String,
    /// SOL
    pub wagered: f64,
    /// SOL
    pub won: f64,
    /// Absolute net SOL; sign is in `is_positive`
    pub net: f64,
    pub date: String,
    pub is_positive: bool,
    pub game_type: String,
    pub result: String,
    pub vrf_proof: String,
    pub vrf_output: String,
    pub vrf_hash: String,
}

fn or_unknown(value: &str) -> String {
    if value.is_empty() {
        "unknown".to_string()
    } else {
        value.to_string()
    }
}

impl DisplayBet {
    pub fn from_record(bet: &BetRecord, now: i64) -> Self {
        let wagered = lamports_to_sol(bet.amount_wagered);
        let won = lamports_to_sol(bet.payout);
        let net = won - wagered;

        Self {
            id: or_unknown(&bet.tx_hash),
            block: format_number_with_commas(bet.block),
            hash: truncate_hash(&bet.tx_hash),
            token: "SOL".to_string(),
            wagered,
            won,
            net: net.abs(),
            date: format_relative_time(bet.timestamp as i64, now),
            is_positive: net >= 0.0,
            game_type: or_unknown(&bet.game_type),
            result: or_unknown(&bet.result),
            vrf_proof: bet.vrf_proof.clone(),
            vrf_output: bet.vrf_output.clone(),
            vrf_hash: if bet.vrf_output.is_empty() {
                String::new()
            } else {
                truncate_hash(&bet.vrf_output)
            },
        }
    }
}
