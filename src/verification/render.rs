//! Text rendering of verification verdicts

use crate::verification::types::{
    DataPresenceReport, OverallStatus, VerificationInput, VerificationVerdict,
};
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Semantic colour of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Success,
    Warning,
    Error,
    Neutral,
}

/// Icon shown next to a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusIcon {
    Check,
    Warning,
    Cancel,
}

impl OverallStatus {
    pub fn tone(&self) -> StatusTone {
        match self {
            OverallStatus::Verified => StatusTone::Success,
            OverallStatus::Partial => StatusTone::Warning,
            OverallStatus::Failed => StatusTone::Error,
            OverallStatus::Incomplete => StatusTone::Neutral,
        }
    }

    pub fn icon(&self) -> StatusIcon {
        match self {
            OverallStatus::Verified => StatusIcon::Check,
            OverallStatus::Partial => StatusIcon::Warning,
            OverallStatus::Failed | OverallStatus::Incomplete => StatusIcon::Cancel,
        }
    }
}

impl StatusIcon {
    fn glyph(&self) -> &'static str {
        match self {
            StatusIcon::Check => "✅",
            StatusIcon::Warning => "⚠️ ",
            StatusIcon::Cancel => "❌",
        }
    }
}

fn presence_row(out: &mut String, label: &str, present: bool) {
    let (glyph, state) = if present { ("✅", "Present") } else { ("❌", "Missing") };
    let _ = writeln!(out, "   {} {:<18} {}", glyph, label, state);
}

fn render_presence(out: &mut String, presence: &DataPresenceReport) {
    let _ = writeln!(out, "📋 Data Presence: {:?}", presence.status);
    presence_row(out, "VRF Output", presence.vrf_output);
    presence_row(out, "VRF Proof", presence.vrf_proof);
    presence_row(out, "Transaction Hash", presence.tx_hash);
    presence_row(out, "Game Result", presence.game_result);
}

/// Render a verdict for a terminal: status badge, presence checklist, and the
/// derivation comparison and step log when derivation ran.
pub fn render_report(input: &VerificationInput, verdict: &VerificationVerdict) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "🔍 Bet Verification");
    let _ = writeln!(out, "===================");
    if let Some(tx_hash) = input.tx_hash.as_deref() {
        let _ = writeln!(out, "Transaction: {}", tx_hash);
    }
    if let Some(game_type) = input.game_type.as_deref() {
        let _ = writeln!(out, "Game:        {}", game_type);
    }
    if let Some(block) = input.block {
        let _ = writeln!(out, "Block:       {}", block);
    }
    if let Some(time) = input
        .timestamp
        .and_then(|ts| i64::try_from(ts).ok())
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
    {
        let _ = writeln!(out, "Time:        {}", time.to_rfc3339());
    }
    let _ = writeln!(out);

    let status = verdict.overall_status;
    let _ = writeln!(out, "{} {}: {}", status.icon().glyph(), status, verdict.message);
    let _ = writeln!(out);

    render_presence(&mut out, &verdict.data_presence);

    let derivation = &verdict.result_derivation;
    let _ = writeln!(out);
    if let Some(calculated) = derivation.calculated_result {
        let _ = writeln!(out, "🎲 Result Derivation");
        let _ = writeln!(out, "   Calculated: {}", calculated);
        let _ = writeln!(
            out,
            "   Actual:     {}",
            derivation.actual_result.as_deref().unwrap_or("-")
        );
        let verdict_line = if derivation.matches == Some(true) {
            "✅ Match"
        } else {
            "❌ Mismatch"
        };
        let _ = writeln!(out, "   {}", verdict_line);
    } else if let Some(error) = derivation.error.as_deref() {
        let label = if derivation.supported { "failed" } else { "not available" };
        let _ = writeln!(out, "🎲 Result Derivation {}: {}", label, error);
    }

    if !derivation.process.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "🧮 Derivation Steps:");
        for step in &derivation.process {
            let _ = writeln!(out, "   {}", step);
        }
    }

    out
}
