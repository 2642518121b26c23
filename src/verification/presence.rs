use crate::verification::types::{DataPresenceReport, PresenceStatus, VerificationInput};

/// Present means defined and non-blank after trimming.
pub(crate) fn is_present(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

/// Report which of the four required fields a bet record carries.
///
/// Never fails; an empty record yields `Missing`.
pub fn check_presence(input: &VerificationInput) -> DataPresenceReport {
    let vrf_output = is_present(input.vrf_output.as_deref());
    let vrf_proof = is_present(input.vrf_proof.as_deref());
    let tx_hash = is_present(input.tx_hash.as_deref());
    let game_result = is_present(input.result.as_deref());

    let details: Vec<String> = [
        (vrf_output, "VRF Output missing"),
        (vrf_proof, "VRF Proof missing"),
        (tx_hash, "Transaction Hash missing"),
        (game_result, "Game Result missing"),
    ]
    .into_iter()
    .filter(|(present, _)| !present)
    .map(|(_, line)| line.to_string())
    .collect();

    let status = match details.len() {
        0 => PresenceStatus::Complete,
        4 => PresenceStatus::Missing,
        _ => PresenceStatus::Partial,
    };

    DataPresenceReport {
        status,
        vrf_output,
        vrf_proof,
        tx_hash,
        game_result,
        details,
    }
}
