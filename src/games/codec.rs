//! VRF output decoding
//!
//! Bet records carry VRF outputs as standard-alphabet base64. Values are often
//! copy-pasted, so whitespace anywhere in the string is ignored. Padding may be
//! omitted entirely, but when present it must be canonical. Trailing bits are
//! not checked.

use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig},
        DecodePaddingMode,
    },
    DecodeError, Engine,
};

const fn engine(padding: DecodePaddingMode) -> GeneralPurpose {
    GeneralPurpose::new(
        &alphabet::STANDARD,
        GeneralPurposeConfig::new()
            .with_decode_padding_mode(padding)
            .with_decode_allow_trailing_bits(true),
    )
}

const UNPADDED: GeneralPurpose = engine(DecodePaddingMode::RequireNone);
const PADDED: GeneralPurpose = engine(DecodePaddingMode::RequireCanonical);

/// Decode a base64 string after stripping all whitespace.
pub fn decode_base64(input: &str) -> Result<Vec<u8>, DecodeError> {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.contains('=') {
        PADDED.decode(cleaned.as_bytes())
    } else {
        UNPADDED.decode(cleaned.as_bytes())
    }
}
