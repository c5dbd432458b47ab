use hex::FromHexError;

use super::HASH_HEX_LEN;
use crate::error::CodecError;

/// Decode a hex string into bytes.
pub fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>, CodecError> {
    Ok(hex::decode(hex_str)?)
}

/// Lower-case hex encoding of `bytes`.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Reverse the byte order (not the nibble order) of a hex string.
///
/// Converts a hash between its display order and its in-header order.
pub fn reverse_byte_order(hex_str: &str) -> Result<String, CodecError> {
    let mut bytes = hex_to_bytes(hex_str)?;
    bytes.reverse();
    Ok(bytes_to_hex(&bytes))
}

/// Canonical display form of a 32-byte hash: lower-case, 64 characters.
///
/// Explorers sometimes drop leading zero bytes; those are restored here
/// so the value still decodes to the full 32 bytes. Empty input and
/// whitespace are rejected.
pub fn normalize_hash(hex_str: &str) -> Result<String, CodecError> {
    if hex_str.is_empty() {
        return Err(CodecError::Empty);
    }
    if let Some((index, c)) = hex_str
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_hexdigit())
    {
        return Err(FromHexError::InvalidHexCharacter { c, index }.into());
    }
    if hex_str.len() > HASH_HEX_LEN {
        return Err(CodecError::TooLong {
            len: hex_str.len(),
            max: HASH_HEX_LEN,
        });
    }
    Ok(format!(
        "{:0>width$}",
        hex_str.to_ascii_lowercase(),
        width = HASH_HEX_LEN
    ))
}
