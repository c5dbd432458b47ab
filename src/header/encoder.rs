use std::fmt;

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{Serialize, Serializer};

use super::hash::{Digest, double_hash};
use super::record::BlockRecord;
use super::{
    BITS_OFFSET, HEADER_HEX_LEN, HEADER_LEN, MERKLE_ROOT_OFFSET, NONCE_OFFSET, PREV_HASH_OFFSET,
    TIMESTAMP_FORMAT, TIMESTAMP_OFFSET, VERSION_OFFSET,
};
use crate::codec::{
    HASH_LEN, bytes_to_hex, hex_to_bytes, normalize_hash, reverse_byte_order, to_little_endian,
};
use crate::error::{Field, HeaderError};

/// The canonical 80-byte block header.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedHeader([u8; HEADER_LEN]);

impl EncodedHeader {
    pub fn as_bytes(&self) -> &[u8; HEADER_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }

    /// Parse a previously serialized header (160 hex characters).
    pub fn from_hex(hex_str: &str) -> Result<Self, HeaderError> {
        if hex_str.len() != HEADER_HEX_LEN {
            return Err(HeaderError::format(
                Field::Header,
                format!(
                    "encoded block header length is {}, must be {HEADER_HEX_LEN}",
                    hex_str.len()
                ),
            ));
        }
        let bytes = hex_to_bytes(hex_str).map_err(|e| HeaderError::from_codec(Field::Header, e))?;
        Self::from_slice(&bytes)
    }

    fn from_slice(bytes: &[u8]) -> Result<Self, HeaderError> {
        let raw: [u8; HEADER_LEN] = bytes.try_into().map_err(|_| {
            HeaderError::format(
                Field::Header,
                format!(
                    "encoded block header is {} bytes, must be {HEADER_LEN}",
                    bytes.len()
                ),
            )
        })?;
        Ok(Self(raw))
    }

    /// Block hash of this header.
    pub fn hash(&self) -> Digest {
        double_hash(&self.0)
    }

    fn word(&self, offset: usize) -> [u8; 4] {
        let mut w = [0u8; 4];
        w.copy_from_slice(&self.0[offset..offset + 4]);
        w
    }

    fn display_hash(&self, offset: usize) -> String {
        let mut h = [0u8; HASH_LEN];
        h.copy_from_slice(&self.0[offset..offset + HASH_LEN]);
        h.reverse();
        bytes_to_hex(&h)
    }

    pub fn version(&self) -> i32 {
        i32::from_le_bytes(self.word(VERSION_OFFSET))
    }

    /// Previous-block hash in display order.
    pub fn previous_block_hash(&self) -> String {
        self.display_hash(PREV_HASH_OFFSET)
    }

    /// Merkle root in display order.
    pub fn merkle_root(&self) -> String {
        self.display_hash(MERKLE_ROOT_OFFSET)
    }

    /// Epoch seconds, read back with the same signedness used to write them.
    pub fn timestamp(&self) -> i32 {
        i32::from_le_bytes(self.word(TIMESTAMP_OFFSET))
    }

    pub fn bits(&self) -> u32 {
        u32::from_le_bytes(self.word(BITS_OFFSET))
    }

    pub fn nonce(&self) -> u32 {
        u32::from_le_bytes(self.word(NONCE_OFFSET))
    }

    /// Decode back into a block record; `reported_hash` is this header's hash.
    pub fn to_record(&self) -> BlockRecord {
        let secs = i64::from(self.timestamp());
        let timestamp = DateTime::<Utc>::from_timestamp(secs, 0)
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| secs.to_string());
        BlockRecord {
            version: i64::from(self.version()),
            previous_block_hash: self.previous_block_hash(),
            merkle_root: self.merkle_root(),
            timestamp,
            bits: i128::from(self.bits()),
            nonce: i128::from(self.nonce()),
            reported_hash: self.hash().to_hex(),
        }
    }
}

impl fmt::Display for EncodedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for EncodedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedHeader({})", self.to_hex())
    }
}

impl Serialize for EncodedHeader {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

fn encode_word(field: Field, value: i128, signed: bool) -> Result<Vec<u8>, HeaderError> {
    to_little_endian(value, 4, signed).map_err(|e| HeaderError::from_codec(field, e))
}

/// Display-order hash to in-header bytes. Trimmed leading zeros are restored
/// before reversal.
fn encode_hash(field: Field, display: &str) -> Result<Vec<u8>, HeaderError> {
    let full = normalize_hash(display).map_err(|e| HeaderError::from_codec(field, e))?;
    let reversed = reverse_byte_order(&full).map_err(|e| HeaderError::from_codec(field, e))?;
    hex_to_bytes(&reversed).map_err(|e| HeaderError::from_codec(field, e))
}

/// Byte layout of an accepted timestamp; `d` is any ASCII digit.
const TIMESTAMP_SHAPE: &[u8; 20] = b"dddd-dd-ddTdd:dd:ddZ";

fn has_timestamp_shape(timestamp: &str) -> bool {
    timestamp.len() == TIMESTAMP_SHAPE.len()
        && timestamp
            .bytes()
            .zip(TIMESTAMP_SHAPE)
            .all(|(c, &p)| if p == b'd' { c.is_ascii_digit() } else { c == p })
}

/// Strict `YYYY-MM-DDTHH:MM:SSZ` to epoch seconds.
pub fn parse_timestamp(timestamp: &str) -> Result<i64, HeaderError> {
    // chrono alone tolerates signed years and padding spaces.
    if !has_timestamp_shape(timestamp) {
        return Err(HeaderError::format(
            Field::Timestamp,
            format!("{timestamp:?} is not YYYY-MM-DDTHH:MM:SSZ"),
        ));
    }
    let parsed = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .map_err(|e| HeaderError::format(Field::Timestamp, format!("{timestamp:?}: {e}")))?;
    // Second 60 parses as a leap second folded into :59.
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(HeaderError::format(
            Field::Timestamp,
            format!("{timestamp:?}: seconds must be 00-59"),
        ));
    }
    Ok(parsed.and_utc().timestamp())
}

/// Serialize a block record into its canonical 80-byte header.
///
/// Layout: version (i32 LE) | previous hash (reversed) | merkle root
/// (reversed) | timestamp (i32 LE) | bits (u32 LE) | nonce (u32 LE).
/// The timestamp is written as a signed value. It coincides with the
/// unsigned on-wire form for every instant before 2038-01-19.
pub fn encode_header(record: &BlockRecord) -> Result<EncodedHeader, HeaderError> {
    let mut bytes = Vec::with_capacity(HEADER_LEN);
    bytes.extend(encode_word(Field::Version, i128::from(record.version), true)?);
    bytes.extend(encode_hash(
        Field::PreviousBlockHash,
        &record.previous_block_hash,
    )?);
    bytes.extend(encode_hash(Field::MerkleRoot, &record.merkle_root)?);
    let secs = parse_timestamp(&record.timestamp)?;
    bytes.extend(encode_word(Field::Timestamp, i128::from(secs), true)?);
    bytes.extend(encode_word(Field::Bits, record.bits, false)?);
    bytes.extend(encode_word(Field::Nonce, record.nonce, false)?);

    EncodedHeader::from_slice(&bytes)
}

/// Whether the record's published hash matches the hash of its header.
pub fn verify_reported_hash(record: &BlockRecord) -> Result<bool, HeaderError> {
    let digest = encode_header(record)?.hash();
    digest
        .matches(&record.reported_hash)
        .map_err(|e| HeaderError::from_codec(Field::ReportedHash, e))
}
