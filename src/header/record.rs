use serde::{Deserialize, Serialize};

use super::encoder::encode_header;
use crate::codec::normalize_hash;
use crate::error::{Field, HeaderError};

/// Block metadata as published by a block explorer.
///
/// Integer fields are kept wider than their on-wire size (`bits` and
/// `nonce` cover the full unsigned 64-bit JSON range) so that
/// out-of-range values reach the encoder and are reported as range errors
/// instead of being silently truncated. Hashes are in display order.
/// BlockCypher field names (`ver`, `prev_block`, `mrkl_root`, `time`,
/// `hash`) are accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    #[serde(alias = "ver")]
    pub version: i64,
    #[serde(alias = "prev_block")]
    pub previous_block_hash: String,
    #[serde(alias = "mrkl_root")]
    pub merkle_root: String,
    /// `YYYY-MM-DDTHH:MM:SSZ`, UTC.
    #[serde(alias = "time")]
    pub timestamp: String,
    pub bits: i128,
    pub nonce: i128,
    #[serde(alias = "hash", default)]
    pub reported_hash: String,
}

impl BlockRecord {
    /// Build a record, rejecting anything that would not encode.
    pub fn new(
        version: i64,
        previous_block_hash: impl Into<String>,
        merkle_root: impl Into<String>,
        timestamp: impl Into<String>,
        bits: i128,
        nonce: i128,
        reported_hash: impl Into<String>,
    ) -> Result<Self, HeaderError> {
        let record = Self {
            version,
            previous_block_hash: previous_block_hash.into(),
            merkle_root: merkle_root.into(),
            timestamp: timestamp.into(),
            bits,
            nonce,
            reported_hash: reported_hash.into(),
        };
        record.validate()?;
        Ok(record)
    }

    /// Parse one record from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, HeaderError> {
        let record: Self = serde_json::from_str(json)
            .map_err(|e| HeaderError::format(Field::Record, e.to_string()))?;
        record.validate()?;
        Ok(record)
    }

    /// Check every field against the header encoding rules.
    pub fn validate(&self) -> Result<(), HeaderError> {
        encode_header(self)?;
        if !self.reported_hash.is_empty() {
            self.hash_key()?;
        }
        Ok(())
    }

    /// Normalized reported hash, the key under which this block is fetched.
    pub fn hash_key(&self) -> Result<String, HeaderError> {
        normalize_hash(&self.reported_hash)
            .map_err(|e| HeaderError::from_codec(Field::ReportedHash, e))
    }

    /// Normalized previous-block hash, the key of the predecessor.
    pub fn previous_key(&self) -> Result<String, HeaderError> {
        normalize_hash(&self.previous_block_hash)
            .map_err(|e| HeaderError::from_codec(Field::PreviousBlockHash, e))
    }
}
