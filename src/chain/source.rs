use std::collections::HashMap;

use crate::codec::normalize_hash;
use crate::error::{Field, HeaderError};
use crate::header::BlockRecord;

/// Supplies block records by hash.
///
/// Implementations report lookup or transport failures as
/// [`HeaderError::Unavailable`]; retrying is their concern, not the walker's.
pub trait BlockSource {
    fn fetch_by_hash(&mut self, hash: &str) -> Result<BlockRecord, HeaderError>;

    /// The record named by `record.previous_block_hash`.
    fn fetch_previous(&mut self, record: &BlockRecord) -> Result<BlockRecord, HeaderError> {
        let key = record.previous_key()?;
        self.fetch_by_hash(&key)
    }
}

impl<F> BlockSource for F
where
    F: FnMut(&str) -> Result<BlockRecord, HeaderError>,
{
    fn fetch_by_hash(&mut self, hash: &str) -> Result<BlockRecord, HeaderError> {
        self(hash)
    }
}

/// In-memory block store keyed by normalized block hash.
#[derive(Debug, Default)]
pub struct MemoryBlockSource {
    blocks: HashMap<String, BlockRecord>,
}

impl MemoryBlockSource {
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
        }
    }

    /// Validate a record for storage and return the key it would be stored under.
    pub fn key_for(record: &BlockRecord) -> Result<String, HeaderError> {
        if record.reported_hash.is_empty() {
            return Err(HeaderError::format(
                Field::ReportedHash,
                "a stored block needs its hash",
            ));
        }
        record.validate()?;
        record.hash_key()
    }

    /// Validate and store a record under its reported hash. Returns the key.
    pub fn insert(&mut self, record: BlockRecord) -> Result<String, HeaderError> {
        let key = Self::key_for(&record)?;
        self.blocks.insert(key.clone(), record);
        Ok(key)
    }

    /// Build a store from records, failing on the first invalid one.
    pub fn from_records(
        records: impl IntoIterator<Item = BlockRecord>,
    ) -> Result<Self, HeaderError> {
        let mut source = Self::new();
        for record in records {
            source.insert(record)?;
        }
        Ok(source)
    }

    pub fn get(&self, hash: &str) -> Option<&BlockRecord> {
        let key = normalize_hash(hash).ok()?;
        self.blocks.get(&key)
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.get(hash).is_some()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl BlockSource for MemoryBlockSource {
    fn fetch_by_hash(&mut self, hash: &str) -> Result<BlockRecord, HeaderError> {
        self.get(hash)
            .cloned()
            .ok_or_else(|| HeaderError::unavailable(hash, "block not in store"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn block_125553() -> BlockRecord {
        BlockRecord {
            version: 1,
            previous_block_hash:
                "00000000000000001e8d6829a8a21adc5d38d0a473b144b6765798e61f98bd1d".into(),
            merkle_root: "53fb6ea244d5f501a22c95c4c56701d70a6e115c5476ed95280cb22149c171b3"
                .into(),
            timestamp: "2011-05-21T17:30:28Z".into(),
            bits: 440_711_666,
            nonce: 2_165_053_959,
            reported_hash: "0000000000001c0533ea776756cb6fdedbd952d3ab8bc71de3cd3f8a44cbaf85"
                .into(),
        }
    }

    #[test]
    fn lookup_is_normalized() {
        let mut store = MemoryBlockSource::new();
        let key = store.insert(block_125553()).unwrap();
        assert_eq!(
            key,
            "0000000000001c0533ea776756cb6fdedbd952d3ab8bc71de3cd3f8a44cbaf85"
        );
        assert!(store.contains("1C0533EA776756CB6FDEDBD952D3AB8BC71DE3CD3F8A44CBAF85"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_block_is_unavailable() {
        let mut store = MemoryBlockSource::new();
        store.insert(block_125553()).unwrap();
        let err = store.fetch_previous(&block_125553()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[test]
    fn insert_rejects_invalid_records() {
        let mut store = MemoryBlockSource::new();

        let mut no_hash = block_125553();
        no_hash.reported_hash.clear();
        assert!(store.insert(no_hash).is_err());

        let mut bad_time = block_125553();
        bad_time.timestamp = "yesterday".into();
        assert_eq!(
            store.insert(bad_time).unwrap_err().field(),
            Some(Field::Timestamp)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn closures_are_sources() {
        let mut calls = 0;
        let mut source = |hash: &str| -> Result<BlockRecord, HeaderError> {
            calls += 1;
            Err(HeaderError::unavailable(hash, "offline"))
        };
        assert!(source.fetch_previous(&block_125553()).is_err());
        assert_eq!(calls, 1);
    }
}
