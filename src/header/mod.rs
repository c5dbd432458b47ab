pub mod encoder;
pub mod hash;
pub mod record;

pub use encoder::{EncodedHeader, encode_header, verify_reported_hash};
pub use hash::{Digest, double_hash};
pub use record::BlockRecord;

/// Serialized header size in bytes.
pub const HEADER_LEN: usize = 80;

/// Serialized header size in hex characters.
pub const HEADER_HEX_LEN: usize = HEADER_LEN * 2;

/// Timestamp layout accepted from block explorers (UTC, whole seconds).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// Byte offsets of each field inside the serialized header.
pub const VERSION_OFFSET: usize = 0;
pub const PREV_HASH_OFFSET: usize = 4;
pub const MERKLE_ROOT_OFFSET: usize = 36;
pub const TIMESTAMP_OFFSET: usize = 68;
pub const BITS_OFFSET: usize = 72;
pub const NONCE_OFFSET: usize = 76;
