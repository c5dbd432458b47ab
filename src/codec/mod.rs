pub mod byte_order;
pub mod hex_str;

pub use byte_order::{from_little_endian, to_little_endian};
pub use hex_str::{bytes_to_hex, hex_to_bytes, normalize_hash, reverse_byte_order};

/// Width in bytes of a block hash or merkle root.
pub const HASH_LEN: usize = 32;

/// Width in hex characters of a block hash or merkle root.
pub const HASH_HEX_LEN: usize = HASH_LEN * 2;
