//! Rebuilds canonical 80-byte block headers from block-explorer metadata,
//! hashes them, and walks chains of them backward.

pub mod api;
pub mod chain;
pub mod codec;
pub mod error;
pub mod header;

pub use chain::{BlockSource, HeaderChain, MemoryBlockSource, Order, StopPolicy, walk_chain};
pub use error::{ErrorKind, Field, HeaderError};
pub use header::{BlockRecord, Digest, EncodedHeader, double_hash, encode_header};
