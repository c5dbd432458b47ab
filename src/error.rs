use std::fmt;

use thiserror::Error;

/// Header field an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Version,
    PreviousBlockHash,
    MerkleRoot,
    Timestamp,
    Bits,
    Nonce,
    ReportedHash,
    /// A block record as a whole, before field extraction.
    Record,
    /// The assembled 80-byte header as a whole.
    Header,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Version => "version",
            Field::PreviousBlockHash => "previous_block_hash",
            Field::MerkleRoot => "merkle_root",
            Field::Timestamp => "timestamp",
            Field::Bits => "bits",
            Field::Nonce => "nonce",
            Field::ReportedHash => "reported_hash",
            Field::Record => "record",
            Field::Header => "header",
        };
        f.write_str(name)
    }
}

/// Coarse classification of a [`HeaderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Format,
    Range,
    Unavailable,
}

/// Errors from the byte-order codec.
#[derive(Debug, Error, PartialEq)]
pub enum CodecError {
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("value {value} does not fit in {width} {} bytes", signedness(.signed))]
    OutOfRange { value: i128, width: usize, signed: bool },
    #[error("empty hex value")]
    Empty,
    #[error("hex value has {len} characters, at most {max} allowed")]
    TooLong { len: usize, max: usize },
    #[error("unsupported integer width {0}")]
    UnsupportedWidth(usize),
}

fn signedness(signed: &bool) -> &'static str {
    if *signed { "signed" } else { "unsigned" }
}

/// Errors surfaced by header encoding and chain walking.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("malformed {field}: {reason}")]
    Format { field: Field, reason: String },
    #[error("{field} value {value} is out of range")]
    Range { field: Field, value: i128 },
    #[error("block {hash} unavailable: {reason}")]
    Unavailable { hash: String, reason: String },
}

impl HeaderError {
    pub fn format(field: Field, reason: impl Into<String>) -> Self {
        HeaderError::Format {
            field,
            reason: reason.into(),
        }
    }

    pub fn unavailable(hash: impl Into<String>, reason: impl Into<String>) -> Self {
        HeaderError::Unavailable {
            hash: hash.into(),
            reason: reason.into(),
        }
    }

    /// Attach a field to a codec failure.
    pub fn from_codec(field: Field, err: CodecError) -> Self {
        match err {
            CodecError::OutOfRange { value, .. } => HeaderError::Range { field, value },
            other => HeaderError::format(field, other.to_string()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            HeaderError::Format { .. } => ErrorKind::Format,
            HeaderError::Range { .. } => ErrorKind::Range,
            HeaderError::Unavailable { .. } => ErrorKind::Unavailable,
        }
    }

    /// The offending field, if the error concerns a single record field.
    pub fn field(&self) -> Option<Field> {
        match self {
            HeaderError::Format { field, .. } | HeaderError::Range { field, .. } => Some(*field),
            HeaderError::Unavailable { .. } => None,
        }
    }
}
