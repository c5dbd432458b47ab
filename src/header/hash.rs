use std::fmt;

use serde::{Serialize, Serializer};
use sha2::{Digest as _, Sha256};

use crate::codec::{HASH_LEN, bytes_to_hex, normalize_hash};
use crate::error::CodecError;

/// A double-SHA-256 digest held in display order (byte-reversed from the
/// raw hash output), so that `to_string()` matches what explorers publish.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; HASH_LEN]);

impl Digest {
    /// Display-order bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    /// Raw hash output, the order in which a child header stores it.
    pub fn internal_bytes(&self) -> [u8; HASH_LEN] {
        let mut raw = self.0;
        raw.reverse();
        raw
    }

    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }

    /// Compare against a published hash, tolerating case and trimmed
    /// leading zeros.
    pub fn matches(&self, published: &str) -> Result<bool, CodecError> {
        Ok(normalize_hash(published)? == self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// SHA-256 applied twice, returned in display order.
///
/// Defined for input of any length, not only 80-byte headers.
pub fn double_hash(bytes: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let first = hasher.finalize();

    let mut hasher = Sha256::new();
    hasher.update(first);
    let second = hasher.finalize();

    let mut out = [0u8; HASH_LEN];
    out.copy_from_slice(&second[..]);
    out.reverse();
    Digest(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::hex_to_bytes;

    // Block 125552, serialized.
    const HEADER_125552: &str = concat!(
        "01000000",
        "81cd02ab7e569e8bcd9317e2fe99f2de44d49ab2b8851ba4a308000000000000",
        "e320b6c2fffc8d750423db8b1eb942ae710e951ed797f7affc8892b0f1fc122b",
        "c7f5d74d",
        "f2b9441a",
        "42a14695",
    );

    #[test]
    fn known_header_hashes_to_published_value() {
        let bytes = hex_to_bytes(HEADER_125552).unwrap();
        let digest = double_hash(&bytes);
        assert_eq!(
            digest.to_string(),
            "00000000000000001e8d6829a8a21adc5d38d0a473b144b6765798e61f98bd1d"
        );
        assert_eq!(
            bytes_to_hex(&digest.internal_bytes()),
            "1dbd981fe6985776b644b173a4d0385ddc1aa2a829688d1e0000000000000000"
        );
    }

    #[test]
    fn defined_for_any_length() {
        assert_eq!(
            double_hash(b"").to_hex(),
            "56944c5d3f98413ef45cf54545538103cc9f298e0575820ad3591376e2e0f65d"
        );
        assert_eq!(
            double_hash(b"hello").to_hex(),
            "503d8319a48348cdc610a582f7bf754b5833df65038606eb48510790dfc99595"
        );
    }

    #[test]
    fn deterministic() {
        let bytes = hex_to_bytes(HEADER_125552).unwrap();
        assert_eq!(double_hash(&bytes), double_hash(&bytes));
    }

    #[test]
    fn matches_tolerates_trimmed_zeros_and_case() {
        let digest = double_hash(&hex_to_bytes(HEADER_125552).unwrap());
        assert!(
            digest
                .matches("1E8D6829A8A21ADC5D38D0A473B144B6765798E61F98BD1D")
                .unwrap()
        );
        assert!(!digest.matches("00").unwrap());
        assert!(digest.matches("xyz").is_err());
    }
}
