use std::collections::VecDeque;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::source::BlockSource;
use crate::codec::normalize_hash;
use crate::error::{Field, HeaderError};
use crate::header::{BlockRecord, EncodedHeader, encode_header};

/// When a walk stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopPolicy {
    /// Visit exactly this many blocks.
    MaxCount(usize),
    /// Walk until the current block's previous hash equals `target`,
    /// including that block. Without a `cap` this never ends if the
    /// target is not an ancestor and the source keeps answering.
    TargetPreviousHash { target: String, cap: Option<usize> },
}

impl StopPolicy {
    fn limit(&self) -> Option<usize> {
        match self {
            StopPolicy::MaxCount(n) => Some(*n),
            StopPolicy::TargetPreviousHash { cap, .. } => *cap,
        }
    }
}

/// Order of headers in the returned chain. Traversal is always newest-first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    #[default]
    OldestFirst,
    NewestFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    CountExhausted,
    TargetReached,
    CapReached,
}

/// Headers collected by [`walk_chain`]; serializes as `{"block_headers": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderChain {
    #[serde(rename = "block_headers")]
    headers: Vec<EncodedHeader>,
    #[serde(skip)]
    termination: Termination,
}

impl HeaderChain {
    pub fn headers(&self) -> &[EncodedHeader] {
        &self.headers
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn to_hex(&self) -> Vec<String> {
        self.headers.iter().map(EncodedHeader::to_hex).collect()
    }

    pub fn into_headers(self) -> Vec<EncodedHeader> {
        self.headers
    }
}

/// Walk backward from `start`, encoding each visited block.
///
/// `source` is only asked for a predecessor when another block is still
/// going to be visited. Errors from encoding or fetching abort the walk.
pub fn walk_chain<S: BlockSource + ?Sized>(
    start: BlockRecord,
    source: &mut S,
    policy: &StopPolicy,
    order: Order,
) -> Result<HeaderChain, HeaderError> {
    let target = match policy {
        StopPolicy::TargetPreviousHash { target, .. } => Some(
            normalize_hash(target)
                .map_err(|e| HeaderError::from_codec(Field::PreviousBlockHash, e))?,
        ),
        StopPolicy::MaxCount(_) => None,
    };
    let limit = policy.limit();

    let mut headers = VecDeque::new();
    let mut current = start;
    let termination = loop {
        if limit.is_some_and(|l| headers.len() >= l) {
            break match policy {
                StopPolicy::MaxCount(_) => Termination::CountExhausted,
                StopPolicy::TargetPreviousHash { .. } => Termination::CapReached,
            };
        }

        let header = encode_header(&current)?;
        let digest = header.hash();
        debug!(
            "WALK - visited #{} hash={} prev={}",
            headers.len(),
            digest,
            current.previous_block_hash
        );
        if !current.reported_hash.is_empty()
            && !digest.matches(&current.reported_hash).unwrap_or(false)
        {
            warn!(
                "WALK - computed hash {} differs from reported {}",
                digest, current.reported_hash
            );
        }
        match order {
            Order::OldestFirst => headers.push_front(header),
            Order::NewestFirst => headers.push_back(header),
        }

        if let Some(target) = &target {
            if current.previous_key()? == *target {
                break Termination::TargetReached;
            }
        }
        if limit.is_some_and(|l| headers.len() >= l) {
            continue;
        }
        current = source.fetch_previous(&current)?;
    };

    info!(
        "WALK - collected {} headers ({:?})",
        headers.len(),
        termination
    );
    Ok(HeaderChain {
        headers: headers.into(),
        termination,
    })
}
