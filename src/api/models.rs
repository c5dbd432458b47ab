use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::chain::{DEFAULT_WALK_CAP, MemoryBlockSource, Order, StopPolicy, Termination};
use crate::error::{ErrorKind, Field, HeaderError};
use crate::header::{Digest, EncodedHeader};

/// Shared application state: the in-memory block store walks run against.
pub struct AppState {
    pub blocks: Mutex<MemoryBlockSource>,
    /// Hard cap applied to target walks that don't bring their own.
    pub walk_cap: usize,
}

impl AppState {
    pub fn new(blocks: MemoryBlockSource, walk_cap: usize) -> Self {
        Self {
            blocks: Mutex::new(blocks),
            walk_cap,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MemoryBlockSource::new(), DEFAULT_WALK_CAP)
    }
}

/* ---------- Error Model ---------- */

#[derive(Serialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub field: Option<Field>,
    pub message: String,
}

impl From<&HeaderError> for ErrorResponse {
    fn from(err: &HeaderError) -> Self {
        Self {
            kind: err.kind(),
            field: err.field(),
            message: err.to_string(),
        }
    }
}

/// Map a core error onto an HTTP response.
pub fn error_response(err: &HeaderError) -> HttpResponse {
    let body = ErrorResponse::from(err);
    match err.kind() {
        ErrorKind::Format | ErrorKind::Range => HttpResponse::BadRequest().json(body),
        ErrorKind::Unavailable => HttpResponse::BadGateway().json(body),
    }
}

/* ---------- Header API Models ---------- */

#[derive(Serialize)]
pub struct HeaderResponse {
    pub header: EncodedHeader,
    pub hash: Digest,
    pub reported_hash: String,
    pub matches: bool,
}

/* ---------- Block Store API Models ---------- */

#[derive(Serialize)]
pub struct StoreResponse {
    pub stored: usize,
    pub total: usize,
}

/* ---------- Walk API Models ---------- */

#[derive(Deserialize)]
pub struct WalkRequest {
    pub start_hash: String,
    pub max_count: Option<usize>,
    pub target_previous_hash: Option<String>,
    pub cap: Option<usize>,
    #[serde(default)]
    pub order: Order,
}

impl WalkRequest {
    /// Exactly one of `max_count` and `target_previous_hash` must be given.
    pub fn policy(&self, default_cap: usize) -> Result<StopPolicy, &'static str> {
        match (&self.max_count, &self.target_previous_hash) {
            (Some(n), None) => Ok(StopPolicy::MaxCount(*n)),
            (None, Some(target)) => Ok(StopPolicy::TargetPreviousHash {
                target: target.clone(),
                cap: Some(self.cap.unwrap_or(default_cap)),
            }),
            (Some(_), Some(_)) => Err("give either max_count or target_previous_hash, not both"),
            (None, None) => Err("max_count or target_previous_hash required"),
        }
    }
}

#[derive(Serialize)]
pub struct WalkResponse {
    pub block_headers: Vec<EncodedHeader>,
    pub termination: Termination,
}
