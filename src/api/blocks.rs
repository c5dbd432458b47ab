use actix_web::{HttpResponse, Responder, post, web};
use log::{info, warn};

use super::models::{AppState, StoreResponse, error_response};
use crate::chain::MemoryBlockSource;
use crate::header::BlockRecord;

/// Load block records into the store. All records are validated before
/// any is stored.
#[post("/blocks/")]
pub async fn post_blocks(
    state: web::Data<AppState>,
    body: web::Json<Vec<BlockRecord>>,
) -> impl Responder {
    let records = body.into_inner();
    for record in &records {
        if let Err(e) = MemoryBlockSource::key_for(record) {
            warn!("POST /blocks/ - rejected {}: {e}", record.reported_hash);
            return error_response(&e);
        }
    }

    let stored = records.len();
    let mut blocks = state.blocks.lock().expect("mutex poisoned");
    for record in records {
        if let Err(e) = blocks.insert(record) {
            return error_response(&e);
        }
    }
    info!("BLOCKS - stored {} records; store size now {}", stored, blocks.len());
    HttpResponse::Ok().json(StoreResponse {
        stored,
        total: blocks.len(),
    })
}
