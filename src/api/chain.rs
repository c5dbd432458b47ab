use actix_web::{HttpResponse, Responder, post, web};
use log::{debug, warn};

use super::models::{AppState, WalkRequest, WalkResponse, error_response};
use crate::chain::walk_chain;

/// Walk the stored blocks backward from `start_hash`.
#[post("/walk/")]
pub async fn post_walk(state: web::Data<AppState>, req: web::Json<WalkRequest>) -> impl Responder {
    let policy = match req.policy(state.walk_cap) {
        Ok(p) => p,
        Err(msg) => {
            warn!("POST /walk/ - rejected: {msg}");
            return HttpResponse::BadRequest().body(msg);
        }
    };
    debug!(
        "POST /walk/ - start={} policy={:?} order={:?}",
        req.start_hash, policy, req.order
    );

    let mut blocks = state.blocks.lock().expect("mutex poisoned");
    let Some(start) = blocks.get(&req.start_hash).cloned() else {
        return HttpResponse::NotFound().body(format!("block {} not found", req.start_hash));
    };

    match walk_chain(start, &mut *blocks, &policy, req.order) {
        Ok(chain) => HttpResponse::Ok().json(WalkResponse {
            termination: chain.termination(),
            block_headers: chain.into_headers(),
        }),
        Err(e) => {
            warn!("POST /walk/ - failed: {e}");
            error_response(&e)
        }
    }
}
