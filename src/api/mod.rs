mod blocks;
mod chain;
mod header;
mod health;
pub mod models;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(header::post_header)
            .service(header::get_block_header)
            .service(blocks::post_blocks)
            .service(chain::post_walk),
    );
}
