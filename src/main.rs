use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;
use std::{env, fs, io};

use block_headers::api::{self, AppState};
use block_headers::chain::{DEFAULT_WALK_CAP, MemoryBlockSource};
use block_headers::header::BlockRecord;

/// Preload a JSON array of block records into the store.
fn load_blocks(path: &str) -> io::Result<MemoryBlockSource> {
    let raw = fs::read_to_string(path)?;
    let records: Vec<BlockRecord> = serde_json::from_str(&raw).map_err(io::Error::other)?;
    MemoryBlockSource::from_records(records).map_err(io::Error::other)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);
    let walk_cap: usize = env::var("WALK_CAP")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_WALK_CAP);

    let blocks = match env::var("BLOCKS_FILE") {
        Ok(path) => {
            let blocks = load_blocks(&path)?;
            info!("Loaded {} blocks from {path}", blocks.len());
            blocks
        }
        Err(_) => MemoryBlockSource::new(),
    };

    println!("🧱 Starting block header API at http://{host}:{port}");

    let state = web::Data::new(AppState::new(blocks, walk_cap));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
