use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, warn};

use super::models::{AppState, HeaderResponse, error_response};
use crate::header::{BlockRecord, encode_header};

fn describe(record: &BlockRecord) -> HttpResponse {
    let header = match encode_header(record) {
        Ok(h) => h,
        Err(e) => {
            warn!("HEADER - rejected record: {e}");
            return error_response(&e);
        }
    };
    let hash = header.hash();
    let matches = hash.matches(&record.reported_hash).unwrap_or(false);
    debug!(
        "HEADER - computed={} reported={} matches={}",
        hash, record.reported_hash, matches
    );
    HttpResponse::Ok().json(HeaderResponse {
        header,
        hash,
        reported_hash: record.reported_hash.clone(),
        matches,
    })
}

/// Encode and hash a block record supplied in the body.
#[post("/header/")]
pub async fn post_header(body: web::Json<BlockRecord>) -> impl Responder {
    describe(&body)
}

/// Encode and hash a block from the store.
#[get("/blocks/{hash}/header/")]
pub async fn get_block_header(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let hash = path.into_inner();
    let record = {
        let blocks = state.blocks.lock().expect("mutex poisoned");
        blocks.get(&hash).cloned()
    };
    match record {
        Some(record) => describe(&record),
        None => HttpResponse::NotFound().body(format!("block {hash} not found")),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::{Value, json};

    use crate::api::{AppState, init_routes};
    use crate::chain::{DEFAULT_WALK_CAP, MemoryBlockSource};
    use crate::header::BlockRecord;

    fn block_json() -> Value {
        json!({
            "hash": "00000000000000001e8d6829a8a21adc5d38d0a473b144b6765798e61f98bd1d",
            "ver": 1,
            "prev_block": "00000000000008a3a41b85b8b29ad444def299fee21793cd8b9e567eab02cd81",
            "mrkl_root": "2b12fcf1b09288fcaff797d71e950e71ae42b91e8bdb2304758dfcffc2b620e3",
            "time": "2011-05-21T17:26:31Z",
            "bits": 440711666,
            "nonce": 2504433986u64,
        })
    }

    #[actix_web::test]
    async fn header_endpoint_reproduces_hash() {
        let state = web::Data::new(AppState::default());
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/header/")
            .set_json(block_json())
            .to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["matches"], json!(true));
        assert_eq!(resp["hash"], block_json()["hash"]);
        assert_eq!(resp["header"].as_str().map(str::len), Some(160));
    }

    #[actix_web::test]
    async fn header_endpoint_reports_kind_and_field() {
        let state = web::Data::new(AppState::default());
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;
        let mut body = block_json();
        body["bits"] = json!(4294967296u64);
        let req = test::TestRequest::post()
            .uri("/api/v1/header/")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: Value = test::read_body_json(resp).await;
        assert_eq!(err["kind"], json!("range"));
        assert_eq!(err["field"], json!("bits"));
    }

    #[actix_web::test]
    async fn stored_block_header_lookup() {
        let record: BlockRecord = serde_json::from_value(block_json()).unwrap();
        let store = MemoryBlockSource::from_records([record]).unwrap();
        let state = web::Data::new(AppState::new(store, DEFAULT_WALK_CAP));
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/blocks/1e8d6829a8a21adc5d38d0a473b144b6765798e61f98bd1d/header/")
            .to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["matches"], json!(true));

        let req = test::TestRequest::get()
            .uri("/api/v1/blocks/abcd/header/")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
