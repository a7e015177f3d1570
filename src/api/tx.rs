use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;

use super::models::{AppState, NewTxResponse, PendingResponse};
use crate::transaction::Transaction;

/// Submit a transaction into the pending pool. The payload is opaque JSON
/// and is accepted unconditionally.
#[post("/tx/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<serde_json::Value>,
) -> impl Responder {
    let tx = Transaction::new(body.into_inner());

    let pending = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.submit_transaction(tx);
        ledger.pending().len()
    };
    debug!("POST /tx/ - accepted (pool size: {pending})");

    HttpResponse::Ok().json(NewTxResponse { pending })
}

/// List the current pending pool.
#[get("/pending/")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(PendingResponse {
        size: ledger.pending().len(),
        transactions: ledger.pending(),
    })
}
