use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, ChainResponse, MineResponse, ValidateResponse};
use crate::ledger::MineOutcome;

/// Get the full chain, length first.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let resp = ChainResponse {
        length: ledger.len(),
        difficulty: ledger.difficulty(),
        chain: ledger.chain(),
    };
    HttpResponse::Ok().json(resp)
}

/// Run the standalone verification pass over the whole chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let resp = ValidateResponse {
        valid: ledger.is_valid_chain(),
        length: ledger.len(),
        difficulty: ledger.difficulty(),
    };
    HttpResponse::Ok().json(resp)
}

/// Run one mine cycle over the pending pool. The Proof-of-Work search is
/// blocking and CPU-bound, and the ledger lock is held for its duration.
#[post("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    match ledger.mine() {
        MineOutcome::Appended { index } => {
            let tip = ledger.tip();
            info!(
                "MINER - sealed block #{index} (hash={}, nonce={})",
                tip.hash, tip.nonce
            );
            HttpResponse::Ok().json(MineResponse {
                mined_index: index,
                hash: tip.hash.clone(),
                nonce: tip.nonce,
                difficulty: ledger.difficulty(),
            })
        }
        MineOutcome::NothingPending => HttpResponse::Ok().body("nothing to mine"),
        MineOutcome::Rejected(reason) => {
            warn!("MINER - candidate rejected ({reason:?})");
            HttpResponse::BadRequest().body("candidate rejected")
        }
    }
}
