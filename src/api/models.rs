use serde::Serialize;
use std::sync::Mutex;

use crate::ledger::{DEFAULT_DIFFICULTY, Ledger};
use crate::transaction::Transaction;

/// Shared application state. The ledger has a single mutator path, so it
/// sits behind one mutex: one mine at a time, and reads never interleave
/// with an in-flight append.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
}

impl AppState {
    pub fn new(difficulty: u32) -> Self {
        Self {
            ledger: Mutex::new(Ledger::new(difficulty)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub length: usize,
    pub difficulty: u32,
    pub chain: &'a [crate::ledger::Block],
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub difficulty: u32,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub mined_index: u64,
    pub hash: String,
    pub nonce: u64,
    pub difficulty: u32,
}

/* ---------- TX API Models ---------- */

#[derive(Serialize)]
pub struct NewTxResponse {
    pub pending: usize,
}

#[derive(Serialize)]
pub struct PendingResponse<'a> {
    pub size: usize,
    pub transactions: &'a [Transaction],
}
