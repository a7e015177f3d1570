pub mod block;
pub mod model;

pub use block::{Block, CandidateBlock};
pub use model::{Ledger, MineOutcome, RejectReason};

/// Default Proof-of-Work difficulty (number of leading zero hex chars).
pub const DEFAULT_DIFFICULTY: u32 = 2;

/// Difficulty bounds for the startup override. The nonce search is
/// unbounded, so a runaway difficulty is a liveness failure; keep the cap
/// low enough that mining stays interactive.
pub const MIN_DIFFICULTY: u32 = 1;
pub const MAX_DIFFICULTY: u32 = 6;
