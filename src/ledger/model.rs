use log::debug;

use super::block::{Block, CandidateBlock};
use crate::transaction::Transaction;

/// Why a mine cycle rejected its candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The candidate was built against a tip that is no longer current.
    LinkageMismatch,
    /// The claimed digest fails the difficulty predicate or does not match
    /// a fresh recompute of the candidate's fields.
    InvalidProof,
}

/// Outcome of one mine cycle. An empty pool is a documented no-op, not an
/// error, so this is an outcome enum rather than a `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MineOutcome {
    /// A block was sealed and appended; carries the new tip's index.
    Appended { index: u64 },
    /// Nothing in the pending pool; chain unchanged.
    NothingPending,
    /// Candidate discarded; pending pool left untouched for retry.
    Rejected(RejectReason),
}

/// Append-only chain of sealed blocks plus the pool of not-yet-chained
/// transactions. The sole mutator of the chain besides genesis creation.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
    difficulty: u32,
}

impl Ledger {
    /// Initialize a new ledger with a sealed genesis block.
    pub fn new(difficulty: u32) -> Self {
        Self {
            chain: vec![Block::genesis()],
            pending: Vec::new(),
            difficulty,
        }
    }

    /// The most recently appended block.
    pub fn tip(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    /// Full ordered chain, genesis first. Reading it twice without an
    /// intervening mine yields identical sequences.
    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Buffer a transaction in the pending pool. Payloads are opaque, so
    /// this cannot fail.
    pub fn submit_transaction(&mut self, tx: Transaction) {
        self.pending.push(tx);
        debug!("pending pool now holds {} transaction(s)", self.pending.len());
    }

    /// Run one mine cycle: build a candidate from the whole pending pool
    /// and the current tip, search for a qualifying nonce, validate, and
    /// append. The pool is cleared in full only on a successful append.
    pub fn mine(&mut self) -> MineOutcome {
        if self.pending.is_empty() {
            debug!("mine: nothing to mine");
            return MineOutcome::NothingPending;
        }

        let tip = self.tip();
        let mut candidate = CandidateBlock::new(
            tip.index + 1,
            self.pending.clone(),
            tip.hash.clone(),
        );

        let proof = candidate.mine(self.difficulty);

        match self.append(candidate, proof) {
            Ok(index) => {
                self.pending.clear();
                debug!("mine: appended block #{index}, pool cleared");
                MineOutcome::Appended { index }
            }
            Err(reason) => {
                debug!("mine: candidate rejected ({reason:?})");
                MineOutcome::Rejected(reason)
            }
        }
    }

    /// Gatekeep an append: linkage against the current tip, then proof
    /// re-validation. Seals the candidate and pushes it on success; on
    /// rejection the candidate is dropped and the chain is unchanged.
    pub fn append(&mut self, candidate: CandidateBlock, proof: String) -> Result<u64, RejectReason> {
        if candidate.previous_hash != self.tip().hash {
            return Err(RejectReason::LinkageMismatch);
        }
        if !self.is_valid_proof(&candidate, &proof) {
            return Err(RejectReason::InvalidProof);
        }

        let block = candidate.seal(proof);
        let index = block.index;
        self.chain.push(block);
        Ok(index)
    }

    /// True iff `digest` satisfies the difficulty predicate AND equals a
    /// fresh recompute of the candidate's hash. Guards against a caller
    /// supplying a well-prefixed digest that does not match the content.
    pub fn is_valid_proof(&self, candidate: &CandidateBlock, digest: &str) -> bool {
        super::block::meets_difficulty(digest, self.difficulty)
            && digest == candidate.compute_hash()
    }

    /// Standalone verification pass over the whole chain: genesis shape,
    /// per-block hash integrity, difficulty (genesis exempt) and linkage.
    pub fn is_valid_chain(&self) -> bool {
        let Some(genesis) = self.chain.first() else {
            return false;
        };
        if genesis.index != 0
            || genesis.previous_hash != super::block::GENESIS_PREVIOUS_HASH
            || genesis.hash != genesis.compute_hash()
        {
            return false;
        }

        for i in 1..self.chain.len() {
            let current = &self.chain[i];
            let prev = &self.chain[i - 1];

            if current.previous_hash != prev.hash {
                return false;
            }
            if !current.is_valid(self.difficulty) {
                return false;
            }
        }

        true
    }
}
