use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::transaction::Transaction;

/// Sentinel `previous_hash` of the genesis block (no predecessor).
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// A block under construction. Owned exclusively by the mine cycle until
/// sealed; the nonce is the only field Proof-of-Work mutates. Carries no
/// hash of its own: sealing consumes the candidate and assigns one.
#[derive(Debug, Clone)]
pub struct CandidateBlock {
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub timestamp: i64, // Unix timestamp (UTC)
    pub previous_hash: String,
    pub nonce: u64,
}

/// A sealed block in the chain. Never mutated after append; `hash` is
/// assigned exactly once, when the candidate is sealed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub timestamp: i64,
    pub previous_hash: String,
    pub nonce: u64,
    pub hash: String,
}

/// SHA-256 over the five canonical fields, serialized as a JSON object.
/// serde_json stores object keys in a BTreeMap, so the preimage comes out
/// key-sorted and is reproducible across implementations. The sealed
/// `hash` is never part of its own preimage.
fn hash_fields(
    index: u64,
    transactions: &[Transaction],
    timestamp: i64,
    previous_hash: &str,
    nonce: u64,
) -> String {
    let preimage = serde_json::json!({
        "index": index,
        "nonce": nonce,
        "previous_hash": previous_hash,
        "timestamp": timestamp,
        "transactions": transactions,
    });
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(&preimage).expect("serialize preimage"));
    hex::encode(hasher.finalize())
}

/// Difficulty predicate: `difficulty` leading `'0'` hex chars.
pub fn meets_difficulty(digest: &str, difficulty: u32) -> bool {
    digest.starts_with(&"0".repeat(difficulty as usize))
}

impl CandidateBlock {
    /// Create a candidate for the slot after `previous_hash`'s block.
    /// No validation of transaction contents.
    pub fn new(index: u64, transactions: Vec<Transaction>, previous_hash: String) -> Self {
        Self {
            index,
            transactions,
            timestamp: Utc::now().timestamp(),
            previous_hash,
            nonce: 0,
        }
    }

    pub fn compute_hash(&self) -> String {
        hash_fields(
            self.index,
            &self.transactions,
            self.timestamp,
            &self.previous_hash,
            self.nonce,
        )
    }

    /// Proof-of-Work search: from nonce 0, recompute the digest until it
    /// satisfies the difficulty predicate. Unbounded loop; startup clamps
    /// the difficulty so this terminates in practice.
    pub fn mine(&mut self, difficulty: u32) -> String {
        self.nonce = 0;
        let target_prefix = "0".repeat(difficulty as usize);
        loop {
            let digest = self.compute_hash();
            if digest.starts_with(&target_prefix) {
                return digest;
            }
            self.nonce = self.nonce.wrapping_add(1);
        }
    }

    /// Seal the candidate with its accepted digest. Consumes the candidate,
    /// so the sealed fields can no longer be reached through it.
    pub fn seal(self, hash: String) -> Block {
        Block {
            index: self.index,
            transactions: self.transactions,
            timestamp: self.timestamp,
            previous_hash: self.previous_hash,
            nonce: self.nonce,
            hash,
        }
    }
}

impl Block {
    /// Create the genesis block. Sealed directly from its own hash: genesis
    /// is not Proof-of-Work-mined and is exempt from the difficulty
    /// predicate.
    pub fn genesis() -> Self {
        let candidate = CandidateBlock {
            index: 0,
            transactions: Vec::new(),
            timestamp: Utc::now().timestamp(),
            previous_hash: GENESIS_PREVIOUS_HASH.to_owned(),
            nonce: 0,
        };
        let hash = candidate.compute_hash();
        candidate.seal(hash)
    }

    /// Recompute the digest from the block's current field values.
    pub fn compute_hash(&self) -> String {
        hash_fields(
            self.index,
            &self.transactions,
            self.timestamp,
            &self.previous_hash,
            self.nonce,
        )
    }

    /// Validate that the sealed `hash` matches a fresh recompute and
    /// satisfies the difficulty. (Does NOT validate chain linkage.)
    pub fn is_valid(&self, difficulty: u32) -> bool {
        self.hash == self.compute_hash() && meets_difficulty(&self.hash, difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::Transaction;

    fn candidate() -> CandidateBlock {
        CandidateBlock {
            index: 1,
            transactions: vec![Transaction::from("A->B:5")],
            timestamp: 1_700_000_000,
            previous_hash: "prev".into(),
            nonce: 7,
        }
    }

    #[test]
    fn hash_is_deterministic() {
        let c = candidate();
        assert_eq!(c.compute_hash(), c.compute_hash());
        assert_eq!(c.compute_hash(), candidate().compute_hash());
    }

    #[test]
    fn hash_is_sensitive_to_every_field() {
        let base = candidate().compute_hash();

        let mut c = candidate();
        c.index = 2;
        assert_ne!(c.compute_hash(), base);

        let mut c = candidate();
        c.transactions[0] = Transaction::from("A->B:6");
        assert_ne!(c.compute_hash(), base);

        let mut c = candidate();
        c.timestamp += 1;
        assert_ne!(c.compute_hash(), base);

        let mut c = candidate();
        c.previous_hash = "other".into();
        assert_ne!(c.compute_hash(), base);

        let mut c = candidate();
        c.nonce += 1;
        assert_ne!(c.compute_hash(), base);
    }

    #[test]
    fn sealed_hash_is_not_part_of_its_own_preimage() {
        let c = candidate();
        let digest = c.compute_hash();
        let block = c.seal(digest.clone());
        assert_eq!(block.compute_hash(), digest);
    }

    #[test]
    fn mining_produces_leading_zeros() {
        let mut c = candidate();
        let digest = c.mine(2);
        assert!(digest.starts_with("00"));
        assert_eq!(digest, c.compute_hash());
    }

    #[test]
    fn genesis_has_valid_hash_without_pow() {
        let b = Block::genesis();
        assert_eq!(b.index, 0);
        assert_eq!(b.previous_hash, GENESIS_PREVIOUS_HASH);
        assert_eq!(b.hash, b.compute_hash());
        assert!(b.transactions.is_empty());
    }

    #[test]
    fn invalid_when_mutated_after_sealing() {
        let mut c = candidate();
        let digest = c.mine(2);
        let mut block = c.seal(digest);
        assert!(block.is_valid(2));

        block.transactions.push(Transaction::from("X->Y:999"));
        assert!(!block.is_valid(2));
        assert_ne!(block.hash, block.compute_hash());
    }

    #[test]
    fn meets_difficulty_requires_full_prefix() {
        assert!(meets_difficulty("00ab", 2));
        assert!(!meets_difficulty("0a0b", 2));
        assert!(!meets_difficulty("0", 2));
        assert!(meets_difficulty("anything", 0));
    }
}
