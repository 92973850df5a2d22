//! Short record id generation
//!
//! Ids are the first few hex characters of a SHA-256 digest over a seed
//! (usually the record's title or name) and a random salt. Callers check
//! each candidate against the table and ask for another on collision.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Number of hex characters in a generated id
pub const ID_LENGTH: usize = 6;

/// Maximum number of candidates offered before giving up
pub const MAX_ATTEMPTS: usize = 16;

/// Yields candidate ids for a new record
#[derive(Debug)]
pub struct IdGenerator {
    seed: String,
    attempts: usize,
}

impl IdGenerator {
    /// Create a generator seeded with the given text
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            attempts: 0,
        }
    }

    /// Number of candidates produced so far
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Produce the next candidate, or `None` once `MAX_ATTEMPTS` is reached
    pub fn next_id(&mut self) -> Option<String> {
        if self.attempts >= MAX_ATTEMPTS {
            return None;
        }
        self.attempts += 1;

        let salt: u64 = rand::rng().random();
        let mut hasher = Sha256::new();
        hasher.update(self.seed.as_bytes());
        hasher.update(salt.to_le_bytes());
        hasher.update((self.attempts as u64).to_le_bytes());
        let digest = hasher.finalize();

        let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
        Some(hex[..ID_LENGTH].to_string())
    }
}
