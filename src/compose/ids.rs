//! Context ids for include instances

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Identifier scoping slot/content matching to one include instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CtxId(pub String);

impl CtxId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CtxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CtxId {
    fn from(s: &str) -> Self {
        CtxId(s.to_string())
    }
}

/// Source of fresh context ids
///
/// Every id handed out by one source must differ from every other id it has
/// handed out.
pub trait IdSource {
    fn next_id(&mut self) -> CtxId;
}

/// Base64 of 16 random bytes
#[derive(Debug)]
pub struct RandomIds {
    rng: StdRng,
}

impl RandomIds {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible ids for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for RandomIds {
    fn next_id(&mut self) -> CtxId {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        CtxId(STANDARD.encode(bytes))
    }
}

/// `ctx0`, `ctx1`, ...
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: usize,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> CtxId {
        let id = CtxId(format!("ctx{}", self.next));
        self.next += 1;
        id
    }
}
