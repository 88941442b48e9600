//! Allocation of client-side object ids for created slides, tables and images.
//!
//! The Slides API accepts ids of 5 to 50 characters drawn from `[a-zA-Z0-9_-:]`,
//! starting with a word character.

use crate::errors::{Result, SlidesError};

const MIN_ID_LEN: usize = 5;
const MAX_ID_LEN: usize = 50;

/// Hands out object ids that are unique within one generation run.
pub trait ObjectIdSource: Send {
    fn next_id(&mut self) -> Result<String>;
}

/// Random ids backed by the platform entropy source (`crypto.getRandomValues` on wasm).
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl ObjectIdSource for RandomIds {
    fn next_id(&mut self) -> Result<String> {
        let mut bytes = [0u8; 12];
        getrandom::getrandom(&mut bytes).map_err(|e| SlidesError::IdGeneration(e.to_string()))?;
        let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        Ok(format!("gsm_{}", hex))
    }
}

/// Predictable ids (`{prefix}_{n}`), for tests and reproducible output.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: usize,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIds {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        SequentialIds::new("obj")
    }
}

impl ObjectIdSource for SequentialIds {
    /// The counter is zero-padded until the id reaches the minimum length.
    fn next_id(&mut self) -> Result<String> {
        let width = MIN_ID_LEN.saturating_sub(self.prefix.len() + 1).max(3);
        let id = format!("{}_{:0width$}", self.prefix, self.next, width = width);
        self.next += 1;
        if id.len() > MAX_ID_LEN {
            return Err(SlidesError::IdGeneration(format!(
                "Object id '{}' is longer than {} characters",
                id, MAX_ID_LEN
            )));
        }
        Ok(id)
    }
}
