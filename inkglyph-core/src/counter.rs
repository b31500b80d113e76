//! The visit counter collaborator.

use crate::error::CounterError;

/// A persistent tally advanced once per finished glyph.
pub trait Counter {
    /// Advance the tally and return the new total.
    fn increment(&mut self) -> Result<u64, CounterError>;

    /// Current total without advancing it.
    fn total(&self) -> Result<u64, CounterError>;
}

/// Counter kept in memory for the lifetime of the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryCounter {
    total: u64,
}

impl MemoryCounter {
    pub const fn starting_at(total: u64) -> Self {
        Self { total }
    }
}

impl Counter for MemoryCounter {
    fn increment(&mut self) -> Result<u64, CounterError> {
        self.total = self.total.saturating_add(1);
        Ok(self.total)
    }

    fn total(&self) -> Result<u64, CounterError> {
        Ok(self.total)
    }
}
