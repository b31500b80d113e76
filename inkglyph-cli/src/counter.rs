//! Visit counter stored as a decimal number in a text file.

use std::fs;
use std::io;
use std::path::PathBuf;

use inkglyph_core::{Counter, CounterError};

/// Counter persisted to a file. A missing file counts as zero.
#[derive(Debug, Clone)]
pub struct FileCounter {
    path: PathBuf,
}

impl FileCounter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Counter for FileCounter {
    fn increment(&mut self) -> Result<u64, CounterError> {
        let total = self.total()?.saturating_add(1);
        fs::write(&self.path, format!("{total}\n"))?;
        Ok(total)
    }

    fn total(&self) -> Result<u64, CounterError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(0);
        }
        trimmed
            .parse()
            .map_err(|_| CounterError::Corrupt(trimmed.to_owned()))
    }
}
