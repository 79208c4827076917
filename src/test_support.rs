//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::{Cell, RefCell};
use std::io::{self, Cursor};

use crate::core::catalog::Catalog;
use crate::core::store::{CatalogStore, StorageError, StoreState};
use crate::shell::prompt::Console;

/// An in-memory store that remembers what was saved.
#[derive(Default)]
pub struct MemoryStore {
    saved: RefCell<Option<Catalog>>,
    saves: Cell<usize>,
    fail_writes: bool,
}

impl MemoryStore {
    /// Nothing on "disk" yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretends both files already hold `catalog`.
    pub fn with(catalog: Catalog) -> Self {
        Self {
            saved: RefCell::new(Some(catalog)),
            ..Self::default()
        }
    }

    /// Every save fails with `StorageError::Write`.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves.get()
    }

    pub fn saved(&self) -> Option<Catalog> {
        self.saved.borrow().clone()
    }
}

impl CatalogStore for MemoryStore {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn probe(&self) -> StoreState {
        if self.saved.borrow().is_some() {
            StoreState::Complete
        } else {
            StoreState::Empty
        }
    }

    fn load(&self) -> Result<Catalog, StorageError> {
        self.saved.borrow().clone().ok_or_else(|| StorageError::Read {
            path: "memory".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "nothing saved"),
        })
    }

    fn save(&self, catalog: &Catalog) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Write {
                path: "memory".into(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        *self.saved.borrow_mut() = Some(catalog.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

/// Canned keyboard input plus captured screen output.
pub struct ScriptedConsole {
    input: Cursor<Vec<u8>>,
    output: Vec<u8>,
}

impl ScriptedConsole {
    pub fn new(script: &str) -> Self {
        Self {
            input: Cursor::new(script.as_bytes().to_vec()),
            output: Vec::new(),
        }
    }

    pub fn console(&mut self) -> Console<'_> {
        Console::new(&mut self.input, &mut self.output)
    }

    /// Everything written so far.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}
