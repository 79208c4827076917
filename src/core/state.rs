//! # Application State
//!
//! The owned session state: one catalog plus the mode it runs in.
//!
//! ```text
//! App
//! ├── catalog: Catalog   // the code↔name bijection
//! └── mode: Mode         // fixed at startup
//! ```
//!
//! There are no globals. The shell constructs an `App` once, threads it
//! through every menu action, and flushes it on quit.

use super::catalog::Catalog;
use super::seed;

/// Whether the catalog can be edited and saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Custom data: full menu, every mutation is saved.
    Persistent,
    /// Read-only lookup against the built-in defaults.
    Ephemeral,
}

pub struct App {
    pub catalog: Catalog,
    mode: Mode,
}

impl App {
    pub fn new(catalog: Catalog, mode: Mode) -> Self {
        Self { catalog, mode }
    }

    /// Read-only session over the default catalog.
    pub fn ephemeral() -> Self {
        Self::new(seed::default_catalog(), Mode::Ephemeral)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_persistent(&self) -> bool {
        self.mode == Mode::Persistent
    }
}
