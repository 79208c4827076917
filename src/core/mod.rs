//! # Core Lookup Logic
//!
//! The catalog and everything that reads or writes it.
//! It knows nothing about menus or terminals.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Catalog (bijection)  │
//!                    │  • Matcher (search)     │
//!                    │  • Store (persistence)  │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │   Shell    │
//!                         │ (numbered  │
//!                         │   menu)    │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: `Catalog`, the code↔name bijection and its mutations
//! - [`matcher`]: tiered search (code → name → substring → fuzzy)
//! - [`similarity`]: the fuzzy tier's string metric
//! - [`seed`]: built-in default catalog
//! - [`state`]: `App`, the catalog plus its session mode
//! - [`store`]: `CatalogStore` and the two-file JSON store
//! - [`config`]: settings resolution

pub mod catalog;
pub mod config;
pub mod matcher;
pub mod seed;
pub mod similarity;
pub mod state;
pub mod store;
