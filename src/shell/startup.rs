//! Decides the session mode and initial catalog before the menu starts.
//!
//! ```text
//! custom data off ───────────────► Ephemeral (defaults)
//! both files ──── load ok ───────► Persistent (loaded)
//!              └─ load failed ───► Ephemeral (defaults)
//! no files ────── user says y ───► Persistent (defaults, written to disk)
//!              └─ otherwise ─────► Ephemeral (defaults)
//! one file ──────────────────────► Ephemeral (defaults), disk untouched
//! ```

use std::io;

use log::{info, warn};

use super::prompt::Console;
use crate::core::seed;
use crate::core::state::{App, Mode};
use crate::core::store::{CatalogStore, StorageError, StoreState};

pub fn start(custom_data: bool, store: &dyn CatalogStore, console: &mut Console) -> io::Result<App> {
    if !custom_data {
        info!("Custom data disabled, using default catalog");
        return Ok(App::ephemeral());
    }

    match store.probe() {
        StoreState::Complete => match store.load() {
            Ok(catalog) => Ok(App::new(catalog, Mode::Persistent)),
            Err(e) => {
                warn!("Failed to load {}: {}", store.location(), e);
                console.say(format!("Could not load saved database: {e}"))?;
                console.say("Proceeding with default values.")?;
                Ok(App::ephemeral())
            }
        },
        StoreState::Empty => offer_seed(store, console),
        StoreState::Partial { present, missing } => {
            let e = StorageError::Inconsistent { present, missing };
            warn!("{e}");
            console.say(format!("Error: {e}"))?;
            console.say(
                "Please delete the existing file so both can be created together with defaults.",
            )?;
            console.blank()?;
            console.say("Proceeding with default values.")?;
            Ok(App::ephemeral())
        }
    }
}

fn offer_seed(store: &dyn CatalogStore, console: &mut Console) -> io::Result<App> {
    console.say("Welcome to PLU Lookup!")?;
    console.blank()?;
    console.say(
        "Custom databases allow you to add, remove, and modify item codes and names to\n\
         your specifications.",
    )?;
    console.say(format!("They are stored at {}.", store.location()))?;
    console.blank()?;

    if !console.confirm("Would you like to create a new set with default values? (y/n): ")? {
        info!("User declined to create custom database");
        console.blank()?;
        console.say("Proceeding with default values.")?;
        return Ok(App::ephemeral());
    }

    let catalog = seed::default_catalog();
    match store.save(&catalog) {
        Ok(()) => {
            info!("Seeded custom database at {}", store.location());
            console.say("Files created successfully.")?;
            Ok(App::new(catalog, Mode::Persistent))
        }
        Err(e) => {
            warn!("Failed to seed custom database: {e}");
            console.say(format!("Error saving database: {e}"))?;
            console.say("Proceeding with default values.")?;
            Ok(App::ephemeral())
        }
    }
}
