//! # Interactive Shell
//!
//! The menu loop around the core. Reads numbered options, runs one action
//! per choice, and reports action errors without leaving the loop.
//!
//! ```text
//! Running ──► Search | Add | Remove | Edit | Show All ──► Running
//!    │
//!    └──────► Quit (or end of input) ──► save if persistent ──► done
//! ```
//!
//! Only terminal I/O failures escape [`Session::run`]. Everything else
//! (cancelled prompts, duplicates, missing items, failed saves) is printed
//! and the menu comes back.

pub mod menu;
pub mod prompt;
pub mod startup;
pub mod table;

use log::{info, warn};
use std::fmt;
use std::io::{self, BufRead, Write};

use crate::core::catalog::CatalogError;
use crate::core::config::ResolvedConfig;
use crate::core::matcher::{self, MatchTier};
use crate::core::state::App;
use crate::core::store::{CatalogStore, JsonFileStore};
use menu::MenuOption;
use prompt::{Console, Expect, Reply};

// ============================================================================
// Error Type
// ============================================================================

/// Why a menu action stopped early.
#[derive(Debug)]
pub enum ActionError {
    /// User typed the cancel word. Nothing was changed.
    Cancelled,
    Catalog(CatalogError),
    Io(io::Error),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Cancelled => write!(f, "operation cancelled by user"),
            ActionError::Catalog(e) => write!(f, "{e}"),
            ActionError::Io(e) => write!(f, "terminal I/O error: {e}"),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<CatalogError> for ActionError {
    fn from(e: CatalogError) -> Self {
        ActionError::Catalog(e)
    }
}

impl From<io::Error> for ActionError {
    fn from(e: io::Error) -> Self {
        ActionError::Io(e)
    }
}

/// Whether the menu loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// ============================================================================
// Session
// ============================================================================

pub struct Session<'a> {
    app: App,
    store: &'a dyn CatalogStore,
    console: Console<'a>,
}

impl<'a> Session<'a> {
    pub fn new(app: App, store: &'a dyn CatalogStore, console: Console<'a>) -> Self {
        Self {
            app,
            store,
            console,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Runs the menu until Quit or end of input and hands back the final state.
    pub fn run(mut self) -> io::Result<App> {
        info!(
            "Session started in {:?} mode with {} entries",
            self.app.mode(),
            self.app.catalog.len()
        );
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    info!("Input closed, shutting down");
                    self.console.blank()?;
                    self.quit()?;
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(self.app)
    }

    /// Shows the menu, reads one choice and runs it.
    fn step(&mut self) -> io::Result<Flow> {
        for line in menu::render(self.app.mode()) {
            self.console.say(line)?;
        }

        let choice = match self.console.ask("Enter an option: ", Expect::Digits, false)? {
            Reply::Value(text) => text,
            // Non-cancellable prompts only ever return values.
            Reply::Cancelled | Reply::Invalid(_) => return Ok(Flow::Continue),
        };

        let Some(option) = menu::choose(self.app.mode(), &choice) else {
            self.console.say("Invalid option. Please try again.")?;
            return Ok(Flow::Continue);
        };

        match self.perform(option) {
            Ok(flow) => Ok(flow),
            Err(ActionError::Io(e)) => Err(e),
            Err(ActionError::Cancelled) => {
                info!("{option:?} cancelled");
                self.console.say("Operation cancelled.")?;
                Ok(Flow::Continue)
            }
            Err(ActionError::Catalog(e)) => {
                info!("{option:?} failed: {e}");
                self.console.say(format!("Error: {e}"))?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Runs a single menu action.
    pub fn perform(&mut self, option: MenuOption) -> Result<Flow, ActionError> {
        match option {
            MenuOption::Search => self.search()?,
            MenuOption::Add => self.add()?,
            MenuOption::Remove => self.remove()?,
            MenuOption::Edit => self.edit()?,
            MenuOption::ShowAll => self.show_all()?,
            MenuOption::Quit => {
                self.quit()?;
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Asks a cancellable question, turning `Cancelled` into an error so
    /// actions can bail out with `?`.
    fn ask(&mut self, prompt: &str, expect: Expect) -> Result<String, ActionError> {
        match self.console.ask(prompt, expect, true)? {
            Reply::Value(text) => Ok(text),
            Reply::Cancelled | Reply::Invalid(_) => Err(ActionError::Cancelled),
        }
    }

    fn search(&mut self) -> Result<(), ActionError> {
        let query = self.ask(
            "Enter produce name or PLU code to search (or 'cancel'): ",
            Expect::Text,
        )?;
        let outcome = matcher::search(&self.app.catalog, &query);

        if outcome.is_empty() {
            self.console.say("No matches found.")?;
            return Ok(());
        }

        self.console.blank()?;
        self.console.say("=== Search Results ===")?;
        if outcome.tier == MatchTier::Fuzzy {
            self.console.say("No exact match. Closest names:")?;
        }
        for entry in &outcome.entries {
            self.console.say(entry)?;
        }
        self.console.blank()?;
        Ok(())
    }

    fn add(&mut self) -> Result<(), ActionError> {
        let name = self.ask("ADD: Enter new item name (or 'cancel'): ", Expect::Text)?;
        let code = self.ask("Enter new item code (or 'cancel'): ", Expect::Digits)?;

        let entry = self.app.catalog.add(&name, &code)?;
        info!("Added {entry}");
        self.console.say(format!("=== Added item: {entry} ==="))?;
        self.persist()?;
        Ok(())
    }

    fn remove(&mut self) -> Result<(), ActionError> {
        let identifier = self.ask(
            "REMOVE: Enter item code or exact name to remove (or 'cancel'): ",
            Expect::Text,
        )?;
        let entry = self
            .app
            .catalog
            .resolve(&identifier)
            .ok_or(CatalogError::NotFound(identifier))?;

        let question = format!("Are you sure you want to remove '{entry}'? (y/n): ");
        if !self.console.confirm(&question)? {
            self.console.say("Delete cancelled.")?;
            return Ok(());
        }

        let removed = self.app.catalog.remove(&entry.code)?;
        info!("Removed {removed}");
        self.console.say(format!("Removed item: {removed}"))?;
        self.persist()?;
        Ok(())
    }

    fn edit(&mut self) -> Result<(), ActionError> {
        let identifier = self.ask(
            "EDIT: Enter item code or exact name to edit (or 'cancel'): ",
            Expect::Text,
        )?;
        let entry = self
            .app
            .catalog
            .resolve(&identifier)
            .ok_or(CatalogError::NotFound(identifier))?;

        self.console.say(format!("Editing item: {entry}"))?;
        let new_name = self.ask(
            &format!("Enter new name (Old name: '{}'): ", entry.name),
            Expect::Text,
        )?;
        let new_code = self.ask(
            &format!("Enter new code (Old code: '{}'): ", entry.code),
            Expect::Digits,
        )?;

        let updated = self.app.catalog.update(&entry.code, &new_name, &new_code)?;
        info!("Updated {entry} to {updated}");
        self.console.say(format!("Updated item: {updated}"))?;
        self.persist()?;
        Ok(())
    }

    fn show_all(&mut self) -> io::Result<()> {
        self.console.blank()?;
        self.console.say("=== Current PLU Database ===")?;
        self.console.blank()?;
        match table::render(&self.app.catalog) {
            None => self.console.say("Database is empty.")?,
            Some(lines) => {
                for line in lines {
                    self.console.say(line)?;
                }
                self.console.blank()?;
            }
        }
        Ok(())
    }

    fn quit(&mut self) -> io::Result<()> {
        if self.app.is_persistent() {
            self.console.say("Syncing JSON files...")?;
            self.persist()?;
        }
        self.console.say("Goodbye!")
    }

    /// Writes the catalog out when persistent. A failed save is reported but
    /// the in-memory change stays; the next successful save catches disk up.
    fn persist(&mut self) -> io::Result<()> {
        if !self.app.is_persistent() {
            return Ok(());
        }
        match self.store.save(&self.app.catalog) {
            Ok(()) => self.console.say("Databases saved successfully."),
            Err(e) => {
                warn!("Save to {} failed: {}", self.store.location(), e);
                self.console.say(format!("Error saving database: {e}"))
            }
        }
    }
}

/// Runs a full interactive session on stdin/stdout.
pub fn run(config: &ResolvedConfig) -> io::Result<()> {
    let store = JsonFileStore::new(config.code_path.clone(), config.name_path.clone());
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_with(config.custom_data, &store, &mut input, &mut output).map(|_| ())
}

/// Startup plus menu loop over arbitrary streams. Returns the final state,
/// or None if input ended before startup finished.
pub fn run_with(
    custom_data: bool,
    store: &dyn CatalogStore,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> io::Result<Option<App>> {
    let mut console = Console::new(input, output);
    let app = match startup::start(custom_data, store, &mut console) {
        Ok(app) => app,
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            info!("Input closed during startup");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    Session::new(app, store, console).run().map(Some)
}
