//! # Bidirectional Catalog
//!
//! The code↔name mapping, kept as two ordered maps that are exact inverses
//! of each other.
//!
//! ```text
//! Catalog
//! ├── code_to_name: BTreeMap<String, String>   // "4011" → "banana"
//! └── name_to_code: BTreeMap<String, String>   // "banana" → "4011"
//! ```
//!
//! Every mutation checks all of its conflicts before touching either map,
//! so a failed call leaves the catalog exactly as it was.

use std::collections::BTreeMap;
use std::fmt;

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub code: String,
    pub name: String,
}

impl Entry {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Name was blank after trimming.
    EmptyName,
    /// Code was blank or contained something other than ASCII digits.
    InvalidCode(String),
    DuplicateCode { code: String, existing_name: String },
    DuplicateName { name: String, existing_code: String },
    /// Identifier matched neither a code nor a name.
    NotFound(String),
    /// The two directions disagree about a pair (only raised when rebuilding
    /// from persisted maps).
    Mismatch { code: String, name: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::EmptyName => write!(f, "produce name cannot be empty"),
            CatalogError::InvalidCode(raw) => {
                write!(f, "PLU code '{raw}' must contain only digits")
            }
            CatalogError::DuplicateCode {
                code,
                existing_name,
            } => write!(f, "PLU code '{code}' already exists for '{existing_name}'"),
            CatalogError::DuplicateName {
                name,
                existing_code,
            } => write!(
                f,
                "produce name '{name}' already exists with PLU code '{existing_code}'"
            ),
            CatalogError::NotFound(identifier) => write!(f, "item '{identifier}' not found"),
            CatalogError::Mismatch { code, name } => {
                write!(f, "'{code}' and '{name}' are not paired in both directions")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

// ============================================================================
// Normalization
// ============================================================================

/// Trims and lowercases a produce name.
pub fn normalize_name(raw: &str) -> Result<String, CatalogError> {
    let name = raw.trim().to_lowercase();
    if name.is_empty() {
        return Err(CatalogError::EmptyName);
    }
    Ok(name)
}

/// Validates a PLU code and drops leading zeros (`"04011"` → `"4011"`).
pub fn normalize_code(raw: &str) -> Result<String, CatalogError> {
    let code = raw.trim();
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CatalogError::InvalidCode(code.to_string()));
    }
    let significant = code.trim_start_matches('0');
    if significant.is_empty() {
        return Ok("0".to_string());
    }
    Ok(significant.to_string())
}

fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    code_to_name: BTreeMap<String, String>,
    name_to_code: BTreeMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a catalog from its two persisted directions.
    ///
    /// Fails with `Mismatch` unless the maps are exact inverses, and with the
    /// usual validation errors if any key is not already normalized.
    pub fn from_maps(
        code_to_name: BTreeMap<String, String>,
        name_to_code: BTreeMap<String, String>,
    ) -> Result<Self, CatalogError> {
        if code_to_name.len() != name_to_code.len() {
            let stray = code_to_name
                .iter()
                .find(|(code, name)| name_to_code.get(*name) != Some(*code))
                .or_else(|| {
                    name_to_code
                        .iter()
                        .map(|(name, code)| (code, name))
                        .find(|(code, name)| code_to_name.get(*code) != Some(*name))
                });
            let (code, name) = stray
                .map(|(c, n)| (c.clone(), n.clone()))
                .unwrap_or_default();
            return Err(CatalogError::Mismatch { code, name });
        }

        for (code, name) in &code_to_name {
            if name_to_code.get(name) != Some(code) {
                return Err(CatalogError::Mismatch {
                    code: code.clone(),
                    name: name.clone(),
                });
            }
            if normalize_code(code)? != *code || normalize_name(name)? != *name {
                return Err(CatalogError::Mismatch {
                    code: code.clone(),
                    name: name.clone(),
                });
            }
        }

        Ok(Self {
            code_to_name,
            name_to_code,
        })
    }

    pub fn len(&self) -> usize {
        self.code_to_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_to_name.is_empty()
    }

    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.code_to_name.get(code).map(String::as_str)
    }

    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.name_to_code.get(name).map(String::as_str)
    }

    /// All `(code, name)` pairs, ascending by name.
    pub fn all(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.name_to_code
            .iter()
            .map(|(name, code)| (code.as_str(), name.as_str()))
    }

    /// Code → name direction, as persisted in `codeToName.json`.
    pub fn code_map(&self) -> &BTreeMap<String, String> {
        &self.code_to_name
    }

    /// Name → code direction, as persisted in `nameToCode.json`.
    pub fn name_map(&self) -> &BTreeMap<String, String> {
        &self.name_to_code
    }

    /// Looks an identifier up as a code first, then as an exact name.
    pub fn resolve(&self, identifier: &str) -> Option<Entry> {
        let key = normalize_identifier(identifier);
        if let Some(name) = self.code_to_name.get(&key) {
            return Some(Entry::new(key, name.clone()));
        }
        self.name_to_code
            .get(&key)
            .map(|code| Entry::new(code.clone(), key))
    }

    fn resolve_or_missing(&self, identifier: &str) -> Result<Entry, CatalogError> {
        self.resolve(identifier)
            .ok_or_else(|| CatalogError::NotFound(normalize_identifier(identifier)))
    }

    pub fn add(&mut self, name: &str, code: &str) -> Result<Entry, CatalogError> {
        let name = normalize_name(name)?;
        let code = normalize_code(code)?;

        if let Some(existing_name) = self.code_to_name.get(&code) {
            return Err(CatalogError::DuplicateCode {
                code,
                existing_name: existing_name.clone(),
            });
        }
        if let Some(existing_code) = self.name_to_code.get(&name) {
            return Err(CatalogError::DuplicateName {
                name,
                existing_code: existing_code.clone(),
            });
        }

        self.insert_pair(&code, &name);
        Ok(Entry::new(code, name))
    }

    pub fn remove(&mut self, identifier: &str) -> Result<Entry, CatalogError> {
        let entry = self.resolve_or_missing(identifier)?;
        self.code_to_name.remove(&entry.code);
        self.name_to_code.remove(&entry.name);
        Ok(entry)
    }

    /// Gives an entry a new name, keeping its code.
    pub fn rename(&mut self, identifier: &str, new_name: &str) -> Result<Entry, CatalogError> {
        let entry = self.resolve_or_missing(identifier)?;
        self.update(&entry.code, new_name, &entry.code)
    }

    /// Gives an entry a new code, keeping its name.
    pub fn recode(&mut self, identifier: &str, new_code: &str) -> Result<Entry, CatalogError> {
        let entry = self.resolve_or_missing(identifier)?;
        self.update(&entry.code, &entry.name, new_code)
    }

    /// Replaces both sides of an entry at once. Either side may be unchanged.
    /// Nothing is applied unless both the new name and the new code are free.
    pub fn update(
        &mut self,
        identifier: &str,
        new_name: &str,
        new_code: &str,
    ) -> Result<Entry, CatalogError> {
        let old = self.resolve_or_missing(identifier)?;
        let name = normalize_name(new_name)?;
        let code = normalize_code(new_code)?;

        if let Some(existing_code) = self.name_to_code.get(&name)
            && *existing_code != old.code
        {
            return Err(CatalogError::DuplicateName {
                name,
                existing_code: existing_code.clone(),
            });
        }
        if let Some(existing_name) = self.code_to_name.get(&code)
            && *existing_name != old.name
        {
            return Err(CatalogError::DuplicateCode {
                code,
                existing_name: existing_name.clone(),
            });
        }

        self.code_to_name.remove(&old.code);
        self.name_to_code.remove(&old.name);
        self.insert_pair(&code, &name);
        Ok(Entry::new(code, name))
    }

    fn insert_pair(&mut self, code: &str, name: &str) {
        self.code_to_name.insert(code.to_string(), name.to_string());
        self.name_to_code.insert(name.to_string(), code.to_string());
    }
}
