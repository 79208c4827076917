//! # Match Engine
//!
//! Resolves free text to catalog entries. Tiers are tried in order and the
//! first one that yields anything wins:
//!
//! ```text
//! query ─► exact code ─► exact name ─► substring ─► fuzzy (≥ 0.6, top 5)
//!              │             │             │              │
//!            1 entry       1 entry     all hits,       ranked by
//!                                      catalog order   similarity
//! ```

use log::debug;

use super::catalog::{Catalog, Entry};
use super::similarity;

/// Minimum similarity for a fuzzy hit.
pub const FUZZY_CUTOFF: f64 = 0.6;

/// Maximum number of fuzzy hits returned.
pub const FUZZY_LIMIT: usize = 5;

/// Which tier produced a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Code,
    Name,
    Substring,
    Fuzzy,
    NoMatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub tier: MatchTier,
    pub entries: Vec<Entry>,
}

impl SearchOutcome {
    fn new(tier: MatchTier, entries: Vec<Entry>) -> Self {
        Self { tier, entries }
    }

    fn no_match() -> Self {
        Self::new(MatchTier::NoMatch, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Runs the tiered search for `query` against `catalog`.
pub fn search(catalog: &Catalog, query: &str) -> SearchOutcome {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return SearchOutcome::no_match();
    }

    if let Some(name) = catalog.name_for(&query) {
        debug!("'{query}' matched a code exactly");
        return SearchOutcome::new(MatchTier::Code, vec![Entry::new(query.clone(), name)]);
    }

    if let Some(code) = catalog.code_for(&query) {
        debug!("'{query}' matched a name exactly");
        return SearchOutcome::new(MatchTier::Name, vec![Entry::new(code, query.clone())]);
    }

    let partial: Vec<Entry> = catalog
        .all()
        .filter(|(_, name)| name.contains(query.as_str()))
        .map(|(code, name)| Entry::new(code, name))
        .collect();
    if !partial.is_empty() {
        debug!("'{query}' is a substring of {} name(s)", partial.len());
        return SearchOutcome::new(MatchTier::Substring, partial);
    }

    let fuzzy = closest(catalog, &query);
    if fuzzy.is_empty() {
        debug!("'{query}' matched nothing");
        return SearchOutcome::no_match();
    }
    debug!("'{query}' fuzzy-matched {} name(s)", fuzzy.len());
    SearchOutcome::new(MatchTier::Fuzzy, fuzzy)
}

/// Names scoring at least [`FUZZY_CUTOFF`], best first, at most
/// [`FUZZY_LIMIT`]. Equal scores keep catalog order.
fn closest(catalog: &Catalog, query: &str) -> Vec<Entry> {
    let mut scored: Vec<(f64, Entry)> = catalog
        .all()
        .map(|(code, name)| (similarity::ratio(name, query), Entry::new(code, name)))
        .filter(|(score, _)| *score >= FUZZY_CUTOFF)
        .collect();

    // Stable sort: ties stay in catalog order.
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(FUZZY_LIMIT);
    scored.into_iter().map(|(_, entry)| entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banana_only() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add("banana", "4011").unwrap();
        catalog
    }

    fn banana() -> Vec<Entry> {
        vec![Entry::new("4011", "banana")]
    }

    #[test]
    fn test_exact_code() {
        let outcome = search(&banana_only(), "4011");
        assert_eq!(outcome.tier, MatchTier::Code);
        assert_eq!(outcome.entries, banana());
    }

    #[test]
    fn test_exact_name() {
        let outcome = search(&banana_only(), "banana");
        assert_eq!(outcome.tier, MatchTier::Name);
        assert_eq!(outcome.entries, banana());
    }

    #[test]
    fn test_substring() {
        let outcome = search(&banana_only(), "ban");
        assert_eq!(outcome.tier, MatchTier::Substring);
        assert_eq!(outcome.entries, banana());
    }

    #[test]
    fn test_fuzzy() {
        // Contained in "banana", so the substring tier answers first.
        let outcome = search(&banana_only(), "banan");
        assert_eq!(outcome.tier, MatchTier::Substring);
        assert_eq!(outcome.entries, banana());

        let outcome = search(&banana_only(), "bananna");
        assert_eq!(outcome.tier, MatchTier::Fuzzy);
        assert_eq!(outcome.entries, banana());
    }

    #[test]
    fn test_no_match() {
        let outcome = search(&banana_only(), "xyz");
        assert_eq!(outcome.tier, MatchTier::NoMatch);
        assert!(outcome.is_empty());
    }

    #[test]
    fn test_query_is_trimmed_and_case_folded() {
        assert_eq!(search(&banana_only(), "  BaNaNa ").entries, banana());
        assert_eq!(search(&banana_only(), " 4011\n").tier, MatchTier::Code);
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        assert!(search(&banana_only(), "   ").is_empty());
    }

    #[test]
    fn test_code_tier_wins_over_name_tier() {
        let mut catalog = Catalog::new();
        catalog.add("banana", "4011").unwrap();
        // A name made of digits that is also another entry's code.
        catalog.add("4011", "9999").unwrap();
        let outcome = search(&catalog, "4011");
        assert_eq!(outcome.tier, MatchTier::Code);
        assert_eq!(outcome.entries, banana());
    }

    #[test]
    fn test_substring_returns_every_hit_in_catalog_order() {
        let mut catalog = Catalog::new();
        catalog.add("onion - yellow", "4093").unwrap();
        catalog.add("green onion", "4068").unwrap();
        catalog.add("onion - red", "4082").unwrap();
        catalog.add("garlic", "4608").unwrap();
        let outcome = search(&catalog, "onion");
        assert_eq!(outcome.tier, MatchTier::Substring);
        assert_eq!(
            outcome.entries,
            vec![
                Entry::new("4068", "green onion"),
                Entry::new("4082", "onion - red"),
                Entry::new("4093", "onion - yellow"),
            ]
        );
    }

    #[test]
    fn test_fuzzy_is_capped_and_ranked() {
        let mut catalog = Catalog::new();
        // Scores against "grape": grae 0.889, grap 0.889, grapx 0.8,
        // grapxx 0.727, grapxxx 0.667, grapxxxx 0.615, grapxxxxx 0.571.
        for (i, name) in [
            "grapxxxxx", "grapxxxx", "grapxxx", "grapxx", "grapx", "grap", "grae",
        ]
        .iter()
        .enumerate()
        {
            catalog.add(name, &(1000 + i).to_string()).unwrap();
        }

        let outcome = search(&catalog, "grape");
        assert_eq!(outcome.tier, MatchTier::Fuzzy);
        let names: Vec<&str> = outcome.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["grae", "grap", "grapx", "grapxx", "grapxxx"]);
    }

    #[test]
    fn test_fuzzy_cutoff_excludes_weak_matches() {
        let mut catalog = Catalog::new();
        catalog.add("grapxxxxx", "1000").unwrap();
        assert!(search(&catalog, "grape").is_empty());
    }
}
