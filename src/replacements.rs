//! The ordered table of literal URL → code reference substitutions.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Quote characters a URL literal may be wrapped in: single, double, backtick.
pub const QUOTE_STYLES: [char; 3] = ['\'', '"', '`'];

/// One `from` → `to` entry as it appears in the settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementEntry {
    pub from: String,
    pub to: String,
}

impl ReplacementEntry {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The three quoted spellings of `from`, in `QUOTE_STYLES` order.
    pub fn quoted_variants(&self) -> [String; 3] {
        QUOTE_STYLES.map(|q| format!("{q}{}{q}", self.from))
    }
}

/// Immutable, ordered replacement table.
///
/// Built once at startup and handed to the rewriter by reference. Keys are
/// unique and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementTable {
    entries: Vec<ReplacementEntry>,
}

impl ReplacementTable {
    pub fn from_entries(entries: Vec<ReplacementEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            if entry.from.is_empty() {
                anyhow::bail!("Replacement #{} has an empty pattern", index + 1);
            }
            if !seen.insert(entry.from.as_str()) {
                anyhow::bail!("Duplicate replacement pattern: {}", entry.from);
            }
        }

        Ok(Self { entries })
    }

    /// Convenience constructor for `(from, to)` pairs.
    pub fn from_pairs<I, F, T>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (F, T)>,
        F: Into<String>,
        T: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(from, to)| ReplacementEntry::new(from, to))
            .collect();
        Self::from_entries(entries).context("Invalid replacement table")
    }

    pub fn entries(&self) -> &[ReplacementEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReplacementEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, from: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.from == from)
            .map(|e| e.to.as_str())
    }
}

impl<'a> IntoIterator for &'a ReplacementTable {
    type Item = &'a ReplacementEntry;
    type IntoIter = std::slice::Iter<'a, ReplacementEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
