//! Conversion rule store.
//!
//! The rule file is human-authored plain text, one rule per line:
//!
//! ```text
//! !! comment
//! category,subcategory : BASECODE
//! ```
//!
//! Keys are looked up pre-lowered by the extractor. Duplicate keys resolve
//! last-write-wins so corrections appended to the bottom of the file take
//! effect.

use crate::error::{ConvertError, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Lines starting with this marker are comments.
pub const COMMENT_MARKER: &str = "!!";

/// Immutable (category, subcategory) -> base symbol code mapping, loaded once
/// per run and passed by reference into extraction.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    rules: HashMap<String, String>,
}

impl RuleStore {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ConvertError::config(format!("failed to read rule file {}: {e}", path.display()))
        })?;
        let store = Self::parse(&raw)?;
        info!("loaded {} conversion rules from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let mut rules = HashMap::new();
        for line in raw.replace('\r', "").lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(COMMENT_MARKER) {
                continue;
            }
            let (key, value) = line.split_once(':').ok_or_else(|| {
                ConvertError::config(format!("rule line has no ':' separator: \"{line}\""))
            })?;
            rules.insert(key.trim().to_string(), value.trim().to_string());
        }
        Ok(Self { rules })
    }

    /// Resolve the base symbol code for a (category, subcategory) pair. Both
    /// parts must already be trimmed and lower-cased. There is no fallback
    /// code: an absent key is fatal for the run.
    pub fn lookup(&self, category: &str, subcategory: &str) -> Result<&str> {
        let key = format!("{category},{subcategory}");
        self.rules
            .get(&key)
            .map(String::as_str)
            .ok_or_else(|| ConvertError::unknown_unit_type(key))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
