//! Display-name compaction for the MilX name budget.
//!
//! MilX limits display names to 21 characters. Names over budget go through
//! a whole-string ordinal collapse ("3rd" -> "3") and then token-level
//! abbreviation: common filler words are dropped, organizational words become
//! a "/" separator, and only if the result is still over budget is each word
//! cut down to its first character.

use crate::types::MAX_DISPLAY_CHARS;

/// Filler words dropped from over-budget names before abbreviation.
pub const IGNORE_WORDS: [&str; 8] =
    ["the", "own", "of", "royal", "bn", "regiment", "de", "la"];

/// Organizational words replaced by a "/" separator, e.g.
/// "A Company Northshore Regiment" -> "A / Northshore Regiment".
pub const REPLACE_WORDS: [&str; 8] =
    ["coy", "company", "bn", "regiment", "pl", "platoon", "squadron", "sqn"];

// "2th" and "3th" cover malformed exporter output, not typos here.
const ORDINAL_TOKENS: [&str; 12] = [
    "1st", "2nd", "3rd", "4th", "5th", "6th", "7th", "8th", "9th", "0th", "2th", "3th",
];

/// Collapse ordinal numerals to their leading digit across the whole string.
/// Literal substring replacement, not token-scoped. Idempotent: each
/// substitution removes the pattern it matches.
pub fn collapse_ordinals(name: &str) -> String {
    let mut out = name.to_string();
    for ordinal in ORDINAL_TOKENS {
        out = out.replace(ordinal, &ordinal[..1]);
    }
    out
}

/// Compact a display name. Never longer than the input; usually but not
/// always under the 21-character budget (very long multi-numeral names can
/// still exceed it, which is accepted).
pub fn abbreviate(name: &str, ignore_words: &[&str], replace_words: &[&str]) -> String {
    let mut tokens: Vec<String> = name
        .split_whitespace()
        .filter(|t| {
            // parenthetical annotations are dropped entirely
            !ignore_words.contains(&t.to_lowercase().as_str())
                && !t.contains('(')
                && !t.contains(')')
        })
        .map(str::to_string)
        .collect();

    // Organizational words become a "/" separator, except in last position.
    let last = tokens.len().saturating_sub(1);
    for token in tokens.iter_mut().take(last) {
        if replace_words.contains(&token.to_lowercase().as_str()) {
            *token = "/".to_string();
        }
    }

    let joined = tokens.join(" ");
    if joined.chars().count() < MAX_DISPLAY_CHARS {
        return joined;
    }

    // Still over budget: keep numerals whole, cut every other word down to
    // its first character.
    let mut out = String::new();
    for token in &tokens {
        if token.chars().all(|c| c.is_ascii_digit()) {
            out.push_str(token);
            out.push(' ');
        } else if let Some(first) = token.chars().next() {
            out.push(first);
            out.push('.');
        }
    }
    // Restore readable separators around the organizational-unit marker.
    out.replace("/.", "/ ").replace("./", " /")
}

/// Caller-facing entry: names at or under budget pass through unchanged,
/// anything longer gets the ordinal collapse and the default word lists.
pub fn shorten(name: &str) -> String {
    if name.chars().count() <= MAX_DISPLAY_CHARS {
        return name.to_string();
    }
    abbreviate(&collapse_ordinals(name), &IGNORE_WORDS, &REPLACE_WORDS)
}
