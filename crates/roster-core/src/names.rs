//! Record normalizer: raw roster names to structured name parts.
//!
//! Roster exports usually format names as `"FAMILY, Given Middle (Marker)"`.
//! Parenthetical markers (honorifics such as `(Miss)`) are removed before
//! parsing and never appear in the output.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structured parts of a normalized name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NameParts {
    pub given: String,
    pub middle: String,
    pub family: String,
}

impl NameParts {
    /// Given name followed by middle names, single-space separated.
    #[must_use]
    pub fn given_with_middle(&self) -> String {
        if self.middle.is_empty() {
            self.given.clone()
        } else {
            format!("{} {}", self.given, self.middle)
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.given.is_empty() && self.middle.is_empty() && self.family.is_empty()
    }
}

/// Split a raw full name into given, middle, and family parts.
///
/// With a comma, the text before the first comma is the family name and the
/// first whitespace token after it is the given name; the remaining tokens are
/// middle names. Without a comma, the first token is the given name and the
/// rest form the family name.
#[must_use]
pub fn normalize_name(raw: &str) -> NameParts {
    let cleaned = strip_markers(raw);

    if let Some((family, rest)) = cleaned.split_once(',') {
        let mut tokens = rest.split_whitespace();
        let given = tokens.next().unwrap_or_default().to_string();
        let middle = tokens.collect::<Vec<_>>().join(" ");
        return NameParts {
            given,
            middle,
            family: family.trim().to_string(),
        };
    }

    let mut tokens = cleaned.split_whitespace();
    let given = tokens.next().unwrap_or_default().to_string();
    let family = tokens.collect::<Vec<_>>().join(" ");
    NameParts {
        given,
        middle: String::new(),
        family,
    }
}

/// Remove every parenthetical segment. An unclosed `(` drops the rest of the input.
///
/// A closed marker is replaced by a single space so adjacent words stay apart.
#[must_use]
pub fn strip_markers(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut depth = 0usize;
    for ch in raw.chars() {
        match ch {
            '(' => depth += 1,
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    out.push(' ');
                }
            }
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Capitalize the first letter of each whitespace-separated token and lowercase the rest.
#[must_use]
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|token| {
            let mut chars = token.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
