//! Offensive-term filter for greeting messages.

use std::sync::LazyLock;

static BLOCKED_WORDS: &str = include_str!("../../assets/blocked-words.txt");

static DEFAULT_BLOCKLIST: LazyLock<Blocklist> = LazyLock::new(|| Blocklist::parse(BLOCKED_WORDS));

/// Normalized terms a message must not contain.
#[derive(Debug, Clone, Default)]
pub struct Blocklist {
    terms: Vec<String>,
}

impl Blocklist {
    /// Parses a word list: one term per line, `#` starts a comment line.
    pub fn parse(source: &str) -> Self {
        let terms = source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(normalize_for_block)
            .filter(|term| !term.is_empty())
            .collect();

        Self { terms }
    }

    /// Returns true if the normalized `message` contains any term.
    pub fn is_blocked(&self, message: &str) -> bool {
        let normalized = normalize_for_block(message);
        if normalized.is_empty() {
            return false;
        }

        self.terms.iter().any(|term| normalized.contains(term.as_str()))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Checks `message` against the built-in word list.
pub fn is_blocked_message(message: &str) -> bool {
    DEFAULT_BLOCKLIST.is_blocked(message)
}

/// Lowercases, maps separators and punctuation to spaces and collapses runs of spaces.
///
/// ASCII letters, digits and Latin-1 letters survive, so "Fdp!!" and "f-d-p"
/// normalize to "fdp" and "f d p" respectively.
pub fn normalize_for_block(value: &str) -> String {
    let mapped: String = value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || ('\u{C0}'..='\u{FF}').contains(&c) {
                c
            } else {
                ' '
            }
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}
