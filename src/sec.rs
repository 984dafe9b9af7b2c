// Spelling-error correction: longest-match, case-preserving dictionary
// substitution over a curated wrong→correct map.
//
// The dictionary is loaded once at startup and immutable afterwards; `correct`
// only reads it, so a single instance can be shared across worker threads.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use regex_automata::meta::Regex;
use regex_automata::util::syntax;
use tracing::info;

/// Immutable wrong→correct phrase map plus its compiled match pattern.
///
/// Keys are matched case-insensitively with Unicode word boundaries (the
/// regex engine must treat Vietnamese diacritics as word characters, which
/// `regex-automata` does with Unicode enabled); replacement casing is
/// inferred from the matched surface form.
pub struct SecDictionary {
    entries: HashMap<String, String>,
    pattern: Option<Regex>,
}

impl SecDictionary {
    /// Dictionary with no rules; `correct` becomes the identity function.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
            pattern: None,
        }
    }

    /// Load rules from a line-oriented UTF-8 file, one `wrong -> correct`
    /// rule per line. Blank lines and lines without `->` are ignored.
    ///
    /// Fails when the file cannot be read: a configured dictionary path must
    /// never silently degrade to an empty dictionary.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read SEC dictionary: {}", path.display()))?;
        let rules = parse_rules(&content);
        info!(rules = rules.len(), path = %path.display(), "SEC dictionary loaded");
        Self::from_rules(rules)
    }

    /// Build a dictionary from in-memory rules.
    pub fn from_rules(rules: impl IntoIterator<Item = (String, String)>) -> Result<Self> {
        let mut entries = HashMap::new();
        for (wrong, correct) in rules {
            if wrong.is_empty() {
                continue;
            }
            entries.insert(wrong.to_lowercase(), correct);
        }
        if entries.is_empty() {
            return Ok(Self::empty());
        }

        // longest key first, so a short key never shadows a more specific one
        let mut keys: Vec<&String> = entries.keys().collect();
        keys.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        let alternation = keys
            .iter()
            .map(|k| escape_literal(k))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"\b(?:{alternation})\b");

        let regex = Regex::builder()
            .syntax(syntax::Config::new().case_insensitive(true))
            .build(&pattern)
            .context("failed to compile SEC dictionary pattern")?;

        Ok(Self {
            entries,
            pattern: Some(regex),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every dictionary match in `text`, preserving the matched
    /// surface casing on the replacement.
    pub fn correct(&self, text: &str) -> String {
        let Some(regex) = &self.pattern else {
            return text.to_string();
        };
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in regex.find_iter(text) {
            let matched = &text[m.range()];
            out.push_str(&text[last..m.start()]);
            match self.entries.get(&matched.to_lowercase()) {
                Some(replacement) => out.push_str(&transfer_case(matched, replacement)),
                None => out.push_str(matched),
            }
            last = m.end();
        }
        out.push_str(&text[last..]);
        out
    }
}

fn parse_rules(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let (wrong, correct) = line.split_once("->")?;
            let wrong = wrong.trim();
            let correct = correct.trim();
            if wrong.is_empty() || correct.is_empty() {
                return None;
            }
            Some((wrong.to_string(), correct.to_string()))
        })
        .collect()
}

/// Escape regex metacharacters in a dictionary key.
fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_punctuation() {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Transfer the casing pattern of the matched text onto the replacement:
/// all-uppercase → uppercase, any capitalized word → title-case each word,
/// all-lowercase → lowercase, anything else → replacement verbatim.
fn transfer_case(matched: &str, replacement: &str) -> String {
    let letters: Vec<char> = matched.chars().filter(|c| c.is_alphabetic()).collect();
    if !letters.is_empty() && letters.iter().all(|c| c.is_uppercase()) {
        return replacement.to_uppercase();
    }
    let any_titled = matched
        .split_whitespace()
        .any(|w| w.chars().next().is_some_and(|c| c.is_uppercase()));
    if any_titled {
        return replacement
            .split_whitespace()
            .map(title_word)
            .collect::<Vec<_>>()
            .join(" ");
    }
    if letters.iter().all(|c| c.is_lowercase()) {
        return replacement.to_lowercase();
    }
    replacement.to_string()
}

fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
