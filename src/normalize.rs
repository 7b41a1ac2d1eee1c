//! Name normalization
//!
//! Every paint name is compared in one canonical form: whitespace collapsed
//! to single spaces, trimmed, and title-cased word by word.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Canonicalize a free-text name.
///
/// `"  red   paint "` becomes `"Red Paint"`. Input that is empty after
/// trimming yields an empty string, which callers treat as "no entry".
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        push_title_case(&mut out, word);
    }
    out
}

fn push_title_case(out: &mut String, word: &str) {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return;
    };

    // Characters whose uppercase form expands (e.g. 'ß' -> "SS") stay as they
    // are, otherwise a second pass would lowercase the expansion.
    let mut upper = first.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => out.push(single),
        _ => out.push(first),
    }

    out.push_str(&chars.as_str().to_lowercase());
}

/// A name in canonical form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalName(String);

impl CanonicalName {
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for CanonicalName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CanonicalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for CanonicalName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CanonicalName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  red   Paint "), "Red Paint");
        assert_eq!(normalize("abaddon\tblack\n"), "Abaddon Black");
        assert_eq!(normalize("mephiston \r\n  red"), "Mephiston Red");
    }

    #[test]
    fn test_normalize_title_case() {
        assert_eq!(normalize("WRAITHBONE"), "Wraithbone");
        assert_eq!(normalize("nuln OIL gloss"), "Nuln Oil Gloss");
        assert_eq!(normalize("ork flesh"), "Ork Flesh");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t \n"), "");
        assert!(CanonicalName::new("  ").is_empty());
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "  red   Paint ",
            "ABADDON black",
            "straße blau",
            "ßeta",
            "ΣΟΦΟΣ green",
            "retributor armour",
            "2nd coat",
            "o'brien's  tan",
            "",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_normalize_keeps_expanding_uppercase() {
        assert_eq!(normalize("ßeta"), "ßeta");
    }

    #[test]
    fn test_canonical_name_display() {
        let name = CanonicalName::new("khemri  brown");
        assert_eq!(name.to_string(), "Khemri Brown");
        assert_eq!(name, "Khemri Brown");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Khemri Brown\"");
    }
}
