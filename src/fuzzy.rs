//! Fuzzy matching for human-typed paint names
//!
//! Scores a name against a list of candidates with a normalized similarity
//! metric (1.0 = identical, 0.0 = nothing in common) and picks the single
//! best candidate. Comparison is case-insensitive.
//!
//! Supported metrics:
//! - Levenshtein distance, normalized by the longer string
//! - Damerau-Levenshtein (adjacent transpositions count as one edit)
//! - Jaro-Winkler
//! - Sorensen-Dice over character bigrams

use std::cmp::Ordering;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Similarity metric used for the fuzzy stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    Levenshtein,
    #[default]
    DamerauLevenshtein,
    JaroWinkler,
    SorensenDice,
}

impl Metric {
    /// Similarity of two already case-folded strings, in [0, 1]
    pub fn score(self, a: &str, b: &str) -> f64 {
        let score = match self {
            Metric::Levenshtein => strsim::normalized_levenshtein(a, b),
            Metric::DamerauLevenshtein => strsim::normalized_damerau_levenshtein(a, b),
            Metric::JaroWinkler => strsim::jaro_winkler(a, b),
            Metric::SorensenDice => strsim::sorensen_dice(a, b),
        };
        score.clamp(0.0, 1.0)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::Levenshtein => "levenshtein",
            Metric::DamerauLevenshtein => "damerau-levenshtein",
            Metric::JaroWinkler => "jaro-winkler",
            Metric::SorensenDice => "sorensen-dice",
        };
        f.write_str(name)
    }
}

/// Which candidate wins when several share the top score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// First candidate in snapshot order
    #[default]
    FirstSeen,
    /// Lexicographically smallest candidate
    Lexicographic,
}

/// Best candidate for an input
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    /// Candidate as it appears in the snapshot
    pub candidate: &'a str,
    /// Similarity in [0, 1]
    pub score: f64,
}

/// Scores inputs against a fixed candidate list
pub struct FuzzyMatcher<'a> {
    metric: Metric,
    tie_break: TieBreak,
    candidates: Vec<(&'a str, String)>,
}

impl<'a> FuzzyMatcher<'a> {
    pub fn new<I>(candidates: I, metric: Metric, tie_break: TieBreak) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let candidates = candidates
            .into_iter()
            .filter(|c| !c.trim().is_empty())
            .map(|c| (c, c.to_lowercase()))
            .collect();

        Self {
            metric,
            tie_break,
            candidates,
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Find the highest scoring candidate, if there are any candidates at all
    pub fn best(&self, input: &str) -> Option<Match<'a>> {
        let input_lower = input.to_lowercase();
        let mut best: Option<Match<'a>> = None;

        for &(candidate, ref folded) in &self.candidates {
            let score = self.metric.score(&input_lower, folded);
            let replace = match &best {
                None => true,
                Some(current) => match score.partial_cmp(&current.score) {
                    Some(Ordering::Greater) => true,
                    Some(Ordering::Equal) => self.wins_tie(candidate, current.candidate),
                    _ => false,
                },
            };
            if replace {
                best = Some(Match { candidate, score });
            }
        }

        if let Some(ref m) = best {
            log::trace!("best match for '{input}': '{}' ({:.3})", m.candidate, m.score);
        }
        best
    }

    fn wins_tie(&self, challenger: &str, holder: &str) -> bool {
        match self.tie_break {
            TieBreak::FirstSeen => false,
            TieBreak::Lexicographic => challenger < holder,
        }
    }
}

/// Format a correction for display to the user
pub fn format_correction(original: &str, corrected: &str) -> String {
    if original.to_lowercase() == corrected.to_lowercase() {
        corrected.to_string()
    } else {
        format!("{original} -> {corrected}")
    }
}
