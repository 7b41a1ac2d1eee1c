//! List reconciliation
//!
//! Classifies a pasted list of paint names against a snapshot of the names
//! already in the inventory:
//! - `Found`: a case-insensitive exact match exists
//! - `Ambiguous`: no exact match, but a fuzzy match clears the threshold
//! - `Missing`: neither
//!
//! The engine is a pure function of its inputs. Blank lines are dropped and
//! every other line produces exactly one result, in input order.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fuzzy::{FuzzyMatcher, Metric, TieBreak};
use crate::normalize::CanonicalName;

/// Default similarity a fuzzy match must reach to be suggested
pub const DEFAULT_THRESHOLD: f64 = 0.75;

/// Errors raised before any line is classified
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileError {
    /// Threshold is NaN or outside [0, 1]
    InvalidThreshold(f64),
    /// A pasted line is not valid UTF-8 text (1-based line number)
    InvalidUtf8 { line: usize },
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidThreshold(value) => {
                write!(f, "invalid input: threshold {value} is outside [0, 1]")
            }
            Self::InvalidUtf8 { line } => {
                write!(f, "invalid input: line {line} is not valid UTF-8 text")
            }
        }
    }
}

impl std::error::Error for ReconcileError {}

/// Matching policy for one reconciliation pass
///
/// Also the `[reconcile]` section of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilePolicy {
    pub threshold: f64,
    pub metric: Metric,
    pub tie_break: TieBreak,
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            metric: Metric::default(),
            tie_break: TieBreak::default(),
        }
    }
}

impl ReconcilePolicy {
    pub fn validate(&self) -> Result<(), ReconcileError> {
        if (0.0..=1.0).contains(&self.threshold) {
            Ok(())
        } else {
            Err(ReconcileError::InvalidThreshold(self.threshold))
        }
    }
}

/// Snapshot of the names already in the inventory
///
/// Duplicates collapse. Membership is case-insensitive; first-seen order is
/// kept so fuzzy tie-breaks stay deterministic.
#[derive(Debug, Clone, Default)]
pub struct KnownNames {
    names: Vec<String>,
    folded: HashSet<String>,
}

impl KnownNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut known = Self::default();
        let mut seen = HashSet::new();
        for name in names {
            let name: String = name.into();
            if name.trim().is_empty() || !seen.insert(name.clone()) {
                continue;
            }
            known.folded.insert(name.to_lowercase());
            known.names.push(name);
        }
        known
    }

    /// Case-insensitive exact lookup
    pub fn contains(&self, name: &str) -> bool {
        self.folded.contains(&name.to_lowercase())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KnownNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Outcome kind, without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Found,
    Ambiguous,
    Missing,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Found => "found",
            Outcome::Ambiguous => "ambiguous",
            Outcome::Missing => "missing",
        };
        f.write_str(label)
    }
}

/// Classification of one pasted line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconciliationResult {
    Found {
        name: CanonicalName,
    },
    Ambiguous {
        name: CanonicalName,
        suggestion: String,
        score: f64,
    },
    Missing {
        name: CanonicalName,
    },
}

impl ReconciliationResult {
    pub fn name(&self) -> &CanonicalName {
        match self {
            Self::Found { name } | Self::Ambiguous { name, .. } | Self::Missing { name } => name,
        }
    }

    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Ambiguous { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Ambiguous { score, .. } => Some(*score),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Found { .. } => Outcome::Found,
            Self::Ambiguous { .. } => Outcome::Ambiguous,
            Self::Missing { .. } => Outcome::Missing,
        }
    }
}

/// Split raw pasted bytes into lines, rejecting anything that is not text
///
/// Accepts `\n` and `\r\n` line endings and drops a leading UTF-8 byte
/// order mark. Fails on the first line that is not valid UTF-8 so no partial
/// batch reaches the engine.
pub fn split_lines(raw: &[u8]) -> Result<Vec<&str>, ReconcileError> {
    let raw = raw.strip_prefix(b"\xef\xbb\xbf").unwrap_or(raw);
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    raw.split(|b| *b == b'\n')
        .enumerate()
        .map(|(idx, line)| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            std::str::from_utf8(line).map_err(|_| ReconcileError::InvalidUtf8 { line: idx + 1 })
        })
        .collect()
}

/// Reconcile pasted lines against a known-name snapshot
pub fn reconcile<I, S>(
    lines: I,
    known: &KnownNames,
    policy: &ReconcilePolicy,
) -> Result<Vec<ReconciliationResult>, ReconcileError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    reconcile_with(lines, |name| known.contains(name), known.names(), policy)
}

/// Reconcile with an explicit exact-lookup function and fuzzy candidate list
///
/// `exact_lookup` receives the canonical name and decides the exact stage;
/// `fuzzy_candidates` are scored only when it returns false.
pub fn reconcile_with<I, S, F>(
    lines: I,
    exact_lookup: F,
    fuzzy_candidates: &[String],
    policy: &ReconcilePolicy,
) -> Result<Vec<ReconciliationResult>, ReconcileError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> bool,
{
    policy.validate()?;

    let matcher = FuzzyMatcher::new(
        fuzzy_candidates.iter().map(String::as_str),
        policy.metric,
        policy.tie_break,
    );
    if matcher.is_empty() {
        log::debug!("no fuzzy candidates, unmatched names will be reported missing");
    }
    log::debug!(
        "reconciling against {} candidates (metric={}, threshold={})",
        matcher.len(),
        policy.metric,
        policy.threshold
    );

    let mut results = Vec::new();
    for line in lines {
        let name = CanonicalName::new(line.as_ref());
        if name.is_empty() {
            continue;
        }

        if exact_lookup(name.as_str()) {
            results.push(ReconciliationResult::Found { name });
            continue;
        }

        let result = match matcher.best(&name) {
            Some(m) if m.score >= policy.threshold => ReconciliationResult::Ambiguous {
                suggestion: m.candidate.to_string(),
                score: m.score,
                name,
            },
            _ => ReconciliationResult::Missing { name },
        };
        results.push(result);
    }

    log::info!(
        "classified {} names: {} found, {} ambiguous, {} missing",
        results.len(),
        count(&results, Outcome::Found),
        count(&results, Outcome::Ambiguous),
        count(&results, Outcome::Missing)
    );
    Ok(results)
}

fn count(results: &[ReconciliationResult], outcome: Outcome) -> usize {
    results.iter().filter(|r| r.outcome() == outcome).count()
}
