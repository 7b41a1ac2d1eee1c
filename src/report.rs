//! Reconciliation report shaping
//!
//! Groups classified names into Found, Ambiguous and Missing for display.
//! Each group keeps the input order of its members.

use serde::Serialize;
use tabled::Tabled;

use crate::fuzzy::format_correction;
use crate::reconcile::{Outcome, ReconciliationResult};

/// Grouped results of one reconciliation pass
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub summary: Summary,
    pub found: Vec<ReconciliationResult>,
    pub ambiguous: Vec<ReconciliationResult>,
    pub missing: Vec<ReconciliationResult>,
    /// Input order of Ambiguous and Missing results, as group indices
    #[serde(skip)]
    unresolved: Vec<(Outcome, usize)>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub found: usize,
    pub ambiguous: usize,
    pub missing: usize,
}

impl Report {
    pub fn from_results(results: Vec<ReconciliationResult>) -> Self {
        let mut found = Vec::new();
        let mut ambiguous = Vec::new();
        let mut missing = Vec::new();
        let mut unresolved = Vec::new();

        for result in results {
            match result.outcome() {
                Outcome::Found => found.push(result),
                Outcome::Ambiguous => {
                    unresolved.push((Outcome::Ambiguous, ambiguous.len()));
                    ambiguous.push(result);
                }
                Outcome::Missing => {
                    unresolved.push((Outcome::Missing, missing.len()));
                    missing.push(result);
                }
            }
        }

        let summary = Summary {
            total: found.len() + ambiguous.len() + missing.len(),
            found: found.len(),
            ambiguous: ambiguous.len(),
            missing: missing.len(),
        };

        Self {
            summary,
            found,
            ambiguous,
            missing,
            unresolved,
        }
    }

    /// Results that need a human decision, in input order
    pub fn unresolved(&self) -> Vec<&ReconciliationResult> {
        self.unresolved
            .iter()
            .map(|&(outcome, idx)| match outcome {
                Outcome::Ambiguous => &self.ambiguous[idx],
                _ => &self.missing[idx],
            })
            .collect()
    }

    /// Table rows, grouped Found, Ambiguous, Missing
    pub fn rows(&self) -> Vec<ReportRow> {
        self.found
            .iter()
            .chain(&self.ambiguous)
            .chain(&self.missing)
            .map(ReportRow::from)
            .collect()
    }

    /// Plain-text rendering with one section per group
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Found ({}):\n", self.summary.found));
        for r in &self.found {
            out.push_str(&format!("  {}\n", r.name()));
        }

        out.push_str(&format!("\nAmbiguous ({}):\n", self.summary.ambiguous));
        for r in &self.ambiguous {
            let suggestion = r.suggestion().unwrap_or_default();
            out.push_str(&format!(
                "  {}?\n",
                format_correction(r.name(), suggestion)
            ));
        }

        out.push_str(&format!("\nMissing ({}):\n", self.summary.missing));
        for r in &self.missing {
            out.push_str(&format!("  {}\n", r.name()));
        }

        out
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{} checked: {} found, {} ambiguous, {} missing",
            self.summary.total, self.summary.found, self.summary.ambiguous, self.summary.missing
        )
    }
}

#[derive(Debug, Tabled, Serialize)]
pub struct ReportRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Outcome")]
    pub outcome: String,
    #[tabled(rename = "Suggestion")]
    pub suggestion: String,
    #[tabled(rename = "Score")]
    pub score: String,
}

impl From<&ReconciliationResult> for ReportRow {
    fn from(result: &ReconciliationResult) -> Self {
        Self {
            name: result.name().to_string(),
            outcome: result.outcome().to_string(),
            suggestion: result.suggestion().unwrap_or_default().to_string(),
            score: result
                .score()
                .map(|s| format!("{s:.2}"))
                .unwrap_or_default(),
        }
    }
}
