//! Safety verdict returned by the model for a single command.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Severity;

/// Safety label as returned by the model.
///
/// Nominally one of "Safe", "Potentially Dangerous" or "Extremely Dangerous",
/// but any string is accepted verbatim. Callers classify it by substring
/// through [`SafetyLevel::severity`] instead of matching exact values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SafetyLevel(String);

impl SafetyLevel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the label mentions "dangerous" in any casing.
    pub fn is_dangerous(&self) -> bool {
        self.0.to_lowercase().contains("dangerous")
    }

    pub fn severity(&self) -> Severity {
        if !self.is_dangerous() {
            Severity::Safe
        } else if self.0.to_lowercase().contains("extremely") {
            Severity::Critical
        } else {
            Severity::Caution
        }
    }
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structured analysis of a shell command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandAnalysis {
    pub explanation: String,
    #[serde(rename = "safety")]
    pub safety_level: SafetyLevel,
    pub risks: Vec<String>,
    pub recommendations: Vec<String>,
}

impl CommandAnalysis {
    /// Explanation broken into sentences for bullet display.
    ///
    /// Splits on `". "`; the separator's period stays on the preceding
    /// sentence so every bullet reads as a full sentence.
    pub fn explanation_sentences(&self) -> Vec<String> {
        let text = self.explanation.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let parts: Vec<&str> = text.split(". ").collect();
        let last = parts.len() - 1;
        parts
            .iter()
            .enumerate()
            .filter(|(_, part)| !part.trim().is_empty())
            .map(|(idx, part)| {
                let part = part.trim();
                if idx < last {
                    format!("{}.", part)
                } else {
                    part.to_string()
                }
            })
            .collect()
    }

    /// Plain-text report used for clipboard export and one-shot output.
    pub fn to_report(&self, command: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("Command: {}\n", command));
        out.push_str(&format!("Safety: {}\n", self.safety_level));

        out.push_str("\nExplanation:\n");
        for sentence in self.explanation_sentences() {
            out.push_str(&format!("  - {}\n", sentence));
        }

        out.push_str("\nRisks:\n");
        if self.risks.is_empty() {
            out.push_str("  (none reported)\n");
        }
        for risk in &self.risks {
            out.push_str(&format!("  - {}\n", risk));
        }

        out.push_str("\nRecommendations:\n");
        if self.recommendations.is_empty() {
            out.push_str("  (none reported)\n");
        }
        for rec in &self.recommendations {
            out.push_str(&format!("  - {}\n", rec));
        }

        out
    }
}
