//! Read-only view over a diagnosis body for display.
//!
//! The service's result is passed to callers untouched as JSON. This view picks out the
//! fields worth rendering and tolerates any of them being missing.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiagnosisEntry {
    #[serde(default)]
    pub condition_name: String,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub urgency_level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DiagnosisSummary {
    pub result_id: Option<String>,
    pub primary_diagnosis: Option<DiagnosisEntry>,
    pub differential_diagnoses: Vec<DiagnosisEntry>,
    pub review_tier: Option<String>,
    pub overall_confidence: Option<f64>,
    pub red_flags_detected: Vec<String>,
    pub requires_emergency_care: bool,
    pub recommended_tests: Vec<String>,
    pub reasoning_summary: Option<String>,
}

impl DiagnosisSummary {
    /// Never fails; an unrecognized body gives an empty summary
    pub fn from_body(body: &Value) -> Self {
        serde_json::from_value(body.clone()).unwrap_or_default()
    }

    /// Plain-text report for terminal output
    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.requires_emergency_care {
            out.push_str("!! EMERGENCY CARE RECOMMENDED !!\n\n");
        }

        if let Some(ref primary) = self.primary_diagnosis {
            out.push_str(&format!("Primary diagnosis: {}", primary.condition_name));
            if let Some(confidence) = primary.confidence_score {
                out.push_str(&format!(" ({:.0}%)", confidence * 100.0));
            }
            out.push('\n');
        }

        if let Some(confidence) = self.overall_confidence {
            out.push_str(&format!("Overall confidence: {:.0}%\n", confidence * 100.0));
        }
        if let Some(ref tier) = self.review_tier {
            out.push_str(&format!("Review tier: {}\n", tier));
        }

        if !self.differential_diagnoses.is_empty() {
            out.push_str("\nDifferential diagnoses:\n");
            for (rank, entry) in self.differential_diagnoses.iter().enumerate() {
                out.push_str(&format!("  {}. {}", rank + 1, entry.condition_name));
                if let Some(confidence) = entry.confidence_score {
                    out.push_str(&format!(" ({:.0}%)", confidence * 100.0));
                }
                if let Some(ref urgency) = entry.urgency_level {
                    out.push_str(&format!(" [{}]", urgency));
                }
                out.push('\n');
            }
        }

        if !self.red_flags_detected.is_empty() {
            out.push_str("\nRed flags:\n");
            for flag in &self.red_flags_detected {
                out.push_str(&format!("  - {}\n", flag));
            }
        }

        if !self.recommended_tests.is_empty() {
            out.push_str("\nRecommended tests:\n");
            for test in &self.recommended_tests {
                out.push_str(&format!("  - {}\n", test));
            }
        }

        if let Some(ref reasoning) = self.reasoning_summary {
            out.push_str(&format!("\n{}\n", reasoning));
        }

        out
    }
}
