use serde::{Deserialize, Serialize};

/// Symptom severity levels understood by the diagnosis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    #[default]
    Moderate,
    Severe,
    Critical,
}

/// Symptom frequency patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Constant,
    Intermittent,
    Episodic,
    Progressive,
}

/// A single reported symptom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomRecord {
    pub description: String,
    pub severity: Severity,
    pub frequency: Frequency,
}

impl SymptomRecord {
    pub fn new(description: String) -> Self {
        Self {
            description,
            severity: Severity::default(),
            frequency: Frequency::default(),
        }
    }
}

/// Canonical request body for the analyze endpoint.
///
/// Every field carries a value; defaults are applied by the case builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalCase {
    pub case_id: String,
    pub age: u32,
    pub sex: String,
    pub chief_complaint: String,
    pub symptoms: Vec<SymptomRecord>,
    pub medical_history: Vec<String>,
}
