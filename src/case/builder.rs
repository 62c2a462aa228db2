//! Turns raw form input into a `ClinicalCase`.
//!
//! The builder never fails. Missing or malformed fields fall back to fixed defaults so the
//! request body is always complete.

use chrono::Utc;
use rand::Rng;
use tracing::debug;

use super::form::FormState;
use super::payload::{ClinicalCase, SymptomRecord};

/// Age used when the input is absent or not a plausible integer
pub const DEFAULT_AGE: u32 = 30;

/// Oldest age the diagnosis service accepts
pub const MAX_AGE: u32 = 150;

pub const UNKNOWN_SEX: &str = "unknown";

/// Maximum chief complaint length, in characters
pub const MAX_CHIEF_COMPLAINT_CHARS: usize = 100;

pub const DEFAULT_CHIEF_COMPLAINT: &str = "General symptoms";

const CASE_ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Build the canonical case payload from the current form state
pub fn build_case(form: &FormState) -> ClinicalCase {
    let case = ClinicalCase {
        case_id: generate_case_id(),
        age: parse_age(&form.age),
        sex: normalize_sex(&form.gender),
        chief_complaint: chief_complaint(&form.symptoms),
        // Whole narrative as a single symptom; no attempt is made to split it
        symptoms: vec![SymptomRecord::new(form.symptoms.clone())],
        medical_history: parse_history(&form.medical_history),
    };

    debug!(
        "Built case {}: age={}, sex={}, {} history entries",
        case.case_id,
        case.age,
        case.sex,
        case.medical_history.len()
    );

    case
}

/// `case_<unix millis>_<random base-36 suffix>`
pub fn generate_case_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..CASE_ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("case_{}_{}", Utc::now().timestamp_millis(), suffix)
}

pub fn parse_age(input: &str) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(age) if age <= MAX_AGE => age,
        _ => DEFAULT_AGE,
    }
}

pub fn normalize_sex(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        UNKNOWN_SEX.to_string()
    } else {
        trimmed.to_string()
    }
}

/// First line of the narrative, capped at `MAX_CHIEF_COMPLAINT_CHARS` characters
pub fn chief_complaint(symptoms: &str) -> String {
    let first_line = symptoms.split('\n').next().unwrap_or_default();
    let first_line = first_line.strip_suffix('\r').unwrap_or(first_line);

    let complaint: String = first_line.chars().take(MAX_CHIEF_COMPLAINT_CHARS).collect();
    if complaint.is_empty() {
        DEFAULT_CHIEF_COMPLAINT.to_string()
    } else {
        complaint
    }
}

/// Split on commas, trim, drop empties, keep order
pub fn parse_history(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
