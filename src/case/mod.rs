pub mod builder;
pub mod form;
pub mod payload;

pub use builder::build_case;
pub use form::FormState;
pub use payload::{ClinicalCase, Frequency, Severity, SymptomRecord};
