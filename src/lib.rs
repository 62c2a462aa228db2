//! Diagnosis submission pipeline
//!
//! Shapes free-form patient input into a clinical case, attaches an optional provider
//! credential, submits it to the diagnosis service and normalizes the outcome.

pub mod case;
pub mod client;
pub mod config;
pub mod credentials;
pub mod diagnosis;
pub mod session;


pub use case::{build_case, ClinicalCase, FormState};
pub use client::{ClientError, DiagnosisClient};
pub use config::Config;
pub use credentials::{ApiKey, Credential, Provider};
pub use session::{DiagnosisSession, ResponseOrdering, SessionState, SubmissionResult};
