//! URL validation
//!
//! Format validation of the collected URLs and the HTTP accessibility
//! probe that decides which of them are worth auditing.

pub mod prober;
pub mod validator;

// Re-export commonly used items
pub use prober::{ProbeOutcome, Prober};
pub use validator::{is_valid_url, validate_urls};
