//! URL discovery
//!
//! This module gathers the candidate URL list from command-line
//! arguments or from a `.txt` / `.json` input file.

pub mod collector;

// Re-export commonly used items
pub use collector::{check_input_file, collect_urls};
