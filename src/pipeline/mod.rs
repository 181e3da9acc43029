//! Pipeline entry points for cleanup operations.
//!
//! - `triage_feed`: Classify one feed's unread stories as keep or purge
//! - `run_cleaner`: Drive a full cleanup run over all feeds

pub mod run;
pub mod triage;

pub use run::{RunSummary, run_cleaner};
pub use triage::{DedupState, normalize_title, triage_feed};
