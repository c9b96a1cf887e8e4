//! Core record types, identifiers, and derived-field rules for project memory.

pub mod derive;
pub mod error;
pub mod hash;
pub mod types;

pub use derive::{infer_blocker_category, infer_category, infer_impact, should_not_retry};
pub use error::MemoryError;
pub use hash::{IssueHash, stable_id};
pub use types::*;
