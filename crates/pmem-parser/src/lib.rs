//! Parsers for the project memory markdown dialects and the state blob.
//!
//! Every dialect shares the same two layers: [`sections`] splits a document
//! at headings, and [`fields`] reads `**Label:** value` fields, bullet lists,
//! fenced code, and `Error:` lines out of a section body. Sections whose
//! heading does not match the dialect are dropped whole; parsing never fails.

mod attempts;
mod blockers;
mod dates;
mod decisions;
mod devlog;
pub mod fields;
pub mod sections;
mod state;
mod writer;

pub use attempts::parse_attempts;
pub use blockers::parse_blockers;
pub use dates::{format_record_date, parse_record_date};
pub use decisions::parse_decisions;
pub use devlog::parse_devlog;
pub use state::{FeatureState, ProjectState, StackState, parse_state};
pub use writer::{append_attempt, render_attempt, render_decision};
