//! Attempt history queries: has an approach already been tried, what failed,
//! what worked, and what to try next.

mod format;
mod lookup;
mod matcher;
mod suggest;

pub use format::format_for_prompt;
pub use lookup::{get_failed_attempts, get_successful_approaches};
pub use matcher::{TriedCheck, has_been_tried, jaccard, word_set};
pub use suggest::suggest_alternatives;
