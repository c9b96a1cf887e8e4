//! Builds a [`pmem_core::ProjectContext`] from the memory files and renders it
//! for prompt injection.

mod aggregator;
mod formatter;
mod source;

pub use aggregator::{ContextInputs, LoadedContext, context_warnings, load_context, load_context_cached};
pub use formatter::format_context_for_prompt;
pub use source::{ProjectSource, RawProjectFiles};
