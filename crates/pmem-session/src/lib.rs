//! Per-session caches for loaded context and attempts made during a session.
//!
//! Entries live until cleared; there is no expiry. Access is single-threaded:
//! callers sharing a cache across threads must wrap it themselves.

mod cache;
mod handle;

pub use cache::{AttemptCache, ContextCache, SessionCaches};
pub use handle::SessionHandle;
