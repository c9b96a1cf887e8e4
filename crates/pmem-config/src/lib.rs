//! Memory configuration loading (.pmem/config.toml and the user-level config).

pub mod config;
mod config_merge;
pub mod paths;

pub use config::{ContextConfig, FilesConfig, MatcherConfig, MemoryConfig};
