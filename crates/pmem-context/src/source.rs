//! Reading and writing the memory files of a project directory.

use anyhow::{Context, Result};
use pmem_config::FilesConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::aggregator::ContextInputs;

/// Raw contents of the memory files. `None` means missing or unreadable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProjectFiles {
    pub decisions: Option<String>,
    pub devlog: Option<String>,
    pub attempts: Option<String>,
    pub blockers: Option<String>,
    pub state: Option<String>,
}

impl RawProjectFiles {
    pub fn inputs(&self) -> ContextInputs<'_> {
        ContextInputs {
            decisions: self.decisions.as_deref(),
            devlog: self.devlog.as_deref(),
            attempts: self.attempts.as_deref(),
            blockers: self.blockers.as_deref(),
            state: self.state.as_deref(),
        }
    }
}

/// The memory directory of one project.
#[derive(Debug, Clone)]
pub struct ProjectSource {
    root: PathBuf,
    files: FilesConfig,
}

impl ProjectSource {
    pub fn new(project_root: impl Into<PathBuf>, files: &FilesConfig) -> Self {
        Self {
            root: project_root.into(),
            files: files.clone(),
        }
    }

    /// Read all memory files under `project_root`.
    pub fn open(project_root: &Path, files: &FilesConfig) -> RawProjectFiles {
        Self::new(project_root, files).read()
    }

    pub fn attempts_path(&self) -> PathBuf {
        self.files.attempts_path(&self.root)
    }

    pub fn read(&self) -> RawProjectFiles {
        RawProjectFiles {
            decisions: read_optional(&self.files.decisions_path(&self.root)),
            devlog: read_optional(&self.files.devlog_path(&self.root)),
            attempts: read_optional(&self.attempts_path()),
            blockers: read_optional(&self.files.blockers_path(&self.root)),
            state: read_optional(&self.files.state_path(&self.root)),
        }
    }

    /// Replace the attempts file, creating the memory directory if needed.
    pub fn write_attempts(&self, content: &str) -> Result<()> {
        let dir = self.files.memory_dir(&self.root);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create memory dir: {}", dir.display()))?;
        let path = self.attempts_path();
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write attempts: {}", path.display()))?;
        debug!(path = %path.display(), bytes = content.len(), "Wrote attempts file");
        Ok(())
    }
}

fn read_optional(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Memory file not present");
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read memory file");
            None
        }
    }
}
