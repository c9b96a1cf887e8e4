#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Project state not loaded: {reason}")]
    MissingProjectState { reason: String },

    #[error("Cannot write {kind} record: {reason}")]
    InvalidRecord { kind: &'static str, reason: String },
}

impl MemoryError {
    pub fn missing_state(reason: impl Into<String>) -> Self {
        Self::MissingProjectState {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_missing_project_state() {
        let err = MemoryError::missing_state("state.json not found");
        assert_eq!(
            err.to_string(),
            "Project state not loaded: state.json not found"
        );
    }

    #[test]
    fn test_display_invalid_record() {
        let err = MemoryError::InvalidRecord {
            kind: "attempt",
            reason: "issue is empty".into(),
        };
        assert_eq!(err.to_string(), "Cannot write attempt record: issue is empty");
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemoryError>();
    }
}
