/// Opaque key for one editor session.
///
/// Two handles with the same id address the same cache entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionHandle {
    id: String,
}

impl SessionHandle {
    /// Use the caller's session id, or generate a ULID when none (or only
    /// whitespace) is given.
    pub fn new(session_id: Option<&str>) -> Self {
        let id = session_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map_or_else(|| ulid::Ulid::new().to_string(), str::to_string);
        Self { id }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}
