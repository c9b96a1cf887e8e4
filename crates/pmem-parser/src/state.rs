use pmem_core::{MemoryError, TechStack};
use serde::{Deserialize, Deserializer};
use tracing::debug;

pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_PROJECT_NAME: &str = "untitled";
pub const DEFAULT_PROJECT_TYPE: &str = "web-app";
pub const DEFAULT_PHASE: &str = "planning";

/// The project state blob. Every field is optional; accessors apply defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectState {
    pub version: Option<String>,
    #[serde(alias = "name")]
    pub project_name: Option<String>,
    #[serde(alias = "type")]
    pub project_type: Option<String>,
    #[serde(alias = "phase")]
    pub current_phase: Option<String>,
    pub last_updated: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub stack: StackState,
    #[serde(deserialize_with = "null_as_default")]
    pub features: FeatureState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StackState {
    pub framework: Option<String>,
    pub database: Option<String>,
    pub orm: Option<String>,
    pub auth: Option<String>,
    pub ui: Option<String>,
    pub payments: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeatureState {
    #[serde(deserialize_with = "null_as_default")]
    pub built: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub pending: Vec<String>,
}

/// Explicit `null` reads the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProjectState {
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_VERSION)
    }

    pub fn project_name(&self) -> &str {
        self.project_name.as_deref().unwrap_or(DEFAULT_PROJECT_NAME)
    }

    pub fn project_type(&self) -> &str {
        self.project_type.as_deref().unwrap_or(DEFAULT_PROJECT_TYPE)
    }

    pub fn current_phase(&self) -> &str {
        self.current_phase.as_deref().unwrap_or(DEFAULT_PHASE)
    }
}

impl StackState {
    /// Fill unset entries from [`TechStack::default`].
    pub fn resolve(&self) -> TechStack {
        let defaults = TechStack::default();
        TechStack {
            framework: self.framework.clone().unwrap_or(defaults.framework),
            database: self.database.clone().unwrap_or(defaults.database),
            orm: self.orm.clone().unwrap_or(defaults.orm),
            auth: self.auth.clone().unwrap_or(defaults.auth),
            ui: self.ui.clone().unwrap_or(defaults.ui),
            payments: self.payments.clone().or(defaults.payments),
        }
    }
}

/// Read the state blob. Absent, blank, `null`, and unparseable input are all
/// [`MemoryError::MissingProjectState`].
pub fn parse_state(raw: Option<&str>) -> Result<ProjectState, MemoryError> {
    let Some(raw) = raw else {
        return Err(MemoryError::missing_state("no state JSON provided"));
    };
    if raw.trim().is_empty() {
        return Err(MemoryError::missing_state("state JSON is empty"));
    }
    match serde_json::from_str::<Option<ProjectState>>(raw) {
        Ok(Some(state)) => {
            debug!(project = state.project_name(), "Parsed project state");
            Ok(state)
        }
        Ok(None) => Err(MemoryError::missing_state("state JSON is null")),
        Err(e) => Err(MemoryError::missing_state(format!("state JSON is invalid: {e}"))),
    }
}
