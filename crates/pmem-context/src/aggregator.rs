//! Assembling parsed records into one [`ProjectContext`].

use pmem_config::ContextConfig;
use pmem_core::{BlockerStatus, Impact, MemoryError, ProjectContext};
use pmem_parser::{parse_attempts, parse_blockers, parse_decisions, parse_devlog, parse_state};
use pmem_session::{ContextCache, SessionHandle};
use tracing::{debug, info, warn};

/// Raw document texts. Only `state` is required; absent documents load as
/// empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextInputs<'a> {
    pub decisions: Option<&'a str>,
    pub devlog: Option<&'a str>,
    pub attempts: Option<&'a str>,
    pub blockers: Option<&'a str>,
    pub state: Option<&'a str>,
}

/// A built context with the advisory warnings computed from it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedContext {
    pub context: ProjectContext,
    pub warnings: Vec<String>,
}

/// Parse every document and assemble the context.
///
/// Fails only when the state blob is missing or unreadable. Warnings never
/// block loading.
pub fn load_context(
    inputs: &ContextInputs<'_>,
    config: &ContextConfig,
) -> Result<LoadedContext, MemoryError> {
    let state = parse_state(inputs.state)?;

    let decisions = parse_decisions(inputs.decisions.unwrap_or_default());
    let mut devlog = parse_devlog(inputs.devlog.unwrap_or_default());
    let mut attempts = parse_attempts(inputs.attempts.unwrap_or_default());
    let blockers = parse_blockers(inputs.blockers.unwrap_or_default());

    // Stable sorts: equal dates keep document order.
    devlog.sort_by(|a, b| b.date.cmp(&a.date));
    let recent_changes = devlog
        .iter()
        .take(config.recent_devlog_entries)
        .flat_map(|entry| entry.files_changed.iter().cloned())
        .collect();

    // Undated attempts compare as `None` and so land after every dated one.
    attempts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    attempts.truncate(config.recent_attempts_limit);

    let active_blockers: Vec<_> = blockers
        .into_iter()
        .filter(|b| b.status == BlockerStatus::Active)
        .collect();

    let context = ProjectContext {
        version: state.version().to_string(),
        project_name: state.project_name().to_string(),
        project_type: state.project_type().to_string(),
        current_phase: state.current_phase().to_string(),
        last_updated: state.last_updated.clone(),
        stack: state.stack.resolve(),
        built_features: state.features.built.clone(),
        pending_features: state.features.pending.clone(),
        recent_commits: Vec::new(),
        recent_changes,
        decisions,
        recent_attempts: attempts,
        blockers: active_blockers,
    };

    info!(
        project = %context.project_name,
        decisions = context.decisions.len(),
        attempts = context.recent_attempts.len(),
        blockers = context.blockers.len(),
        changes = context.recent_changes.len(),
        "Loaded project context"
    );

    let warnings = context_warnings(&context);
    for warning in &warnings {
        warn!("{warning}");
    }
    Ok(LoadedContext { context, warnings })
}

/// Advisory counts: critical decisions, active blockers, and attempts marked
/// do-not-retry. A count of zero produces no warning.
pub fn context_warnings(context: &ProjectContext) -> Vec<String> {
    let critical = context
        .decisions
        .iter()
        .filter(|d| d.impact == Impact::Critical)
        .count();
    let blockers = context.blockers.len();
    let no_retry = context
        .recent_attempts
        .iter()
        .filter(|a| a.should_not_retry)
        .count();

    let mut warnings = Vec::new();
    if critical > 0 {
        warnings.push(format!("{critical} critical decision(s) must be followed"));
    }
    if blockers > 0 {
        warnings.push(format!("{blockers} active blocker(s) need attention"));
    }
    if no_retry > 0 {
        warnings.push(format!("{no_retry} approach(es) marked do-not-retry"));
    }
    warnings
}

/// Return the session's cached context, or load and cache it.
///
/// A failed load leaves the cache untouched. Clear the session's entry to
/// force a reload.
pub fn load_context_cached(
    cache: &mut ContextCache,
    session: &SessionHandle,
    inputs: &ContextInputs<'_>,
    config: &ContextConfig,
) -> Result<LoadedContext, MemoryError> {
    if let Some(context) = cache.get(session) {
        debug!(session = %session, "Project context cache hit");
        return Ok(LoadedContext {
            warnings: context_warnings(context),
            context: context.clone(),
        });
    }
    let loaded = load_context(inputs, config)?;
    cache.set(session, loaded.context.clone());
    Ok(loaded)
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;
