use pmem_core::{ProjectContext, TechStack};
use std::fmt::Write as _;

/// Render the context as a prompt block.
///
/// Sections appear in a fixed order: identity and stack, binding decisions,
/// do-not-retry attempts, active blockers, built features. A section whose
/// list is empty is left out entirely.
pub fn format_context_for_prompt(context: &ProjectContext) -> String {
    let mut sections = vec![header(context)];

    let binding: Vec<_> = context
        .decisions
        .iter()
        .filter(|d| d.impact.is_binding())
        .collect();
    if !binding.is_empty() {
        let mut s = String::from("## Decisions (must follow)\n");
        for d in binding {
            let _ = write!(s, "- [{}] {}", d.impact, d.decision);
            if !d.reasoning.trim().is_empty() {
                let _ = write!(s, ": {}", d.reasoning.trim());
            }
            s.push('\n');
        }
        sections.push(s);
    }

    let closed: Vec<_> = context
        .recent_attempts
        .iter()
        .filter(|a| a.should_not_retry)
        .collect();
    if !closed.is_empty() {
        let mut s = String::from("## Do not retry\n");
        for a in closed {
            let _ = write!(s, "- {}: {}", a.issue, a.approach);
            if let Some(error) = &a.error_message {
                let _ = write!(s, " (error: {error})");
            }
            s.push('\n');
        }
        sections.push(s);
    }

    if !context.blockers.is_empty() {
        let mut s = String::from("## Active blockers\n");
        for b in &context.blockers {
            let _ = write!(s, "- [{}] {}", b.category, b.description);
            if let Some(error) = &b.error_message {
                let _ = write!(s, " (error: {error})");
            }
            s.push('\n');
        }
        sections.push(s);
    }

    if !context.built_features.is_empty() {
        let mut s = String::from("## Built features\n");
        for feature in &context.built_features {
            let _ = writeln!(s, "- {feature}");
        }
        sections.push(s);
    }

    sections.join("\n")
}

fn header(context: &ProjectContext) -> String {
    format!(
        "# Project: {} ({}, phase: {}, v{})\nStack: {}\n",
        context.project_name,
        context.project_type,
        context.current_phase,
        context.version,
        stack_line(&context.stack)
    )
}

fn stack_line(stack: &TechStack) -> String {
    let mut line = format!(
        "framework={}, database={}, orm={}, auth={}, ui={}",
        stack.framework, stack.database, stack.orm, stack.auth, stack.ui
    );
    if let Some(payments) = &stack.payments {
        let _ = write!(line, ", payments={payments}");
    }
    line
}

#[cfg(test)]
#[path = "formatter_tests.rs"]
mod tests;
