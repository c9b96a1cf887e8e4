use super::*;
use chrono::{TimeZone, Utc};
use pmem_core::{
    Attempt, AttemptResult, Blocker, BlockerCategory, BlockerStatus, Decision, DecisionCategory,
    Impact, MadeBy,
};

fn empty_context() -> ProjectContext {
    ProjectContext {
        version: "1.0.0".into(),
        project_name: "invoicer".into(),
        project_type: "saas".into(),
        current_phase: "mvp".into(),
        last_updated: None,
        stack: TechStack::default(),
        built_features: vec![],
        pending_features: vec!["billing".into()],
        recent_commits: vec![],
        recent_changes: vec![],
        decisions: vec![],
        recent_attempts: vec![],
        blockers: vec![],
    }
}

fn decision(title: &str, impact: Impact, reasoning: &str) -> Decision {
    Decision {
        id: title.into(),
        timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        decision: title.into(),
        category: DecisionCategory::TechStack,
        reasoning: reasoning.into(),
        alternatives_considered: vec![],
        made_by: MadeBy::User,
        user_approved: true,
        reversible: true,
        impact,
        related_files: vec![],
        related_decisions: vec![],
    }
}

#[test]
fn test_empty_lists_render_header_only() {
    assert_eq!(
        format_context_for_prompt(&empty_context()),
        "# Project: invoicer (saas, phase: mvp, v1.0.0)\n\
         Stack: framework=nextjs, database=postgresql, orm=prisma, auth=nextauth, ui=tailwind\n"
    );
}

#[test]
fn test_full_context_exact_output() {
    let mut ctx = empty_context();
    ctx.stack.payments = Some("stripe".into());
    ctx.built_features = vec!["auth".into(), "dashboard".into()];
    ctx.decisions = vec![
        decision("Use PostgreSQL", Impact::Critical, "relational data"),
        decision("Prefer server actions", Impact::Low, "simpler"),
        decision("Tailwind only", Impact::High, ""),
    ];
    ctx.recent_attempts = vec![
        Attempt::new("Port 3000 in use", 1, "kill process on port 3000", AttemptResult::Failure)
            .with_error("permission denied"),
        Attempt::new("Port 3000 in use", 2, "use port 3001", AttemptResult::Success),
    ];
    ctx.blockers = vec![Blocker {
        id: "b1".into(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 18, 0, 0, 0).unwrap(),
        description: "Stripe webhook signature fails".into(),
        category: BlockerCategory::Error,
        error_message: Some("No signatures found".into()),
        attempts_made: vec![],
        status: BlockerStatus::Active,
        resolved_at: None,
        resolution: None,
    }];

    let expected = "\
# Project: invoicer (saas, phase: mvp, v1.0.0)
Stack: framework=nextjs, database=postgresql, orm=prisma, auth=nextauth, ui=tailwind, payments=stripe

## Decisions (must follow)
- [critical] Use PostgreSQL: relational data
- [high] Tailwind only

## Do not retry
- Port 3000 in use: kill process on port 3000 (error: permission denied)

## Active blockers
- [error] Stripe webhook signature fails (error: No signatures found)

## Built features
- auth
- dashboard
";
    assert_eq!(format_context_for_prompt(&ctx), expected);
}

#[test]
fn test_low_impact_only_omits_decision_section() {
    let mut ctx = empty_context();
    ctx.decisions = vec![decision("Prefer server actions", Impact::Medium, "")];
    assert!(!format_context_for_prompt(&ctx).contains("## Decisions"));
}

#[test]
fn test_output_is_deterministic() {
    let mut ctx = empty_context();
    ctx.built_features = vec!["auth".into()];
    assert_eq!(format_context_for_prompt(&ctx), format_context_for_prompt(&ctx));
}
