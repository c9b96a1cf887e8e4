use anyhow::Result;
use chrono::Utc;
use pmem_attempts::{
    format_for_prompt, get_failed_attempts, get_successful_approaches, has_been_tried,
    suggest_alternatives,
};
use pmem_core::{Attempt, AttemptResult, IssueHash, OutputFormat};
use pmem_parser::{append_attempt, parse_attempts};

use crate::CommandContext;

fn load_attempts(ctx: &CommandContext) -> Vec<Attempt> {
    let raw = ctx.source().read();
    parse_attempts(raw.attempts.as_deref().unwrap_or_default())
}

pub(crate) fn handle_check(ctx: &CommandContext, issue: &str, approach: &str) -> Result<()> {
    let attempts = load_attempts(ctx);
    let check = has_been_tried(issue, approach, &attempts, &ctx.config.matcher);

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&check)?),
        OutputFormat::Text => {
            if check.already_tried {
                println!("Already tried.");
            } else {
                println!("Not tried yet.");
            }
            if !check.recommendation.is_empty() {
                println!("{}", check.recommendation);
            }
        }
    }
    Ok(())
}

pub(crate) fn handle_failed(ctx: &CommandContext, issue: &str) -> Result<()> {
    let attempts = load_attempts(ctx);
    match ctx.format {
        OutputFormat::Json => {
            let failed = get_failed_attempts(issue, &attempts);
            println!("{}", serde_json::to_string_pretty(&failed)?);
        }
        OutputFormat::Text => {
            let block = format_for_prompt(issue, &attempts);
            if block.is_empty() {
                println!("No failed attempts recorded for this issue.");
            } else {
                print!("{block}");
            }
        }
    }
    Ok(())
}

pub(crate) fn handle_suggest(ctx: &CommandContext, issue: &str) -> Result<()> {
    let attempts = load_attempts(ctx);
    let suggestions = suggest_alternatives(issue, &attempts);
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&suggestions)?),
        OutputFormat::Text => {
            if suggestions.is_empty() {
                println!("No suggestions.");
            }
            for suggestion in &suggestions {
                println!("- {suggestion}");
            }
        }
    }
    Ok(())
}

pub(crate) fn handle_successes(ctx: &CommandContext, category: &str) -> Result<()> {
    let attempts = load_attempts(ctx);
    let successes = get_successful_approaches(category, &attempts);
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&successes)?),
        OutputFormat::Text => {
            println!("Successful approaches ({} matches):", successes.len());
            for attempt in &successes {
                println!("- {}: {}", attempt.issue, attempt.approach);
            }
        }
    }
    Ok(())
}

pub(crate) struct RecordArgs {
    pub issue: String,
    pub approach: String,
    pub result: AttemptResult,
    pub code: Option<String>,
    pub error: Option<String>,
    pub lessons: Option<String>,
}

pub(crate) fn handle_record(ctx: &CommandContext, args: RecordArgs) -> Result<()> {
    let source = ctx.source();
    let existing = source.read().attempts.unwrap_or_default();

    let mut attempt =
        Attempt::new(args.issue, 1, args.approach, args.result).with_timestamp(Utc::now());
    if let Some(code) = args.code {
        attempt = attempt.with_code(code);
    }
    if let Some(error) = args.error {
        attempt = attempt.with_error(error);
    }
    if let Some(lessons) = args.lessons {
        attempt = attempt.with_lessons(lessons);
    }

    let updated = append_attempt(&existing, &attempt)?;
    source.write_attempts(&updated)?;

    match ctx.format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "issueHash": attempt.issue_hash,
                "path": source.attempts_path(),
                "shouldNotRetry": attempt.should_not_retry,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => println!(
            "Recorded {} attempt for issue {} in {}",
            attempt.result,
            attempt.issue_hash,
            source.attempts_path().display()
        ),
    }
    Ok(())
}

pub(crate) fn handle_hash(ctx: &CommandContext, issue: &str) -> Result<()> {
    let hash = IssueHash::of(issue);
    match ctx.format {
        OutputFormat::Json => {
            let value = serde_json::json!({ "issue": issue, "hash": hash });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => println!("{hash}"),
    }
    Ok(())
}
