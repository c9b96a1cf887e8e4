use pmem_core::{Decision, DecisionCategory, Impact, MadeBy, infer_category, infer_impact, stable_id};
use tracing::debug;

use crate::dates::split_dated_heading;
use crate::fields::{Fields, parse_flag, strip_code_span};
use crate::sections::{lines_of, split_sections};

/// Parse a Decisions log: one `## <date> - <title>` section per decision.
pub fn parse_decisions(text: &str) -> Vec<Decision> {
    let lines = lines_of(text);
    let mut decisions = Vec::new();

    for section in split_sections(&lines, 2) {
        let Some((raw_date, timestamp, title)) = split_dated_heading(section.heading) else {
            debug!(section = %section.heading, "Dropping decision section without date-title heading");
            continue;
        };
        let fields = Fields::parse(section.body);
        let body_text = section.body.join("\n");

        let mut decision = Decision {
            id: stable_id(&[raw_date, title]),
            timestamp,
            decision: title.to_string(),
            category: DecisionCategory::BusinessLogic,
            reasoning: fields
                .value(&["reasoning", "why", "rationale"])
                .unwrap_or_default(),
            alternatives_considered: fields.list(&["alternatives considered", "alternatives"]),
            made_by: fields
                .value(&["made by", "decided by", "by"])
                .and_then(|v| MadeBy::from_label(&v))
                .unwrap_or(MadeBy::Ai),
            user_approved: fields
                .value(&["user approved", "approved"])
                .and_then(|v| parse_flag(&v))
                .unwrap_or(false),
            reversible: is_reversible(&fields, &body_text),
            impact: fields
                .value(&["impact"])
                .and_then(|v| Impact::from_label(&v))
                .unwrap_or_else(|| infer_impact(&body_text)),
            related_files: fields
                .list(&["related files", "files"])
                .iter()
                .map(|f| strip_code_span(f))
                .filter(|f| !f.is_empty())
                .collect(),
            related_decisions: Vec::new(),
        };
        decision.category = fields
            .value(&["category"])
            .and_then(|v| DecisionCategory::from_label(&v))
            .unwrap_or_else(|| infer_category(&decision));

        decisions.push(decision);
    }

    debug!(count = decisions.len(), "Parsed decisions");
    decisions
}

/// Reversible unless labeled otherwise or the body calls it irreversible.
fn is_reversible(fields: &Fields, body_text: &str) -> bool {
    if let Some(flag) = fields.value(&["reversible"]).and_then(|v| parse_flag(&v)) {
        return flag;
    }
    !body_text.to_lowercase().contains("irreversible")
}
