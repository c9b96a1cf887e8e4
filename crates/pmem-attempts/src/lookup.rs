use pmem_core::{Attempt, AttemptResult, IssueHash};

/// Failed attempts recorded for `issue`, in input order.
pub fn get_failed_attempts<'a>(issue: &str, attempts: &'a [Attempt]) -> Vec<&'a Attempt> {
    let hash = IssueHash::of(issue);
    attempts
        .iter()
        .filter(|a| a.issue_hash == hash && a.result == AttemptResult::Failure)
        .collect()
}

/// Successful attempts whose issue or approach mentions `category`
/// (case-insensitive substring).
pub fn get_successful_approaches<'a>(category: &str, attempts: &'a [Attempt]) -> Vec<&'a Attempt> {
    let needle = category.to_lowercase();
    attempts
        .iter()
        .filter(|a| a.result == AttemptResult::Success)
        .filter(|a| {
            a.issue.to_lowercase().contains(&needle) || a.approach.to_lowercase().contains(&needle)
        })
        .collect()
}
