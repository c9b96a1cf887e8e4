use super::*;
use proptest::prelude::*;

fn config() -> MatcherConfig {
    MatcherConfig::default()
}

fn failed_kill() -> Attempt {
    Attempt::new(
        "port 3000 in use",
        1,
        "kill process on port 3000",
        AttemptResult::Failure,
    )
    .with_error("permission denied")
}

#[test]
fn test_word_set_filters_short_and_stop_words() {
    let words = word_set("Kill the process, on PORT 3000!", &config());
    let expected: BTreeSet<String> = ["kill", "process", "port", "3000"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    assert_eq!(words, expected);
}

#[test]
fn test_word_set_without_stop_words_keeps_long_articles() {
    let cfg = MatcherConfig {
        stop_words: vec![],
        ..config()
    };
    assert!(word_set("kill the process", &cfg).contains("the"));
}

#[test]
fn test_jaccard_edges() {
    let empty = BTreeSet::new();
    let one: BTreeSet<String> = ["port".to_string()].into_iter().collect();
    assert_eq!(jaccard(&empty, &empty), 0.0);
    assert_eq!(jaccard(&one, &empty), 0.0);
    assert_eq!(jaccard(&one, &one), 1.0);
}

#[test]
fn test_similar_failed_approach_is_flagged_with_error() {
    let attempts = vec![failed_kill()];
    let check = has_been_tried(
        "port 3000 in use",
        "kill the process listening on port 3000",
        &attempts,
        &config(),
    );
    assert!(check.already_tried);
    assert_eq!(check.previous_attempt.as_ref(), Some(&attempts[0]));
    assert!(check.recommendation.contains("permission denied"));
    assert!(check.recommendation.contains("Try something different"));
}

#[test]
fn test_matching_success_recommends_reuse() {
    let attempts = vec![Attempt::new(
        "port 3000 in use",
        1,
        "restart dev server on a different port",
        AttemptResult::Success,
    )];
    let check = has_been_tried(
        "Port 3000 in use",
        "restart dev server on a different port",
        &attempts,
        &config(),
    );
    assert!(check.already_tried);
    assert!(check.recommendation.contains("Reuse"));
}

#[test]
fn test_no_history_returns_empty_recommendation() {
    let check = has_been_tried("port 3000 in use", "anything", &[], &config());
    assert!(!check.already_tried);
    assert!(check.previous_attempt.is_none());
    assert_eq!(check.recommendation, "");
}

#[test]
fn test_other_issue_groups_are_ignored() {
    let attempts = vec![Attempt::new(
        "prisma client stale",
        1,
        "kill process on port 3000",
        AttemptResult::Failure,
    )];
    let check = has_been_tried(
        "port 3000 in use",
        "kill process on port 3000",
        &attempts,
        &config(),
    );
    assert!(!check.already_tried);
}

#[test]
fn test_retryable_failure_is_not_blocking_and_lessons_are_joined() {
    let attempts = vec![
        Attempt::new("port 3000 in use", 1, "kill process on port 3000", AttemptResult::Failure)
            .with_lessons("with sudo it might work"),
        Attempt::new("port 3000 in use", 2, "change next config", AttemptResult::Partial)
            .with_lessons("port is read from env"),
    ];
    let check = has_been_tried(
        "port 3000 in use",
        "kill process on port 3000",
        &attempts,
        &config(),
    );
    assert!(!check.already_tried);
    assert_eq!(
        check.recommendation,
        "Lessons from previous attempts: with sudo it might work; port is read from env"
    );
}

#[test]
fn test_threshold_is_strict() {
    // {kill, process, port, 3000} against {kill, process, port, 3000, now}: 0.8
    let attempts = vec![failed_kill()];
    let at_score = MatcherConfig {
        similarity_threshold: 0.8,
        ..config()
    };
    let check = has_been_tried(
        "port 3000 in use",
        "kill process on port 3000 now",
        &attempts,
        &at_score,
    );
    assert!(!check.already_tried);
}

#[test]
fn test_dissimilar_approach_is_not_flagged() {
    let attempts = vec![failed_kill()];
    let check = has_been_tried(
        "port 3000 in use",
        "configure a different port in the env file",
        &attempts,
        &config(),
    );
    assert!(!check.already_tried);
}

#[test]
fn test_disjoint_word_sets_never_match_even_at_zero_threshold() {
    let cfg = config();
    let a = word_set("kill process", &cfg);
    let b = word_set("use docker compose", &cfg);
    assert!(!a.is_empty() && !b.is_empty());
    assert_eq!(jaccard(&a, &b), 0.0);

    let attempts = vec![
        Attempt::new("port 3000 in use", 1, "kill process", AttemptResult::Failure),
        Attempt::new("port 3000 in use", 2, "kill process", AttemptResult::Success),
    ];
    let zero = MatcherConfig {
        similarity_threshold: 0.0,
        ..config()
    };
    let check = has_been_tried("port 3000 in use", "use docker compose", &attempts, &zero);
    assert!(!check.already_tried);
    assert!(check.previous_attempt.is_none());
}

proptest! {
    #[test]
    fn test_disjoint_approaches_score_zero(
        left in proptest::collection::vec("[a-m]{3,8}", 1..6),
        right in proptest::collection::vec("[n-z]{3,8}", 1..6),
    ) {
        let cfg = MatcherConfig {
            similarity_threshold: 0.0,
            ..config()
        };
        let proposed = left.join(" ");
        let previous = right.join(" ");
        prop_assert_eq!(jaccard(&word_set(&proposed, &cfg), &word_set(&previous, &cfg)), 0.0);

        let attempts = vec![Attempt::new("issue", 1, previous, AttemptResult::Success)];
        prop_assert!(!has_been_tried("issue", &proposed, &attempts, &cfg).already_tried);
    }
}

#[test]
fn test_first_matching_candidate_wins() {
    let attempts = vec![
        failed_kill(),
        Attempt::new("port 3000 in use", 2, "kill process on port 3000", AttemptResult::Success),
    ];
    let check = has_been_tried(
        "port 3000 in use",
        "kill process on port 3000",
        &attempts,
        &config(),
    );
    assert_eq!(
        check.previous_attempt.map(|a| a.result),
        Some(AttemptResult::Failure)
    );
}

#[test]
fn test_check_serializes_camel_case() {
    let check = has_been_tried("x", "y", &[], &config());
    let value = serde_json::to_value(&check).unwrap();
    assert_eq!(value["alreadyTried"], false);
    assert!(value["previousAttempt"].is_null());
}
