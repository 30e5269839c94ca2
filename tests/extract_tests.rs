/// Extraction integration tests — real-shaped run logs end to end.

use episode_diary::core::extract::extract_episodes;
use episode_diary::core::ingest::{parse_content, Journal};

const SAMPLE_RUN: &str = include_str!("fixtures/sample_run.json");
const SAMPLE_LINES: &str = include_str!("fixtures/sample_lines.jsonl");

#[test]
fn nested_run_document_yields_both_trials() {
    let value: serde_json::Value = serde_json::from_str(SAMPLE_RUN).unwrap();
    let episodes = extract_episodes(&value);
    assert_eq!(episodes.len(), 2, "episodes: {episodes:#?}");

    let first = &episodes[0];
    assert_eq!(first.id, "trial-1");
    assert_eq!(first.goal, "put a cool mug in cabinet");
    assert!(first.success);
    assert_eq!(first.steps.len(), 3);
    assert_eq!(first.steps[0].action, "go to fridge 1");
    assert_eq!(first.steps[0].observation, "You arrive at fridge 1.");

    let second = &episodes[1];
    assert_eq!(second.id, "trial-2");
    assert_eq!(second.goal, "examine the bowl with the desklamp");
    assert!(!second.success);
    assert_eq!(second.steps.len(), 1);
    assert_eq!(second.steps[0].action, "look");
}

#[test]
fn json_lines_file_skips_the_corrupted_line() {
    let episodes = parse_content(SAMPLE_LINES);
    assert_eq!(episodes.len(), 2, "episodes: {episodes:#?}");
    assert_eq!(episodes[0].id, "line-1");
    assert!(episodes[0].success);
    assert_eq!(episodes[1].id, "line-3");
    assert_eq!(episodes[1].goal, "find a vase");
    assert!(!episodes[1].success);
}

#[test]
fn journal_accumulates_both_fixtures() {
    let mut journal = Journal::new();
    assert_eq!(journal.add_content("sample_run.json", SAMPLE_RUN), 2);
    assert_eq!(journal.add_content("sample_lines.jsonl", SAMPLE_LINES), 2);
    assert_eq!(journal.len(), 4);
    assert_eq!(journal.files_processed(), 2);
}

#[test]
fn success_context_is_inherited_from_enclosing_objects() {
    let content = r#"{
        "success": true,
        "sessions": [
            { "goal": "outer flag applies", "log": [{ "act": "go to desk 1" }] },
            { "goal": "local flag wins", "success": false, "log": [{ "act": "go to desk 2" }] }
        ]
    }"#;
    let episodes = parse_content(content);
    assert_eq!(episodes.len(), 2);
    assert!(episodes[0].success);
    assert!(!episodes[1].success);
}

#[test]
fn accepted_episode_is_not_rescanned_for_nested_matches() {
    let content = r#"{
        "goal": "outer episode",
        "steps": [
            { "act": "go to desk 1", "meta": { "goal": "inner decoy", "steps": [{ "act": "x" }] } }
        ]
    }"#;
    let episodes = parse_content(content);
    assert_eq!(episodes.len(), 1, "episodes: {episodes:#?}");
    assert_eq!(episodes[0].goal, "outer episode");
}

#[test]
fn generated_ids_are_distinct_when_the_log_names_none() {
    let content = r#"[
        { "goal": "a", "steps": [{ "act": "go to desk 1" }] },
        { "goal": "b", "steps": [{ "act": "go to desk 2" }] }
    ]"#;
    let episodes = parse_content(content);
    assert_eq!(episodes.len(), 2);
    assert!(episodes[0].id.starts_with("Ep-"), "id: {}", episodes[0].id);
    assert_ne!(episodes[0].id, episodes[1].id);
}
