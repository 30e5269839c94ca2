/// Episode extraction — a depth-first search over arbitrary JSON for
/// substructures that look like task episodes.
///
/// Producers disagree on field names, so every field is resolved
/// through a prioritized alias chain, tried in fixed order. An object
/// that yields an episode is a terminal node: its children are never
/// searched again, which keeps wrapper objects (a run summary holding
/// a `log` array) from being double-counted through their descendants.

use rand::Rng;
use serde_json::{Map, Value};

use crate::core::text::{remove_first_ci, split_once_any_ci};
use crate::schema::episode::{Episode, Step};

/// Step-array aliases, in precedence order. The first alias that is
/// present with a non-empty array wins.
const STEP_ARRAY_ALIASES: &[&str] = &["log", "steps", "history", "actions", "trajectory", "items"];

/// Fields whose presence marks an object as an episode even when no
/// step survives normalization.
const GOAL_MARKER_FIELDS: &[&str] = &["goal", "instruction", "task", "objective", "init_prompt"];

const ID_ALIASES: &[&str] = &["id", "episode_id", "name", "session_id"];
const GOAL_ALIASES: &[&str] = &["goal", "instruction", "task", "objective", "goal_str", "desc"];

/// Naive JSON values cannot cycle, but a hostile deserializer could
/// hand us something pathological; cap the walk regardless.
const MAX_DEPTH: usize = 128;

/// `status`/`success` context carried down from ancestor objects.
/// Local fields override inherited ones.
#[derive(Debug, Clone, Copy, Default)]
struct Inherited<'a> {
    status: Option<&'a Value>,
    success: Option<bool>,
}

/// Extract every episode found anywhere inside `value`, in
/// depth-first encounter order.
pub fn extract_episodes(value: &Value) -> Vec<Episode> {
    extract(value, Inherited::default(), 0)
}

fn extract<'a>(value: &'a Value, inherited: Inherited<'a>, depth: usize) -> Vec<Episode> {
    if depth > MAX_DEPTH {
        return Vec::new();
    }

    match value {
        Value::Object(map) => {
            let context = Inherited {
                status: map.get("status").filter(|v| truthy(v)).or(inherited.status),
                success: map.get("success").map(truthy).or(inherited.success),
            };

            if let Some(raw_steps) = find_step_array(map) {
                let steps: Vec<Step> = raw_steps.iter().filter_map(normalize_step).collect();
                let has_goal_marker = GOAL_MARKER_FIELDS.iter().any(|f| map.contains_key(*f));
                if !steps.is_empty() || has_goal_marker {
                    return vec![build_episode(map, steps, context)];
                }
            }

            map.values()
                .filter(|v| v.is_object() || v.is_array())
                .flat_map(|v| extract(v, context, depth + 1))
                .collect()
        }
        Value::Array(items) => items
            .iter()
            .flat_map(|v| extract(v, inherited, depth + 1))
            .collect(),
        _ => Vec::new(),
    }
}

fn find_step_array(map: &Map<String, Value>) -> Option<&Vec<Value>> {
    STEP_ARRAY_ALIASES
        .iter()
        .find_map(|alias| map.get(*alias).and_then(Value::as_array).filter(|a| !a.is_empty()))
}

/// Normalize one step-array element. Returns `None` for elements that
/// carry no usable action, observation, or thought.
fn normalize_step(raw: &Value) -> Option<Step> {
    let map = match raw {
        Value::Object(map) => map,
        Value::String(s) if !s.trim().is_empty() => {
            return Some(Step::from_action(s.clone()));
        }
        _ => return None,
    };

    let role = map.get("role").and_then(Value::as_str);

    let mut action = first_text(map, &["act", "action", "command", "step"])
        .or_else(|| role_gated_content(map, role, "agent"))
        .unwrap_or_default();
    let mut observation = first_text(map, &["obs", "observation", "reward", "result"])
        .or_else(|| role_gated_content(map, role, "user"))
        .unwrap_or_default();
    let mut thought = first_text(map, &["thought", "reasoning", "thinking", "value"])
        .unwrap_or_default();

    // Some producers jam the whole model turn into one output/content
    // blob tagged with THOUGHT:/ACTION: markers. Split it apart, and
    // clear the observation if it was that same blob.
    if let Some(raw_output) = combined_output(map) {
        if raw_output.contains("THOUGHT:") {
            let (head, tail) = split_once_any_ci(raw_output, &["action:"])
                .unwrap_or((raw_output, ""));
            let extracted_thought = remove_first_ci(head, "thought:").trim().to_string();
            if !extracted_thought.is_empty() {
                thought = extracted_thought;
            }
            let extracted_action = tail.trim();
            if !extracted_action.is_empty() {
                action = extracted_action.to_string();
            }
            if observation == raw_output {
                observation.clear();
            }
        }
    }

    let step = Step {
        action,
        observation,
        thought,
    };
    (!step.is_empty()).then_some(step)
}

fn role_gated_content(map: &Map<String, Value>, role: Option<&str>, wanted: &str) -> Option<String> {
    if role == Some(wanted) {
        map.get("content").and_then(text_of)
    } else {
        None
    }
}

fn combined_output(map: &Map<String, Value>) -> Option<&str> {
    map.get("output")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            map.get("content")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .or_else(|| {
            map.get("result")
                .and_then(|r| r.get("output"))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
}

fn build_episode(map: &Map<String, Value>, steps: Vec<Step>, context: Inherited<'_>) -> Episode {
    let status_says_success = context.status.is_some_and(|v| {
        let text = match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let status = text.trim().to_lowercase();
        status == "completed" || status == "success"
    });

    let success = status_says_success
        || context.success.unwrap_or(false)
        || map.get("is_success").and_then(Value::as_bool) == Some(true)
        || map
            .get("result")
            .is_some_and(|r| r.as_bool() == Some(true) || r.as_str() == Some("success"))
        || map.get("done").and_then(Value::as_bool) == Some(true)
        || map.get("reward").and_then(Value::as_f64).is_some_and(|r| r >= 1.0)
        || map
            .get("last_reward")
            .and_then(Value::as_f64)
            .is_some_and(|r| r >= 1.0);

    Episode {
        id: first_text(map, ID_ALIASES).unwrap_or_else(fresh_id),
        goal: first_text(map, GOAL_ALIASES).unwrap_or_default(),
        steps,
        success,
        init_prompt: map
            .get("init_prompt")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    }
}

/// First alias whose value carries usable text.
fn first_text(map: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| map.get(*alias).and_then(text_of))
}

/// Coerce a scalar to display text. Empty strings, zero, `false`, and
/// structured values yield nothing, so alias chains skip past them.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// JavaScript-style truthiness, the contract the log producers were
/// written against.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn fresh_id() -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    let token: String = (0..5)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("Ep-{token}")
}
