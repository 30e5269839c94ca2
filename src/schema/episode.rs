use serde::{Deserialize, Serialize};

/// One interaction turn within an episode.
///
/// A step is retained only if at least one of its three fields is
/// non-empty; fully empty steps are dropped during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Step {
    /// The agent's chosen command, verbatim from the log.
    #[serde(default)]
    pub action: String,
    /// Environment feedback after the action.
    #[serde(default)]
    pub observation: String,
    /// The agent's internal reasoning for this turn, if recorded.
    #[serde(default)]
    pub thought: String,
}

impl Step {
    /// A step carrying only an action, for logs that record bare
    /// command strings.
    pub fn from_action(action: impl Into<String>) -> Self {
        Step {
            action: action.into(),
            ..Step::default()
        }
    }

    /// Returns true if all three fields are empty.
    pub fn is_empty(&self) -> bool {
        self.action.is_empty() && self.observation.is_empty() && self.thought.is_empty()
    }
}

/// One complete recorded task attempt: a goal, the steps taken, and
/// the outcome. Episodes are constructed once by the extractor and are
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Source identifier, or a synthesized token when the log has none.
    pub id: String,
    /// Free-form task description. May be empty; the narrator then
    /// falls back to the init prompt or an id-derived label.
    #[serde(default)]
    pub goal: String,
    /// Chronological turns, preserved in input order.
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Whether the attempt reached its goal.
    #[serde(default)]
    pub success: bool,
    /// Raw prompt that opened the episode, which may embed a goal
    /// statement when no explicit goal field exists.
    #[serde(default)]
    pub init_prompt: Option<String>,
}
