/// Story rendering — an episode to an ordered sequence of display
/// lines, as a stylized Japanese narration or a literal transcript.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::action::translate_action;
use crate::core::lexicon::Lexicons;
use crate::core::observation::translate_observation;
use crate::core::text::replace_word_ci;
use crate::schema::episode::Episode;

/// Selects one phrasing out of `n` alternatives.
///
/// Production uses entropy-backed randomness purely for aesthetic
/// variation; tests inject a fixed picker instead of asserting
/// one-of-N membership everywhere.
pub trait PhrasePicker {
    fn choose(&mut self, n: usize) -> usize;
}

/// The production picker.
#[derive(Debug)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn from_entropy() -> Self {
        RandomPicker {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomPicker {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PhrasePicker for RandomPicker {
    fn choose(&mut self, n: usize) -> usize {
        if n <= 1 {
            0
        } else {
            self.rng.gen_range(0..n)
        }
    }
}

/// Always the first phrasing. For tests and reproducible output.
#[derive(Debug, Default)]
pub struct FirstPhrase;

impl PhrasePicker for FirstPhrase {
    fn choose(&mut self, _n: usize) -> usize {
        0
    }
}

pub(crate) fn pick_one(picker: &mut dyn PhrasePicker, options: Vec<String>) -> String {
    let n = options.len();
    if n == 0 {
        return String::new();
    }
    let index = picker.choose(n).min(n - 1);
    options.into_iter().nth(index).unwrap_or_default()
}

/// How an episode is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Japanese narration with vocabulary translation and randomized
    /// phrasing templates.
    Stylized,
    /// Verbatim transcript of the source log, no translation.
    Literal,
}

/// Renders episodes as ordered display lines under a fixed agent
/// label and lexicon set.
pub struct Narrator {
    agent: String,
    lexicons: Lexicons,
    picker: Box<dyn PhrasePicker>,
}

impl Narrator {
    /// A narrator with the built-in lexicons and entropy-backed
    /// phrasing choice.
    pub fn new(agent: impl Into<String>) -> Self {
        Narrator {
            agent: agent.into(),
            lexicons: Lexicons::default(),
            picker: Box::new(RandomPicker::from_entropy()),
        }
    }

    pub fn with_picker(
        agent: impl Into<String>,
        lexicons: Lexicons,
        picker: Box<dyn PhrasePicker>,
    ) -> Self {
        Narrator {
            agent: agent.into(),
            lexicons,
            picker,
        }
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn render(&mut self, episode: &Episode, mode: RenderMode) -> Vec<String> {
        match mode {
            RenderMode::Stylized => self.stylized(episode),
            RenderMode::Literal => self.literal(episode),
        }
    }

    /// Stylized narration: goal line, one narrated line per surviving
    /// action and observation, and a closing success or resilience
    /// line.
    pub fn stylized(&mut self, episode: &Episode) -> Vec<String> {
        let mut story = Vec::new();
        let raw_goal = resolve_goal(episode);
        story.push(self.stylize_goal(&raw_goal, &episode.id));

        let passthrough_marker = format!("{}は「", self.agent);
        for step in &episode.steps {
            let action_line =
                translate_action(step, &self.agent, &self.lexicons, self.picker.as_mut());
            let observation_line = translate_observation(
                &step.observation,
                &self.agent,
                &self.lexicons,
                self.picker.as_mut(),
            );
            if !action_line.is_empty() {
                story.push(action_line);
            }
            // Skip observations that echo a raw passthrough action.
            if !observation_line.is_empty() && !observation_line.contains(&passthrough_marker) {
                story.push(observation_line);
            }
        }

        story.push(if episode.success {
            format!(
                "{}は見事に目標を達成しました！一歩、成長したようです。",
                self.agent
            )
        } else {
            format!(
                "{}は今回は目標に届きませんでした。この経験が次への糧となるでしょう。",
                self.agent
            )
        });
        story
    }

    /// Literal transcript: raw goal, per-step indexed thought/action/
    /// observation lines, final status label. No heuristics.
    pub fn literal(&self, episode: &Episode) -> Vec<String> {
        let mut story = Vec::new();
        let raw_goal = resolve_goal(episode);
        story.push(format!(
            "[Goal]: {}",
            if raw_goal.is_empty() {
                "No Goal Provided"
            } else {
                &raw_goal
            }
        ));

        for (index, step) in episode.steps.iter().enumerate() {
            if !step.thought.is_empty() {
                story.push(format!("Step {} Thought: {}", index + 1, step.thought));
            }
            if !step.action.is_empty() {
                story.push(format!("Step {} Action: {}", index + 1, step.action));
            }
            if !step.observation.is_empty() {
                story.push(format!(
                    "Step {} Observation: {}",
                    index + 1,
                    step.observation
                ));
            }
        }

        story.push(format!(
            "Final Success Status: {}",
            if episode.success { "SUCCESS" } else { "FAILURE" }
        ));
        story
    }

    /// Japanese-ize a raw goal: fixed phrase substitutions first, then
    /// a whole-word pass over both lexicons, under the goal marker.
    fn stylize_goal(&self, raw_goal: &str, episode_id: &str) -> String {
        let base = if raw_goal.is_empty() {
            format!("エピソードログ ({episode_id})")
        } else {
            raw_goal.to_string()
        };

        let mut goal = base
            .replace("put a", "〜を置く")
            .replace("clean", "洗った")
            .replace("heat", "温めた")
            .replace("cool", "冷やした")
            .replace("find", "見つける")
            .replace("pick up", "拾い上げる")
            .replace("look at", "眺める")
            .replace(" in ", "の中に ")
            .replace(" on ", "の上に ")
            .replace(" to ", "に ")
            .replace(" and ", "と ");

        for (key, value) in self.lexicons.objects.entries() {
            if goal.contains(key) {
                goal = replace_word_ci(&goal, key, value);
            }
        }
        for (key, value) in self.lexicons.locations.entries() {
            if goal.contains(key) {
                goal = replace_word_ci(&goal, key, value);
            }
        }

        format!("【成長の記録】: {goal}")
    }
}

/// Resolve the raw goal text: explicit field first, then the literal
/// `Your task is to: X.` pattern inside the init prompt, then a line
/// scan for the marker.
fn resolve_goal(episode: &Episode) -> String {
    if !episode.goal.is_empty() {
        return episode.goal.clone();
    }
    let Some(prompt) = episode.init_prompt.as_deref() else {
        return String::new();
    };

    const MARKER: &str = "Your task is to:";
    if let Some(index) = prompt.find("Your task is to: ") {
        let rest = &prompt[index + "Your task is to: ".len()..];
        if let Some(period) = rest.find('.') {
            return rest[..period].to_string();
        }
    }
    for line in prompt.lines() {
        if line.contains(MARKER) {
            return line.replacen(MARKER, "", 1).trim().to_string();
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::episode::Step;

    fn narrator() -> Narrator {
        Narrator::with_picker("ペリー", Lexicons::default(), Box::new(FirstPhrase))
    }

    fn apple_episode() -> Episode {
        Episode {
            id: "ep-1".to_string(),
            goal: "put an apple in the fridge".to_string(),
            steps: vec![Step {
                action: "go to fridge 1".to_string(),
                observation: "You arrive at the fridge.".to_string(),
                thought: String::new(),
            }],
            success: true,
            init_prompt: None,
        }
    }

    #[test]
    fn stylized_shape_goal_step_lines_trailer() {
        let mut narrator = narrator();
        let story = narrator.stylized(&apple_episode());
        assert_eq!(story.len(), 4, "story: {story:?}");
        assert!(story[0].starts_with("【成長の記録】: "));
        assert!(story[0].contains("冷蔵庫"), "goal line: {}", story[0]);
        assert!(story[1].contains("冷蔵庫"), "action line: {}", story[1]);
        assert!(story[2].contains("到着"), "observation line: {}", story[2]);
        assert!(story[3].contains("見事に目標を達成しました"));
    }

    #[test]
    fn stylized_failure_trailer() {
        let mut narrator = narrator();
        let mut episode = apple_episode();
        episode.success = false;
        let story = narrator.stylized(&episode);
        assert!(story.last().unwrap().contains("次への糧"));
    }

    #[test]
    fn stylized_suppresses_housekeeping_steps() {
        let mut narrator = narrator();
        let mut episode = apple_episode();
        episode.steps = vec![
            Step::from_action("start"),
            Step::from_action("look"),
            Step::from_action("check: task succeeded"),
        ];
        let story = narrator.stylized(&episode);
        // goal and trailer only
        assert_eq!(story.len(), 2, "story: {story:?}");
    }

    #[test]
    fn stylized_zero_steps_is_goal_and_trailer_only() {
        let mut narrator = narrator();
        let mut episode = apple_episode();
        episode.steps.clear();
        let story = narrator.stylized(&episode);
        assert_eq!(story.len(), 2, "story: {story:?}");
        assert!(story[0].starts_with("【成長の記録】: "));
        assert!(story[1].contains("見事に目標を達成しました"));
    }

    #[test]
    fn literal_zero_steps_is_goal_and_status_only() {
        let narrator = narrator();
        let mut episode = apple_episode();
        episode.steps.clear();
        episode.success = false;
        let story = narrator.literal(&episode);
        assert_eq!(
            story,
            vec![
                "[Goal]: put an apple in the fridge".to_string(),
                "Final Success Status: FAILURE".to_string(),
            ]
        );
    }

    #[test]
    fn stylized_goal_falls_back_to_id_label() {
        let mut narrator = narrator();
        let mut episode = apple_episode();
        episode.goal.clear();
        let story = narrator.stylized(&episode);
        assert!(story[0].contains("エピソードログ (ep-1)"), "line: {}", story[0]);
    }

    #[test]
    fn goal_from_init_prompt_pattern() {
        let mut episode = apple_episode();
        episode.goal.clear();
        episode.init_prompt =
            Some("Welcome to the house.\nYour task is to: heat some egg and put it in garbagecan.".to_string());
        assert_eq!(
            resolve_goal(&episode),
            "heat some egg and put it in garbagecan"
        );
    }

    #[test]
    fn goal_from_init_prompt_line_scan() {
        let mut episode = apple_episode();
        episode.goal.clear();
        // no period, so the literal pattern misses and the line scan hits
        episode.init_prompt = Some("intro\nYour task is to: find a vase".to_string());
        assert_eq!(resolve_goal(&episode), "find a vase");
    }

    #[test]
    fn goal_substitutions_translate_verbs_and_nouns() {
        let narrator = narrator();
        let line = narrator.stylize_goal("clean the mug and put it on the desk", "x");
        assert!(line.contains("洗った"), "line: {line}");
        assert!(line.contains("マグカップ"), "line: {line}");
        assert!(line.contains("デスク"), "line: {line}");
        assert!(line.contains("と "), "line: {line}");
    }

    #[test]
    fn render_dispatches_on_mode() {
        let mut narrator = narrator();
        let episode = apple_episode();
        assert_eq!(
            narrator.render(&episode, RenderMode::Stylized),
            narrator.stylized(&episode)
        );
        assert_eq!(
            narrator.render(&episode, RenderMode::Literal),
            narrator.literal(&episode)
        );
    }

    #[test]
    fn literal_line_count_matches_field_count() {
        let narrator = narrator();
        let episode = Episode {
            id: "ep-2".to_string(),
            goal: "g".to_string(),
            steps: vec![
                Step {
                    action: "go to desk 1".to_string(),
                    observation: "You arrive at desk 1.".to_string(),
                    thought: "desk first".to_string(),
                },
                Step {
                    action: "examine desk 1".to_string(),
                    observation: String::new(),
                    thought: String::new(),
                },
            ],
            success: false,
            init_prompt: None,
        };
        let story = narrator.literal(&episode);
        // 1 goal + 3 + 1 + 1 status
        assert_eq!(story.len(), 6);
        assert_eq!(story[0], "[Goal]: g");
        assert_eq!(story[1], "Step 1 Thought: desk first");
        assert_eq!(story[2], "Step 1 Action: go to desk 1");
        assert_eq!(story[3], "Step 1 Observation: You arrive at desk 1.");
        assert_eq!(story[4], "Step 2 Action: examine desk 1");
        assert_eq!(story[5], "Final Success Status: FAILURE");
    }

    #[test]
    fn literal_no_goal_placeholder() {
        let narrator = narrator();
        let mut episode = apple_episode();
        episode.goal.clear();
        let story = narrator.literal(&episode);
        assert_eq!(story[0], "[Goal]: No Goal Provided");
    }

    #[test]
    fn literal_success_status() {
        let narrator = narrator();
        let story = narrator.literal(&apple_episode());
        assert_eq!(story.last().unwrap(), "Final Success Status: SUCCESS");
    }

    #[test]
    fn pick_one_clamps_out_of_range() {
        struct Wild;
        impl PhrasePicker for Wild {
            fn choose(&mut self, _n: usize) -> usize {
                usize::MAX
            }
        }
        let picked = pick_one(&mut Wild, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(picked, "b");
    }
}
