//! Episode Diary — agent run logs rendered as readable narrative.
//!
//! Scans arbitrary JSON run logs for episode-shaped structures, maps the
//! household-task vocabulary through built-in English→Japanese lexicons,
//! and renders each episode as a stylized Japanese diary or a literal
//! English transcript.

pub mod core;
pub mod schema;
