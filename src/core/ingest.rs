/// Content ingestion — whole-document JSON first, JSON-Lines fallback.
///
/// Errors degrade instead of propagating: an unparseable line is
/// skipped, a file with no episodes is reported through the return
/// count and the log, and a file that cannot be read contributes
/// nothing but still counts as processed.

use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

use crate::core::extract::extract_episodes;
use crate::schema::episode::Episode;

/// Parse one uploaded file's content and extract all episodes.
///
/// The content is tried as a single JSON document; if that parse
/// fails, each line is tried independently (blank lines dropped, one
/// trailing comma per line tolerated) and the results concatenated.
pub fn parse_content(content: &str) -> Vec<Episode> {
    match serde_json::from_str::<Value>(content) {
        Ok(value) => extract_episodes(&value),
        Err(_) => parse_lines(content),
    }
}

fn parse_lines(content: &str) -> Vec<Episode> {
    let mut episodes = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line = line.strip_suffix(',').unwrap_or(line).trim();
        match serde_json::from_str::<Value>(line) {
            Ok(value) => episodes.extend(extract_episodes(&value)),
            Err(err) => debug!(line = index + 1, %err, "skipping unparseable log line"),
        }
    }
    episodes
}

/// The growing in-memory episode collection for one viewing session.
///
/// Episodes are only ever appended; the collection lives as long as
/// the session and is dropped wholesale.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    episodes: Vec<Episode>,
    files_processed: usize,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `content` (attributed to `source` for logging) and append
    /// whatever episodes it yields. Returns how many were added; zero
    /// is reported, not an error.
    pub fn add_content(&mut self, source: &str, content: &str) -> usize {
        let found = parse_content(content);
        let count = found.len();
        if count == 0 {
            warn!(source, "no valid episodes found");
        }
        self.episodes.extend(found);
        self.files_processed += 1;
        count
    }

    /// Read and ingest one file. A read failure is logged, counts as a
    /// processed file, and contributes no episodes.
    pub fn add_file(&mut self, path: &Path) -> usize {
        match std::fs::read_to_string(path) {
            Ok(content) => self.add_content(&path.display().to_string(), &content),
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to read log file");
                self.files_processed += 1;
                0
            }
        }
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    pub fn files_processed(&self) -> usize {
        self.files_processed
    }
}
