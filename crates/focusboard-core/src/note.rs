//! Quick capture notes, newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How many notes the capture panel shows.
pub const RECENT_NOTES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickNote {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Split a comma separated tag field. Tokens are trimmed, empty ones are
/// dropped, order and duplicates are kept.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

impl QuickNote {
    /// Returns `None` when the content is blank.
    pub fn new(
        content: &str,
        raw_tags: &str,
        id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Option<Self> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        Some(Self {
            id: id.into(),
            content: content.to_string(),
            tags: parse_tags(raw_tags),
            created_at,
        })
    }
}

/// Prepend a note. Blank content leaves the list untouched.
pub fn add_note(
    mut notes: Vec<QuickNote>,
    content: &str,
    raw_tags: &str,
    id: impl Into<String>,
    created_at: DateTime<Utc>,
) -> Vec<QuickNote> {
    match QuickNote::new(content, raw_tags, id, created_at) {
        Some(note) => notes.insert(0, note),
        None => debug!("note with blank content ignored"),
    }
    notes
}

pub fn delete_note(notes: Vec<QuickNote>, id: &str) -> Vec<QuickNote> {
    notes.into_iter().filter(|note| note.id != id).collect()
}

pub fn recent_notes(notes: &[QuickNote], limit: usize) -> &[QuickNote] {
    &notes[..notes.len().min(limit)]
}
