//! Note domain model.
//!
//! Notes are owned by the remote NoteHub API. The client never edits a note in
//! place; it only replaces its view of a page of notes with a newer one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Fixed set of tags a note can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NoteTag {
    #[default]
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

impl NoteTag {
    /// All tags in form order.
    pub const ALL: [Self; 5] = [
        Self::Todo,
        Self::Work,
        Self::Personal,
        Self::Meeting,
        Self::Shopping,
    ];

    /// Wire and display name of the tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Meeting => "Meeting",
            Self::Shopping => "Shopping",
        }
    }

    /// Next tag in form order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous tag in form order, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for NoteTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| format!("Invalid tag: {s}"))
    }
}

/// A note as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub tag: NoteTag,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Returns a human-readable string describing how long ago the note was created.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - 1 day or more: "Xd ago"
    #[must_use]
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        let diff = (now - self.created_at).num_seconds();

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        }
    }
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

/// One page of notes for a `(page, term)` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub notes: Vec<Note>,
    pub total_pages: u32,
}

impl PageResult {
    /// Clamps `total_pages` to at least one.
    ///
    /// The API reports `0` pages for an empty result set.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.total_pages = self.total_pages.max(1);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn note_created_at(created_at: DateTime<Utc>) -> Note {
        Note {
            id: "n1".into(),
            title: "Buy milk".into(),
            content: String::new(),
            tag: NoteTag::Shopping,
            created_at,
            updated_at: None,
        }
    }

    #[test]
    fn decodes_api_page() {
        let body = r#"{
            "notes": [{
                "id": "abc123",
                "title": "Standup",
                "content": "daily",
                "tag": "Meeting",
                "createdAt": "2025-03-01T09:30:00.000Z",
                "updatedAt": "2025-03-01T09:30:00.000Z"
            }],
            "totalPages": 3
        }"#;

        let page: PageResult = serde_json::from_str(body).unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.notes[0].id, "abc123");
        assert_eq!(page.notes[0].tag, NoteTag::Meeting);
    }

    #[test]
    fn zero_pages_normalizes_to_one() {
        let page = PageResult { notes: vec![], total_pages: 0 }.normalized();
        assert_eq!(page.total_pages, 1);
        assert!(page.is_empty());
    }

    #[test]
    fn tag_cycles_through_all_variants() {
        assert_eq!(NoteTag::Shopping.next(), NoteTag::Todo);
        assert_eq!(NoteTag::Todo.prev(), NoteTag::Shopping);
        assert_eq!("Work".parse::<NoteTag>(), Ok(NoteTag::Work));
        assert!("Shoping".parse::<NoteTag>().is_err());
    }

    #[test]
    fn time_ago_buckets() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(note_created_at(now).time_ago(now), "just now");
        assert_eq!(
            note_created_at(now - chrono::Duration::minutes(5)).time_ago(now),
            "5m ago"
        );
        assert_eq!(
            note_created_at(now - chrono::Duration::hours(3)).time_ago(now),
            "3h ago"
        );
        assert_eq!(
            note_created_at(now - chrono::Duration::days(7)).time_ago(now),
            "7d ago"
        );
    }

    #[test]
    fn new_note_serializes_wire_shape() {
        let body = serde_json::to_value(NewNote {
            title: "Buy milk".into(),
            content: String::new(),
            tag: NoteTag::Todo,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"title": "Buy milk", "content": "", "tag": "Todo"})
        );
    }
}
