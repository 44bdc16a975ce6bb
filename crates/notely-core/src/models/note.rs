//! Note model

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned note identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<i64> for NoteId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A note as the notes service sends it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDto {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<String>,
    pub is_archived: bool,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// A note as the board presents it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Category names, matched case-insensitively against local categories
    pub categories: Vec<String>,
    pub is_archived: bool,
    /// Client-local annotation, never sent to the server
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NoteDto> for Note {
    fn from(dto: NoteDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            content: dto.content,
            categories: dto.categories,
            is_archived: dto.is_archived,
            is_pinned: false,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

/// Body for `POST /notes`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    pub categories: Vec<String>,
}

/// Body for `PUT /notes/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: String,
    pub content: String,
    pub categories: Vec<String>,
}

impl From<&Note> for UpdateNoteRequest {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            categories: note.categories.clone(),
        }
    }
}

/// Body for `POST /notes/{id}/categories`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCategoriesRequest {
    pub categories: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Parse an ISO-8601 timestamp; values without an offset are read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|error| format!("invalid timestamp '{raw}': {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn sample_note() -> Note {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        Note {
            id: NoteId::new(3),
            title: String::new(),
            content: "  Groceries list\nmilk\neggs".to_string(),
            categories: vec!["Personal".to_string()],
            is_archived: false,
            is_pinned: true,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn note_id_parse_and_display() {
        let id: NoteId = " 42 ".parse().unwrap();
        assert_eq!(id, NoteId::new(42));
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<NoteId>().is_err());
    }

    #[test]
    fn dto_deserializes_camel_case_payload() {
        let payload = r#"{
            "id": 9,
            "title": "Standup",
            "content": "Talk about the release",
            "categories": ["Work"],
            "isArchived": true,
            "createdAt": "2024-03-01T10:15:30.123456",
            "updatedAt": "2024-03-02T08:00:00Z"
        }"#;

        let dto: NoteDto = serde_json::from_str(payload).unwrap();
        assert_eq!(dto.id, NoteId::new(9));
        assert_eq!(dto.categories, vec!["Work"]);
        assert!(dto.is_archived);
        assert_eq!(
            dto.updated_at,
            Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap()
        );
        assert_eq!(dto.created_at.timestamp(), 1_709_288_130);
    }

    #[test]
    fn dto_tolerates_missing_or_null_categories() {
        let missing = r#"{"id":1,"title":"a","content":"b","isArchived":false,
            "createdAt":"2024-01-01T00:00:00","updatedAt":"2024-01-01T00:00:00"}"#;
        let null = r#"{"id":1,"title":"a","content":"b","categories":null,"isArchived":false,
            "createdAt":"2024-01-01T00:00:00","updatedAt":"2024-01-01T00:00:00"}"#;

        assert!(serde_json::from_str::<NoteDto>(missing).unwrap().categories.is_empty());
        assert!(serde_json::from_str::<NoteDto>(null).unwrap().categories.is_empty());
    }

    #[test]
    fn dto_conversion_starts_unpinned() {
        let dto = NoteDto {
            id: NoteId::new(1),
            title: "t".to_string(),
            content: "c".to_string(),
            categories: vec![],
            is_archived: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(!Note::from(dto).is_pinned);
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("2024-01-01T00:00:00+02:00").is_ok());
    }

    #[test]
    fn update_request_copies_editable_fields() {
        let note = sample_note();
        let request = UpdateNoteRequest::from(&note);
        assert_eq!(request.content, note.content);
        assert_eq!(request.categories, vec!["Personal"]);
    }

    #[test]
    fn create_request_serializes_plain_fields() {
        let request = CreateNoteRequest {
            title: "Hello".to_string(),
            content: "World".to_string(),
            categories: vec!["Ideas".to_string()],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "Hello", "content": "World", "categories": ["Ideas"]})
        );
    }
}
