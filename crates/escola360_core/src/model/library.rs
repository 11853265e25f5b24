//! Library envelope model.
//!
//! # Responsibility
//! - Define the persisted record wrapping a saved plan.
//!
//! # Invariants
//! - `id` is generated once at save time and never reused within a collection.
//! - Records are immutable after creation; only deletion changes the library.
//! - `createdAt` is written as ISO-8601 UTC with millisecond precision.

use crate::model::plan::BimesterPlan;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one saved library record.
pub type LibraryItemId = Uuid;

/// Kind of document stored in the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LibraryItemType {
    Planning,
    Document,
}

impl LibraryItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "PLANNING",
            Self::Document => "DOCUMENT",
        }
    }

    /// Parses a case-insensitive type tag.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PLANNING" => Some(Self::Planning),
            "DOCUMENT" => Some(Self::Document),
            _ => None,
        }
    }
}

/// Persisted library record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItem {
    pub id: LibraryItemId,
    #[serde(rename = "type")]
    pub kind: LibraryItemType,
    pub title: String,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    pub content: BimesterPlan,
    /// Free-form annotation, not validated.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
