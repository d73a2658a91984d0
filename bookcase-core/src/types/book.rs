//! The Book record as served by the book-storage service

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Image shown wherever a book has no cover of its own
pub const PLACEHOLDER_COVER_URL: &str = "https://via.placeholder.com/150";

/// Server-assigned identifier of a book
///
/// The storage service hands out numeric ids, but the client treats them as
/// opaque text so it never depends on their shape. The JSON kind the id
/// arrived as (number or string) is remembered and written back unchanged;
/// it takes no part in comparisons.
#[derive(Clone)]
pub struct BookId {
    text: String,
    kind: IdKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdKind {
    Number,
    Text,
}

impl BookId {
    fn text(id: impl Into<String>) -> Self {
        Self {
            text: id.into(),
            kind: IdKind::Text,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Debug for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BookId").field(&self.text).finish()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq for BookId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for BookId {}

impl Hash for BookId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for BookId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BookId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        Self::text(id)
    }
}

impl From<String> for BookId {
    fn from(id: String) -> Self {
        Self::text(id)
    }
}

impl From<u64> for BookId {
    fn from(id: u64) -> Self {
        Self {
            text: id.to_string(),
            kind: IdKind::Number,
        }
    }
}

/// Error returned when a path segment cannot be used as a book id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidBookId(pub String);

impl fmt::Display for InvalidBookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid book id", self.0)
    }
}

impl std::error::Error for InvalidBookId {}

impl FromStr for BookId {
    type Err = InvalidBookId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.contains(['/', '?', '#']) {
            return Err(InvalidBookId(s.to_string()));
        }
        Ok(Self::text(trimmed))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WireId::deserialize(deserializer)? {
            WireId::Number(n) => Self {
                text: n.to_string(),
                kind: IdKind::Number,
            },
            WireId::Text(s) => Self::text(s),
        })
    }
}

impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.kind == IdKind::Number {
            if let Ok(n) = self.text.parse::<i64>() {
                return serializer.serialize_i64(n);
            }
        }
        serializer.serialize_str(&self.text)
    }
}

/// A book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,

    /// Short summary, possibly machine-generated
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,

    /// Body text (omitted by list responses)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Book {
    /// The cover to display, falling back to the placeholder image
    pub fn cover_url(&self) -> &str {
        self.cover_image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(PLACEHOLDER_COVER_URL)
    }

    /// Whether the record carries a cover of its own
    pub fn has_cover(&self) -> bool {
        self.cover_url() != PLACEHOLDER_COVER_URL
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
