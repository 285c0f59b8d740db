//! Book domain types
//!
//! The entity held by the record store and snapshotted into the cache.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;

// == Book Identifier ==
/// Store-assigned book identifier.
///
/// Serialized as its canonical hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(Uuid);

impl BookId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identifier supplied by a caller.
    ///
    /// Fails with `InvalidIdentifier` for anything that is not a UUID.
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| CatalogError::InvalidIdentifier(raw.to_string()))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

// == Attachment ==
/// Opaque binary payload or link carried on a book.
///
/// Serialized externally tagged: `{"url": "..."}` or `{"bytes": [..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attachment {
    Url(String),
    Bytes(Vec<u8>),
}

// == Book ==
/// A catalog record as persisted by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Attachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Materializes a new record from a creation payload.
    pub fn from_new(id: BookId, new: NewBook, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            author: new.author,
            year: new.year,
            cover_image: new.cover_image,
            description: new.description,
            document: new.document,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update in place. The identifier never changes.
    pub fn apply(&mut self, patch: BookPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(cover_image) = patch.cover_image {
            self.cover_image = Some(cover_image);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(document) = patch.document {
            self.document = Some(document);
        }
        self.updated_at = now;
    }
}

// == New Book ==
/// Creation payload: everything but the store-owned fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub cover_image: Option<Attachment>,
    pub description: Option<String>,
    pub document: Option<Attachment>,
}

impl NewBook {
    /// Convenience constructor for the three required fields.
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            ..Default::default()
        }
    }

    /// Returns an error message if a required field is blank.
    pub fn validate(&self) -> Option<String> {
        required_text("title", &self.title).or_else(|| required_text("author", &self.author))
    }
}

// == Book Patch ==
/// Partial update payload. `None` leaves the field untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub cover_image: Option<Attachment>,
    pub description: Option<String>,
    pub document: Option<Attachment>,
}

impl BookPatch {
    /// Returns an error message if the patch would blank a required field.
    pub fn validate(&self) -> Option<String> {
        self.title
            .as_deref()
            .and_then(|title| required_text("title", title))
            .or_else(|| {
                self.author
                    .as_deref()
                    .and_then(|author| required_text("author", author))
            })
    }
}

fn required_text(field: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{} is required", field))
    } else {
        None
    }
}
