//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::{Deserialize, Deserializer};

use crate::error::CatalogError;
use crate::models::{Attachment, BookPatch, NewBook};

/// Request body for creating a book (POST /api/books)
///
/// Required fields are optional here so that a missing field surfaces as a
/// validation error rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBookRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub cover_image: Option<Attachment>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub document: Option<Attachment>,
}

impl CreateBookRequest {
    /// Converts into a creation payload, checking required fields are present.
    pub fn into_new_book(self) -> Result<NewBook, CatalogError> {
        let missing: Vec<&str> = [
            ("title", self.title.is_none()),
            ("author", self.author.is_none()),
            ("year", self.year.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        match (self.title, self.author, self.year) {
            (Some(title), Some(author), Some(year)) => Ok(NewBook {
                title,
                author,
                year,
                cover_image: self.cover_image,
                description: self.description,
                document: self.document,
            }),
            _ => Err(CatalogError::Validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            ))),
        }
    }
}

/// Request body for updating a book (PUT /api/books/:id)
///
/// Every field is optional; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub cover_image: Option<Attachment>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub document: Option<Attachment>,
}

impl From<UpdateBookRequest> for BookPatch {
    fn from(req: UpdateBookRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            year: req.year,
            cover_image: req.cover_image,
            description: req.description,
            document: req.document,
        }
    }
}

// == Year Parsing ==
/// Accepts a year as a JSON number or a numeric string (`"1965"`).
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum YearInput {
        Number(i32),
        Text(String),
    }

    match Option::<YearInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(YearInput::Number(year)) => Ok(Some(year)),
        Some(YearInput::Text(text)) => text.trim().parse().map(Some).map_err(|_| {
            serde::de::Error::custom(format!("year must be a number, got {:?}", text))
        }),
    }
}
