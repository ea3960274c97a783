//! Draft record field keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// A field of the draft record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    Category,
    Description,
    Tags,
    AuthorName,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Category,
        Field::Description,
        Field::Tags,
        Field::AuthorName,
    ];

    /// Stable key used in storage and on the command line.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Category => "category",
            Self::Description => "description",
            Self::Tags => "tags",
            Self::AuthorName => "authorName",
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Category => "Category",
            Self::Description => "Description",
            Self::Tags => "Tags",
            Self::AuthorName => "Author name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['-', '_'], "").to_lowercase();
        match normalized.as_str() {
            "title" => Ok(Self::Title),
            "category" => Ok(Self::Category),
            "description" => Ok(Self::Description),
            "tags" => Ok(Self::Tags),
            "authorname" | "author" => Ok(Self::AuthorName),
            _ => Err(ModelError::UnknownField(s.to_string())),
        }
    }
}
