//! The in-progress post record owned by the form wizard.

use serde::{Deserialize, Serialize};

use crate::Field;

/// In-progress, not yet persisted post data.
///
/// Every field is always a string, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    pub title: String,
    pub category: String,
    pub description: String,
    pub tags: String,
    pub author_name: String,
}

impl DraftRecord {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Category => &self.category,
            Field::Description => &self.description,
            Field::Tags => &self.tags,
            Field::AuthorName => &self.author_name,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Title => self.title = value,
            Field::Category => self.category = value,
            Field::Description => self.description = value,
            Field::Tags => self.tags = value,
            Field::AuthorName => self.author_name = value,
        }
    }

    /// Overwrite the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &DraftPatch) {
        for (field, value) in patch.iter() {
            self.set(field, value);
        }
    }

    /// Merge caller-supplied initial data into this draft.
    ///
    /// Per field, a non-empty (trimmed) initial value wins; otherwise the value
    /// already held locally is kept. Returns `true` if any field changed.
    pub fn merge_initial(&mut self, initial: &DraftRecord) -> bool {
        let mut changed = false;
        for field in Field::ALL {
            let incoming = initial.get(field).trim();
            if incoming.is_empty() || incoming == self.get(field) {
                continue;
            }
            self.set(field, incoming);
            changed = true;
        }
        changed
    }
}

/// Partial draft data produced by a single step.
///
/// Only the fields that are `Some` take part in a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
}

impl DraftPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            Field::Title => self.title = value,
            Field::Category => self.category = value,
            Field::Description => self.description = value,
            Field::Tags => self.tags = value,
            Field::AuthorName => self.author_name = value,
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => self.title.as_deref(),
            Field::Category => self.category.as_deref(),
            Field::Description => self.description.as_deref(),
            Field::Tags => self.tags.as_deref(),
            Field::AuthorName => self.author_name.as_deref(),
        }
    }

    /// Iterate over the present fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.iter().map(|(field, _)| field)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Drop every field not accepted by `keep`.
    #[must_use]
    pub fn retain(mut self, keep: impl Fn(Field) -> bool) -> Self {
        for field in Field::ALL {
            if !keep(field) {
                match field {
                    Field::Title => self.title = None,
                    Field::Category => self.category = None,
                    Field::Description => self.description = None,
                    Field::Tags => self.tags = None,
                    Field::AuthorName => self.author_name = None,
                }
            }
        }
        self
    }
}
