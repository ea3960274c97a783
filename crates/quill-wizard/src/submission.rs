//! The record handed to the post store once the form is valid.

use serde::{Deserialize, Serialize};

use quill_model::DraftRecord;

/// A fully trimmed post, ready for `add` or `update`.
///
/// Optional fields are present only when non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSubmission {
    pub title: String,
    pub category: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
}

impl PostSubmission {
    pub fn from_draft(draft: &DraftRecord) -> Self {
        Self {
            title: draft.title.trim().to_string(),
            category: draft.category.trim().to_string(),
            description: draft.description.trim().to_string(),
            tags: non_empty(&draft.tags),
            author_name: non_empty(&draft.author_name),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_drops_blank_optionals() {
        let submission = PostSubmission::from_draft(&DraftRecord {
            title: "  Hello World ".into(),
            category: "Tech".into(),
            description: " body text here ".into(),
            tags: "   ".into(),
            author_name: " Ada ".into(),
        });
        assert_eq!(submission.title, "Hello World");
        assert_eq!(submission.description, "body text here");
        assert_eq!(submission.tags, None);
        assert_eq!(submission.author_name.as_deref(), Some("Ada"));
    }
}
