//! Persisted post records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DraftRecord, PostId, UserId};

/// Where a post record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Placeholder post pulled from the remote demo API.
    Remote,
    /// Post written in this application.
    #[default]
    Local,
}

impl Origin {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote)
    }
}

/// A post belonging to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: PostId,
    pub title: String,
    pub category: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub owner_id: UserId,
    #[serde(default)]
    pub origin: Origin,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PostRecord {
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }

    /// Editable fields as a draft, used to seed the editor in edit mode.
    pub fn to_draft(&self) -> DraftRecord {
        DraftRecord {
            title: self.title.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            tags: self.tags.clone().unwrap_or_default(),
            author_name: self.author_name.clone().unwrap_or_default(),
        }
    }

    /// Numeric id of a remote post, if this is one.
    pub fn remote_number(&self) -> Option<u64> {
        if !self.origin.is_remote() {
            return None;
        }
        self.id.as_str().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(origin: Origin, id: &str) -> PostRecord {
        PostRecord {
            id: PostId::new(id).unwrap(),
            title: "Hello World".into(),
            category: "Tech".into(),
            description: "A post about things".into(),
            tags: None,
            author_name: Some("Ada".into()),
            owner_id: UserId::new("1").unwrap(),
            origin,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn to_draft_fills_missing_optionals_with_empty() {
        let draft = sample(Origin::Local, "abc").to_draft();
        assert_eq!(draft.tags, "");
        assert_eq!(draft.author_name, "Ada");
    }

    #[test]
    fn remote_number_requires_remote_origin() {
        assert_eq!(sample(Origin::Remote, "7").remote_number(), Some(7));
        assert_eq!(sample(Origin::Local, "7").remote_number(), None);
    }

    #[test]
    fn missing_origin_defaults_to_local() {
        let json = r#"{
            "id": "x1",
            "title": "T",
            "category": "C",
            "description": "D",
            "ownerId": "1",
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;
        let post: PostRecord = serde_json::from_str(json).unwrap();
        assert_eq!(post.origin, Origin::Local);
        assert!(post.updated_at.is_none());
    }
}
