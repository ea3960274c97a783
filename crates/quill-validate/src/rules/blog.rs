//! The three-step rule set of the post editor.

use std::sync::LazyLock;

use regex::Regex;

use quill_model::Field;

use super::{RuleSet, StepDefinition, ValidationRule};

/// Letters, whitespace and hyphens (categories, author names).
static NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s-]*$").expect("Invalid name regex"));

/// Letters, digits, whitespace, commas and hyphens.
static TAG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s,-]*$").expect("Invalid tag regex"));

static SINGLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\r\n]*$").expect("Invalid single-line regex"));

impl RuleSet {
    /// Rules for the post editor.
    ///
    /// 1. Identity: title and category
    /// 2. Body: description
    /// 3. Metadata: tags and author name, both optional
    pub fn blog() -> Self {
        let identity = StepDefinition::new(1)
            .rule(
                Field::Title,
                ValidationRule::required("Title must be between 3 and 100 characters")
                    .with_length(3, 100)
                    .with_pattern(SINGLE_LINE.clone()),
            )
            .rule(
                Field::Category,
                ValidationRule::required(
                    "Category must be 2-50 characters and contain only letters, spaces, and hyphens",
                )
                .with_length(2, 50)
                .with_pattern(NAME_CHARS.clone()),
            );

        let body = StepDefinition::new(2).rule(
            Field::Description,
            ValidationRule::required("Description must be between 10 and 1000 characters")
                .with_length(10, 1000),
        );

        let metadata = StepDefinition::new(3)
            .rule(
                Field::Tags,
                ValidationRule::optional(
                    "Tags can only contain letters, numbers, spaces, commas, and hyphens",
                )
                .with_pattern(TAG_CHARS.clone()),
            )
            .rule(
                Field::AuthorName,
                ValidationRule::optional(
                    "Author name must be up to 100 characters and contain only letters, spaces, and hyphens",
                )
                .with_length(0, 100)
                .with_pattern(NAME_CHARS.clone()),
            );

        Self::new(vec![identity, body, metadata])
    }
}
