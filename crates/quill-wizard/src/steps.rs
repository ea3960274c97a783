//! The three step views of the post editor.

use quill_model::{DraftPatch, DraftRecord, Field};

use crate::step::{StepView, ValuesChanged};

/// Step 1: title and category.
#[derive(Debug, Clone, Default)]
pub struct IdentityStep {
    title: String,
    category: String,
}

impl StepView for IdentityStep {
    fn step(&self) -> usize {
        1
    }

    fn title(&self) -> &'static str {
        "Basics"
    }

    fn fields(&self) -> &'static [Field] {
        &[Field::Title, Field::Category]
    }

    fn current_values(&self) -> DraftPatch {
        DraftPatch::new()
            .with(Field::Title, self.title.as_str())
            .with(Field::Category, self.category.as_str())
    }

    fn load(&mut self, draft: &DraftRecord) {
        self.title.clone_from(&draft.title);
        self.category.clone_from(&draft.category);
    }

    fn set_value(&mut self, field: Field, value: &str) -> Option<ValuesChanged> {
        match field {
            Field::Title => self.title = value.to_string(),
            Field::Category => self.category = value.to_string(),
            _ => return None,
        }
        Some(self.commit())
    }
}

/// Step 2: the long-form description.
#[derive(Debug, Clone, Default)]
pub struct BodyStep {
    description: String,
}

impl StepView for BodyStep {
    fn step(&self) -> usize {
        2
    }

    fn title(&self) -> &'static str {
        "Content"
    }

    fn fields(&self) -> &'static [Field] {
        &[Field::Description]
    }

    fn current_values(&self) -> DraftPatch {
        DraftPatch::new().with(Field::Description, self.description.as_str())
    }

    fn load(&mut self, draft: &DraftRecord) {
        self.description.clone_from(&draft.description);
    }

    fn set_value(&mut self, field: Field, value: &str) -> Option<ValuesChanged> {
        if field != Field::Description {
            return None;
        }
        self.description = value.to_string();
        Some(self.commit())
    }
}

/// Step 3: optional tags and author name.
#[derive(Debug, Clone, Default)]
pub struct MetadataStep {
    tags: String,
    author_name: String,
}

impl StepView for MetadataStep {
    fn step(&self) -> usize {
        3
    }

    fn title(&self) -> &'static str {
        "Details"
    }

    fn fields(&self) -> &'static [Field] {
        &[Field::Tags, Field::AuthorName]
    }

    fn current_values(&self) -> DraftPatch {
        DraftPatch::new()
            .with(Field::Tags, self.tags.as_str())
            .with(Field::AuthorName, self.author_name.as_str())
    }

    fn load(&mut self, draft: &DraftRecord) {
        self.tags.clone_from(&draft.tags);
        self.author_name.clone_from(&draft.author_name);
    }

    fn set_value(&mut self, field: Field, value: &str) -> Option<ValuesChanged> {
        match field {
            Field::Tags => self.tags = value.to_string(),
            Field::AuthorName => self.author_name = value.to_string(),
            _ => return None,
        }
        Some(self.commit())
    }
}

/// Fresh step views for the post editor, in order.
pub fn blog_steps() -> Vec<Box<dyn StepView>> {
    vec![
        Box::new(IdentityStep::default()),
        Box::new(BodyStep::default()),
        Box::new(MetadataStep::default()),
    ]
}
