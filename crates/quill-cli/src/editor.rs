//! Create/edit sessions wrapping the form wizard.
//!
//! An [`EditorSession`] is what the `new` and `edit` commands drive. It owns
//! the [`FormOrchestrator`] for its lifetime and is the only place that hands
//! a finished [`PostSubmission`] to the [`CollectionStore`].

use quill_model::{DraftPatch, Field, PostId, PostRecord};
use quill_store::{CollectionStore, StoreError};
use quill_validate::ErrorMap;
use quill_wizard::{FormOrchestrator, PostSubmission, WizardError};
use thiserror::Error;
use tracing::{debug, info};

/// Whether the session creates a post or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(PostId),
}

/// Top-level editor failures. Field problems stay in the error map; this is
/// what the editor shows above the form.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Please fill all required fields correctly")]
    Invalid {
        first_invalid_step: usize,
        errors: ErrorMap,
    },

    #[error("Form not initialized")]
    NotInitialized,

    #[error("{0}")]
    Authorization(StoreError),

    #[error(transparent)]
    Store(StoreError),

    #[error(transparent)]
    Wizard(#[from] WizardError),
}

impl From<StoreError> for EditorError {
    fn from(err: StoreError) -> Self {
        if err.is_authorization() {
            Self::Authorization(err)
        } else {
            Self::Store(err)
        }
    }
}

#[derive(Debug)]
pub struct EditorSession {
    mode: EditorMode,
    form: Option<FormOrchestrator>,
}

impl EditorSession {
    /// Empty wizard for a new post.
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            form: Some(FormOrchestrator::blog()),
        }
    }

    /// Wizard seeded from an existing post.
    pub fn edit(post: &PostRecord) -> Self {
        Self {
            mode: EditorMode::Edit(post.id.clone()),
            form: Some(FormOrchestrator::blog().with_initial(&post.to_draft())),
        }
    }

    /// A session whose form has not been mounted yet.
    pub fn detached(mode: EditorMode) -> Self {
        Self { mode, form: None }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn form(&self) -> Result<&FormOrchestrator, EditorError> {
        self.form.as_ref().ok_or(EditorError::NotInitialized)
    }

    pub fn form_mut(&mut self) -> Result<&mut FormOrchestrator, EditorError> {
        self.form.as_mut().ok_or(EditorError::NotInitialized)
    }

    /// Fill fields without prompting, visiting each step that owns one.
    ///
    /// Ends on the first step. Values are not validated here; [`submit`]
    /// does that for the whole form.
    ///
    /// [`submit`]: Self::submit
    pub fn fill(&mut self, values: &DraftPatch) -> Result<(), EditorError> {
        let form = self.form_mut()?;
        for step in 1..=form.step_count() {
            form.set_current_step(step)?;
            let on_step: Vec<(Field, String)> = values
                .iter()
                .filter(|(field, _)| form.current_view().governs(*field))
                .map(|(field, value)| (field, value.to_string()))
                .collect();
            for (field, value) in on_step {
                form.input(field, &value)?;
            }
        }
        form.set_current_step(1)?;
        Ok(())
    }

    /// Validate every step and hand the trimmed record to `store`.
    ///
    /// On validation failure the wizard is moved back to the earliest
    /// failing step with that step's messages in place.
    pub fn submit(&mut self, store: &mut CollectionStore) -> Result<PostRecord, EditorError> {
        let form = self.form.as_mut().ok_or(EditorError::NotInitialized)?;

        let check = form.validate_all_steps();
        if let Some(step) = check.first_invalid_step() {
            form.set_current_step(step)?;
            let errors = form.validate_current_step().clone();
            debug!(step, error_count = errors.len(), "Submit blocked");
            return Err(EditorError::Invalid {
                first_invalid_step: step,
                errors,
            });
        }

        let submission = PostSubmission::from_draft(&form.form_data());
        let post = match &self.mode {
            EditorMode::Create => store.add(&submission)?,
            EditorMode::Edit(id) => store.update(id, &submission)?,
        };
        info!(post_id = %post.id, "Saved post from editor");
        Ok(post)
    }
}
