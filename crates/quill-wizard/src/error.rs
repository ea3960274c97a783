//! Wizard error types.
//!
//! These describe misuse of the wizard by its caller. Invalid user input is
//! never an error here; it ends up in the orchestrator's error map.

use thiserror::Error;

use quill_model::Field;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("A form needs at least one step")]
    NoSteps,

    /// Step index outside `1..=step_count`.
    #[error("Step {step} does not exist (the form has {step_count} steps)")]
    StepOutOfRange { step: usize, step_count: usize },

    /// Input addressed to a field the current step does not own.
    #[error("Field '{field}' is not part of step {step}")]
    FieldNotOnStep { field: Field, step: usize },

    /// Step views do not line up with the rule set.
    #[error("Step view at position {position} reports step {found}, expected {expected}")]
    StepMismatch {
        position: usize,
        expected: usize,
        found: usize,
    },

    /// No rule definition carries this step's index.
    #[error("Rule set has no definition for step {step}")]
    MissingStepRules { step: usize },

    #[error("Rule set defines step {step} more than once")]
    DuplicateStepRules { step: usize },

    /// The rule set defines a different number of steps than there are views.
    #[error("Rule set defines {rules} steps but {views} step views were supplied")]
    StepCountMismatch { rules: usize, views: usize },
}

pub type Result<T> = std::result::Result<T, WizardError>;
