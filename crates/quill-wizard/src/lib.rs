//! Multi-step post editor.
//!
//! The wizard is split into three parts:
//!
//! - **Step views** (`step`, `steps`): each owns the uncommitted input of its own
//!   fields and hands its current values to whoever asks
//! - **Orchestrator** (`orchestrator`): owns the authoritative draft, the current
//!   step and the error map, and gates forward navigation on validation
//! - **Submission** (`submission`): the trimmed record handed to the post store
//!
//! # Example
//!
//! ```ignore
//! use quill_model::Field;
//! use quill_wizard::{FormOrchestrator, Transition};
//!
//! let mut form = FormOrchestrator::blog();
//! form.input(Field::Title, "Hello World")?;
//! form.input(Field::Category, "Tech-News")?;
//! assert!(matches!(form.next(), Transition::Advanced { from: 1, to: 2 }));
//! ```

mod error;
mod orchestrator;
mod step;
mod steps;
mod submission;

pub use error::{Result, WizardError};
pub use orchestrator::{FormOrchestrator, Transition};
pub use step::{StepView, ValuesChanged};
pub use steps::{BodyStep, IdentityStep, MetadataStep, blog_steps};
pub use submission::PostSubmission;
