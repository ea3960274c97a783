//! Form validation for Quill Studio.
//!
//! - **Rules** (`rules`): declarative per-field rules grouped by wizard step
//! - **Engine** (`engine`): pure validation of a step, or of every step at once
//! - **Error maps** (`error_map`): field → message results, recomputed per pass
//! - **Auth forms** (`auth`): login and registration form checks
//!
//! Validation never fails with an error: problems are returned as data.
//!
//! # Example
//!
//! ```ignore
//! use quill_validate::{RuleSet, validate};
//!
//! let rules = RuleSet::blog();
//! let errors = validate(&rules, 1, &draft);
//! for (field, message) in errors.iter() {
//!     println!("{field}: {message}");
//! }
//! ```

pub mod auth;
mod engine;
mod error_map;
pub mod rules;

pub use auth::{AuthField, LoginForm, RegisterForm, validate_login, validate_register};
pub use engine::{FieldValues, FormCheck, validate, validate_all};
pub use error_map::ErrorMap;
pub use rules::{LengthBounds, RuleSet, StepDefinition, ValidationRule};
