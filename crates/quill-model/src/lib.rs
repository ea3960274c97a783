//! Core data model for Quill Studio.
//!
//! - **Drafts** (`draft`): the in-progress record edited by the wizard and the
//!   typed patch used to merge partial step output into it
//! - **Posts** (`post`): persisted post records with an explicit origin tag
//! - **Identifiers** (`ids`): validated post and user ids
//! - **Users** (`user`): authenticated identities

pub mod draft;
pub mod error;
pub mod field;
pub mod ids;
pub mod post;
pub mod user;

pub use draft::{DraftPatch, DraftRecord};
pub use error::{ModelError, Result};
pub use field::Field;
pub use ids::{PostId, UserId};
pub use post::{Origin, PostRecord};
pub use user::User;
