//! Session and post collection stores.
//!
//! - [`SessionStore`]: who is signed in, shared through `Rc`
//! - [`CollectionStore`]: the signed-in user's posts, reconciled with an
//!   optional [`RemoteSource`]
//!
//! Both write through to a [`quill_persistence::Storage`].

pub mod collection;
pub mod error;
pub mod remote;
pub mod session;

pub use collection::CollectionStore;
pub use error::{RemoteError, Result, SessionError, SessionResult, StoreError};
pub use remote::{DemoApiClient, RemoteConfig, RemotePost, RemoteSource};
pub use session::{DEMO_EMAIL, DEMO_PASSWORD, Session, SessionStore};
