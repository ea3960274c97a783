//! Durable storage for Quill Studio.
//!
//! Values are strings stored under short string keys, the same shape as a
//! browser's local storage. Two backends are provided:
//!
//! - [`FileStorage`]: one file per key in a data directory, written atomically
//! - [`MemoryStorage`]: an in-process map for tests and throwaway sessions
//!
//! Typed access goes through [`load_json`] and [`save_json`].
//!
//! # Example
//!
//! ```ignore
//! use quill_persistence::{FileStorage, Storage, load_json, save_json};
//!
//! let storage = FileStorage::open("/tmp/quill")?;
//! save_json(&storage, "posts_1", &posts)?;
//! let posts: Option<Vec<PostRecord>> = load_json(&storage, "posts_1")?;
//! ```

mod error;
mod file;
mod json;
mod memory;

pub use error::{PersistenceError, Result};
pub use file::FileStorage;
pub use json::{load_json, save_json};
pub use memory::MemoryStorage;

/// String values under string keys.
///
/// Methods take `&self` so a single storage can be shared by several stores.
pub trait Storage {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Check that `key` only uses characters safe for file names.
pub(crate) fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(PersistenceError::InvalidKey {
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_must_be_file_name_safe() {
        assert!(check_key("posts_1").is_ok());
        assert!(check_key("deleted_a-b.c").is_ok());
        assert!(check_key("").is_err());
        assert!(check_key("../etc").is_err());
        assert!(check_key(".hidden").is_err());
        assert!(check_key("a/b").is_err());
    }
}
