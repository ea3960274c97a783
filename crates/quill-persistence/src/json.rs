//! Typed access on top of [`Storage`].

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Storage;
use crate::error::{PersistenceError, Result};

/// Load and decode the JSON value stored under `key`.
///
/// Returns `Ok(None)` when nothing is stored. A value that does not decode
/// is reported as [`PersistenceError::Deserialization`]; callers decide
/// whether to discard it.
pub fn load_json<T, S>(storage: &S, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: Storage + ?Sized,
{
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| PersistenceError::Deserialization {
            key: key.to_string(),
            source: e,
        })
}

/// Encode `value` as pretty JSON and store it under `key`.
pub fn save_json<T, S>(storage: &S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: Storage + ?Sized,
{
    let raw =
        serde_json::to_string_pretty(value).map_err(|e| PersistenceError::Serialization {
            key: key.to_string(),
            source: e,
        })?;
    storage.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    #[test]
    fn test_load_missing_is_none() {
        let storage = MemoryStorage::new();
        let value: Option<Vec<String>> = load_json(&storage, "absent").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_corrupt_value_is_reported() {
        let storage = MemoryStorage::new();
        storage.set("session", "{not json").unwrap();

        let err = load_json::<Vec<String>, _>(&storage, "session").unwrap_err();

        assert!(matches!(err, PersistenceError::Deserialization { .. }));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::new();
        save_json(&storage, "tags", &vec!["rust", "cli"]).unwrap();
        let tags: Option<Vec<String>> = load_json(&storage, "tags").unwrap();
        assert_eq!(tags, Some(vec!["rust".to_string(), "cli".to_string()]));
    }
}
