//! Bearer token persistence

use crate::storage::{Storage, StorageError, TOKEN_KEY};

/// Where the effective token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Environment,
    Stored,
}

pub fn load_token(storage: &dyn Storage) -> Result<Option<String>, StorageError> {
    Ok(storage
        .get(TOKEN_KEY)?
        .filter(|token| !token.trim().is_empty()))
}

pub fn save_token(storage: &dyn Storage, token: &str) -> Result<(), StorageError> {
    storage.set(TOKEN_KEY, token.trim())
}

pub fn clear_token(storage: &dyn Storage) -> Result<(), StorageError> {
    storage.remove(TOKEN_KEY)
}

/// The environment token overrides the stored one
pub fn effective_token(
    env_token: Option<&str>,
    storage: &dyn Storage,
) -> Result<Option<(String, TokenSource)>, StorageError> {
    if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
        return Ok(Some((token.to_string(), TokenSource::Environment)));
    }
    Ok(load_token(storage)?.map(|token| (token, TokenSource::Stored)))
}

/// Show only the last four characters
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_save_load_clear() {
        let storage = MemoryStorage::new();
        assert_eq!(load_token(&storage).unwrap(), None);

        save_token(&storage, "  abc123 \n").unwrap();
        assert_eq!(load_token(&storage).unwrap(), Some("abc123".to_string()));

        clear_token(&storage).unwrap();
        assert_eq!(load_token(&storage).unwrap(), None);
    }

    #[test]
    fn test_environment_overrides_stored_token() {
        let storage = MemoryStorage::new();
        save_token(&storage, "stored").unwrap();

        assert_eq!(
            effective_token(Some("from-env"), &storage).unwrap(),
            Some(("from-env".to_string(), TokenSource::Environment))
        );
        assert_eq!(
            effective_token(None, &storage).unwrap(),
            Some(("stored".to_string(), TokenSource::Stored))
        );
        assert_eq!(
            effective_token(Some(" "), &storage).unwrap(),
            Some(("stored".to_string(), TokenSource::Stored))
        );
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcdefgh"), "****efgh");
        assert_eq!(mask_token("abc"), "***");
    }
}
