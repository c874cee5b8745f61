//! TokenBank Store
//!
//! Durable mapping from (user, language) to per-token practice counts. One
//! record per pair; counts start at zero for tokens never written. Records
//! are created on first write and never deleted.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

/// Per-(user, language) token practice counts.
#[derive(Debug, Clone, Default)]
pub struct TokenBankStore {
    banks: Arc<RwLock<HashMap<(String, String), HashMap<String, u32>>>>,
}

impl TokenBankStore {
    /// Creates an empty tokenbank store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Returns the token counts for a (user, language) pair.
    ///
    /// A missing record reads as an empty mapping, never an error.
    pub async fn get(&self, user_id: &str, language: &str) -> HashMap<String, u32> {
        let banks = self.banks.read().await;
        banks
            .get(&(user_id.to_string(), language.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    // == Set All ==
    /// Replaces the whole token mapping for a (user, language) pair,
    /// creating the record if absent.
    pub async fn set_all(&self, user_id: &str, language: &str, tokens: HashMap<String, u32>) {
        debug!(
            "Setting tokenbank for user {} language {} ({} tokens)",
            user_id,
            language,
            tokens.len()
        );
        let mut banks = self.banks.write().await;
        banks.insert((user_id.to_string(), language.to_string()), tokens);
    }

    // == Set One ==
    /// Upserts a single token count without disturbing the other tokens,
    /// creating the record if absent.
    pub async fn set_one(&self, user_id: &str, language: &str, token: &str, count: u32) {
        debug!(
            "Setting token {} = {} for user {} language {}",
            token, count, user_id, language
        );
        let mut banks = self.banks.write().await;
        banks
            .entry((user_id.to_string(), language.to_string()))
            .or_default()
            .insert(token.to_string(), count);
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_record_reads_empty() {
        let store = TokenBankStore::new();
        let bank = store.get("james", "spa").await;
        assert!(bank.is_empty());
    }

    #[tokio::test]
    async fn test_set_all_and_get() {
        let store = TokenBankStore::new();

        let mut tokens = HashMap::new();
        tokens.insert("cat".to_string(), 69);
        tokens.insert("dog".to_string(), 100);
        tokens.insert("bird".to_string(), 42);
        store.set_all("james", "spa", tokens.clone()).await;

        let bank = store.get("james", "spa").await;
        assert_eq!(bank, tokens);
    }

    #[tokio::test]
    async fn test_set_all_replaces_whole_mapping() {
        let store = TokenBankStore::new();

        let mut first = HashMap::new();
        first.insert("cat".to_string(), 1);
        first.insert("dog".to_string(), 2);
        store.set_all("james", "spa", first).await;

        let mut second = HashMap::new();
        second.insert("bird".to_string(), 3);
        store.set_all("james", "spa", second).await;

        let bank = store.get("james", "spa").await;
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.get("bird"), Some(&3));
        assert!(!bank.contains_key("cat"));
    }

    #[tokio::test]
    async fn test_set_one_preserves_other_tokens() {
        let store = TokenBankStore::new();

        let mut tokens = HashMap::new();
        tokens.insert("cat".to_string(), 69);
        tokens.insert("dog".to_string(), 100);
        store.set_all("james", "spa", tokens).await;

        store.set_one("james", "spa", "cat", 75).await;

        let bank = store.get("james", "spa").await;
        assert_eq!(bank.get("cat"), Some(&75));
        assert_eq!(bank.get("dog"), Some(&100));
    }

    #[tokio::test]
    async fn test_set_one_creates_record() {
        let store = TokenBankStore::new();

        store.set_one("james", "cmn", "商店", 1).await;

        let bank = store.get("james", "cmn").await;
        assert_eq!(bank.get("商店"), Some(&1));
    }

    #[tokio::test]
    async fn test_pairs_are_isolated() {
        let store = TokenBankStore::new();

        store.set_one("james", "spa", "gato", 5).await;
        store.set_one("james", "cmn", "貓", 2).await;
        store.set_one("maria", "spa", "perro", 9).await;

        assert_eq!(store.get("james", "spa").await.len(), 1);
        assert_eq!(store.get("james", "cmn").await.len(), 1);
        assert_eq!(store.get("maria", "spa").await.len(), 1);
        assert!(store.get("maria", "cmn").await.is_empty());
    }
}
