use crate::error::StoreError;
use crate::{AuthUser, Authenticator, Backend, DeckStore, ProfileStore, PublicDeck};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use wordpan_types::WordPair;

#[derive(Debug, Default)]
struct Inner {
    /// Bearer token -> user.
    users: HashMap<String, AuthUser>,
    contexts: HashMap<String, String>,
    pairs: Vec<WordPair>,
    failing: bool,
}

/// In-process store with the same semantics as the Supabase tables.
///
/// Clones share state. Locks are held only for short map operations and
/// never across `.await`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registers a learner reachable with `token`.
    pub fn add_user(&self, token: &str, user_id: &str) {
        self.write().users.insert(
            token.to_string(),
            AuthUser {
                id: user_id.to_string(),
                email: None,
            },
        );
    }

    pub fn set_context(&self, user_id: &str, context: &str) {
        self.write()
            .contexts
            .insert(user_id.to_string(), context.to_string());
    }

    /// Adds a row; `user_id: None` puts it in the public deck.
    pub fn add_word_pair(&self, user_id: Option<&str>, word1: &str, word2: &str) {
        self.write().pairs.push(WordPair {
            id: Some(uuid::Uuid::new_v4().to_string()),
            user_id: user_id.map(str::to_string),
            word1: word1.to_string(),
            word2: word2.to_string(),
        });
    }

    /// Every stored row, public ones included.
    pub fn all_word_pairs(&self) -> Vec<WordPair> {
        self.read().pairs.clone()
    }

    /// Makes every subsequent deck operation fail.
    pub fn set_failing(&self, failing: bool) {
        self.write().failing = failing;
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.read().failing {
            return Err(StoreError::Api {
                status: 503,
                message: "store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Authenticator for MemoryStore {
    async fn authenticate(&self, token: &str) -> Result<AuthUser, StoreError> {
        self.read()
            .users
            .get(token)
            .cloned()
            .ok_or_else(|| StoreError::Unauthorized("invalid JWT".to_string()))
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn user_context(&self, user_id: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read().contexts.get(user_id).cloned())
    }
}

#[async_trait]
impl DeckStore for MemoryStore {
    async fn word_pairs(&self, user_id: &str) -> Result<Vec<WordPair>, StoreError> {
        self.ensure_available()?;
        Ok(self
            .read()
            .pairs
            .iter()
            .filter(|p| p.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn insert_word_pair(
        &self,
        user_id: &str,
        word1: &str,
        word2: &str,
    ) -> Result<(), StoreError> {
        self.ensure_available()?;
        self.add_word_pair(Some(user_id), word1, word2);
        Ok(())
    }
}

#[async_trait]
impl PublicDeck for MemoryStore {
    async fn public_word_pairs(&self, limit: usize) -> Result<Vec<WordPair>, StoreError> {
        self.ensure_available()?;
        Ok(self
            .read()
            .pairs
            .iter()
            .filter(|p| p.user_id.is_none())
            .take(limit)
            .cloned()
            .collect())
    }
}

impl Backend for MemoryStore {
    fn deck_for(&self, _access_token: &str) -> Arc<dyn DeckStore> {
        Arc::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn decks_are_scoped_by_user() {
        let store = MemoryStore::new();
        store.add_word_pair(Some("u1"), "hello", "hola");
        store.add_word_pair(Some("u2"), "cat", "gato");
        store.add_word_pair(None, "dog", "perro");

        let mine = store.word_pairs("u1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].word2, "hola");

        let public = store.public_word_pairs(10).await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].word1, "dog");
    }

    #[tokio::test]
    async fn public_deck_respects_limit() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store.add_word_pair(None, &format!("w{i}"), &format!("t{i}"));
        }
        assert_eq!(store.public_word_pairs(3).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn unknown_token_is_unauthorized() {
        let store = MemoryStore::new();
        store.add_user("good", "u1");
        assert_eq!(store.authenticate("good").await.unwrap().id, "u1");
        assert!(matches!(
            store.authenticate("bad").await,
            Err(StoreError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn failing_store_rejects_deck_operations() {
        let store = MemoryStore::new();
        store.set_failing(true);
        assert!(store.word_pairs("u1").await.is_err());
        assert!(store.insert_word_pair("u1", "a", "b").await.is_err());
        store.set_failing(false);
        store.insert_word_pair("u1", "a", "b").await.unwrap();
        assert_eq!(store.all_word_pairs().len(), 1);
    }

    #[tokio::test]
    async fn scoped_deck_shares_state() {
        let store = MemoryStore::new();
        let deck = store.deck_for("token");
        deck.insert_word_pair("u1", "hello", "olá").await.unwrap();
        assert_eq!(store.word_pairs("u1").await.unwrap().len(), 1);
    }
}
