//! Data access for Wordpan.
//!
//! The relational store is an external Supabase project: authentication,
//! profiles and flashcard decks are reached through its REST interface, and
//! row-level security is enforced by forwarding the learner's JWT. The
//! traits here are the seams the HTTP service, the deck tools and the voice
//! agent depend on; [`SupabaseClient`] implements them over HTTP and
//! [`MemoryStore`] in process.

mod config;
mod error;
mod memory;
mod supabase;

pub use config::SupabaseConfig;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use supabase::SupabaseClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wordpan_types::WordPair;

/// Identity of an authenticated learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Resolves a bearer token to a learner.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<AuthUser, StoreError>;
}

/// Free-text learner context kept on the profile (native language, goals...).
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn user_context(&self, user_id: &str) -> Result<Option<String>, StoreError>;
}

/// A learner's flashcard deck.
#[async_trait]
pub trait DeckStore: Send + Sync {
    async fn word_pairs(&self, user_id: &str) -> Result<Vec<WordPair>, StoreError>;

    async fn insert_word_pair(
        &self,
        user_id: &str,
        word1: &str,
        word2: &str,
    ) -> Result<(), StoreError>;
}

/// The shared deck: rows without an owner.
#[async_trait]
pub trait PublicDeck: Send + Sync {
    async fn public_word_pairs(&self, limit: usize) -> Result<Vec<WordPair>, StoreError>;
}

/// Everything the HTTP service needs from the store.
pub trait Backend: Authenticator + ProfileStore + PublicDeck {
    /// A deck whose requests run under the learner's own JWT.
    fn deck_for(&self, access_token: &str) -> Arc<dyn DeckStore>;
}
