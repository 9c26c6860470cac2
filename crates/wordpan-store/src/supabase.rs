use crate::config::SupabaseConfig;
use crate::error::StoreError;
use crate::{AuthUser, Authenticator, Backend, DeckStore, ProfileStore, PublicDeck};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wordpan_types::WordPair;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// PostgREST media type that returns a single object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Supabase REST client.
///
/// Without an access token requests run as the anonymous role; a client
/// returned by [`SupabaseClient::with_access_token`] runs as the learner so
/// row-level security applies.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    config: SupabaseConfig,
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct ProfileRow {
    #[serde(default)]
    context: Option<String>,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            config,
            access_token: None,
        })
    }

    /// Returns a client scoped to the learner's JWT.
    pub fn with_access_token(&self, access_token: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.clone(),
            access_token: Some(access_token.into()),
        }
    }

    fn base(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    fn rest(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base(), table)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .access_token
            .as_deref()
            .unwrap_or(&self.config.anon_key);
        builder
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized(message));
        }
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch_pairs(&self, query: &[(&str, String)]) -> Result<Vec<WordPair>, StoreError> {
        let response = self
            .authorize(self.http.get(self.rest("word_pairs")))
            .query(query)
            .send()
            .await?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Authenticator for SupabaseClient {
    async fn authenticate(&self, token: &str) -> Result<AuthUser, StoreError> {
        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.base()))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
            .send()
            .await?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ProfileStore for SupabaseClient {
    async fn user_context(&self, user_id: &str) -> Result<Option<String>, StoreError> {
        let response = self
            .authorize(self.http.get(self.rest("profiles")))
            .header("Accept", SINGLE_OBJECT)
            .query(&[("select", "context".to_string()), ("id", format!("eq.{user_id}"))])
            .send()
            .await?;

        // PostgREST answers 406 when a single-object select matches no row.
        if response.status() == StatusCode::NOT_ACCEPTABLE {
            return Ok(None);
        }

        let row: ProfileRow = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(row.context)
    }
}

#[async_trait]
impl DeckStore for SupabaseClient {
    async fn word_pairs(&self, user_id: &str) -> Result<Vec<WordPair>, StoreError> {
        self.fetch_pairs(&[
            ("select", "id,word1,word2".to_string()),
            ("user_id", format!("eq.{user_id}")),
        ])
        .await
    }

    async fn insert_word_pair(
        &self,
        user_id: &str,
        word1: &str,
        word2: &str,
    ) -> Result<(), StoreError> {
        let response = self
            .authorize(self.http.post(self.rest("word_pairs")))
            .header("Prefer", "return=minimal")
            .json(&json!({
                "user_id": user_id,
                "word1": word1,
                "word2": word2,
            }))
            .send()
            .await?;
        Self::check(response).await?;
        tracing::info!(user_id, "inserted word pair");
        Ok(())
    }
}

#[async_trait]
impl PublicDeck for SupabaseClient {
    async fn public_word_pairs(&self, limit: usize) -> Result<Vec<WordPair>, StoreError> {
        self.fetch_pairs(&[
            ("select", "word1,word2".to_string()),
            ("user_id", "is.null".to_string()),
            ("limit", limit.to_string()),
        ])
        .await
    }
}

impl Backend for SupabaseClient {
    fn deck_for(&self, access_token: &str) -> Arc<dyn DeckStore> {
        Arc::new(self.with_access_token(access_token))
    }
}
