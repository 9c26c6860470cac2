use serde::{Deserialize, Serialize};
use std::fmt;

fn default_url() -> String {
    "http://127.0.0.1:54321".to_string()
}

/// Connection settings for the Supabase project.
#[derive(Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default, skip_serializing)]
    pub anon_key: String,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            anon_key: String::new(),
        }
    }
}

impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
        }
    }

    /// Whether enough is set to reach the project.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }
}
