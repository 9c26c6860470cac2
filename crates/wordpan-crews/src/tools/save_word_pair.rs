use super::{deck_contains, word_pair_arguments, word_pair_parameters};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use wordpan_llm::{Tool, ToolError};
use wordpan_store::{DeckStore, StoreError};

/// Adds a word pair to the learner's deck unless it is already there.
pub struct SaveWordPairTool {
    user_id: String,
    deck: Arc<dyn DeckStore>,
}

impl SaveWordPairTool {
    pub fn new(user_id: impl Into<String>, deck: Arc<dyn DeckStore>) -> Self {
        Self {
            user_id: user_id.into(),
            deck,
        }
    }

    async fn try_save(&self, source: &str, translated: &str) -> Result<String, StoreError> {
        if deck_contains(self.deck.as_ref(), &self.user_id, source, translated).await? {
            return Ok(format!(
                "This word pair ('{source}' → '{translated}') is already in your deck. \
                 No duplicate was created."
            ));
        }
        self.deck
            .insert_word_pair(&self.user_id, source, translated)
            .await?;
        tracing::info!(user_id = %self.user_id, source, translated, "word pair saved");
        Ok(format!(
            "Done! I've added '{source}' → '{translated}' to your flashcard deck. \
             You'll see it in your next practice session."
        ))
    }
}

#[async_trait]
impl Tool for SaveWordPairTool {
    fn name(&self) -> &str {
        "save_word_pair"
    }

    fn description(&self) -> &str {
        "Save a word and its translation to the user's personal flashcard deck for future practice. \
         Use when the user confirms they want to save (e.g. 'Yes, save it!'). \
         If the pair already exists, the tool returns a message saying so; tell the user that exactly."
    }

    fn parameters(&self) -> Value {
        word_pair_parameters(true)
    }

    async fn call(&self, arguments: Value) -> Result<String, ToolError> {
        let (source, translated) = word_pair_arguments(&arguments);
        if source.is_empty() || translated.is_empty() {
            return Ok("Cannot save: both source_word and translated_word are required.".into());
        }
        Ok(self
            .try_save(&source, &translated)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(user_id = %self.user_id, "saving word pair failed: {}", e);
                format!("Failed to save the word pair: {e}")
            }))
    }
}
