use super::{deck_contains, word_pair_arguments, word_pair_parameters};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use wordpan_llm::{Tool, ToolError};
use wordpan_store::DeckStore;

const NOT_IN_DECK: &str = "not in deck";

/// Tells the agent whether a pair is already saved, so it can skip the
/// offer to save.
pub struct CheckWordPairInDeckTool {
    user_id: String,
    deck: Arc<dyn DeckStore>,
}

impl CheckWordPairInDeckTool {
    pub fn new(user_id: impl Into<String>, deck: Arc<dyn DeckStore>) -> Self {
        Self {
            user_id: user_id.into(),
            deck,
        }
    }
}

#[async_trait]
impl Tool for CheckWordPairInDeckTool {
    fn name(&self) -> &str {
        "check_word_pair_in_deck"
    }

    fn description(&self) -> &str {
        "Check if a word pair is already in the user's flashcard deck. \
         Call this BEFORE offering to save, when you have just given a translation or new word. \
         If the result is 'already in deck', do NOT offer to save; say the pair is already in the deck. \
         If the result is 'not in deck', then offer to save."
    }

    fn parameters(&self) -> Value {
        word_pair_parameters(false)
    }

    async fn call(&self, arguments: Value) -> Result<String, ToolError> {
        let (source, translated) = word_pair_arguments(&arguments);
        if source.is_empty() || translated.is_empty() {
            return Ok(NOT_IN_DECK.into());
        }

        match deck_contains(self.deck.as_ref(), &self.user_id, &source, &translated).await {
            Ok(true) => Ok(format!(
                "already in deck: This word pair ('{source}' → '{translated}') is already in your deck."
            )),
            Ok(false) => Ok(NOT_IN_DECK.into()),
            Err(e) => {
                tracing::warn!(user_id = %self.user_id, "deck lookup failed: {}", e);
                Ok(NOT_IN_DECK.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wordpan_store::MemoryStore;

    #[tokio::test]
    async fn reports_saved_pair() {
        let store = MemoryStore::new();
        store.add_word_pair(Some("user-1"), "cat", "gato");
        let tool = CheckWordPairInDeckTool::new("user-1", Arc::new(store));

        let out = tool
            .call(json!({"source_word": "CAT", "translated_word": "Gato"}))
            .await
            .unwrap();
        assert_eq!(
            out,
            "already in deck: This word pair ('CAT' → 'Gato') is already in your deck."
        );
    }

    #[tokio::test]
    async fn missing_blank_or_failing_reads_not_in_deck() {
        let store = MemoryStore::new();
        let tool = CheckWordPairInDeckTool::new("user-1", Arc::new(store.clone()));

        let out = tool.call(json!({"source_word": "cat"})).await.unwrap();
        assert_eq!(out, "not in deck");

        let out = tool
            .call(json!({"source_word": "cat", "translated_word": "gato"}))
            .await
            .unwrap();
        assert_eq!(out, "not in deck");

        store.add_word_pair(Some("user-1"), "cat", "gato");
        store.set_failing(true);
        let out = tool
            .call(json!({"source_word": "cat", "translated_word": "gato"}))
            .await
            .unwrap();
        assert_eq!(out, "not in deck");
    }

    #[test]
    fn deck_tools_expose_both_names() {
        let tools = crate::deck_tools("user-1", Arc::new(MemoryStore::new()));
        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        assert_eq!(names, ["save_word_pair", "check_word_pair_in_deck"]);
    }
}
