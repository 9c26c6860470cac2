//! Flashcard tools offered to the translation and vocabulary agents.
//!
//! Both tools act on one learner's deck and always answer with text the
//! model can relay to the learner; store failures never surface as tool
//! errors.

mod check_word_pair;
mod save_word_pair;

pub use check_word_pair::CheckWordPairInDeckTool;
pub use save_word_pair::SaveWordPairTool;

use serde_json::{json, Value};
use std::sync::Arc;
use wordpan_llm::Tool;
use wordpan_store::{DeckStore, StoreError};

/// The save and check tools bound to `user_id`'s deck.
pub fn deck_tools(user_id: &str, deck: Arc<dyn DeckStore>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(SaveWordPairTool::new(user_id, deck.clone())),
        Arc::new(CheckWordPairInDeckTool::new(user_id, deck)),
    ]
}

fn word_pair_parameters(with_context: bool) -> Value {
    let mut properties = json!({
        "source_word": {
            "type": "string",
            "description": "The word in the user's native language",
        },
        "translated_word": {
            "type": "string",
            "description": "The translation in the target language",
        },
    });
    if with_context {
        properties["context_sentence"] = json!({
            "type": ["string", "null"],
            "description": "An example sentence using the word",
        });
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": ["source_word", "translated_word"],
    })
}

/// Trimmed `(source_word, translated_word)`; missing arguments read as empty.
fn word_pair_arguments(arguments: &Value) -> (String, String) {
    let read = |key: &str| {
        arguments
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string()
    };
    (read("source_word"), read("translated_word"))
}

async fn deck_contains(
    deck: &dyn DeckStore,
    user_id: &str,
    source: &str,
    translated: &str,
) -> Result<bool, StoreError> {
    let pairs = deck.word_pairs(user_id).await?;
    Ok(pairs.iter().any(|pair| pair.matches(source, translated)))
}
