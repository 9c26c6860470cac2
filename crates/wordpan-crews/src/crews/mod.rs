//! The concrete crews: persona, task and output type for each.

pub mod generic;
pub mod random_phrase;
pub mod router;
pub mod similar_words;
pub mod translation;
pub mod vocabulary;

use crate::crew::Inputs;
use serde_json::Value;
use wordpan_types::ChatMessage;

/// Inputs shared by the router and the specialists.
pub fn conversation_inputs(messages: &[ChatMessage], user_context: &str) -> Inputs {
    let mut inputs = Inputs::new();
    inputs.insert(
        "messages".into(),
        serde_json::to_value(messages).unwrap_or(Value::Array(Vec::new())),
    );
    inputs.insert("user_context".into(), Value::String(user_context.to_string()));
    inputs
}
