//! Typed crew results.
//!
//! Each output type carries the JSON schema sent as the completion's
//! response format, plus any check serde alone cannot express.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use wordpan_types::{
    Intent, PhraseOutput, Role, RouterDecision, SimilarWordsOutput, TranslationOutput,
    TutorMessage, MAX_SIMILAR_WORDS,
};

pub trait StructuredOutput: DeserializeOwned + Send {
    /// Schema name sent with the response format.
    const NAME: &'static str;

    fn schema() -> Value;

    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

fn intent_schema() -> Value {
    let names: Vec<&str> = Intent::ALL.iter().map(|i| i.as_str()).collect();
    json!({"type": "string", "enum": names})
}

impl StructuredOutput for RouterDecision {
    const NAME: &'static str = "RouterDecision";

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "intent": intent_schema(),
                "allowed_domain": {"type": "boolean"},
                "specialist_instruction": {"type": "string"},
                "refusal_message": {"type": ["string", "null"]},
            },
            "required": ["intent", "allowed_domain", "specialist_instruction"],
        })
    }
}

impl StructuredOutput for TranslationOutput {
    const NAME: &'static str = "TranslationOutput";

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {"content": {"type": "string"}},
            "required": ["content"],
        })
    }
}

impl StructuredOutput for TutorMessage {
    const NAME: &'static str = "TutorMessage";

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "role": {"type": "string", "enum": ["assistant"]},
                "content": {"type": "string"},
                "intent": intent_schema(),
                "word_card": {
                    "type": ["object", "null"],
                    "properties": {
                        "word": {"type": "string"},
                        "translation": {"type": "string"},
                        "example_sentence": {"type": "string"},
                        "explanation": {"type": ["string", "null"]},
                        "part_of_speech": {"type": ["string", "null"]},
                    },
                    "required": ["word", "translation", "example_sentence"],
                },
                "actions": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "type": {"type": "string"},
                            "payload": {"type": "object"},
                        },
                        "required": ["type"],
                    },
                },
                "delegated_agent": {"type": ["string", "null"]},
            },
            "required": ["content", "intent"],
        })
    }

    fn validate(&self) -> Result<(), String> {
        if self.role != Role::Assistant {
            return Err(format!("role must be assistant, got {}", self.role.as_str()));
        }
        Ok(())
    }
}

impl StructuredOutput for PhraseOutput {
    const NAME: &'static str = "PhraseOutput";

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "phrase": {"type": "string"},
                "words": {"type": "array", "items": {"type": "string"}},
            },
            "required": ["phrase", "words"],
        })
    }
}

impl StructuredOutput for SimilarWordsOutput {
    const NAME: &'static str = "SimilarWordsOutput";

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "similar_words": {
                    "type": "array",
                    "items": {"type": "string"},
                    "minItems": 1,
                    "maxItems": MAX_SIMILAR_WORDS,
                },
            },
            "required": ["similar_words"],
        })
    }

    fn validate(&self) -> Result<(), String> {
        SimilarWordsOutput::validate(self)
    }
}

/// Locates the JSON object in a model answer.
///
/// Models sometimes wrap the object in a Markdown fence or a sentence of
/// prose; everything outside the outermost braces is ignored.
pub fn extract_json(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Parses and validates a structured answer. `None` when either step fails.
pub fn parse_structured<T: StructuredOutput>(raw: &str) -> Option<T> {
    let candidate = extract_json(raw)?;
    let parsed: T = match serde_json::from_str(candidate) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(output = T::NAME, "structured output did not parse: {}", e);
            return None;
        }
    };
    if let Err(reason) = parsed.validate() {
        tracing::debug!(output = T::NAME, %reason, "structured output failed validation");
        return None;
    }
    Some(parsed)
}
