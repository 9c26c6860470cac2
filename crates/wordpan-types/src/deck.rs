use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Upper bound on suggestions returned by the similar-words crew.
pub const MAX_SIMILAR_WORDS: usize = 12;

/// A row of the `word_pairs` table.
///
/// `word1` is the learner's native-language word and `word2` its
/// translation. Rows with no `user_id` form the shared public deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub word1: String,
    #[serde(default)]
    pub word2: String,
}

impl WordPair {
    /// Case-insensitive comparison against a (source, translation) pair.
    pub fn matches(&self, source: &str, translated: &str) -> bool {
        self.word1.to_lowercase() == source.to_lowercase()
            && self.word2.to_lowercase() == translated.to_lowercase()
    }
}

// Row ids are bigint in some deployments and uuid in others.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Phrase generated from a list of practice words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseOutput {
    pub phrase: String,
    pub words: Vec<String>,
}

/// Words related to a word pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarWordsOutput {
    pub similar_words: Vec<String>,
}

impl SimilarWordsOutput {
    /// Checks the 1..=12 bound on suggestions.
    pub fn validate(&self) -> Result<(), String> {
        match self.similar_words.len() {
            0 => Err("similar_words must contain at least one word".to_string()),
            n if n > MAX_SIMILAR_WORDS => Err(format!(
                "similar_words must contain at most {MAX_SIMILAR_WORDS} words, got {n}"
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_pair_matches_ignoring_case() {
        let pair = WordPair {
            id: None,
            user_id: Some("u1".into()),
            word1: "Hello".into(),
            word2: "Hola".into(),
        };
        assert!(pair.matches("hello", "HOLA"));
        assert!(!pair.matches("hola", "hello"));
    }

    #[test]
    fn similar_words_bounds() {
        let empty = SimilarWordsOutput {
            similar_words: vec![],
        };
        assert!(empty.validate().is_err());

        let too_many = SimilarWordsOutput {
            similar_words: (0..13).map(|i| i.to_string()).collect(),
        };
        assert!(too_many.validate().is_err());

        let ok = SimilarWordsOutput {
            similar_words: vec!["casa".into(), "lar".into()],
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn word_pair_row_with_null_user() {
        let pair: WordPair =
            serde_json::from_str(r#"{"id":7,"user_id":null,"word1":"cat","word2":"gato"}"#)
                .unwrap();
        assert_eq!(pair.id.as_deref(), Some("7"));
        assert_eq!(pair.user_id, None);
        assert_eq!(pair.word2, "gato");
    }
}
