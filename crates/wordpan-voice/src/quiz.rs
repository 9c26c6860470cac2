//! The spoken translation game: instructions, intro turns and vocabulary.

use wordpan_store::PublicDeck;

pub const DEFAULT_TARGET_LANGUAGE: &str = "Portuguese";

/// Rows read from the shared deck per session.
pub const PUBLIC_DECK_LIMIT: usize = 100;

/// Pairs listed in the instructions.
const PREVIEW_PAIRS: usize = 20;

const GAME_RULES: &str = "\
You are a friendly language tutor helping the user practice vocabulary using a
spoken translation game.

The game works like this:
- You say an English word and ask: \"How do you say '<english_word>' in the target language?\"
- The user answers in the target language.
- You check their answer against the correct translation.
- If the answer is correct, briefly confirm and repeat the English + target word.
- If the answer is incorrect, gently correct them and say the right translation.
- Then immediately move on to the next word.

After each answer, you MUST:
- Briefly say whether the answer was correct or incorrect.
- Say the correct translation.
- Immediately ask for the NEXT word from your vocabulary list.

Keep each turn short (ideally under 15–20 seconds of speech) and very focused on
a single word.

Important behavior:
- Be encouraging and positive.
- Do not over-explain grammar unless the user explicitly asks.
- The game must CONTINUE WORD BY WORD until the user clearly says they want to stop
  (for example: \"stop\", \"I want to stop\", \"结束了\").
- When the user asks to stop, briefly summarize how they did and end the session.

You have access to a list of (english_word -> target_translation) pairs for this
session. Use ONLY those words for the quiz, one at a time, and cycle through them
in order (or randomly) until the user asks you to stop.
";

const INTRO_WITH_LIST: &str = "Let's start our vocabulary game! I have a list of English words \
and their translations in your target language. \
I will say an English word and you answer with the translation. \
I'll tell you if it's correct and then move on to the next word.";

const INTRO_WITHOUT_LIST: &str = "Let's start our vocabulary game! I will pick simple English words \
and you answer with the translation in your target language. \
I'll tell you if it's correct and then move on to the next word.";

/// One quiz question: the English prompt and the expected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizWord {
    pub english: String,
    pub target: String,
}

impl QuizWord {
    pub fn new(english: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            target: target.into(),
        }
    }
}

/// System instructions for a session over `words`.
pub fn quiz_instructions(words: &[QuizWord], target_language: &str) -> String {
    let hint = if words.is_empty() {
        format!(
            "\nNo external vocabulary list is available. Instead, you should pick\n\
             simple and useful English words and translate them into {target_language}\n\
             yourself, still following the same quiz pattern.\n"
        )
    } else {
        let preview = words
            .iter()
            .take(PREVIEW_PAIRS)
            .map(|w| format!("{} → {}", w.english, w.target))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "\nVocabulary for this session (english → {target_language}):\n\
             {preview}\n\n\
             Use only these pairs during the game. When you finish the list,\n\
             you may loop back to the beginning.\n"
        )
    };
    format!("{GAME_RULES}{hint}")
}

/// The turn that opens the game.
pub fn intro(has_words: bool) -> &'static str {
    if has_words {
        INTRO_WITH_LIST
    } else {
        INTRO_WITHOUT_LIST
    }
}

/// The shared deck as quiz words. Blank rows are skipped; a failing store
/// yields an empty list.
pub async fn load_public_word_pairs(deck: &dyn PublicDeck, limit: usize) -> Vec<QuizWord> {
    let rows = match deck.public_word_pairs(limit).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("failed to load public word pairs: {}", e);
            return Vec::new();
        }
    };

    rows.into_iter()
        .filter_map(|row| {
            let english = row.word1.trim();
            let target = row.word2.trim();
            (!english.is_empty() && !target.is_empty()).then(|| QuizWord::new(english, target))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordpan_store::MemoryStore;

    #[test]
    fn instructions_list_first_twenty_pairs() {
        let words: Vec<QuizWord> = (0..25)
            .map(|i| QuizWord::new(format!("en{i}"), format!("pt{i}")))
            .collect();

        let text = quiz_instructions(&words, DEFAULT_TARGET_LANGUAGE);
        assert!(text.starts_with("You are a friendly language tutor"));
        assert!(text.contains("Vocabulary for this session (english → Portuguese):\nen0 → pt0, en1 → pt1"));
        assert!(text.contains("en19 → pt19\n"));
        assert!(!text.contains("en20"));
    }

    #[test]
    fn instructions_without_words_fall_back() {
        let text = quiz_instructions(&[], "Spanish");
        assert!(text.contains("No external vocabulary list is available"));
        assert!(text.contains("translate them into Spanish"));
        assert!(!text.contains("Vocabulary for this session"));
    }

    #[test]
    fn intro_depends_on_list() {
        assert!(intro(true).contains("I have a list of English words"));
        assert!(intro(false).contains("I will pick simple English words"));
    }

    #[tokio::test]
    async fn loads_only_public_complete_rows() {
        let store = MemoryStore::new();
        store.add_word_pair(None, " cat ", "gato");
        store.add_word_pair(None, "dog", "  ");
        store.add_word_pair(Some("user-1"), "private", "privado");

        let words = load_public_word_pairs(&store, PUBLIC_DECK_LIMIT).await;
        assert_eq!(words, [QuizWord::new("cat", "gato")]);

        store.set_failing(true);
        assert!(load_public_word_pairs(&store, PUBLIC_DECK_LIMIT).await.is_empty());
    }
}
