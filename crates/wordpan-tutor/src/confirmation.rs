//! Recognises "yes, save it" replies to a flashcard offer.
//!
//! The router tends to classify a bare confirmation as small talk, which
//! would send it to the one agent without deck tools.

use wordpan_types::{ChatMessage, Intent, Role};

/// Instruction given to the specialist when the learner confirmed a save.
pub const SAVE_CONFIRMATION_INSTRUCTION: &str = "The user confirmed they want to save the word. \
You MUST call the save_word_pair tool with the source word and translation from the conversation \
(e.g. hello and hola). Your response must be EXACTLY the tool's return message and nothing else: \
if the tool says 'Done! I've added...' then output only that; \
if the tool says 'This word pair ... is already in your deck' then output only that. \
Do NOT repeat the translation, pronunciation, or any other explanation.";

const SAVE_CONFIRMATION_MARKER: &str = "MUST call the save_word_pair";

const CONFIRMATION_PHRASES: &[&str] = &[
    "yes",
    "yeah",
    "yep",
    "sure",
    "ok",
    "okay",
    "please",
    "please do",
    "save it",
    "yes, save it",
    "yes save it",
    "add it",
    "add it please",
    "go ahead",
    "do it",
    "yes please",
    "sure thing",
];

const CONFIRMATION_WORDS: &[&str] = &["yes", "save", "add", "sure", "please"];

const MAX_CONFIRMATION_CHARS: usize = 60;
const MAX_LOOSE_CONFIRMATION_CHARS: usize = 25;

/// Whether a specialist instruction asks for a save.
pub fn is_save_confirmation(instruction: &str) -> bool {
    instruction.contains(SAVE_CONFIRMATION_MARKER)
}

/// The intent to force when the last user turn confirms the assistant's
/// offer to save a flashcard; `None` otherwise.
pub fn detect_save_confirmation(messages: &[ChatMessage]) -> Option<Intent> {
    if messages.len() < 2 {
        return None;
    }
    let last = messages.last()?;
    if last.role != Role::User {
        return None;
    }

    let reply = last.content.trim().to_lowercase();
    let reply = reply.trim_end_matches(['.', ',', '!', '?']);
    let length = reply.chars().count();
    if reply.is_empty() || length > MAX_CONFIRMATION_CHARS {
        return None;
    }

    let exact = CONFIRMATION_PHRASES.contains(&reply);
    let loose = length <= MAX_LOOSE_CONFIRMATION_CHARS
        && CONFIRMATION_WORDS.iter().any(|word| reply.contains(word));
    if !exact && !loose {
        return None;
    }

    let offer = messages
        .iter()
        .rev()
        .find(|m| m.role == Role::Assistant)?
        .content
        .trim()
        .to_lowercase();
    if offer.is_empty() || !offer.contains("flashcard") {
        return None;
    }
    if !offer.contains("save") && !offer.contains("add") {
        return None;
    }

    if offer.contains("new word") || offer.contains("vocabulary") {
        Some(Intent::NewVocabulary)
    } else {
        Some(Intent::Translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFER: &str = "Hello is 'olá'. Would you like me to save this word to your flashcard deck?";

    fn convo(assistant: &str, user: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::user("How do I say hello?"),
            ChatMessage::assistant(assistant),
            ChatMessage::user(user),
        ]
    }

    #[test]
    fn exact_phrases_confirm() {
        for reply in ["yes", "Yes!", "  OK. ", "go ahead", "Sure thing!!", "do it?"] {
            assert_eq!(
                detect_save_confirmation(&convo(OFFER, reply)),
                Some(Intent::Translation),
                "{reply}"
            );
        }
    }

    #[test]
    fn short_replies_with_keywords_confirm() {
        assert_eq!(
            detect_save_confirmation(&convo(OFFER, "yes, add that one")),
            Some(Intent::Translation)
        );
    }

    #[test]
    fn long_or_unrelated_replies_do_not_confirm() {
        assert_eq!(
            detect_save_confirmation(&convo(OFFER, "yes but first tell me about verbs")),
            None
        );
        assert_eq!(detect_save_confirmation(&convo(OFFER, "no thanks")), None);
        assert_eq!(detect_save_confirmation(&convo(OFFER, "?!")), None);
        let long = "a".repeat(61);
        assert_eq!(detect_save_confirmation(&convo(OFFER, &long)), None);
    }

    #[test]
    fn needs_a_flashcard_offer() {
        assert_eq!(
            detect_save_confirmation(&convo("Hello is 'olá'.", "yes")),
            None
        );
        assert_eq!(
            detect_save_confirmation(&convo("Want more flashcard tips?", "yes")),
            None
        );
        assert_eq!(
            detect_save_confirmation(&[ChatMessage::assistant(OFFER), ChatMessage::user("yes")]),
            Some(Intent::Translation)
        );
    }

    #[test]
    fn vocabulary_offers_keep_vocabulary() {
        let offer = "A useful new word: 'saudade'. Would you like me to add this word to your flashcard deck?";
        assert_eq!(
            detect_save_confirmation(&convo(offer, "yes please")),
            Some(Intent::NewVocabulary)
        );
    }

    #[test]
    fn last_turn_must_be_from_user() {
        let mut messages = convo(OFFER, "yes");
        messages.push(ChatMessage::assistant("Saved."));
        assert_eq!(detect_save_confirmation(&messages), None);
        assert_eq!(detect_save_confirmation(&[ChatMessage::user("yes")]), None);
    }

    #[test]
    fn instruction_marks_save_confirmation() {
        assert!(is_save_confirmation(SAVE_CONFIRMATION_INSTRUCTION));
        assert!(!is_save_confirmation("Translate hello into Portuguese"));
    }
}
