//! Post-processing of specialist replies around the deck tools.

const ALREADY_IN_DECK: &str = "already in your deck";

const SAVE_OFFERS: [&str; 3] = [
    "Would you like me to save this word to your flashcard deck?",
    "Would you like me to add this to your flashcard deck?",
    "Would you like me to add this word to your flashcard deck?",
];

const SAVED_START: &str = "Done! I've added";
const SAVED_END: &str = "You'll see it in your next practice session.";
const DUPLICATE_START: &str = "This word pair";
const DUPLICATE_END: &str = "No duplicate was created.";

/// Removes save offers from a reply that also says the pair is already saved.
pub fn strip_offer_when_already_in_deck(content: &str) -> String {
    if !content.contains(ALREADY_IN_DECK) {
        return content.to_string();
    }

    let mut content = content.to_string();
    for offer in SAVE_OFFERS {
        if !content.contains(offer) {
            continue;
        }
        content = content.replace(offer, "").trim().to_string();
        while content.contains("  ") {
            content = content.replace("  ", " ");
        }
        if let Some(rest) = content.strip_prefix(". ") {
            content = rest.trim().to_string();
        }
    }
    content
}

/// Reduces a reply to the save tool's own message, dropping any
/// explanation the agent wrapped around it.
pub fn extract_save_tool_message_only(content: &str) -> String {
    if content.trim().is_empty() {
        return content.to_string();
    }
    if let Some(slice) = span(content, SAVED_START, SAVED_END) {
        return slice;
    }
    if content.contains(ALREADY_IN_DECK) || content.contains("No duplicate was created") {
        if let Some(slice) = span(content, DUPLICATE_START, DUPLICATE_END) {
            return slice;
        }
    }
    content.to_string()
}

/// Text from `start` through `end` (or to the end of `content`), trimmed.
fn span(content: &str, start: &str, end: &str) -> Option<String> {
    let from = content.find(start)?;
    let tail = &content[from..];
    let slice = match tail.find(end) {
        Some(at) => &tail[..at + end.len()],
        None => tail,
    };
    Some(slice.trim().to_string())
}
