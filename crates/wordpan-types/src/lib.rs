//! Shared types for the Wordpan language-learning backend.
//!
//! This crate holds the wire-level shapes exchanged between the HTTP
//! service, the LLM crews and the voice agent: chat roles and messages,
//! tutor intents, routing decisions, the structured tutor reply, and the
//! flashcard deck rows.
//!
//! It has no workspace dependencies of its own.

use serde::{Deserialize, Serialize};

mod deck;
mod tutor;

pub use deck::{PhraseOutput, SimilarWordsOutput, WordPair, MAX_SIMILAR_WORDS};
pub use tutor::{RouterDecision, Specialist, TranslationOutput, TutorAction, TutorMessage, WordCard};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The learner.
    User,
    /// The tutor.
    Assistant,
    /// Out-of-band instructions.
    System,
}

impl Role {
    /// Returns the wire label for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }

    /// Parses a wire label. Returns `None` for anything but the three known roles.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

/// One turn of a tutor conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Detected intent of a learner's request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Translation,
    NewVocabulary,
    GrammarExplanation,
    WritingCorrection,
    CulturalContext,
    SmallTalkLanguageRelated,
    OffTopic,
}

impl Intent {
    /// Every intent, in the order the router prompt lists them.
    pub const ALL: [Intent; 7] = [
        Self::Translation,
        Self::NewVocabulary,
        Self::GrammarExplanation,
        Self::WritingCorrection,
        Self::CulturalContext,
        Self::SmallTalkLanguageRelated,
        Self::OffTopic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Translation => "translation",
            Self::NewVocabulary => "new_vocabulary",
            Self::GrammarExplanation => "grammar_explanation",
            Self::WritingCorrection => "writing_correction",
            Self::CulturalContext => "cultural_context",
            Self::SmallTalkLanguageRelated => "small_talk_language_related",
            Self::OffTopic => "off_topic",
        }
    }

    /// Whether this intent is handled by a specialist that carries the deck tools.
    pub fn is_tool_bearing(self) -> bool {
        matches!(self, Self::Translation | Self::NewVocabulary)
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
