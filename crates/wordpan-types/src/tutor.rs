use crate::{Intent, Role};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Routing decision produced by the router crew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterDecision {
    pub intent: Intent,
    /// Whether the request is within the language-learning domain.
    pub allowed_domain: bool,
    /// Short instruction for the specialist on how to handle the request.
    pub specialist_instruction: String,
    /// Polite refusal, used when `allowed_domain` is false.
    #[serde(default)]
    pub refusal_message: Option<String>,
}

/// Vocabulary card rendered specially by the chat UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCard {
    pub word: String,
    pub translation: String,
    pub example_sentence: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub part_of_speech: Option<String>,
}

/// Action the client may execute, e.g. `add_to_flashcards`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Map<String, Value>,
}

/// Output of the translation specialist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationOutput {
    pub content: String,
}

/// Final reply returned by the tutor endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorMessage {
    #[serde(default = "assistant_role")]
    pub role: Role,
    pub content: String,
    pub intent: Intent,
    #[serde(default)]
    pub word_card: Option<WordCard>,
    #[serde(default)]
    pub actions: Vec<TutorAction>,
    #[serde(default)]
    pub delegated_agent: Option<String>,
}

fn assistant_role() -> Role {
    Role::Assistant
}

impl TutorMessage {
    /// Plain assistant reply with no card, no actions and no delegated agent.
    pub fn assistant(content: impl Into<String>, intent: Intent) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            intent,
            word_card: None,
            actions: Vec::new(),
            delegated_agent: None,
        }
    }

    pub fn delegated_to(mut self, specialist: Specialist) -> Self {
        self.delegated_agent = Some(specialist.display_name().to_string());
        self
    }
}

/// Specialist agents a routed request can be delegated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specialist {
    Translation,
    Vocabulary,
    LanguageTutor,
}

impl Specialist {
    /// Name shown in the chat UI next to the reply.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Translation => "Translation Agent",
            Self::Vocabulary => "Vocabulary Agent",
            Self::LanguageTutor => "Language Tutor",
        }
    }

    /// Specialist responsible for an intent.
    pub fn for_intent(intent: Intent) -> Self {
        match intent {
            Intent::Translation => Self::Translation,
            Intent::NewVocabulary => Self::Vocabulary,
            _ => Self::LanguageTutor,
        }
    }
}
