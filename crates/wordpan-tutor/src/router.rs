use crate::confirmation::{
    detect_save_confirmation, is_save_confirmation, SAVE_CONFIRMATION_INSTRUCTION,
};
use crate::error::TutorError;
use crate::sanitize::{extract_save_tool_message_only, strip_offer_when_already_in_deck};
use serde_json::Value;
use std::sync::Arc;
use wordpan_crews::crews::{
    conversation_inputs, generic::generic_crew, router::router_crew,
    translation::translation_crew, vocabulary::vocabulary_crew,
};
use wordpan_crews::{deck_tools, Inputs};
use wordpan_llm::{ChatModel, Tool};
use wordpan_store::DeckStore;
use wordpan_types::{ChatMessage, Intent, RouterDecision, Specialist, TutorMessage};

pub const DEFAULT_REFUSAL: &str = "I'm your language tutor and can only help with \
language-related questions. Try asking about translations, vocabulary, grammar, or cultural context!";

/// A learner's deck, reachable under their own credentials.
#[derive(Clone)]
pub struct DeckAccess {
    pub user_id: String,
    pub deck: Arc<dyn DeckStore>,
}

/// Routes a conversation to the right specialist and shapes its reply.
#[derive(Clone)]
pub struct TutorRouter {
    model: Arc<dyn ChatModel>,
}

impl TutorRouter {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Answers the latest turn of `messages`.
    ///
    /// Deck tools are offered to the translation and vocabulary agents only
    /// when `deck` is given.
    #[tracing::instrument(skip_all, fields(turns = messages.len()))]
    pub async fn run(
        &self,
        messages: &[ChatMessage],
        user_context: Option<&str>,
        deck: Option<DeckAccess>,
    ) -> Result<TutorMessage, TutorError> {
        let inputs = conversation_inputs(messages, user_context.unwrap_or_default());
        let tools: Vec<Arc<dyn Tool>> = match &deck {
            Some(access) => deck_tools(&access.user_id, access.deck.clone()),
            None => Vec::new(),
        };

        let routed = router_crew(self.model.clone()).kickoff(&inputs).await?;
        let Some(mut decision) = routed.structured else {
            tracing::warn!("router returned no decision; replying with its raw output");
            return Ok(TutorMessage::assistant(routed.raw, Intent::OffTopic));
        };

        if let Some(intent) = detect_save_confirmation(messages) {
            if decision.allowed_domain && !decision.intent.is_tool_bearing() {
                tracing::info!(
                    from = %decision.intent,
                    to = %intent,
                    "save confirmation overrides routing"
                );
                decision.intent = intent;
                decision.specialist_instruction = SAVE_CONFIRMATION_INSTRUCTION.to_string();
            }
        }

        tracing::info!(
            intent = %decision.intent,
            allowed_domain = decision.allowed_domain,
            "routing decision"
        );

        if !decision.allowed_domain {
            let refusal = decision
                .refusal_message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_REFUSAL.to_string());
            return Ok(TutorMessage::assistant(refusal, Intent::OffTopic));
        }

        self.delegate(inputs, decision, tools).await
    }

    async fn delegate(
        &self,
        mut inputs: Inputs,
        decision: RouterDecision,
        tools: Vec<Arc<dyn Tool>>,
    ) -> Result<TutorMessage, TutorError> {
        let saving = is_save_confirmation(&decision.specialist_instruction);
        let specialist = Specialist::for_intent(decision.intent);
        inputs.insert(
            "specialist_instruction".into(),
            Value::String(decision.specialist_instruction),
        );

        match decision.intent {
            Intent::Translation => {
                let output = translation_crew(self.model.clone(), tools)
                    .kickoff(&inputs)
                    .await?;
                let content = output.structured.map(|t| t.content).unwrap_or(output.raw);
                let content = if saving && !content.is_empty() {
                    extract_save_tool_message_only(&content)
                } else {
                    strip_offer_when_already_in_deck(&content)
                };
                Ok(TutorMessage::assistant(content, Intent::Translation)
                    .delegated_to(specialist))
            }
            Intent::NewVocabulary => {
                let output = vocabulary_crew(self.model.clone(), tools)
                    .kickoff(&inputs)
                    .await?;
                match output.structured {
                    Some(message) => {
                        let mut message = message.delegated_to(specialist);
                        if saving {
                            if !message.content.is_empty() {
                                message.content = extract_save_tool_message_only(&message.content);
                            }
                            message.word_card = None;
                        } else if !message.content.is_empty() {
                            message.content = strip_offer_when_already_in_deck(&message.content);
                        }
                        Ok(message)
                    }
                    None => {
                        let content = if saving {
                            extract_save_tool_message_only(&output.raw)
                        } else {
                            output.raw
                        };
                        Ok(TutorMessage::assistant(content, Intent::NewVocabulary)
                            .delegated_to(specialist))
                    }
                }
            }
            intent => {
                let output = generic_crew(self.model.clone()).kickoff(&inputs).await?;
                let message = output
                    .structured
                    .unwrap_or_else(|| TutorMessage::assistant(output.raw, intent));
                Ok(message.delegated_to(specialist))
            }
        }
    }
}
