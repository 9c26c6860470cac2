use crate::error::VoiceError;
use crate::quiz::{intro, quiz_instructions, QuizWord};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;
use wordpan_llm::{ChatModel, CompletionRequest, Message, Usage};

/// Participant identity the worker joins rooms with.
pub const AGENT_IDENTITY: &str = "wordpan-vocab-agent";

/// RPC the frontend calls to (re)start the game.
pub const START_GAME_RPC: &str = "start_game";

/// Participant attributes set when the worker accepts a job.
pub fn agent_attributes() -> [(&'static str, &'static str); 1] {
    [("push-to-talk", "1")]
}

/// Where the agent's replies go to be spoken.
#[async_trait]
pub trait SpeechSink: Send + Sync {
    async fn say(&self, text: &str) -> Result<(), VoiceError>;
}

/// Something that happened in the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    ParticipantConnected { identity: String },
    /// A finished user turn from speech recognition.
    Transcript { participant: String, text: String },
    Rpc { method: String, payload: String },
}

/// The quiz tutor for one room.
pub struct QuizAgent {
    model: Arc<dyn ChatModel>,
    speech: Arc<dyn SpeechSink>,
    context: Vec<Message>,
    has_words: bool,
    primary: Option<String>,
    usage: Usage,
}

impl QuizAgent {
    pub fn new(
        model: Arc<dyn ChatModel>,
        speech: Arc<dyn SpeechSink>,
        words: &[QuizWord],
        target_language: &str,
    ) -> Self {
        Self {
            model,
            speech,
            context: vec![Message::system(quiz_instructions(words, target_language))],
            has_words: !words.is_empty(),
            primary: None,
            usage: Usage::default(),
        }
    }

    pub fn instructions(&self) -> &str {
        self.context[0].content.as_deref().unwrap_or_default()
    }

    /// The conversation so far, instructions first.
    pub fn context(&self) -> &[Message] {
        &self.context
    }

    /// The participant whose speech the agent listens to.
    pub fn primary_participant(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    pub fn usage(&self) -> &Usage {
        &self.usage
    }

    /// Listens to the first of the participants already in the room.
    pub fn set_initial_participants(&mut self, identities: &[String]) {
        if let Some(first) = identities.first() {
            info!(participant = %first, "listening to participant");
            self.primary = Some(first.clone());
        }
    }

    /// A newly connected participant becomes the one the agent listens to.
    pub fn on_participant_connected(&mut self, identity: &str) {
        info!(participant = %identity, "participant connected, now listening");
        self.primary = Some(identity.to_string());
    }

    /// Answers a finished user turn. Turns from other participants and empty
    /// turns get no reply.
    pub async fn on_user_turn(
        &mut self,
        participant: &str,
        text: &str,
    ) -> Result<Option<String>, VoiceError> {
        if self.primary.as_deref() != Some(participant) {
            tracing::debug!(participant, "ignoring turn from non-primary participant");
            return Ok(None);
        }
        let text = text.trim();
        if text.is_empty() {
            info!("ignore empty user turn");
            return Ok(None);
        }
        self.generate_reply(text).await.map(Some)
    }

    /// Opens the game with the intro turn.
    pub async fn start_game(&mut self) -> Result<String, VoiceError> {
        info!("starting quiz intro turn");
        self.generate_reply(intro(self.has_words)).await
    }

    pub async fn handle_rpc(&mut self, method: &str, payload: &str) -> Result<String, VoiceError> {
        match method {
            START_GAME_RPC => {
                info!(payload_len = payload.len(), "start_game RPC called");
                self.start_game().await
            }
            other => Err(VoiceError::UnknownRpc(other.to_string())),
        }
    }

    pub async fn handle_event(&mut self, event: RoomEvent) -> Result<Option<String>, VoiceError> {
        match event {
            RoomEvent::ParticipantConnected { identity } => {
                self.on_participant_connected(&identity);
                Ok(None)
            }
            RoomEvent::Transcript { participant, text } => {
                self.on_user_turn(&participant, &text).await
            }
            RoomEvent::Rpc { method, payload } => self.handle_rpc(&method, &payload).await.map(Some),
        }
    }

    async fn generate_reply(&mut self, user_input: &str) -> Result<String, VoiceError> {
        let mut messages = self.context.clone();
        messages.push(Message::user(user_input));
        let completion = self
            .model
            .complete(&CompletionRequest::new(messages))
            .await?;
        if let Some(usage) = &completion.usage {
            self.usage.add(usage);
        }

        // The turn joins the context only once the model has answered it.
        let reply = completion.content;
        self.context.push(Message::user(user_input));
        self.context.push(Message::assistant(reply.clone()));
        self.speech.say(&reply).await?;
        Ok(reply)
    }

    pub fn log_usage(&self) {
        info!(
            prompt_tokens = self.usage.prompt_tokens,
            completion_tokens = self.usage.completion_tokens,
            total_tokens = self.usage.total_tokens,
            turns = self.context.len() - 1,
            "session usage"
        );
    }
}

/// Drives one room session until the event stream closes.
///
/// The game starts as soon as the agent is in the room, whether or not the
/// frontend calls `start_game`. Failures on individual events are logged and
/// the session carries on.
pub async fn run_session(
    agent: &mut QuizAgent,
    participants: &[String],
    mut events: mpsc::Receiver<RoomEvent>,
) -> Result<(), VoiceError> {
    agent.set_initial_participants(participants);
    agent.start_game().await?;

    while let Some(event) = events.recv().await {
        if let Err(e) = agent.handle_event(event).await {
            tracing::warn!("room event failed: {}", e);
        }
    }

    agent.log_usage();
    Ok(())
}
