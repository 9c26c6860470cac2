//! Voice practice for Wordpan.
//!
//! Two halves live here. The HTTP service uses [`VoiceService`] to mint
//! LiveKit join tokens and to dispatch the quiz agent into a learner's room.
//! The agent side is [`QuizAgent`]: a spoken translation game seeded with
//! the public deck, driven by room events (participants joining, completed
//! user transcripts, the `start_game` RPC). Speech recognition and synthesis
//! stay with the media stack; the agent consumes transcripts and hands its
//! replies to a [`SpeechSink`].

pub mod agent;
pub mod config;
pub mod error;
pub mod quiz;
pub mod service;

pub use agent::{
    agent_attributes, run_session, QuizAgent, RoomEvent, SpeechSink, AGENT_IDENTITY,
    START_GAME_RPC,
};
pub use config::{LiveKitConfig, DEFAULT_AGENT_NAME};
pub use error::VoiceError;
pub use quiz::{
    load_public_word_pairs, quiz_instructions, QuizWord, DEFAULT_TARGET_LANGUAGE,
    PUBLIC_DECK_LIMIT,
};
pub use service::VoiceService;
