use thiserror::Error;
use wordpan_llm::LlmError;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("LiveKit API error: {0}")]
    LiveKit(#[from] livekit_api::access_token::AccessTokenError),

    #[error("Agent dispatch failed: {0}")]
    Dispatch(String),

    #[error("Model error: {0}")]
    Llm(#[from] LlmError),

    #[error("Speech output failed: {0}")]
    Speech(String),

    #[error("Unknown RPC method: {0}")]
    UnknownRpc(String),
}
