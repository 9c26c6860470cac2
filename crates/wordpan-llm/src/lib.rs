//! Chat-completion plumbing for the Wordpan crews and voice agent.
//!
//! The hosted model is treated as an opaque text generator behind the
//! [`ChatModel`] trait. [`OpenAiClient`] speaks the OpenAI-compatible
//! `chat/completions` protocol (structured output via JSON schema, function
//! tools), and [`run_tool_loop`] drives the request/execute/reply cycle when
//! an agent carries [`Tool`]s.

pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod scripted;
pub mod tool;
pub mod tool_loop;

pub use client::{ChatModel, OpenAiClient};
pub use config::{LlmConfig, DEFAULT_MAX_TOOL_ITERATIONS};
pub use error::LlmError;
pub use message::{
    Completion, CompletionRequest, Message, MessageRole, ResponseFormat, ToolCall, Usage,
};
pub use scripted::ScriptedModel;
pub use tool::{Tool, ToolDefinition, ToolError};
pub use tool_loop::{run_tool_loop, ToolOutput, ToolRun};
