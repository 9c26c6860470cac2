//! LLM crews for the Wordpan tutor.
//!
//! A crew is one agent persona working one task, optionally with tools, and
//! producing a typed, structured result. The router crew classifies a
//! conversation; the translation, vocabulary and generic crews answer it;
//! the similar-words and random-phrase crews back the practice endpoints.
//! The deck tools let the translation and vocabulary agents check and save
//! flashcards on the learner's behalf.

pub mod crew;
pub mod crews;
pub mod error;
pub mod output;
pub mod template;
pub mod tools;

pub use crew::{AgentSpec, Crew, CrewOutput, Inputs, TaskSpec};
pub use crews::random_phrase::generate_random_phrase;
pub use crews::similar_words::suggest_similar_words;
pub use error::CrewError;
pub use output::StructuredOutput;
pub use tools::{deck_tools, CheckWordPairInDeckTool, SaveWordPairTool};
