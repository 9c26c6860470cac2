//! The Wordpan tutor: intent routing and specialist dispatch.
//!
//! A conversation first goes to the router crew, which classifies the
//! learner's latest message. Off-topic requests are refused; everything else
//! is handed to the translation, vocabulary or generic tutor crew. Two
//! guards sit around the model: a confirmation override that sends a bare
//! "yes" after a save offer to an agent that can actually save, and the
//! sanitizers that keep tool replies clean.

pub mod confirmation;
pub mod error;
pub mod router;
pub mod sanitize;

pub use confirmation::{
    detect_save_confirmation, is_save_confirmation, SAVE_CONFIRMATION_INSTRUCTION,
};
pub use error::TutorError;
pub use router::{DeckAccess, TutorRouter, DEFAULT_REFUSAL};
pub use sanitize::{extract_save_tool_message_only, strip_offer_when_already_in_deck};
