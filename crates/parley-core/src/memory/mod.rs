//! Conversation memory module.
//!
//! This module contains the per-conversation memory model: keyed data items,
//! the steps that hold them, and the history that moves steps between the
//! current slot, the previous steps and the redo cache.
//!
//! # Module Structure
//!
//! - `data`: keyed, timestamped payloads (`Data`)
//! - `step`: one turn's data store and output groups (`ConversationStep`, `ConversationOutput`)
//! - `stack`: read-only cross-step queries (`ConversationStepStack`)
//! - `conversation`: the history with undo/redo (`ConversationMemory`)
//! - `state`: lifecycle tag (`ConversationState`)

mod conversation;
mod data;
mod stack;
mod state;
mod step;

#[cfg(test)]
mod proptests;

pub use conversation::ConversationMemory;
pub use data::{Data, KEY_SEPARATOR, join_key};
pub use stack::ConversationStepStack;
pub use state::ConversationState;
pub use step::{ConversationOutput, ConversationStep};
