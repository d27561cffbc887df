//! Core of the Parley dialog engine.
//!
//! Holds the per-conversation memory (steps, history, cross-step queries),
//! the output and property models, and the contract every lifecycle task
//! implements.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod memory;
pub mod output;
pub mod property;

// Re-export common types
pub use config::{EngineConfig, LoggingConfig, TemplatingConfig};
pub use error::{MemoryError, Result};
pub use lifecycle::{ExtensionDescriptor, LifecycleTask};
pub use memory::{
    ConversationMemory, ConversationOutput, ConversationState, ConversationStep,
    ConversationStepStack, Data,
};
