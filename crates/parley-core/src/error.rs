//! Error types for the Parley dialog engine core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for conversation memory and lifecycle operations.
///
/// Structural errors (`InvalidState`, `IndexOutOfRange`) are caller errors and
/// are surfaced immediately; nothing in the core retries them.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryError {
    /// The requested history transition is not possible in the current state
    /// (undo without previous steps, redo with an empty redo buffer).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Positional access outside the bounds of a step stack.
    #[error("Index {index} out of range for step stack of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A lifecycle task failed while processing a turn.
    #[error("Task '{task_id}' failed: {message}")]
    Task { task_id: String, message: String },
}

impl MemoryError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidState error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Creates an IndexOutOfRange error
    pub fn index_out_of_range(index: usize, size: usize) -> Self {
        Self::IndexOutOfRange { index, size }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Task error
    pub fn task(task_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Task {
            task_id: task_id.into(),
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an InvalidState error
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }

    /// Check if this is an IndexOutOfRange error
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a task error
    pub fn is_task(&self) -> bool {
        matches!(self, Self::Task { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<serde_json::Error> for MemoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MemoryError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MemoryError>`.
pub type Result<T> = std::result::Result<T, MemoryError>;
