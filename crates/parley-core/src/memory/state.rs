use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle tag of a conversation, set by the orchestrator and read by tasks.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationState {
    /// Waiting for the next input.
    #[default]
    Ready,
    /// A turn is being processed.
    InProgress,
    /// The conversation is over; no further turns are processed.
    Ended,
    /// Processing was stopped before all tasks ran.
    ExecutionInterrupted,
    /// A task failed while processing a turn.
    Error,
}

impl ConversationState {
    pub fn is_ended(&self) -> bool {
        matches!(self, Self::Ended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_and_parse() {
        assert_eq!(ConversationState::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(
            ConversationState::from_str("EXECUTION_INTERRUPTED").unwrap(),
            ConversationState::ExecutionInterrupted
        );
        assert!(ConversationState::from_str("bogus").is_err());
    }

    #[test]
    fn test_serde_matches_display() {
        let json = serde_json::to_string(&ConversationState::Ended).unwrap();
        assert_eq!(json, "\"ENDED\"");
    }
}
