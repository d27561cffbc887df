use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stack::ConversationStepStack;
use super::state::ConversationState;
use super::step::ConversationStep;
use crate::error::{MemoryError, Result};
use crate::property::ConversationProperties;

/// The memory of one conversation: the step being written plus the retired
/// steps before it and the steps removed by undo.
///
/// Every step lives in exactly one place (current slot, previous steps or
/// redo cache); transitions move steps between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMemory {
    id: String,
    bot_id: String,
    bot_version: u32,
    current_step: ConversationStep,
    previous_steps: Vec<ConversationStep>,
    redo_cache: Vec<ConversationStep>,
    conversation_state: ConversationState,
    #[serde(default)]
    conversation_properties: ConversationProperties,
}

impl ConversationMemory {
    /// Creates a memory with a freshly generated conversation id.
    pub fn new(bot_id: impl Into<String>, bot_version: u32) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), bot_id, bot_version)
    }

    pub fn with_id(id: impl Into<String>, bot_id: impl Into<String>, bot_version: u32) -> Self {
        Self {
            id: id.into(),
            bot_id: bot_id.into(),
            bot_version,
            current_step: ConversationStep::new(),
            previous_steps: Vec::new(),
            redo_cache: Vec::new(),
            conversation_state: ConversationState::default(),
            conversation_properties: ConversationProperties::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn bot_id(&self) -> &str {
        &self.bot_id
    }

    pub fn bot_version(&self) -> u32 {
        self.bot_version
    }

    pub fn current_step(&self) -> &ConversationStep {
        &self.current_step
    }

    /// The only step tasks may write to.
    pub fn current_step_mut(&mut self) -> &mut ConversationStep {
        &mut self.current_step
    }

    /// Retires the current step into the previous steps and installs a fresh
    /// one. Clears the redo cache: after advancing, history is linear again.
    pub fn start_next_step(&mut self) -> &mut ConversationStep {
        let number = self.previous_steps.len();
        let mut retired = std::mem::take(&mut self.current_step);
        retired.assign_step_number(number);
        self.previous_steps.push(retired);

        if !self.redo_cache.is_empty() {
            tracing::debug!(
                target: "parley::memory",
                conversation_id = %self.id,
                discarded = self.redo_cache.len(),
                "Discarding redo cache on new step"
            );
            self.redo_cache.clear();
        }

        &mut self.current_step
    }

    /// Moves the current step to the redo cache and restores the most recent
    /// previous step as current.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::InvalidState`] when there is no previous step.
    pub fn undo_last_step(&mut self) -> Result<()> {
        let restored = self
            .previous_steps
            .pop()
            .ok_or_else(|| MemoryError::invalid_state("undo is not available: no previous step"))?;
        let undone = std::mem::replace(&mut self.current_step, restored);
        self.redo_cache.push(undone);

        tracing::debug!(
            target: "parley::memory",
            conversation_id = %self.id,
            size = self.size(),
            "Undid last step"
        );
        Ok(())
    }

    /// Moves the current step back to the previous steps and restores the
    /// most recently undone step as current.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::InvalidState`] when the redo cache is empty.
    pub fn redo_last_step(&mut self) -> Result<()> {
        let restored = self
            .redo_cache
            .pop()
            .ok_or_else(|| MemoryError::invalid_state("redo is not available: redo cache is empty"))?;
        let current = std::mem::replace(&mut self.current_step, restored);
        self.previous_steps.push(current);

        tracing::debug!(
            target: "parley::memory",
            conversation_id = %self.id,
            size = self.size(),
            "Redid last step"
        );
        Ok(())
    }

    pub fn is_undo_available(&self) -> bool {
        !self.previous_steps.is_empty()
    }

    pub fn is_redo_available(&self) -> bool {
        !self.redo_cache.is_empty()
    }

    pub fn redo_cache_size(&self) -> usize {
        self.redo_cache.len()
    }

    /// View over the retired steps only.
    pub fn previous_steps(&self) -> ConversationStepStack<'_> {
        ConversationStepStack::new(&self.previous_steps, None)
    }

    /// View over the previous steps followed by the current step. The
    /// current step's number in this view is `previous_steps().size()`.
    pub fn all_steps(&self) -> ConversationStepStack<'_> {
        ConversationStepStack::new(&self.previous_steps, Some(&self.current_step))
    }

    /// Number of previous steps plus the current one.
    pub fn size(&self) -> usize {
        self.previous_steps.len() + 1
    }

    pub fn conversation_state(&self) -> ConversationState {
        self.conversation_state
    }

    pub fn set_conversation_state(&mut self, state: ConversationState) {
        self.conversation_state = state;
    }

    pub fn conversation_properties(&self) -> &ConversationProperties {
        &self.conversation_properties
    }

    pub fn conversation_properties_mut(&mut self) -> &mut ConversationProperties {
        &mut self.conversation_properties
    }
}
