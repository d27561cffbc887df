//! Read-only, ordered projection over conversation steps.

use super::data::Data;
use super::step::ConversationStep;
use crate::error::{MemoryError, Result};

/// A point-in-time view over steps, oldest to newest.
///
/// Positional access counts from the newest step: index 0 is the most recent.
#[derive(Debug, Clone, Copy)]
pub struct ConversationStepStack<'a> {
    previous: &'a [ConversationStep],
    current: Option<&'a ConversationStep>,
}

impl<'a> ConversationStepStack<'a> {
    pub(crate) fn new(previous: &'a [ConversationStep], current: Option<&'a ConversationStep>) -> Self {
        Self { previous, current }
    }

    /// Steps oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a ConversationStep> + 'a {
        self.previous.iter().chain(self.current)
    }

    pub fn size(&self) -> usize {
        self.previous.len() + usize::from(self.current.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Closest preceding write wins: scans newest to oldest and returns the
    /// first step's exact-key match.
    pub fn get_latest_data(&self, key: &str) -> Option<&'a Data> {
        self.iter().rev().find_map(|step| step.get_data(key))
    }

    /// One group per step that has at least one match, newest step first.
    /// Steps without a match are omitted.
    pub fn get_all_data(&self, prefix: &str) -> Vec<Vec<&'a Data>> {
        self.iter()
            .rev()
            .map(|step| step.get_all_data(prefix))
            .filter(|group| !group.is_empty())
            .collect()
    }

    /// Each step's own latest match for `prefix`, oldest to newest, with
    /// `None` for steps without a match.
    pub fn get_all_latest_data(&self, prefix: &str) -> Vec<Option<&'a Data>> {
        self.iter().map(|step| step.get_latest_data(prefix)).collect()
    }

    /// The step `index` positions back from the newest one.
    pub fn get(&self, index: usize) -> Result<&'a ConversationStep> {
        let size = self.size();
        if index >= size {
            return Err(MemoryError::index_out_of_range(index, size));
        }
        let position = size - index - 1;
        match self.previous.get(position) {
            Some(step) => Ok(step),
            None => self
                .current
                .ok_or_else(|| MemoryError::index_out_of_range(index, size)),
        }
    }

    /// The newest step; equivalent to `get(0)`.
    pub fn peek(&self) -> Result<&'a ConversationStep> {
        self.get(0)
    }

    /// Step number of the entry `index` positions back from the newest one,
    /// i.e. its position counted from the oldest step.
    pub fn step_number(&self, index: usize) -> Result<usize> {
        let size = self.size();
        if index >= size {
            return Err(MemoryError::index_out_of_range(index, size));
        }
        Ok(size - index - 1)
    }
}
