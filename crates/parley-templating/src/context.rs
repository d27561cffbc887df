//! Builds the variable namespace templates see from a conversation's memory.

use parley_core::output::is_template_snapshot_key;
use parley_core::{ConversationMemory, ConversationStep, Result};
use serde_json::{Map, Value, json};

use crate::engine::TemplateContext;

const CONTEXT_PREFIX: &str = "context:";

/// Assembles the template context for a conversation.
pub trait ContextBuilder: Send + Sync {
    fn build(&self, memory: &ConversationMemory) -> Result<TemplateContext>;
}

/// Default [`ContextBuilder`].
///
/// Produces `conversationInfo`, `memory.current`, `memory.last`,
/// `memory.past`, `context` (latest `context:<name>` items across the history)
/// and `properties` (conversation properties).
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryItemConverter;

impl MemoryItemConverter {
    pub fn new() -> Self {
        Self
    }
}

impl ContextBuilder for MemoryItemConverter {
    fn build(&self, memory: &ConversationMemory) -> Result<TemplateContext> {
        let previous = memory.previous_steps();

        let last = previous.peek().map(step_results).unwrap_or_default();
        let past: Vec<Value> = previous
            .iter()
            .map(|step| Value::Object(step_results(step)))
            .collect();

        let mut context = TemplateContext::new();
        context.insert(
            "conversationInfo".to_string(),
            json!({
                "conversationId": memory.id(),
                "botId": memory.bot_id(),
                "botVersion": memory.bot_version(),
                "stepCount": memory.size(),
                "state": memory.conversation_state().to_string(),
            }),
        );
        context.insert(
            "memory".to_string(),
            json!({
                "current": step_results(memory.current_step()),
                "last": last,
                "past": past,
            }),
        );
        context.insert(
            "context".to_string(),
            Value::Object(latest_context_items(memory)),
        );
        context.insert(
            "properties".to_string(),
            Value::Object(memory.conversation_properties().to_value_map()),
        );
        Ok(context)
    }
}

/// Key to latest result of one step, without templating snapshots.
fn step_results(step: &ConversationStep) -> Map<String, Value> {
    step.keys()
        .into_iter()
        .filter(|key| !is_template_snapshot_key(key))
        .filter_map(|key| {
            step.get_data(key)
                .map(|data| (key.to_string(), data.result.clone()))
        })
        .collect()
}

/// `context:<name>` items across all steps; newer steps override older ones.
fn latest_context_items(memory: &ConversationMemory) -> Map<String, Value> {
    let mut items = Map::new();
    for step in memory.all_steps().iter() {
        for data in step.get_all_data(CONTEXT_PREFIX) {
            if let Some(name) = data.key.strip_prefix(CONTEXT_PREFIX) {
                items.insert(name.to_string(), data.result.clone());
            }
        }
    }
    items
}
