//! A single conversation turn and its output groups.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::data::Data;

/// Client-facing output of one step, grouped by key.
///
/// Each group is an insertion-ordered JSON array; groups themselves keep the
/// order in which they were first written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationOutput(Map<String, Value>);

impl ConversationOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `values` to the group under `key`, creating it if needed.
    pub fn add_list(&mut self, key: &str, values: Vec<Value>) {
        match self.0.get_mut(key) {
            Some(Value::Array(existing)) => existing.extend(values),
            _ => {
                self.0.insert(key.to_string(), Value::Array(values));
            }
        }
    }

    /// Removes the group under `key`.
    pub fn reset(&mut self, key: &str) {
        self.0.remove(key);
    }

    /// Returns the values of the group under `key` (empty if absent).
    pub fn get(&self, key: &str) -> &[Value] {
        match self.0.get(key) {
            Some(Value::Array(values)) => values.as_slice(),
            _ => &[],
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Keyed store of [`Data`] items written during one turn.
///
/// Every write is kept in order. Exact-key lookups return the most recent
/// write; prefix lookups return the latest write of each matching key,
/// ordered by the key's first write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationStep {
    writes: Vec<Data>,
    conversation_output: ConversationOutput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    step_number: Option<usize>,
}

impl ConversationStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position among previous steps, assigned when the step is retired.
    pub fn step_number(&self) -> Option<usize> {
        self.step_number
    }

    pub(crate) fn assign_step_number(&mut self, number: usize) {
        self.step_number = Some(number);
    }

    /// Stores `data` under its key; earlier writes to the key stay in the
    /// per-key history.
    pub fn store_data(&mut self, data: Data) {
        self.writes.push(data);
    }

    /// Exact-key lookup, most recent write wins.
    pub fn get_data(&self, key: &str) -> Option<&Data> {
        self.writes.iter().rev().find(|data| data.key == key)
    }

    /// Mutable exact-key lookup of the most recent write.
    pub fn get_data_mut(&mut self, key: &str) -> Option<&mut Data> {
        self.writes.iter_mut().rev().find(|data| data.key == key)
    }

    /// Every write to `key`, oldest first.
    pub fn get_data_history(&self, key: &str) -> Vec<&Data> {
        self.writes.iter().filter(|data| data.key == key).collect()
    }

    /// Latest write of every key starting with `prefix`, ordered by the
    /// key's first write.
    pub fn get_all_data(&self, prefix: &str) -> Vec<&Data> {
        let mut result: Vec<&Data> = Vec::new();
        for data in self.writes.iter().filter(|data| data.matches_prefix(prefix)) {
            match result.iter_mut().find(|existing| existing.key == data.key) {
                Some(slot) => *slot = data,
                None => result.push(data),
            }
        }
        result
    }

    /// The most recent write (across keys) whose key starts with `prefix`.
    pub fn get_latest_data(&self, prefix: &str) -> Option<&Data> {
        self.writes.iter().rev().find(|data| data.matches_prefix(prefix))
    }

    /// Distinct keys in first-write order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for data in &self.writes {
            if !keys.contains(&data.key.as_str()) {
                keys.push(&data.key);
            }
        }
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn conversation_output(&self) -> &ConversationOutput {
        &self.conversation_output
    }

    /// Appends `values` to the output group `key`.
    pub fn add_conversation_output_list(&mut self, key: &str, values: Vec<Value>) {
        self.conversation_output.add_list(key, values);
    }

    /// Appends a single value to the output group `key`.
    pub fn add_conversation_output_value(&mut self, key: &str, value: Value) {
        self.conversation_output.add_list(key, vec![value]);
    }

    /// Clears the output group `key`. Stored data items are untouched.
    pub fn reset_conversation_output(&mut self, key: &str) {
        self.conversation_output.reset(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_data_latest_write_wins() {
        let mut step = ConversationStep::new();
        step.store_data(Data::new("output", "first"));
        step.store_data(Data::new("output", "second"));

        assert_eq!(step.get_data("output").unwrap().result, json!("second"));
        assert_eq!(step.get_data_history("output").len(), 2);
        assert!(step.get_data("missing").is_none());
    }

    #[test]
    fn test_get_all_data_by_prefix() {
        let mut step = ConversationStep::new();
        step.store_data(Data::new("output", "a"));
        step.store_data(Data::new("input", "x"));
        step.store_data(Data::new("output:html", "b"));
        step.store_data(Data::new("output", "c"));

        let all = step.get_all_data("output");
        let keys: Vec<&str> = all.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["output", "output:html"]);
        assert_eq!(all[0].result, json!("c"));
    }

    #[test]
    fn test_get_latest_data_by_prefix() {
        let mut step = ConversationStep::new();
        step.store_data(Data::new("context:user", "ada"));
        step.store_data(Data::new("context:lang", "en"));

        assert_eq!(step.get_latest_data("context").unwrap().key, "context:lang");
        assert!(step.get_latest_data("output").is_none());
    }

    #[test]
    fn test_get_data_mut_overwrites_in_place() {
        let mut step = ConversationStep::new();
        step.store_data(Data::new("output", "before"));
        step.get_data_mut("output").unwrap().set_result("after");
        assert_eq!(step.get_data("output").unwrap().result, json!("after"));
    }

    #[test]
    fn test_keys_in_first_write_order() {
        let mut step = ConversationStep::new();
        step.store_data(Data::new("b", 1));
        step.store_data(Data::new("a", 2));
        step.store_data(Data::new("b", 3));
        assert_eq!(step.keys(), vec!["b", "a"]);
    }

    #[test]
    fn test_conversation_output_groups() {
        let mut step = ConversationStep::new();
        step.add_conversation_output_list("output", vec![json!("one")]);
        step.add_conversation_output_value("output", json!("two"));
        step.add_conversation_output_list("quickReplies", vec![json!(null)]);

        assert_eq!(
            step.conversation_output().get("output"),
            &[json!("one"), json!("two")]
        );
        assert_eq!(
            Value::Object(step.conversation_output().as_map().clone()),
            json!({"output": ["one", "two"], "quickReplies": [null]})
        );

        step.reset_conversation_output("output");
        assert!(step.conversation_output().get("output").is_empty());
        assert!(step.conversation_output().contains_key("quickReplies"));
    }

    #[test]
    fn test_reset_output_keeps_data() {
        let mut step = ConversationStep::new();
        step.store_data(Data::new("output", "kept"));
        step.add_conversation_output_value("output", json!("kept"));
        step.reset_conversation_output("output");
        assert!(step.get_data("output").is_some());
    }
}
