//! Keyed data items produced by lifecycle tasks.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Separator between a key family and its suffixes (e.g. `output:html`).
pub const KEY_SEPARATOR: &str = ":";

/// A single keyed value written into a conversation step.
///
/// The payload is stored as a JSON value; callers know the expected shape per
/// key family and use [`Data::result_as`] for typed access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Data {
    /// Namespaced key, e.g. `output`, `output:html`, `quickReplies`.
    pub key: String,
    /// The committed result. Tasks may overwrite it in place.
    pub result: Value,
    /// Alternative candidates considered while producing `result`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub possible_results: Vec<Value>,
    /// Creation time of the item.
    pub timestamp: DateTime<Utc>,
    /// Id of the lifecycle task that produced the item, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_task_id: Option<String>,
    /// Whether the item is exposed to clients.
    #[serde(default)]
    pub public: bool,
}

impl Data {
    /// Creates a non-public item.
    pub fn new(key: impl Into<String>, result: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            result: result.into(),
            possible_results: Vec::new(),
            timestamp: Utc::now(),
            origin_task_id: None,
            public: false,
        }
    }

    /// Creates an item exposed to clients.
    pub fn new_public(key: impl Into<String>, result: impl Into<Value>) -> Self {
        Self {
            public: true,
            ..Self::new(key, result)
        }
    }

    /// Serializes `result` into a JSON payload.
    pub fn from_serializable<T: Serialize>(key: impl Into<String>, result: &T) -> Result<Self> {
        Ok(Self::new(key, serde_json::to_value(result)?))
    }

    /// Records the producing task.
    pub fn with_origin(mut self, task_id: impl Into<String>) -> Self {
        self.origin_task_id = Some(task_id.into());
        self
    }

    pub fn with_possible_results(mut self, possible_results: Vec<Value>) -> Self {
        self.possible_results = possible_results;
        self
    }

    /// Converts the payload into a typed value.
    ///
    /// The conversion works on a copy, so mutating the returned value never
    /// alters the stored item.
    pub fn result_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.result.clone())?)
    }

    /// Overwrites the payload in place.
    pub fn set_result(&mut self, result: impl Into<Value>) {
        self.result = result.into();
    }

    /// Returns true if the key equals `prefix` or starts with it.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.key.starts_with(prefix)
    }
}

/// Joins key segments with [`KEY_SEPARATOR`], e.g. `output` + `preTemplated`.
pub fn join_key(base: &str, suffix: &str) -> String {
    format!("{base}{KEY_SEPARATOR}{suffix}")
}
