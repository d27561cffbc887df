//! Property domain models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How long an extracted property is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyScope {
    /// Visible for the current step only.
    Step,
    /// Kept for the lifetime of the conversation.
    #[default]
    Conversation,
    /// Kept across conversations with the same user.
    LongTerm,
}

/// A named value extracted from matched expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    pub value: Value,
    #[serde(default)]
    pub scope: PropertyScope,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<Value>, scope: PropertyScope) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            scope,
        }
    }
}

/// A matched expression such as `property(name(ada))`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expression {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_expressions: Vec<Expression>,
}

impl Expression {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sub_expressions: Vec::new(),
        }
    }

    pub fn with_sub_expressions(name: impl Into<String>, sub_expressions: Vec<Expression>) -> Self {
        Self {
            name: name.into(),
            sub_expressions,
        }
    }
}

/// Conversation-scoped properties, keyed by name.
///
/// Setting a property with an existing name replaces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationProperties(Vec<Property>);

impl ConversationProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: Property) {
        match self.0.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => *existing = property,
            None => self.0.push(property),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.0.iter().find(|p| p.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Property> {
        let index = self.0.iter().position(|p| p.name == name)?;
        Some(self.0.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Name to value map, in insertion order.
    pub fn to_value_map(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|p| (p.name.clone(), p.value.clone()))
            .collect()
    }
}
