//! Properties extracted from matched expressions.
//!
//! The expression-matching engine itself lives outside this crate; this module
//! only defines the boundary ([`PropertySetter`]) and the values it produces.

mod model;

pub use model::{ConversationProperties, Expression, Property, PropertyScope};

/// Extracts properties from the expressions matched for a step.
pub trait PropertySetter: Send + Sync {
    /// Returns the extracted properties in extraction order.
    fn extract_properties(&self, expressions: &[Expression]) -> Vec<Property>;
}
