//! Output domain models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A selectable reply offered to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickReply {
    /// Text shown to the user.
    pub value: String,
    /// Serialized match expression sent back when the reply is chosen.
    #[serde(default)]
    pub expressions: String,
    /// Whether this reply is preselected.
    #[serde(default)]
    pub is_default: bool,
}

impl QuickReply {
    pub fn new(value: impl Into<String>, expressions: impl Into<String>, is_default: bool) -> Self {
        Self {
            value: value.into(),
            expressions: expressions.into(),
            is_default,
        }
    }
}

/// A single piece of client-facing output, distinguished by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutputItem {
    Text {
        text: String,
        /// Delay in milliseconds before the text is shown.
        #[serde(default)]
        delay: u64,
    },
    Image {
        uri: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    BotFace {
        emotion: String,
    },
    QuickReply(QuickReply),
    /// Any other output shape, kept as free-form fields.
    Other {
        #[serde(flatten)]
        fields: Map<String, Value>,
    },
}

impl OutputItem {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            delay: 0,
        }
    }

    /// The `type` discriminator used on the wire.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::BotFace { .. } => "botFace",
            Self::QuickReply(_) => "quickReply",
            Self::Other { .. } => "other",
        }
    }
}
