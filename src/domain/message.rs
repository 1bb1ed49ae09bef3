//! Raw message model for exported channel archives
//!
//! Messages are deserialized straight from the export. The `text` field is
//! loosely typed in the export (a string, a list of fragments, or missing),
//! so it is modelled as [`MessageText`] and never fails to deserialize.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::borrow::Cow;

/// The top-level export document
#[derive(Debug, Clone, Deserialize)]
pub struct Archive {
    /// Channel or chat name, when the export carries one
    #[serde(default)]
    pub name: Option<String>,

    /// Messages in export order
    pub messages: Vec<RawMessage>,
}

/// A single exported message
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawMessage {
    /// Message identifier, unique within the archive
    pub id: i64,

    /// Timestamp string in the export's own format
    pub date: String,

    /// Message body
    #[serde(default)]
    pub text: MessageText,
}

impl RawMessage {
    /// Create a message with a plain string body
    pub fn new(id: i64, date: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            date: date.into(),
            text: MessageText::Text(text.into()),
        }
    }
}

/// Message body as found in the export
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MessageText {
    /// Field missing or null
    #[default]
    Absent,

    /// A single string
    Text(String),

    /// Multi-part text exported as an ordered list of strings
    Fragments(Vec<String>),

    /// Any other JSON shape, including lists with non-string elements
    Unsupported(Value),
}

impl MessageText {
    /// Whether the body counts as present for filtering purposes
    ///
    /// Empty strings, empty fragment lists and falsy scalars count as absent.
    pub fn is_present(&self) -> bool {
        match self {
            MessageText::Absent => false,
            MessageText::Text(text) => !text.is_empty(),
            MessageText::Fragments(fragments) => !fragments.is_empty(),
            MessageText::Unsupported(value) => match value {
                Value::Null => false,
                Value::Bool(flag) => *flag,
                Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
                Value::String(text) => !text.is_empty(),
                Value::Array(items) => !items.is_empty(),
                Value::Object(map) => !map.is_empty(),
            },
        }
    }

    /// Coerce the body into one string
    ///
    /// Fragments are joined with single spaces. Returns `None` for shapes
    /// that have no string reading.
    pub fn coerce(&self) -> Option<Cow<'_, str>> {
        match self {
            MessageText::Text(text) => Some(Cow::Borrowed(text.as_str())),
            MessageText::Fragments(fragments) => Some(Cow::Owned(fragments.join(" "))),
            MessageText::Absent | MessageText::Unsupported(_) => None,
        }
    }
}

impl From<Value> for MessageText {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => MessageText::Absent,
            Value::String(text) => MessageText::Text(text),
            Value::Array(items) if items.iter().all(Value::is_string) => MessageText::Fragments(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(text) => Some(text),
                        _ => None,
                    })
                    .collect(),
            ),
            other => MessageText::Unsupported(other),
        }
    }
}

impl<'de> Deserialize<'de> for MessageText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(MessageText::from)
    }
}
