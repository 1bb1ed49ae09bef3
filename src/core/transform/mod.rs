//! Message transformation
//!
//! Maps each raw message to zero or one [`NormalizedRecord`]. The rules, in
//! order:
//!
//! 1. **Presence**: messages without a body, or with an empty one, are dropped.
//! 2. **Coercion**: lists of strings are joined with single spaces; any other
//!    shape, including a list holding non-strings, becomes an empty name pair
//!    instead of an error.
//! 3. **Split**: the string is cut at its first whitespace run.
//! 4. **Size**: messages whose second part has more than
//!    [`MAX_SECOND_NAME_WORDS`] words are dropped as prose.
//!
//! The transform is pure and keeps input order.

pub mod split;

use crate::domain::{NormalizedRecord, RawMessage};
use split::{positional_split, word_count};

/// Upper bound on words in `second_name` for a message to be kept
pub const MAX_SECOND_NAME_WORDS: usize = 3;

/// Transform a batch of messages, preserving input order
///
/// # Examples
///
/// ```
/// use surname_etl::core::transform::transform;
/// use surname_etl::domain::RawMessage;
///
/// let messages = vec![
///     RawMessage::new(4, "t", "John one two three"),
///     RawMessage::new(3, "t", "John one two three four"),
/// ];
///
/// let records = transform(&messages);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].second_name, "one two three");
/// ```
pub fn transform(messages: &[RawMessage]) -> Vec<NormalizedRecord> {
    let records: Vec<NormalizedRecord> = messages.iter().filter_map(transform_message).collect();

    tracing::info!(
        messages = messages.len(),
        records = records.len(),
        dropped = messages.len() - records.len(),
        "Messages transformed"
    );

    records
}

/// Transform one message, or `None` if it is filtered out
pub fn transform_message(message: &RawMessage) -> Option<NormalizedRecord> {
    if !message.text.is_present() {
        return None;
    }

    let (first_name, second_name) = match message.text.coerce() {
        Some(text) => {
            let (first, second) = positional_split(&text);
            (first.to_string(), second.to_string())
        }
        None => {
            tracing::debug!(id = message.id, "Unsupported text shape, using empty names");
            (String::new(), String::new())
        }
    };

    if word_count(&second_name) > MAX_SECOND_NAME_WORDS {
        tracing::trace!(id = message.id, "Second name too long, message dropped");
        return None;
    }

    Some(NormalizedRecord {
        name_id: message.id,
        create_time: message.date.clone(),
        first_name,
        second_name,
    })
}
