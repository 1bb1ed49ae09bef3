//! Normalized name record produced by the transformer

use serde::{Deserialize, Serialize};

/// A message reduced to its two name-like fields
///
/// Field names match the staging file and the table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Source message id; primary key in the store
    pub name_id: i64,

    /// Source message date, passed through untouched
    pub create_time: String,

    /// Text before the first whitespace run
    pub first_name: String,

    /// Text after the first whitespace run
    pub second_name: String,
}

impl NormalizedRecord {
    /// Create a new record
    pub fn new(
        name_id: i64,
        create_time: impl Into<String>,
        first_name: impl Into<String>,
        second_name: impl Into<String>,
    ) -> Self {
        Self {
            name_id,
            create_time: create_time.into(),
            first_name: first_name.into(),
            second_name: second_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let record = NormalizedRecord::new(2, "2024-01-01T10:00:00", "Anna", "Ivanova");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["name_id"], 2);
        assert_eq!(value["create_time"], "2024-01-01T10:00:00");
        assert_eq!(value["first_name"], "Anna");
        assert_eq!(value["second_name"], "Ivanova");
    }
}
