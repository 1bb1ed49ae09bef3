//! Archive extraction
//!
//! Reads the whole export into memory. There are no partial results: either
//! every message is parsed or the stage fails with `SourceUnavailable`.

use crate::domain::{Archive, EtlError, RawMessage, Result};
use std::fs;
use std::path::Path;

/// Read all messages from an exported archive
///
/// # Errors
///
/// Returns [`EtlError::SourceUnavailable`] if the file does not exist, cannot
/// be read, or is not a valid archive document.
///
/// # Examples
///
/// ```no_run
/// use surname_etl::core::extract::extract;
///
/// let messages = extract("data/dmitry_surname/dmitry_surname.json").unwrap();
/// println!("{} messages", messages.len());
/// ```
pub fn extract(path: impl AsRef<Path>) -> Result<Vec<RawMessage>> {
    read_archive(path).map(|archive| archive.messages)
}

/// Read and parse the full archive document
pub fn read_archive(path: impl AsRef<Path>) -> Result<Archive> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(EtlError::SourceUnavailable(format!(
            "Archive not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        EtlError::SourceUnavailable(format!("Failed to read archive {}: {}", path.display(), e))
    })?;

    let archive: Archive = serde_json::from_str(&contents).map_err(|e| {
        EtlError::SourceUnavailable(format!("Failed to parse archive {}: {}", path.display(), e))
    })?;

    tracing::info!(
        path = %path.display(),
        channel = archive.name.as_deref().unwrap_or("unknown"),
        messages = archive.messages.len(),
        "Archive extracted"
    );

    Ok(archive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageText;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_archive(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_extract_preserves_order() {
        let file = write_archive(
            r#"{"messages": [
                {"id": 3, "date": "2024-01-03T00:00:00", "text": "C"},
                {"id": 1, "date": "2024-01-01T00:00:00", "text": "A"},
                {"id": 2, "date": "2024-01-02T00:00:00"}
            ]}"#,
        );

        let messages = extract(file.path()).unwrap();
        let ids: Vec<i64> = messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(messages[2].text, MessageText::Absent);
    }

    #[test]
    fn test_extract_keeps_non_ascii_text() {
        let file = write_archive(
            r#"{"messages": [{"id": 1, "date": "t", "text": "Дмитрий Камелиев"}]}"#,
        );

        let messages = extract(file.path()).unwrap();
        assert_eq!(
            messages[0].text,
            MessageText::Text("Дмитрий Камелиев".to_string())
        );
    }

    #[test]
    fn test_extract_missing_file() {
        let result = extract("/nonexistent/archive.json");
        assert!(matches!(result, Err(EtlError::SourceUnavailable(_))));
    }

    #[test]
    fn test_extract_invalid_json() {
        let file = write_archive("{ not json");
        let result = extract(file.path());
        assert!(matches!(result, Err(EtlError::SourceUnavailable(_))));
    }

    #[test]
    fn test_extract_missing_messages_field() {
        let file = write_archive(r#"{"name": "channel"}"#);
        let result = extract(file.path());
        assert!(matches!(result, Err(EtlError::SourceUnavailable(_))));
    }
}
