//! Staging sink
//!
//! Writes the transformed batch to a timestamped JSON file so every run
//! leaves an auditable snapshot that can later be replayed into the store.

use crate::domain::{EtlError, NormalizedRecord, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// Prefix of every staging file name
pub const STAGING_FILE_PREFIX: &str = "transformed_data_";

/// Timestamp layout embedded in staging file names (second granularity)
pub const STAGING_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// Tries before a taken name is reported as unwritable.
const MAX_NAME_ATTEMPTS: u32 = 3;

/// Write the batch to a new staging file stamped with the current local time
///
/// When a file for the current second already exists, waits for the next
/// second and stamps the batch with that fresh time instead.
///
/// # Errors
///
/// Returns [`EtlError::DestinationUnwritable`] if the directory cannot be
/// created or the file cannot be written.
pub fn stage(records: &[NormalizedRecord], dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    create_staging_dir(dir)?;

    let mut attempt = 1;
    loop {
        let captured_at = Local::now();
        let path = dir.join(staging_file_name(captured_at));

        match create_exclusive(&path) {
            Ok(file) => return write_staging_file(file, path, records),
            Err(e) if e.kind() == ErrorKind::AlreadyExists && attempt < MAX_NAME_ATTEMPTS => {
                tracing::debug!(path = %path.display(), "Staging file name taken, waiting");
                thread::sleep(until_next_second(captured_at));
                attempt += 1;
            }
            Err(e) => return Err(create_error(&path, e)),
        }
    }
}

/// Write the batch to a staging file stamped with `captured_at`
///
/// The file is created exclusively. If a file with the same name already
/// exists the write fails rather than overwriting it.
pub fn stage_at(
    records: &[NormalizedRecord],
    dir: impl AsRef<Path>,
    captured_at: DateTime<Local>,
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    create_staging_dir(dir)?;

    let path = dir.join(staging_file_name(captured_at));
    let file = create_exclusive(&path).map_err(|e| create_error(&path, e))?;
    write_staging_file(file, path, records)
}

fn create_staging_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| {
        EtlError::DestinationUnwritable(format!(
            "Failed to create staging directory {}: {}",
            dir.display(),
            e
        ))
    })
}

fn create_exclusive(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

fn create_error(path: &Path, e: io::Error) -> EtlError {
    EtlError::DestinationUnwritable(format!(
        "Failed to create staging file {}: {}",
        path.display(),
        e
    ))
}

fn until_next_second(captured_at: DateTime<Local>) -> Duration {
    let elapsed = Duration::from_nanos(u64::from(captured_at.timestamp_subsec_nanos()));
    Duration::from_secs(1)
        .saturating_sub(elapsed)
        .max(Duration::from_millis(1))
}

fn write_staging_file(file: File, path: PathBuf, records: &[NormalizedRecord]) -> Result<PathBuf> {
    let mut writer = BufWriter::new(file);
    write_records(&mut writer, records)
        .and_then(|_| writer.flush().map_err(EtlError::from))
        .map_err(|e| {
            EtlError::DestinationUnwritable(format!(
                "Failed to write staging file {}: {}",
                path.display(),
                e
            ))
        })?;

    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "Transformed batch staged"
    );

    Ok(path)
}

/// Read a staging file back into records
///
/// # Errors
///
/// Returns [`EtlError::SourceUnavailable`] if the file is missing or malformed.
pub fn read_staged(path: impl AsRef<Path>) -> Result<Vec<NormalizedRecord>> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|e| {
        EtlError::SourceUnavailable(format!(
            "Failed to read staging file {}: {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        EtlError::SourceUnavailable(format!(
            "Failed to parse staging file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Most recent staging file in `dir`, if any
///
/// Staging names embed a sortable timestamp, so the greatest name is the
/// latest snapshot. A missing directory yields `None`.
pub fn latest_staging_file(dir: impl AsRef<Path>) -> Result<Option<PathBuf>> {
    let entries = match fs::read_dir(dir.as_ref()) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut latest: Option<PathBuf> = None;
    for entry in entries {
        let path = entry?.path();
        let is_staging = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(STAGING_FILE_PREFIX) && name.ends_with(".json"));

        if is_staging && latest.as_ref().map_or(true, |current| path > *current) {
            latest = Some(path);
        }
    }

    Ok(latest)
}

/// File name for a batch captured at `captured_at`
pub fn staging_file_name(captured_at: DateTime<Local>) -> String {
    format!(
        "{}{}.json",
        STAGING_FILE_PREFIX,
        captured_at.format(STAGING_TIMESTAMP_FORMAT)
    )
}

// Four-space indentation; serde_json never escapes non-ASCII characters.
fn write_records<W: Write>(writer: W, records: &[NormalizedRecord]) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(writer, formatter);
    records.serialize(&mut serializer)?;
    Ok(())
}
