use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, WriterBuilder};

use crate::crawler::models::{MovieRecord, ScoredRecord};
use crate::error::{Result, ScrapeError};

/// Reads the whole dataset. A missing file or a row that does not match
/// the expected schema is fatal; the merge must not start from a dataset
/// it cannot fully interpret.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<MovieRecord>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut records = Vec::new();
    for row in reader.deserialize::<MovieRecord>() {
        let record =
            row.map_err(|e| ScrapeError::Schema(format!("{}: {}", path.display(), e)))?;
        records.push(record);
    }

    Ok(records)
}

/// The newest addition date already present, used as the discovery cutoff.
pub fn latest_date(records: &[MovieRecord]) -> Result<NaiveDateTime> {
    records
        .iter()
        .filter_map(MovieRecord::added_at)
        .max()
        .ok_or_else(|| ScrapeError::Parse("no parseable date in dataset".to_string()))
}

/// Concatenates old rows before new rows and removes exact-duplicate rows
/// anywhere in the result, keeping the first occurrence. Full-row equality,
/// not a key-based upsert.
pub fn reconcile(old: Vec<MovieRecord>, new: Vec<MovieRecord>) -> Vec<MovieRecord> {
    let mut seen = HashSet::new();
    old.into_iter()
        .chain(new)
        .filter(|record| seen.insert(record.clone()))
        .collect()
}

pub fn persist(path: impl AsRef<Path>, records: &[MovieRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path.as_ref())?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn persist_scored(path: impl AsRef<Path>, records: &[ScoredRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path.as_ref())?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
