use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::debug;

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::models::{canonical_imdbid, parse_date, EnrichOutcome, MovieRecord};
use crate::error::Result;

/// Looks one IMDb id up in the Bechdel test API and keeps the record only
/// if it was added strictly after `cutoff`. HTTP failures propagate (the
/// caller logs and moves on); a malformed or stale payload is a Skipped.
pub async fn enrich(
    fetcher: &dyn PageFetcher,
    api_base: &str,
    imdbid: &str,
    cutoff: NaiveDateTime,
) -> Result<EnrichOutcome> {
    let url = format!("{}/getMovieByImdbId?imdbid={}", api_base, imdbid);
    let body = fetcher.fetch(&url).await?;

    Ok(evaluate_payload(&body, imdbid, cutoff))
}

/// Decides what to do with one API payload. Never fails: anything that
/// cannot be turned into a record newer than `cutoff` is a Skipped.
pub fn evaluate_payload(body: &str, imdbid: &str, cutoff: NaiveDateTime) -> EnrichOutcome {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            debug!("Unparseable api response for imdbid {}: {}", imdbid, e);
            return EnrichOutcome::Skipped;
        }
    };

    let Some(title) = str_field(&value, "title").filter(|t| !t.is_empty()) else {
        return EnrichOutcome::Skipped;
    };
    let Some(added_at) = str_field(&value, "date").and_then(parse_date) else {
        return EnrichOutcome::Skipped;
    };
    if added_at <= cutoff {
        return EnrichOutcome::Skipped;
    }

    let record = MovieRecord {
        title: title.to_string(),
        year: int_field(&value, "year").unwrap_or(0) as i32,
        rating: int_field(&value, "rating").unwrap_or(0) as u8,
        dubious: int_field(&value, "dubious").map(|v| v as u8),
        imdbid: canonical_imdbid(str_field(&value, "imdbid").unwrap_or(imdbid)),
        id: int_field(&value, "id").unwrap_or(0),
        submitterid: int_field(&value, "submitterid").unwrap_or(0),
        date: str_field(&value, "date").unwrap_or_default().to_string(),
        visible: int_field(&value, "visible").map(|v| v as u8),
    };

    EnrichOutcome::Added(record)
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

// The API is loose about number typing, so accept both 3 and "3".
fn int_field(value: &Value, key: &str) -> Option<i64> {
    let v = value.get(key)?;
    v.as_i64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}
