use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One row of the Bechdel movie dataset. The `date` field keeps the raw
/// string as read from disk or the API so that persisting an unchanged
/// dataset round-trips exactly; use [`MovieRecord::added_at`] to compare.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub year: i32,
    pub rating: u8,
    pub dubious: Option<u8>,
    pub imdbid: String,
    pub id: i64,
    pub submitterid: i64,
    pub date: String,
    pub visible: Option<u8>,
}

impl MovieRecord {
    pub fn added_at(&self) -> Option<NaiveDateTime> {
        parse_date(&self.date)
    }
}

/// Row shape of the sentiment output file: the dataset columns plus the
/// mean compound score, `None` where no reviews could be scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub title: String,
    pub year: i32,
    pub rating: u8,
    pub dubious: Option<u8>,
    pub imdbid: String,
    pub id: i64,
    pub submitterid: i64,
    pub date: String,
    pub visible: Option<u8>,
    pub sentiment: Option<f64>,
}

impl ScoredRecord {
    pub fn new(movie: MovieRecord, sentiment: Option<f64>) -> Self {
        Self {
            title: movie.title,
            year: movie.year,
            rating: movie.rating,
            dubious: movie.dubious,
            imdbid: movie.imdbid,
            id: movie.id,
            submitterid: movie.submitterid,
            date: movie.date,
            visible: movie.visible,
            sentiment,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnrichOutcome {
    Added(MovieRecord),
    /// Already known, stale, or incomplete upstream record. Not an error.
    Skipped,
}

pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// IMDb ids are zero-padded to at least seven digits on the review site.
pub fn canonical_imdbid(raw: &str) -> String {
    format!("{:0>7}", raw.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dates_with_and_without_time() {
        assert_eq!(
            parse_date("2021-01-01 06:26:01").unwrap().to_string(),
            "2021-01-01 06:26:01"
        );
        assert_eq!(
            parse_date("2021-01-01T06:26:01").unwrap().to_string(),
            "2021-01-01 06:26:01"
        );
        assert_eq!(
            parse_date("2021-01-01").unwrap().to_string(),
            "2021-01-01 00:00:00"
        );
        assert!(parse_date("not a date").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn pads_short_imdb_ids() {
        assert_eq!(canonical_imdbid("12345"), "0012345");
        assert_eq!(canonical_imdbid("2371399"), "2371399");
        assert_eq!(canonical_imdbid("123456789"), "123456789");
        assert_eq!(canonical_imdbid(" 12345 "), "0012345");
    }
}
