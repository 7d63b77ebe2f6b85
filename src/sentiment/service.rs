use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::config::Config;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::models::{canonical_imdbid, ScoredRecord};
use crate::sentiment::runner::{self, BatchPolicy};
use crate::sentiment::scorer::ReviewScorer;
use crate::storage::dataset;

/// Drives the sentiment pipeline: load the merged dataset, score every
/// movie's reviews batch by batch, and write the dataset back out with a
/// sentiment column.
pub struct SentimentService {
    cfg: Config,
    fetcher: Arc<dyn PageFetcher>,
}

impl SentimentService {
    pub fn new(cfg: Config) -> Self {
        let fetcher = Arc::new(HttpFetcher::new(cfg.request_timeout));
        Self { cfg, fetcher }
    }

    #[cfg(test)]
    pub fn with_fetcher(cfg: Config, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { cfg, fetcher }
    }

    pub async fn run(&self) -> anyhow::Result<usize> {
        let started = Instant::now();

        let movies = dataset::load(&self.cfg.merged_path)?;
        let ids: Vec<String> = movies
            .iter()
            .map(|movie| canonical_imdbid(&movie.imdbid))
            .collect();
        info!(rows = movies.len(), "Loaded dataset for sentiment scoring");

        let scorer = Arc::new(ReviewScorer::new(
            Arc::clone(&self.fetcher),
            self.cfg.review_base_url.clone(),
        ));
        let policy = BatchPolicy {
            batch_size: self.cfg.batch_size,
            max_workers: self.cfg.max_workers,
            inter_batch_delay: self.cfg.inter_batch_delay,
        };

        let scores = runner::run_batched(scorer, &ids, &policy).await;

        let scored: Vec<ScoredRecord> = movies
            .into_iter()
            .zip(scores)
            .map(|(movie, sentiment)| ScoredRecord::new(movie, sentiment))
            .collect();
        dataset::persist_scored(&self.cfg.sentiment_path, &scored)?;

        let known = scored.iter().filter(|r| r.sentiment.is_some()).count();
        info!(
            scored = known,
            total = scored.len(),
            elapsed = ?started.elapsed(),
            "Sentiment pass finished"
        );
        Ok(known)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::crawler::fetcher::test_support::FakeFetcher;
    use crate::crawler::test_support::test_config;

    const MERGED_CSV: &str = "\
title,year,rating,dubious,imdbid,id,submitterid,date,visible
Loved,2020,3,0,1,1,11,2020-01-01 00:00:00,1
Silent,2020,1,,0000002,2,12,2020-02-01 00:00:00,1
Broken,2020,0,0,0000003,3,13,2020-03-01 00:00:00,1
";

    #[tokio::test]
    async fn attaches_scores_by_row_and_normalizes_short_ids() {
        let dir = tempfile::tempdir().unwrap();
        let merged_path = dir.path().join("combined.csv");
        std::fs::write(&merged_path, MERGED_CSV).unwrap();

        let mut cfg = test_config();
        cfg.merged_path = merged_path.to_str().unwrap().to_string();
        cfg.sentiment_path = dir.path().join("scored.csv").to_str().unwrap().to_string();
        cfg.batch_size = 2;
        cfg.max_workers = 2;

        // "Loved" is stored with imdbid 1; the review url must use 0000001.
        let fetcher = Arc::new(
            FakeFetcher::new()
                .route(
                    "http://reviews.test/title/tt0000001/reviews?ref_=tt_ql_3",
                    r#"<div class="text show-more__control">A wonderful, great film.</div>"#,
                )
                .route(
                    "http://reviews.test/title/tt0000002/reviews?ref_=tt_ql_3",
                    "<html><body>No reviews.</body></html>",
                ),
            // no route for 0000003 -> fetch error, soft unknown
        );

        let service = SentimentService::with_fetcher(cfg.clone(), fetcher);
        let known = service.run().await.unwrap();
        assert_eq!(known, 1);

        let body = std::fs::read_to_string(&cfg.sentiment_path).unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with(",sentiment"));
        assert!(!lines[1].ends_with(","));
        assert!(lines[2].ends_with(","));
        assert!(lines[3].ends_with(","));
    }
}
