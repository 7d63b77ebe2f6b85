use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::models::{EnrichOutcome, MovieRecord};
use crate::crawler::{self, enricher};
use crate::storage::dataset;

#[derive(Debug)]
pub struct MergeSummary {
    pub added: usize,
    pub total: usize,
}

/// Drives the merge pipeline: load the existing dataset, discover ids newer
/// than its latest entry, enrich them through the lookup API, then
/// concatenate, deduplicate and persist.
pub struct MergeService {
    cfg: Config,
    fetcher: Arc<dyn PageFetcher>,
}

impl MergeService {
    pub fn new(cfg: Config) -> Self {
        let fetcher = Arc::new(HttpFetcher::new(cfg.request_timeout));
        Self { cfg, fetcher }
    }

    #[cfg(test)]
    pub fn with_fetcher(cfg: Config, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { cfg, fetcher }
    }

    pub async fn run(&self) -> anyhow::Result<MergeSummary> {
        let started = Instant::now();

        let old_movies = dataset::load(&self.cfg.dataset_path)?;
        let cutoff = dataset::latest_date(&old_movies)?;
        info!(rows = old_movies.len(), %cutoff, "Loaded existing dataset");

        let ids = crawler::discover_new_ids(self.fetcher.as_ref(), &self.cfg).await?;
        info!(count = ids.len(), "Discovery finished");

        let mut new_movies: Vec<MovieRecord> = Vec::new();
        let total = ids.len();
        for (count, imdbid) in ids.iter().enumerate() {
            if self.cfg.stop_imdbid.as_deref() == Some(imdbid.as_str()) {
                debug!("Boundary id {}, not enriched", imdbid);
                continue;
            }

            match enricher::enrich(self.fetcher.as_ref(), &self.cfg.api_base_url, imdbid, cutoff)
                .await
            {
                Ok(EnrichOutcome::Added(record)) => {
                    info!("Scraped movie {}/{}: {}", count + 1, total, imdbid);
                    new_movies.push(record);
                }
                Ok(EnrichOutcome::Skipped) => {
                    debug!("Skipped movie {}/{}: {}", count + 1, total, imdbid);
                }
                Err(e) => {
                    warn!("Lookup failed for imdbid {}, dropping it: {}", imdbid, e);
                }
            }
        }
        let added = new_movies.len();
        info!(added, "Enrichment finished");

        // keep the raw harvest of this run next to the merged output
        dataset::persist(&self.cfg.new_movies_path, &new_movies)?;

        let combined = dataset::reconcile(old_movies, new_movies);
        dataset::persist(&self.cfg.merged_path, &combined)?;

        let summary = MergeSummary {
            added,
            total: combined.len(),
        };
        info!(
            added = summary.added,
            total = summary.total,
            elapsed = ?started.elapsed(),
            "Merge finished"
        );
        Ok(summary)
    }
}
