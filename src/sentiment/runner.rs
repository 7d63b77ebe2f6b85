use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::sentiment::scorer::Scorer;

#[derive(Debug, Clone)]
pub struct BatchPolicy {
    pub batch_size: usize,
    pub max_workers: usize,
    pub inter_batch_delay: Duration,
}

/// Scores `ids` in consecutive batches. Within a batch one task per id runs
/// under a semaphore of `max_workers` permits; each task reports back with
/// its slot index, so results land in input order no matter when tasks
/// finish. A crashed worker forfeits only its own slot. Batches are
/// separated by `inter_batch_delay`, skipped after the last one.
pub async fn run_batched<S>(scorer: Arc<S>, ids: &[String], policy: &BatchPolicy) -> Vec<Option<f64>>
where
    S: Scorer + 'static,
{
    let batch_size = policy.batch_size.max(1);
    let batch_count = ids.len().div_ceil(batch_size);

    let mut scores = Vec::with_capacity(ids.len());

    for (batch_no, batch) in ids.chunks(batch_size).enumerate() {
        info!(
            "Processing batch {}/{} ({} movies)",
            batch_no + 1,
            batch_count,
            batch.len()
        );

        let mut results: Vec<Option<f64>> = vec![None; batch.len()];
        let workers = Arc::new(Semaphore::new(policy.max_workers.max(1)));
        let mut tasks = JoinSet::new();

        for (slot, imdbid) in batch.iter().enumerate() {
            let scorer = Arc::clone(&scorer);
            let workers = Arc::clone(&workers);
            let imdbid = imdbid.clone();

            tasks.spawn(async move {
                let _permit = workers.acquire_owned().await.expect("semaphore closed");
                (slot, scorer.score(&imdbid).await)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((slot, score)) => results[slot] = score,
                Err(e) => warn!("Review worker crashed: {}", e),
            }
        }

        scores.extend(results);

        // polite delay between batches
        if batch_no + 1 < batch_count {
            sleep(policy.inter_batch_delay).await;
        }
    }

    scores
}
