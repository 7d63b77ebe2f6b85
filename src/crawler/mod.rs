use tracing::{debug, info};

use crate::config::Config;
use crate::crawler::fetcher::PageFetcher;
use crate::error::Result;

pub mod enricher;
pub mod fetcher;
pub mod models;
pub mod parser;
pub mod service;

/// Walks the "recently added" listing pages and accumulates IMDb ids in
/// discovery order, up to `page_cap` pages. Once the configured stop id is
/// consumed no further pages are fetched. A listing page failure is fatal:
/// without the listing there is nothing to merge.
pub async fn discover_new_ids(fetcher: &dyn PageFetcher, cfg: &Config) -> Result<Vec<String>> {
    let mut ids = Vec::new();

    for page in 0..cfg.page_cap {
        let url = format!("{}/sort/added?page={}", cfg.listing_base_url, page);
        debug!(page, "Fetching listing page");

        let html = fetcher.fetch(&url).await?;
        let (page_ids, hit_stop) = parser::collect_ids_until(&html, cfg.stop_imdbid.as_deref());

        info!(page, count = page_ids.len(), "Extracted ids from listing page");
        ids.extend(page_ids);

        if hit_stop {
            info!(page, "Stop id reached, ending discovery");
            break;
        }
    }

    Ok(ids)
}
