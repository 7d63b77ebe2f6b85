use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use vader_sentiment::SentimentIntensityAnalyzer;

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser;

/// Produces one sentiment score per movie id; `None` means unknown.
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn score(&self, imdbid: &str) -> Option<f64>;
}

/// Fetches the first IMDb reviews page for a movie and averages the VADER
/// compound polarity over every review body found there. The analyzer is
/// built once with the scorer and shared read-only across workers.
pub struct ReviewScorer {
    fetcher: Arc<dyn PageFetcher>,
    analyzer: SentimentIntensityAnalyzer<'static>,
    review_base_url: String,
}

impl ReviewScorer {
    pub fn new(fetcher: Arc<dyn PageFetcher>, review_base_url: String) -> Self {
        Self {
            fetcher,
            analyzer: SentimentIntensityAnalyzer::new(),
            review_base_url,
        }
    }
}

#[async_trait]
impl Scorer for ReviewScorer {
    async fn score(&self, imdbid: &str) -> Option<f64> {
        let url = format!(
            "{}/title/tt{}/reviews?ref_=tt_ql_3",
            self.review_base_url, imdbid
        );

        let html = match self.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Error fetching reviews for imdbid {}: {}", imdbid, e);
                return None;
            }
        };

        let reviews = parser::extract_review_bodies(&html);
        if reviews.is_empty() {
            debug!("No reviews for imdbid {}", imdbid);
            return None;
        }

        Some(mean_compound(&self.analyzer, &reviews))
    }
}

pub fn mean_compound(analyzer: &SentimentIntensityAnalyzer, reviews: &[String]) -> f64 {
    let total: f64 = reviews
        .iter()
        .map(|review| {
            analyzer
                .polarity_scores(review)
                .get("compound")
                .copied()
                .unwrap_or(0.0)
        })
        .sum();

    total / reviews.len() as f64
}
