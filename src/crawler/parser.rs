use regex::Regex;
use scraper::{Html, Selector};

/// All IMDb ids referenced in a page body, in document order. Repeated
/// occurrences are kept; deduplication is the caller's concern.
pub fn extract_imdb_ids(html: &str) -> Vec<String> {
    let re = Regex::new(r"title/tt(\d+)/").unwrap();
    re.captures_iter(html).map(|caps| caps[1].to_string()).collect()
}

/// Consumes the id stream of one page up to and including the first
/// occurrence of `stop_id`. The second value reports whether the stop id
/// was seen, so the caller can quit paging.
pub fn collect_ids_until(html: &str, stop_id: Option<&str>) -> (Vec<String>, bool) {
    let mut ids = Vec::new();

    for id in extract_imdb_ids(html) {
        let hit_stop = stop_id == Some(id.as_str());
        ids.push(id);
        if hit_stop {
            return (ids, true);
        }
    }

    (ids, false)
}

/// Review texts on an IMDb reviews page. First page only; an empty result
/// is a valid outcome, not an error.
pub fn extract_review_bodies(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse("div.text.show-more__control").unwrap();

    doc.select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <a href="/view/9991/a/">A</a> <a href="https://www.imdb.com/title/tt0000001/">imdb</a>
        <a href="https://www.imdb.com/title/tt0000002/">imdb</a>
        <a href="https://www.imdb.com/title/tt0000001/">imdb again</a>
    "#;

    #[test]
    fn extracts_ids_in_document_order_with_repeats() {
        assert_eq!(extract_imdb_ids(LISTING), vec!["0000001", "0000002", "0000001"]);
    }

    #[test]
    fn no_ids_on_unrelated_page() {
        assert!(extract_imdb_ids("<html><body>nothing here</body></html>").is_empty());
    }

    #[test]
    fn stops_at_first_occurrence_of_stop_id() {
        let html = r#"title/tt0000001/ title/tt0000002/ title/tt0000003/ title/tt0000002/"#;
        let (ids, hit) = collect_ids_until(html, Some("0000002"));
        assert!(hit);
        assert_eq!(ids, vec!["0000001", "0000002"]);
    }

    #[test]
    fn passes_whole_page_without_stop_id() {
        let (ids, hit) = collect_ids_until(LISTING, None);
        assert!(!hit);
        assert_eq!(ids.len(), 3);

        let (ids, hit) = collect_ids_until(LISTING, Some("9999999"));
        assert!(!hit);
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn extracts_review_texts_from_markup_container() {
        let html = r#"
            <div class="review-container">
              <div class="text show-more__control">Great <b>movie</b>, loved it.</div>
            </div>
            <div class="text show-more__control">  </div>
            <div class="text show-more__control">Terrible pacing.</div>
            <div class="text">not a review body</div>
        "#;
        let bodies = extract_review_bodies(html);
        assert_eq!(bodies, vec!["Great movie, loved it.", "Terrible pacing."]);
    }

    #[test]
    fn review_page_without_reviews_yields_empty_corpus() {
        assert!(extract_review_bodies("<html><body><p>no reviews yet</p></body></html>").is_empty());
    }
}
