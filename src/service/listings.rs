// src/service/listings.rs
//! Search, upcoming schedule and main page slider.

use super::WikiService;

use crate::extractors::document::WikiDocument;
use crate::extractors::paging::paginate;
use crate::extractors::search::{extract_search, SearchHit};
use crate::extractors::slider::extract_slider;
use crate::extractors::upcoming::{extract_upcoming, poster_query};
use crate::utils::error::WikiError;
use crate::utils::validate::{month_name, validate_page};
use crate::wiki::models::{PagedCollection, SearchMatch, SearchResults, ShowSummary, ShowType, UpcomingEntry};

impl WikiService {
    /// Title and text matches for `query`, each with its snippet image resolved.
    pub async fn search(&self, query: &str) -> Result<SearchResults, WikiError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WikiError::BadRequest("Search query must not be empty".to_string()));
        }

        let html = self.fetcher.fetch(&self.config.search_url(query)).await?;
        let hits = {
            let doc = WikiDocument::parse(&html, &self.config.base_url);
            extract_search(&doc, query)
        };

        Ok(SearchResults {
            titles: self.resolve_hits(hits.titles).await?,
            texts: self.resolve_hits(hits.texts).await?,
        })
    }

    async fn resolve_hits(&self, hits: Vec<SearchHit>) -> Result<Vec<SearchMatch>, WikiError> {
        let mut matches = Vec::with_capacity(hits.len());
        for hit in hits {
            let image_url = match hit.image_query.as_deref() {
                Some(query) => self.images.lookup_image(query).await?,
                None => None,
            };
            matches.push(hit.into_match(image_url));
        }
        Ok(matches)
    }

    /// Scheduled titles for `month` (1-12), one listing or Drama then Movie, paginated by the
    /// configured page size. Only the returned page gets image lookups.
    pub async fn upcoming(
        &self,
        month: u32,
        kind: Option<ShowType>,
        page: usize,
    ) -> Result<PagedCollection<UpcomingEntry>, WikiError> {
        let month = month_name(month)?;
        let page = validate_page(page)?;
        let kinds = match kind {
            Some(kind) => vec![kind],
            None => vec![ShowType::Drama, ShowType::Movie],
        };

        let current_year = self.config.current_year();
        let mut entries = Vec::new();
        for kind in kinds {
            let url = self.config.upcoming_url(kind.listing_name(), month);
            let html = self.fetcher.fetch(&url).await?;
            let doc = WikiDocument::parse(&html, &self.config.base_url);
            entries.extend(extract_upcoming(&doc, kind, current_year));
        }

        let mut paged = paginate(entries, page, self.config.page_size);
        tracing::info!(
            "Upcoming {}: page {}/{} ({} of {} entries)",
            month,
            paged.page.current_page,
            paged.page.total_pages,
            paged.page.size,
            paged.page.total
        );

        for entry in paged.data.iter_mut() {
            entry.image_url = self.images.lookup_image(&poster_query(&entry.title)).await?;
        }
        Ok(paged)
    }

    pub async fn slider(&self) -> Result<Vec<ShowSummary>, WikiError> {
        let html = self.fetcher.fetch(&self.config.main_page_url()).await?;
        let doc = WikiDocument::parse(&html, &self.config.base_url);
        Ok(extract_slider(&doc))
    }
}

#[cfg(test)]
mod tests {
    use crate::service::testing::*;
    use crate::utils::error::WikiError;
    use crate::wiki::client::testing::FakeFetcher;
    use crate::wiki::images::testing::FakeImageLookup;
    use crate::wiki::models::{SearchCategory, ShowType};

    const SEARCH_PAGE: &str = r#"
        <h2>Page title matches</h2>
        <ul class="mw-search-results">
          <li>
            <div class="mw-search-result-heading"><a href="/Signal_(Korean_Drama)">Signal (Korean Drama)</a></div>
            <div class="searchresult">[[File:Signal-p1.jpg]] '''Drama:''' Signal</div>
          </li>
        </ul>
        <h2>Page text matches</h2>
        <ul class="mw-search-results">
          <li>
            <div class="mw-search-result-heading"><a href="/Kim_Hye-Soo">Kim Hye-Soo</a></div>
            <div class="searchresult">'''Name:''' Kim Hye-Soo</div>
          </li>
        </ul>
    "#;

    fn schedule(prefix: &str, count: usize) -> String {
        let items: String = (1..=count)
            .map(|n| format!(r#"<li><a href="/{p}_{n}">{p} {n}</a> (KBS2)</li>"#, p = prefix, n = n))
            .collect();
        format!(
            r#"<div id="mw-content-text"><div style="width: 50%"><ul>April 1-7<ul>{}</ul></ul></div></div>"#,
            items
        )
    }

    #[tokio::test]
    async fn search_resolves_images_of_typed_hits() {
        let fetcher = FakeFetcher::new()
            .with_page(format!("{}/index.php?fulltext=Search&search=Signal", BASE), SEARCH_PAGE);
        let images = FakeImageLookup::default().with_image("Signal-p1.jpg", "https://wiki.test/images/signal.jpg");
        let h = harness(fetcher, images);

        let results = h.service.search(" Signal ").await.unwrap();
        assert_eq!(results.titles.len(), 1);
        assert_eq!(results.titles[0].category, SearchCategory::Drama);
        assert_eq!(results.titles[0].image_url.as_deref(), Some("https://wiki.test/images/signal.jpg"));
        assert_eq!(results.texts[0].category, SearchCategory::Person);
        assert_eq!(results.texts[0].image_url, None);
        // hits without a file reference never reach the lookup
        assert_eq!(h.images.queries(), vec!["Signal-p1.jpg".to_string()]);
        assert_eq!(h.fetcher.request_count(), 1);
    }

    #[tokio::test]
    async fn upcoming_pages_and_enriches_only_the_slice() {
        let fetcher = FakeFetcher::new()
            .with_page(page_url("Template:UpcomingDramasApril"), schedule("Drama", 4))
            .with_page(page_url("Template:UpcomingMoviesApril"), schedule("Movie", 3));
        let h = harness(fetcher, FakeImageLookup::default().with_image("Movie 1-p", "https://wiki.test/m1.jpg"));

        let paged = h.service.upcoming(4, None, 1).await.unwrap();
        assert_eq!(paged.page.total, 7);
        assert_eq!(paged.page.total_pages, 2);
        assert_eq!(paged.page.size, 5);
        let ids: Vec<_> = paged.data.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["Drama_1", "Drama_2", "Drama_3", "Drama_4", "Movie_1"]);
        assert_eq!(paged.data[0].network.as_deref(), Some("KBS2"));
        assert_eq!(paged.data[4].show_type, ShowType::Movie);
        assert_eq!(paged.data[4].image_url.as_deref(), Some("https://wiki.test/m1.jpg"));
        assert_eq!(h.images.queries().len(), 5);

        let second = h.service.upcoming(4, None, 2).await.unwrap();
        assert_eq!(second.data.len(), 2);
        assert_eq!(h.images.queries().len(), 7);
    }

    #[tokio::test]
    async fn upcoming_single_kind_and_out_of_range_page() {
        let fetcher = FakeFetcher::new().with_page(page_url("Template:UpcomingMoviesApril"), schedule("Movie", 3));
        let h = harness(fetcher, FakeImageLookup::default());

        let paged = h.service.upcoming(4, Some(ShowType::Movie), 3).await.unwrap();
        assert!(paged.data.is_empty());
        assert_eq!(paged.page.total, 3);
        assert_eq!(paged.page.total_pages, 1);
        assert!(h.images.queries().is_empty());
        assert_eq!(h.fetcher.request_count(), 1);
    }

    #[tokio::test]
    async fn upcoming_rejects_bad_month_and_page_before_fetching() {
        let h = harness(FakeFetcher::new(), FakeImageLookup::default());
        assert!(matches!(h.service.upcoming(13, None, 1).await, Err(WikiError::BadRequest(_))));
        assert!(matches!(h.service.upcoming(4, None, 0).await, Err(WikiError::BadRequest(_))));
        assert_eq!(h.fetcher.request_count(), 0);
    }

    #[tokio::test]
    async fn slider_reads_main_page() {
        let fetcher = FakeFetcher::new().with_page(
            page_url("Main_Page"),
            r#"<ul class="amazingslider-slides"><li><a href="/Signal"><img src="/s.jpg" alt="Signal"/></a></li></ul>"#,
        );
        let h = harness(fetcher, FakeImageLookup::default());
        let slides = h.service.slider().await.unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].image_url, "https://wiki.test/s.jpg");
    }
}
