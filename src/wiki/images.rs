// src/wiki/images.rs
use std::sync::Arc;

use async_trait::async_trait;

use crate::extractors::document::WikiDocument;
use crate::extractors::search::parse_image_results;
use crate::utils::config::WikiConfig;
use crate::utils::error::WikiError;
use crate::wiki::client::DocumentFetcher;

/// Resolves a representative image for a query. No match is `Ok(None)`, not an error.
#[async_trait]
pub trait ImageLookup: Send + Sync {
    async fn lookup_image(&self, query: &str) -> Result<Option<String>, WikiError>;
}

/// Looks images up through the wiki's own image search.
pub struct WikiImageLookup {
    fetcher: Arc<dyn DocumentFetcher>,
    config: WikiConfig,
}

impl WikiImageLookup {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, config: WikiConfig) -> Self {
        Self { fetcher, config }
    }
}

#[async_trait]
impl ImageLookup for WikiImageLookup {
    async fn lookup_image(&self, query: &str) -> Result<Option<String>, WikiError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let html = self.fetcher.fetch(&self.config.image_search_url(query)).await?;
        let doc = WikiDocument::parse(&html, &self.config.base_url);
        let found = parse_image_results(&doc, query);
        tracing::debug!("Image lookup '{}' -> {:?}", query, found);
        Ok(found)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiki::client::testing::FakeFetcher;

    fn config() -> WikiConfig {
        WikiConfig::default().with_base_url("https://wiki.test")
    }

    #[tokio::test]
    async fn finds_last_matching_file() {
        let config = config();
        let page = r#"
            <ul class="mw-search-results">
              <li><a title="File:Kingdom-p1.jpg"><img src="/images/k1.jpg"/></a></li>
              <li><a title="File:Kingdom-p2.jpg"><img src="/images/k2.jpg"/></a></li>
            </ul>
        "#;
        let fetcher = Arc::new(FakeFetcher::new().with_page(config.image_search_url("Kingdom-p"), page));
        let lookup = WikiImageLookup::new(fetcher.clone(), config);

        let found = lookup.lookup_image("Kingdom-p").await.unwrap();
        assert_eq!(found.as_deref(), Some("https://wiki.test/images/k2.jpg"));
        assert_eq!(fetcher.request_count(), 1);
    }

    #[tokio::test]
    async fn empty_query_skips_the_fetch() {
        let fetcher = Arc::new(FakeFetcher::new());
        let lookup = WikiImageLookup::new(fetcher.clone(), config());
        assert_eq!(lookup.lookup_image("  ").await.unwrap(), None);
        assert_eq!(fetcher.request_count(), 0);
    }

    #[tokio::test]
    async fn fetch_errors_propagate() {
        let lookup = WikiImageLookup::new(Arc::new(FakeFetcher::new()), config());
        let err = lookup.lookup_image("Missing").await.unwrap_err();
        assert!(matches!(err, WikiError::NotFound(_)));
    }
}
