// src/service/mod.rs
//! Request-level entry points. Each call validates its inputs before any I/O, fetches the
//! pages it needs one after another, and returns the first collaborator error unchanged.

mod listings;
mod person;
mod show;

use std::sync::Arc;

use crate::extractors::classify::classify;
use crate::extractors::document::WikiDocument;
use crate::extractors::profile::{extract_fields, profile_items};
use crate::utils::config::WikiConfig;
use crate::utils::error::WikiError;
use crate::utils::validate::validate_id;
use crate::wiki::models::EntityType;
use crate::wiki::{DocumentFetcher, GoogleTranslator, HttpFetcher, ImageLookup, Translator, WikiImageLookup};

/// Entry points over the wiki, wired to its three collaborators.
pub struct WikiService {
    config: WikiConfig,
    fetcher: Arc<dyn DocumentFetcher>,
    translator: Arc<dyn Translator>,
    images: Arc<dyn ImageLookup>,
}

impl WikiService {
    pub fn new(
        config: WikiConfig,
        fetcher: Arc<dyn DocumentFetcher>,
        translator: Arc<dyn Translator>,
        images: Arc<dyn ImageLookup>,
    ) -> Self {
        Self {
            config,
            fetcher,
            translator,
            images,
        }
    }

    /// Production wiring: HTTP fetcher, Google translator and wiki image search.
    pub fn from_config(config: WikiConfig) -> Result<Self, WikiError> {
        let fetcher: Arc<dyn DocumentFetcher> = Arc::new(HttpFetcher::new(&config)?);
        let translator = Arc::new(GoogleTranslator::new(&config)?);
        let images = Arc::new(WikiImageLookup::new(fetcher.clone(), config.clone()));
        Ok(Self::new(config, fetcher, translator, images))
    }

    pub fn config(&self) -> &WikiConfig {
        &self.config
    }

    /// Classification of any page, Person and Unknown included.
    pub async fn content_type(&self, id: &str) -> Result<EntityType, WikiError> {
        let id = validate_id(id)?;
        let html = self.fetch_page(&id).await?;
        let doc = WikiDocument::parse(&html, &self.config.base_url);
        Ok(classify(&extract_fields(profile_items(&doc))))
    }

    async fn fetch_page(&self, id: &str) -> Result<String, WikiError> {
        let url = self.config.page_url(id);
        tracing::info!("Fetching wiki page '{}'", id);
        self.fetcher.fetch(&url).await
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::wiki::client::testing::FakeFetcher;
    use crate::wiki::images::testing::FakeImageLookup;

    #[tokio::test]
    async fn short_ids_fail_before_any_fetch() {
        let h = harness(FakeFetcher::new(), FakeImageLookup::default());
        for id in ["", "a", "ab"] {
            let results = [
                h.service.show_detail(id, None).await.err(),
                h.service.show_casts(id).await.err(),
                h.service.person_detail(id, None).await.err(),
                h.service.content_type(id).await.err(),
            ];
            for err in results {
                assert!(matches!(err, Some(WikiError::BadRequest(_))), "{:?} accepted", id);
            }
        }
        assert!(matches!(h.service.search("  ").await, Err(WikiError::BadRequest(_))));
        assert_eq!(h.fetcher.request_count(), 0);
    }

    #[tokio::test]
    async fn bad_language_fails_before_any_fetch() {
        let h = harness(FakeFetcher::new(), FakeImageLookup::default());
        let err = h.service.show_detail("Goblin", Some("klingon")).await.unwrap_err();
        assert!(matches!(err, WikiError::BadRequest(_)));
        let err = h.service.person_detail("Gong_Yoo", Some("zz")).await.unwrap_err();
        assert!(matches!(err, WikiError::BadRequest(_)));
        assert_eq!(h.fetcher.request_count(), 0);
    }

    #[tokio::test]
    async fn content_type_reports_every_classification() {
        let fetcher = FakeFetcher::new()
            .with_page(page_url("Gong_Yoo"), "<h2>Profile</h2><ul><li><b>Name:</b> Gong Yoo</li></ul>")
            .with_page(page_url("Main_Page"), "<ul><li><b>Genre:</b> none</li></ul>");
        let h = harness(fetcher, FakeImageLookup::default());

        assert_eq!(h.service.content_type("gong yoo").await.unwrap(), EntityType::Person);
        assert_eq!(h.service.content_type("main page").await.unwrap(), EntityType::Unknown);
        let err = h.service.content_type("Missing").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
