// src/service/person.rs
use super::WikiService;

use crate::extractors::classify::{classify, require_person};
use crate::extractors::document::WikiDocument;
use crate::extractors::person::extract_appearances;
use crate::extractors::profile::{coerce_birthdate, extract_fields, extract_header, profile_items, translate_fields};
use crate::extractors::synopsis::{extract_biography, extract_notes};
use crate::utils::error::WikiError;
use crate::utils::validate::{validate_id, validate_language};
use crate::wiki::models::PersonRecord;

impl WikiService {
    /// Person page as a [`PersonRecord`], with filmography groups and biography paragraphs.
    pub async fn person_detail(&self, id: &str, language: Option<&str>) -> Result<PersonRecord, WikiError> {
        let id = validate_id(id)?;
        let language = validate_language(language)?;

        let html = self.fetch_page(&id).await?;
        let mut person = {
            let doc = WikiDocument::parse(&html, &self.config.base_url);
            let mut fields = extract_fields(profile_items(&doc));
            require_person(classify(&fields))?;
            coerce_birthdate(&mut fields);

            let header = extract_header(&doc);
            PersonRecord {
                url: self.config.page_url(&id),
                id,
                title: header.title,
                image_url: header.image_url,
                fields,
                rating: header.rating,
                vote_count: header.vote_count,
                biographies: extract_biography(&doc),
                notes: extract_notes(&doc),
                appearances: extract_appearances(&doc),
            }
        };

        if let Some(language) = &language {
            translate_fields(&mut person.fields, self.translator.as_ref(), language).await?;
        }

        tracing::info!(
            "Built person record for '{}' ({} filmography groups)",
            person.id,
            person.appearances.len()
        );
        Ok(person)
    }
}
