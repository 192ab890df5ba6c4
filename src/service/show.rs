// src/service/show.rs
use super::WikiService;

use crate::extractors::cast::extract_cast_groups;
use crate::extractors::classify::{classify, require_show};
use crate::extractors::date_range::parse_date_range;
use crate::extractors::document::WikiDocument;
use crate::extractors::profile::{
    extract_fields, extract_header, normalize_show_fields, profile_items, translate_fields, PageHeader,
};
use crate::extractors::synopsis::{extract_notes, extract_synopsis, translate_synopsis, ParagraphSection};
use crate::utils::error::WikiError;
use crate::utils::validate::{validate_id, validate_language};
use crate::wiki::models::{CastGroup, FieldMap, FieldValue, Note, ShowRecord, ShowType};

const RELEASE_DATE_FIELD: &str = "releaseDate";

/// Everything a show page yields before translation. Owned, so the parsed document can be
/// dropped before any collaborator is awaited.
struct ShowDraft {
    header: PageHeader,
    show_type: ShowType,
    fields: FieldMap,
    synopsis: ParagraphSection,
    notes: Option<Vec<Note>>,
}

fn draft_show(html: &str, base_url: &str) -> Result<ShowDraft, WikiError> {
    let doc = WikiDocument::parse(html, base_url);
    let fields = extract_fields(profile_items(&doc));
    let show_type = require_show(classify(&fields))?;

    Ok(ShowDraft {
        header: extract_header(&doc),
        show_type,
        fields,
        synopsis: extract_synopsis(&doc),
        notes: extract_notes(&doc),
    })
}

impl WikiService {
    /// Drama or movie page as a [`ShowRecord`]. With a language, the localized profile fields
    /// and the synopsis are translated; without one nothing is.
    pub async fn show_detail(&self, id: &str, language: Option<&str>) -> Result<ShowRecord, WikiError> {
        let id = validate_id(id)?;
        let language = validate_language(language)?;

        let html = self.fetch_page(&id).await?;
        let ShowDraft {
            header,
            show_type,
            mut fields,
            synopsis,
            notes,
        } = draft_show(&html, &self.config.base_url)?;

        if let Some(language) = &language {
            translate_fields(&mut fields, self.translator.as_ref(), language).await?;
        }
        normalize_show_fields(&mut fields);

        let release_date_range = fields
            .get(RELEASE_DATE_FIELD)
            .and_then(FieldValue::as_text)
            .and_then(|text| parse_date_range(text, self.config.source_timezone));

        let synopsis = translate_synopsis(synopsis, self.translator.as_ref(), language.as_ref()).await?;

        tracing::info!("Built {:?} record for '{}' ({} fields)", show_type, id, fields.len());
        Ok(ShowRecord {
            url: self.config.page_url(&id),
            id,
            title: header.title,
            image_url: header.image_url,
            rating: header.rating,
            vote_count: header.vote_count,
            show_type,
            fields,
            release_date_range,
            synopsis,
            notes,
        })
    }

    /// Cast groups of a drama or movie page; groups without entries are omitted.
    pub async fn show_casts(&self, id: &str) -> Result<Vec<CastGroup>, WikiError> {
        let id = validate_id(id)?;
        let html = self.fetch_page(&id).await?;

        let doc = WikiDocument::parse(&html, &self.config.base_url);
        require_show(classify(&extract_fields(profile_items(&doc))))?;
        Ok(extract_cast_groups(&doc))
    }
}
