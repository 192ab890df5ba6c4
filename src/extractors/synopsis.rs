// src/extractors/synopsis.rs
//! Paragraph walkers: plot synopsis, biography and the numbered notes section.

// --- Imports ---
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use crate::extractors::document::{attr, element_text, following_elements, links, tag_name, WikiDocument};
use crate::utils::error::WikiError;
use crate::utils::validate::LanguageCode;
use crate::wiki::models::{Link, Note, Synopsis};
use crate::wiki::translate::Translator;

// --- CSS Selectors (Lazy Static) ---
static NOTE_ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li").expect("Failed to compile NOTE_ITEM_SELECTOR"));

pub const SYNOPSIS_MARKER: &str = "Plot Synopsis";
pub const BIOGRAPHY_MARKER: &str = "Biography";
pub const NOTES_MARKER: &str = "Notes";

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Paragraph texts and their links, collected from the run of `p` siblings after a heading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphSection {
    pub paragraphs: Vec<String>,
    pub links: Vec<Link>,
}

impl ParagraphSection {
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn joined(&self) -> String {
        self.paragraphs.join(PARAGRAPH_SEPARATOR)
    }
}

/// Walks the paragraphs right after the first heading containing `marker`. The walk ends
/// at the first sibling that is not a `p`, headings included. A missing heading is an
/// empty section.
pub fn extract_paragraphs(doc: &WikiDocument, marker: &str) -> ParagraphSection {
    let mut section = ParagraphSection::default();
    let Some(heading) = doc.heading_containing(marker) else {
        tracing::debug!("No '{}' heading on page", marker);
        return section;
    };

    for sibling in following_elements(heading) {
        if tag_name(sibling) != "p" {
            break;
        }
        // link markup is dropped but its text stays inline
        let text = element_text(sibling);
        section.links.extend(collect_links(doc, sibling));
        if !text.is_empty() {
            section.paragraphs.push(text);
        }
    }
    section
}

pub fn extract_synopsis(doc: &WikiDocument) -> ParagraphSection {
    extract_paragraphs(doc, SYNOPSIS_MARKER)
}

pub fn extract_biography(doc: &WikiDocument) -> Vec<String> {
    extract_paragraphs(doc, BIOGRAPHY_MARKER).paragraphs
}

/// Builds the synopsis record, translating the joined text when a language is given.
/// Translation errors are returned as-is; the original text is never substituted.
pub async fn translate_synopsis(
    section: ParagraphSection,
    translator: &dyn Translator,
    language: Option<&LanguageCode>,
) -> Result<Synopsis, WikiError> {
    let original = section.joined();
    let translated = match language {
        Some(language) if !section.is_empty() => {
            tracing::debug!("Translating synopsis ({} chars) to {}", original.len(), language);
            Some(translator.translate(&original, language).await?)
        }
        _ => None,
    };
    Ok(Synopsis {
        original,
        translated,
        links: section.links,
    })
}

/// Numbered notes between the "Notes" heading and the next `h2`. `None` when the page has
/// no such heading or it lists nothing.
pub fn extract_notes(doc: &WikiDocument) -> Option<Vec<Note>> {
    let heading = doc.heading_containing(NOTES_MARKER)?;

    let notes: Vec<Note> = following_elements(heading)
        .take_while(|el| tag_name(*el) != "h2")
        .filter(|el| tag_name(*el) == "ol")
        .flat_map(|list| list.select(&NOTE_ITEM_SELECTOR).collect::<Vec<_>>())
        .filter_map(|item| {
            let text = element_text(item);
            (!text.is_empty()).then(|| Note {
                text,
                links: collect_links(doc, item),
            })
        })
        .collect();

    (!notes.is_empty()).then_some(notes)
}

fn collect_links(doc: &WikiDocument, element: ElementRef<'_>) -> Vec<Link> {
    links(element)
        .filter_map(|a| {
            let href = attr(a, "href")?;
            Some(Link {
                name: element_text(a),
                url: doc.absolute(href),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiki::translate::testing::{FailingTranslator, TaggingTranslator};

    const PAGE: &str = r#"
        <h2><span class="mw-headline">Plot Synopsis</span></h2>
        <p>Kim Shin is a <a href="/Goblin">goblin</a>.</p>
        <p>   </p>
        <p>He meets <a href="/Ji_Eun-Tak">Ji Eun-Tak</a> and <a href="/Grim_Reaper">a reaper</a>.</p>
        <div class="thumb">image</div>
        <p>Caption paragraph after the image.</p>
        <h2>Notes</h2>
        <ol>
          <li>Filming began in <a href="/Quebec">Quebec</a>.</li>
          <li>Aired on tvN.</li>
        </ol>
        <h3>Trivia</h3>
        <ol><li>Still inside notes.</li></ol>
        <h2>Cast</h2>
        <ol><li>Outside notes.</li></ol>
    "#;

    fn doc() -> WikiDocument {
        WikiDocument::parse(PAGE, "https://wiki.test")
    }

    #[test]
    fn paragraphs_stop_at_first_non_paragraph() {
        let section = extract_synopsis(&doc());
        assert_eq!(
            section.paragraphs,
            vec![
                "Kim Shin is a goblin.".to_string(),
                "He meets Ji Eun-Tak and a reaper.".to_string(),
            ]
        );
        let names: Vec<_> = section.links.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["goblin", "Ji Eun-Tak", "a reaper"]);
        assert_eq!(section.links[1].url, "https://wiki.test/Ji_Eun-Tak");
    }

    #[test]
    fn missing_heading_is_empty_section() {
        assert!(extract_biography(&doc()).is_empty());
        assert!(extract_paragraphs(&doc(), "Production").is_empty());
    }

    #[tokio::test]
    async fn synopsis_translation_is_optional() {
        let translator = TaggingTranslator::default();
        let untranslated = translate_synopsis(extract_synopsis(&doc()), &translator, None)
            .await
            .unwrap();
        assert_eq!(untranslated.translated, None);
        assert!(untranslated.original.contains("\n\n"));
        assert_eq!(translator.calls(), 0);

        let language = LanguageCode::parse("id").unwrap();
        let translated = translate_synopsis(extract_synopsis(&doc()), &translator, Some(&language))
            .await
            .unwrap();
        assert_eq!(translated.translated.as_deref(), Some(format!("[id] {}", translated.original).as_str()));
        assert_eq!(translator.calls(), 1);
    }

    #[tokio::test]
    async fn empty_section_skips_translation() {
        let translator = TaggingTranslator::default();
        let language = LanguageCode::parse("id").unwrap();
        let section = extract_paragraphs(&doc(), "Production");
        assert!(section.is_empty());

        let synopsis = translate_synopsis(section, &translator, Some(&language)).await.unwrap();
        assert_eq!(synopsis.original, "");
        assert_eq!(synopsis.translated, None);
        assert_eq!(translator.calls(), 0);
    }

    #[tokio::test]
    async fn translation_failure_propagates() {
        let language = LanguageCode::parse("id").unwrap();
        let err = translate_synopsis(extract_synopsis(&doc()), &FailingTranslator, Some(&language))
            .await
            .unwrap_err();
        assert!(matches!(err, WikiError::TranslationFailure(_)));
    }

    #[test]
    fn notes_run_until_next_h2() {
        let notes = extract_notes(&doc()).expect("notes");
        let texts: Vec<_> = notes.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["Filming began in Quebec.", "Aired on tvN.", "Still inside notes."]);
        assert_eq!(notes[0].links[0].url, "https://wiki.test/Quebec");
        assert!(notes[1].links.is_empty());
    }

    #[test]
    fn absent_notes_are_none() {
        let doc = WikiDocument::parse("<h2>Notes</h2><p>none</p><h2>Cast</h2>", "https://wiki.test");
        assert_eq!(extract_notes(&doc), None);
        let doc = WikiDocument::parse("<h2>Cast</h2>", "https://wiki.test");
        assert_eq!(extract_notes(&doc), None);
    }
}
