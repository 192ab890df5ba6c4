// src/extractors/profile.rs
//! Profile section parsing: label/value list items into a normalized [`FieldMap`].

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::extractors::document::{
    attr, element_text, following_elements, is_list, links, own_text, tag_name, WikiDocument,
};
use crate::utils::error::WikiError;
use crate::utils::text::{clean_whitespace, contains_ignore_case, to_camel_case};
use crate::utils::validate::LanguageCode;
use crate::wiki::models::{FieldMap, FieldValue};
use crate::wiki::translate::Translator;

// --- CSS Selectors (Lazy Static) ---
static LIST_ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("ul li").expect("Failed to compile LIST_ITEM_SELECTOR"));

static NESTED_ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li").expect("Failed to compile NESTED_ITEM_SELECTOR"));

static LABEL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("b").expect("Failed to compile LABEL_SELECTOR"));

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("Failed to compile TITLE_SELECTOR"));

static POSTER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".thumb.tright .thumbimage").expect("Failed to compile POSTER_SELECTOR")
});

static RATING_WIDGET_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("#w4g_rb_area-1").expect("Failed to compile RATING_WIDGET_SELECTOR")
});

// --- Regex Patterns ---
static RATING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)/100").expect("Failed to compile RATING_RE"));
static VOTES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s+votes").expect("Failed to compile VOTES_RE"));
static LEADING_INT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("Failed to compile LEADING_INT_RE"));

const PROFILE_HEADING: &str = "Profile";

/// Labels whose values are counts.
const INTEGER_FIELDS: &[&str] = &["episodes"];
/// Labels whose values are passed through translation when a language is requested.
const LOCALIZED_FIELDS: &[&str] = &["language", "country"];
const BIRTHDATE_FIELD: &str = "birthdate";

/// Title, poster and rating widget shared by show and person pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageHeader {
    pub title: String,
    pub image_url: Option<String>,
    pub rating: Option<u8>,
    pub vote_count: Option<u32>,
}

pub fn extract_header(doc: &WikiDocument) -> PageHeader {
    let title = doc.first(&TITLE_SELECTOR).map(element_text).unwrap_or_default();

    let image_url = doc
        .first(&POSTER_SELECTOR)
        .and_then(|img| attr(img, "src"))
        .map(|src| doc.absolute(src));

    let widget_text = doc
        .first(&RATING_WIDGET_SELECTOR)
        .map(element_text)
        .unwrap_or_default();

    let rating = RATING_RE
        .captures(&widget_text)
        .and_then(|caps| caps[1].parse::<u8>().ok())
        .filter(|r| *r <= 100);
    let vote_count = VOTES_RE
        .captures(&widget_text)
        .and_then(|caps| caps[1].parse::<u32>().ok());

    PageHeader {
        title,
        image_url,
        rating,
        vote_count,
    }
}

/// List items of the profile section: the lists between the "Profile" heading and the
/// next heading of the same level. Pages without that heading fall back to every `ul li`.
pub fn profile_items(doc: &WikiDocument) -> Vec<ElementRef<'_>> {
    let Some(heading) = doc.heading_titled(PROFILE_HEADING) else {
        tracing::debug!("No '{}' heading; scanning every list item", PROFILE_HEADING);
        return doc.select(&LIST_ITEM_SELECTOR).collect();
    };

    let level = tag_name(heading);
    let mut items = Vec::new();
    for sibling in following_elements(heading) {
        if tag_name(sibling) == level {
            break;
        }
        if is_list(sibling) {
            items.extend(sibling.select(&NESTED_ITEM_SELECTOR));
        } else {
            items.extend(sibling.select(&LIST_ITEM_SELECTOR));
        }
    }
    items
}

/// Splits one list item into its normalized label and raw value text.
/// Items with an empty label or value are skipped.
pub fn split_item(item: ElementRef<'_>) -> Option<(String, String)> {
    let raw_label: String = item
        .select(&LABEL_SELECTOR)
        .map(|b| b.text().collect::<String>())
        .collect();
    let label = raw_label.replace(':', "");
    let label = label.trim();

    // Link lists (genres, networks, directors) override the bare remainder
    let link_text = links(item)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let value = if link_text.is_empty() {
        own_text(item)
    } else {
        link_text
    };

    if label.is_empty() || value.is_empty() {
        return None;
    }

    let key = to_camel_case(label);
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Builds the field map for a set of profile items, applying integer coercions.
pub fn extract_fields<'a>(items: impl IntoIterator<Item = ElementRef<'a>>) -> FieldMap {
    let mut fields = FieldMap::new();
    for item in items {
        let Some((key, value)) = split_item(item) else {
            continue;
        };
        let value = if INTEGER_FIELDS.contains(&key.as_str()) {
            parse_leading_int(&value).map_or(FieldValue::Absent, FieldValue::Integer)
        } else {
            FieldValue::Text(value)
        };
        fields.insert(key, value);
    }
    tracing::debug!("Extracted {} profile fields", fields.len());
    fields
}

/// Rewrites a `Month D, YYYY` birthdate as ISO `YYYY-MM-DD`; other shapes stay as written.
pub fn coerce_birthdate(fields: &mut FieldMap) {
    let Some(text) = fields.get(BIRTHDATE_FIELD).and_then(FieldValue::as_text) else {
        return;
    };
    if let Ok(date) = NaiveDate::parse_from_str(text.trim(), "%B %d, %Y") {
        fields.insert(BIRTHDATE_FIELD, FieldValue::Text(date.format("%Y-%m-%d").to_string()));
    }
}

/// Translates the localized fields in place. Runs sequentially; the first failure aborts.
pub async fn translate_fields(
    fields: &mut FieldMap,
    translator: &dyn Translator,
    language: &LanguageCode,
) -> Result<(), WikiError> {
    for (key, value) in fields.iter_mut() {
        if !LOCALIZED_FIELDS.contains(&key) {
            continue;
        }
        if let FieldValue::Text(text) = value {
            let translated = translator.translate(text, language).await?;
            *text = clean_whitespace(&translated);
        }
    }
    Ok(())
}

/// Renames the title-like labels of a show page to stable keys and tidies text values.
pub fn normalize_show_fields(fields: &mut FieldMap) {
    const RENAMES: &[(&[&str], &str)] = &[
        (&["drama", "movie"], "alternativeTitle"),
        (&["hangul", "japanese"], "nativeTitle"),
        (&["romaji", "revisedRomanization"], "latinTitle"),
    ];

    let keys: Vec<String> = fields.keys().map(str::to_string).collect();
    for key in keys {
        let target = RENAMES.iter().find_map(|(needles, target)| {
            needles
                .iter()
                .any(|needle| contains_ignore_case(&key, needle))
                .then_some(*target)
        });
        if let Some(target) = target {
            if key != target {
                if let Some(value) = fields.remove(&key) {
                    fields.insert(target, value);
                }
            }
        }
    }

    for (_, value) in fields.iter_mut() {
        if let FieldValue::Text(text) = value {
            *text = clean_whitespace(text);
        }
    }
}

fn parse_leading_int(text: &str) -> Option<i64> {
    LEADING_INT_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<i64>().ok())
}
