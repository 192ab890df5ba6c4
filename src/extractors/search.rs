// src/extractors/search.rs
//! Full-text search result pages: the "title matches" and "text matches" listing blocks,
//! plus the image-search listing used for poster lookups.

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::extractors::classify::classify_label;
use crate::extractors::document::{attr, element_text, first_image_src, next_element_sibling, tag_name, WikiDocument};
use crate::utils::text::{last_path_segment, starts_with_ignore_case, to_camel_case};
use crate::wiki::models::{SearchCategory, SearchMatch};

// --- CSS Selectors (Lazy Static) ---
static RESULT_LIST_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("ul.mw-search-results").expect("Failed to compile RESULT_LIST_SELECTOR")
});

static RESULT_ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li").expect("Failed to compile RESULT_ITEM_SELECTOR"));

static RESULT_HEADING_LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".mw-search-result-heading a")
        .expect("Failed to compile RESULT_HEADING_LINK_SELECTOR")
});

static SNIPPET_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".searchresult").expect("Failed to compile SNIPPET_SELECTOR"));

static IMAGE_RESULT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("ul.mw-search-results li").expect("Failed to compile IMAGE_RESULT_SELECTOR")
});

static TITLED_LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[title]").expect("Failed to compile TITLED_LINK_SELECTOR"));

// --- Regex Patterns ---
// `[[File:Goblin-p1.jpg|thumb]]` in the raw wikitext snippet
static FILE_REFERENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\[\s*File:([^|\]}]+)").expect("Failed to compile FILE_REFERENCE_RE")
});

// `'''Drama:'''`, `'''Name:'''`
static CATEGORY_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"'''\s*([^':]+?)\s*:?\s*'''").expect("Failed to compile CATEGORY_MARKER_RE")
});

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RE"));

pub const TITLE_MATCHES_MARKER: &str = "Page title matches";
pub const TEXT_MATCHES_MARKER: &str = "Page text matches";

/// A typed search hit whose image has not been resolved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub category: SearchCategory,
    pub url: String,
    /// File name referenced by the snippet, used as the image lookup query.
    pub image_query: Option<String>,
}

impl SearchHit {
    pub fn into_match(self, image_url: Option<String>) -> SearchMatch {
        SearchMatch {
            id: self.id,
            title: self.title,
            category: self.category,
            url: self.url,
            image_url,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHits {
    pub titles: Vec<SearchHit>,
    pub texts: Vec<SearchHit>,
}

/// Reads both listing blocks from one results page. Text hits whose title starts with the
/// query (ignoring case) are skipped since the title block already carries them.
pub fn extract_search(doc: &WikiDocument, query: &str) -> SearchHits {
    let titles = listing_items(doc, TITLE_MATCHES_MARKER)
        .into_iter()
        .filter_map(|item| parse_hit(doc, item))
        .collect();

    let texts = listing_items(doc, TEXT_MATCHES_MARKER)
        .into_iter()
        .filter_map(|item| parse_hit(doc, item))
        .filter(|hit| !starts_with_ignore_case(&hit.title, query))
        .collect();

    let hits = SearchHits { titles, texts };
    tracing::debug!(
        "Search '{}': {} title hits, {} text hits",
        query,
        hits.titles.len(),
        hits.texts.len()
    );
    hits
}

/// Items of the result list following the block heading; no heading means no items.
fn listing_items<'a>(doc: &'a WikiDocument, marker: &str) -> Vec<ElementRef<'a>> {
    let Some(heading) = doc.heading_containing(marker) else {
        tracing::debug!("No '{}' block on search page", marker);
        return Vec::new();
    };
    let Some(next) = next_element_sibling(heading) else {
        return Vec::new();
    };
    let list = if tag_name(next) == "ul" {
        Some(next)
    } else {
        next.select(&RESULT_LIST_SELECTOR).next()
    };
    list.map(|list| list.select(&RESULT_ITEM_SELECTOR).collect())
        .unwrap_or_default()
}

fn parse_hit(doc: &WikiDocument, item: ElementRef<'_>) -> Option<SearchHit> {
    let link = item.select(&RESULT_HEADING_LINK_SELECTOR).next()?;
    let title = element_text(link);
    let href = attr(link, "href")?;
    let id = last_path_segment(href)?;
    if title.is_empty() {
        return None;
    }

    let snippet = item
        .select(&SNIPPET_SELECTOR)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let Some(category) = snippet_category(&snippet) else {
        tracing::trace!("Untyped search hit '{}' dropped", title);
        return None;
    };

    Some(SearchHit {
        id,
        title,
        category,
        url: doc.absolute(href),
        image_query: snippet_file_reference(&snippet),
    })
}

/// First `'''Label:'''` marker in the snippet whose label is a discriminating key.
pub fn snippet_category(snippet: &str) -> Option<SearchCategory> {
    CATEGORY_MARKER_RE
        .captures_iter(snippet)
        .find_map(|caps| classify_label(&to_camel_case(&caps[1])))
        .and_then(|detected| detected.search_category())
}

pub fn snippet_file_reference(snippet: &str) -> Option<String> {
    let caps = FILE_REFERENCE_RE.captures(snippet)?;
    let name = WHITESPACE_RE.replace_all(caps[1].trim(), "_").to_string();
    (!name.is_empty()).then_some(name)
}

/// Image-search listing: the absolute `src` of the last result whose file title starts
/// with `File:<query>`.
pub fn parse_image_results(doc: &WikiDocument, query: &str) -> Option<String> {
    let prefix = format!("File:{}", query);
    doc.select(&IMAGE_RESULT_SELECTOR)
        .filter(|item| {
            item.select(&TITLED_LINK_SELECTOR)
                .next()
                .and_then(|a| attr(a, "title"))
                .is_some_and(|title| starts_with_ignore_case(title, &prefix))
        })
        .filter_map(|item| first_image_src(item).map(|src| doc.absolute(src)))
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"
        <div class="searchresults">
        <h2><span class="mw-headline">Page title matches</span></h2>
        <ul class="mw-search-results">
          <li>
            <div class="mw-search-result-heading"><a href="/Goblin_(Korean_Drama)" title="Goblin (Korean Drama)">Goblin (Korean Drama)</a></div>
            <div class="searchresult">[[File:Goblin-p1.jpg|thumb]] '''Drama:''' Goblin '''Revised romanization:''' Dokkaebi</div>
          </li>
          <li>
            <div class="mw-search-result-heading"><a href="/Goblin_Diary">Goblin Diary</a></div>
            <div class="searchresult">A page without profile markers</div>
          </li>
        </ul>
        <h2><span class="mw-headline">Page text matches</span></h2>
        <ul class="mw-search-results">
          <li>
            <div class="mw-search-result-heading"><a href="/goblin_(Korean_Drama)">goblin (Korean Drama)</a></div>
            <div class="searchresult">'''Drama:''' duplicate of a title hit</div>
          </li>
          <li>
            <div class="mw-search-result-heading"><a href="/Gong_Yoo">Gong Yoo</a></div>
            <div class="searchresult">'''Profile''' * '''Name:''' Gong Yoo [[File: Gong Yoo portrait.jpg]]</div>
          </li>
          <li>
            <div class="mw-search-result-heading"><a href="/Train_to_Busan">Train to Busan</a></div>
            <div class="searchresult">'''Movie:''' Train to Busan</div>
          </li>
        </ul>
        </div>
    "#;

    fn hits(query: &str) -> SearchHits {
        extract_search(&WikiDocument::parse(RESULTS_PAGE, "https://wiki.test"), query)
    }

    #[test]
    fn title_block_keeps_typed_hits() {
        let hits = hits("Goblin");
        assert_eq!(hits.titles.len(), 1);
        let goblin = &hits.titles[0];
        assert_eq!(goblin.id, "Goblin_(Korean_Drama)");
        assert_eq!(goblin.category, SearchCategory::Drama);
        assert_eq!(goblin.url, "https://wiki.test/Goblin_(Korean_Drama)");
        assert_eq!(goblin.image_query.as_deref(), Some("Goblin-p1.jpg"));
    }

    #[test]
    fn text_block_skips_hits_prefixed_by_query() {
        let hits = hits("GOBLIN");
        let titles: Vec<_> = hits.texts.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["Gong Yoo", "Train to Busan"]);
        assert_eq!(hits.texts[0].category, SearchCategory::Person);
        assert_eq!(hits.texts[0].image_query.as_deref(), Some("Gong_Yoo_portrait.jpg"));
        assert_eq!(hits.texts[1].category, SearchCategory::Movie);
        assert_eq!(hits.texts[1].image_query, None);
    }

    #[test]
    fn missing_blocks_are_empty() {
        let doc = WikiDocument::parse("<h2>There were no results</h2>", "https://wiki.test");
        assert_eq!(extract_search(&doc, "nothing"), SearchHits::default());
    }

    #[test]
    fn category_markers_use_the_classification_rules() {
        assert_eq!(snippet_category("'''TV Movie:''' Sunset"), Some(SearchCategory::Movie));
        assert_eq!(snippet_category("'''Genre:''' Romance"), None);
        assert_eq!(snippet_category("no markers"), None);
    }

    #[test]
    fn image_results_pick_last_prefixed_file() {
        let page = r#"
            <ul class="mw-search-results">
              <li><a href="/File:Goblin-p1.jpg" title="File:Goblin-p1.jpg"><img src="/images/a/a1/Goblin-p1.jpg"/></a></li>
              <li><a href="/File:Other.jpg" title="File:Other.jpg"><img src="/images/o/Other.jpg"/></a></li>
              <li><a href="/File:goblin-p2.jpg" title="File:goblin-p2.jpg"><img src="/images/b/b2/goblin-p2.jpg"/></a></li>
            </ul>
        "#;
        let doc = WikiDocument::parse(page, "https://wiki.test");
        assert_eq!(
            parse_image_results(&doc, "Goblin-p").as_deref(),
            Some("https://wiki.test/images/b/b2/goblin-p2.jpg")
        );
        assert_eq!(parse_image_results(&doc, "Missing"), None);
    }
}
