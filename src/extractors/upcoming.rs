// src/extractors/upcoming.rs
//! Monthly schedule templates (`Template:UpcomingDramas<Month>`, `Template:UpcomingMovies<Month>`).
//!
//! Each template renders two half-width columns. A column holds one outer `ul` whose bare
//! text nodes are week descriptors and whose nested lists hold the titles airing that week:
//!
//! ```text
//! <div style="width: 50%"><ul>
//!   "April 1-7"
//!   <ul><li><a href="/Goblin">Goblin</a> (tvN)</li></ul>
//! </ul></div>
//! ```

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{node::Node, ElementRef, Selector};

use crate::extractors::date_range::parse_date_range_in_year;
use crate::extractors::document::{attr, child_elements, element_text, first_link, tag_name, WikiDocument};
use crate::utils::text::{clean_whitespace, last_path_segment, only_alphanumeric};
use crate::wiki::models::{ShowType, UpcomingEntry};

// --- CSS Selectors (Lazy Static) ---
static COLUMN_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"#mw-content-text > div[style*="width: 50%"]"#)
        .expect("Failed to compile COLUMN_SELECTOR")
});

static ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li").expect("Failed to compile ITEM_SELECTOR"));

// --- Regex Patterns ---
static NETWORK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^()]+)\)$").expect("Failed to compile NETWORK_RE"));

/// Suffix the wiki uses for poster files (`Goblin-p1.jpg`).
const POSTER_SUFFIX: &str = "-p";

/// Every scheduled title of one listing, in column order. Year-less week descriptors
/// resolve against `current_year`. The last seen week carries over into the next column.
pub fn extract_upcoming(doc: &WikiDocument, show_type: ShowType, current_year: i32) -> Vec<UpcomingEntry> {
    let mut entries = Vec::new();
    let mut current_week: Option<String> = None;

    for column in doc.select(&COLUMN_SELECTOR) {
        let Some(outer) = child_elements(column).find(|child| tag_name(*child) == "ul") else {
            continue;
        };

        for node in outer.children() {
            match node.value() {
                Node::Text(text) => {
                    let week = text.trim().trim_matches('"').trim();
                    if !week.is_empty() {
                        current_week = Some(week.to_string());
                    }
                }
                Node::Element(_) => {
                    let Some(list) = ElementRef::wrap(node).filter(|el| tag_name(*el) == "ul") else {
                        continue;
                    };
                    for item in list.select(&ITEM_SELECTOR) {
                        if let Some(entry) =
                            parse_entry(doc, item, show_type, current_week.as_deref(), current_year)
                        {
                            entries.push(entry);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    tracing::debug!("Extracted {} upcoming {:?} entries", entries.len(), show_type);
    entries
}

fn parse_entry(
    doc: &WikiDocument,
    item: ElementRef<'_>,
    show_type: ShowType,
    week: Option<&str>,
    current_year: i32,
) -> Option<UpcomingEntry> {
    let link = first_link(item)?;
    let href = attr(link, "href")?;
    let id = last_path_segment(href)?;
    let title = clean_whitespace(&element_text(link).replace('_', " "));
    if title.is_empty() {
        return None;
    }

    let item_text = element_text(item);
    let network = NETWORK_RE
        .captures(&item_text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|network| !network.is_empty());

    Some(UpcomingEntry {
        id,
        title,
        url: doc.absolute(href),
        show_type,
        network,
        week: week.map(str::to_string),
        week_range: week.and_then(|w| parse_date_range_in_year(w, current_year)),
        image_url: None,
    })
}

/// Image lookup query for a scheduled title: its alphanumeric form plus the poster suffix.
pub fn poster_query(title: &str) -> String {
    format!("{}{}", only_alphanumeric(title), POSTER_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const TEMPLATE: &str = r#"
        <div id="mw-content-text">
          <div style="float: left; width: 50%;">
            <ul>
              "April 1-7"
              <ul>
                <li><a href="/Goblin_(Korean_Drama)">Goblin_(Korean Drama)</a> (tvN)</li>
                <li><a href="/Signal">Signal</a></li>
                <li>Untitled project (KBS2)</li>
              </ul>
              April 8-14
              <ul><li><a href="/Kingdom">Kingdom</a> (Netflix)</li></ul>
            </ul>
          </div>
          <div style="float: right; width: 50%;">
            <ul>
              <ul><li><a href="/Carried_Over">Carried Over</a></li></ul>
              TBA
              <ul><li><a href="/Someday">Someday</a></li></ul>
            </ul>
          </div>
          <div style="width: 100%;"><ul><ul><li><a href="/Footer">Footer</a></li></ul></ul></div>
        </div>
    "#;

    fn entries() -> Vec<UpcomingEntry> {
        extract_upcoming(&WikiDocument::parse(TEMPLATE, "https://wiki.test"), ShowType::Drama, 2026)
    }

    #[test]
    fn entries_carry_their_week() {
        let entries = entries();
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["Goblin_(Korean_Drama)", "Signal", "Kingdom", "Carried_Over", "Someday"]);

        let goblin = &entries[0];
        assert_eq!(goblin.title, "Goblin (Korean Drama)");
        assert_eq!(goblin.url, "https://wiki.test/Goblin_(Korean_Drama)");
        assert_eq!(goblin.network.as_deref(), Some("tvN"));
        assert_eq!(goblin.week.as_deref(), Some("April 1-7"));
        let range = goblin.week_range.unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2026, 4, 7));
        assert_eq!(entries[1].network, None);
    }

    #[test]
    fn week_carries_across_columns() {
        let entries = entries();
        assert_eq!(entries[3].week.as_deref(), Some("April 8-14"));
        // unparseable descriptors keep their text but have no range
        assert_eq!(entries[4].week.as_deref(), Some("TBA"));
        assert_eq!(entries[4].week_range, None);
        assert!(entries.iter().all(|e| e.show_type == ShowType::Drama && e.image_url.is_none()));
    }

    #[test]
    fn poster_query_strips_punctuation() {
        assert_eq!(poster_query("Goblin (Korean Drama)"), "Goblin Korean Drama-p");
        assert_eq!(poster_query("Mr. Sunshine"), "Mr Sunshine-p");
    }
}
