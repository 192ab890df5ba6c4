// src/extractors/person.rs
//! Filmography sections of a person page.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use crate::extractors::document::{attr, element_text, first_link, following_elements, heading_text, tag_name, WikiDocument};
use crate::utils::text::{clean_whitespace, last_path_segment};
use crate::wiki::models::{Appearance, AppearanceGroup};

static SECTION_HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2").expect("Failed to compile SECTION_HEADING_SELECTOR"));

static ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li").expect("Failed to compile ITEM_SELECTOR"));

pub const FILMOGRAPHY_SECTIONS: &[&str] = &["Movies", "Drama Series", "TV Movies", "TV Shows"];

/// One group per filmography heading present on the page, in page order.
/// Headings without any titled item are left out.
pub fn extract_appearances(doc: &WikiDocument) -> Vec<AppearanceGroup> {
    let groups: Vec<AppearanceGroup> = doc
        .select(&SECTION_HEADING_SELECTOR)
        .filter_map(|heading| {
            let title = heading_text(heading);
            let section = FILMOGRAPHY_SECTIONS
                .iter()
                .find(|section| section.eq_ignore_ascii_case(&title))?;

            let entries: Vec<Appearance> = following_elements(heading)
                .take_while(|el| tag_name(*el) != "h2")
                .filter(|el| tag_name(*el) == "ul")
                .flat_map(|list| list.select(&ITEM_SELECTOR).collect::<Vec<_>>())
                .filter_map(|item| parse_appearance(doc, item))
                .collect();

            (!entries.is_empty()).then(|| AppearanceGroup {
                title: section.to_string(),
                entries,
            })
        })
        .collect();

    tracing::debug!("Extracted {} filmography groups", groups.len());
    groups
}

fn parse_appearance(doc: &WikiDocument, item: ElementRef<'_>) -> Option<Appearance> {
    let link = first_link(item)?;
    let title = element_text(link);
    if title.is_empty() {
        return None;
    }
    let href = attr(link, "href");

    // "2016 | Goblin | tvN" -> "2016 | tvN"
    let detail = clean_whitespace(&element_text(item).replacen(&format!("{} |", title), "", 1));

    Some(Appearance {
        id: href.and_then(last_path_segment),
        url: href.map(|h| doc.absolute(h)),
        title,
        detail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERSON_PAGE: &str = r#"
        <h2><span class="mw-headline">Profile</span></h2>
        <ul><li><b>Name:</b> Gong Yoo</li></ul>
        <h2><span class="mw-headline">Drama Series</span></h2>
        <ul>
          <li>2016 | <a href="/Goblin_(Korean_Drama)">Goblin</a> | tvN / Kim Shin</li>
          <li>Untitled project</li>
        </ul>
        <h2>Movies</h2>
        <p>Lead roles</p>
        <ul><li><a href="/Train_to_Busan">Train to Busan</a> | 2016</li></ul>
        <ul><li><a>Unlinked Short</a> | 2010</li></ul>
        <h2>TV Shows</h2>
        <ul><li>No links here</li></ul>
        <h2>Awards</h2>
        <ul><li><a href="/Baeksang">Baeksang</a></li></ul>
    "#;

    #[test]
    fn filmography_groups_in_page_order() {
        let doc = WikiDocument::parse(PERSON_PAGE, "https://wiki.test");
        let groups = extract_appearances(&doc);
        let titles: Vec<_> = groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Drama Series", "Movies"]);

        let goblin = &groups[0].entries[0];
        assert_eq!(goblin.id.as_deref(), Some("Goblin_(Korean_Drama)"));
        assert_eq!(goblin.url.as_deref(), Some("https://wiki.test/Goblin_(Korean_Drama)"));
        assert_eq!(goblin.detail, "2016 | tvN / Kim Shin");
        assert_eq!(groups[0].entries.len(), 1);
    }

    #[test]
    fn lists_after_paragraphs_are_still_collected() {
        let doc = WikiDocument::parse(PERSON_PAGE, "https://wiki.test");
        let movies = &extract_appearances(&doc)[1];
        assert_eq!(movies.entries.len(), 2);
        assert_eq!(movies.entries[0].detail, "2016");
        assert_eq!(movies.entries[1].id, None);
        assert_eq!(movies.entries[1].title, "Unlinked Short");
    }
}
