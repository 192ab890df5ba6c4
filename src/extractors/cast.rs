// src/extractors/cast.rs
//! Cast rosters. Pages render cast in one of three shapes (portrait tables, link lists, and
//! a trailing "Additional Cast Members" list); each heading's shape is detected first and
//! then parsed by the matching variant.

// --- Imports ---
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use crate::extractors::document::{
    attr, child_elements, element_text, first_image_src, first_link, following_elements,
    heading_text, is_list, next_element_sibling, tag_name, WikiDocument,
};
use crate::utils::text::{last_path_segment, starts_with_ignore_case};
use crate::wiki::models::{CastEntry, CastGroup};

// --- CSS Selectors (Lazy Static) ---
static ROSTER_HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h2, h3, p").expect("Failed to compile ROSTER_HEADING_SELECTOR")
});

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("Failed to compile ROW_SELECTOR"));

static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("Failed to compile CELL_SELECTOR"));

static ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li").expect("Failed to compile ITEM_SELECTOR"));

// --- Markers ---
const CAST_HEADING: &str = "Cast";
const ADDITIONAL_MARKER: &str = "Additional Cast";
pub const ADDITIONAL_GROUP_TITLE: &str = "Additional Cast Members";

/// A heading candidate: its visible title and the element its content follows.
struct RosterHeading<'a> {
    title: String,
    anchor: ElementRef<'a>,
}

/// How the cast under one heading is rendered.
enum RosterShape<'a> {
    /// Portrait tables: actor links in the second row, names in the second-to-last row,
    /// character names in the last row, zipped by column.
    Tabular { tables: Vec<ElementRef<'a>> },
    /// `ul`/`ol` of "actor link - character" items.
    List { list: ElementRef<'a> },
    /// The closing "Additional Cast Members" list. Nothing after it is scanned.
    AdditionalMembers { list: Option<ElementRef<'a>> },
}

/// Actor cell data before validation; id and name may still be missing.
#[derive(Debug, Default)]
struct RawCastEntry {
    id: Option<String>,
    name: Option<String>,
    profile_url: Option<String>,
    image_url: Option<String>,
    character: Option<String>,
}

impl RawCastEntry {
    /// Entries lacking an id or a name are dropped here, at assembly time.
    fn into_entry(self) -> Option<CastEntry> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let name = self.name.filter(|name| !name.is_empty())?;
        Some(CastEntry {
            profile_url: self.profile_url.unwrap_or_default(),
            id,
            name,
            image_url: self.image_url,
            character: self.character.filter(|c| !c.is_empty()),
        })
    }
}

/// Every cast group on the page, in document order. Scanning starts at the "Cast" heading
/// and stops for good at the first "Additional Cast Members" marker or at the next `h2`
/// that is not itself a "Cast" heading.
pub fn extract_cast_groups(doc: &WikiDocument) -> Vec<CastGroup> {
    let mut groups = Vec::new();
    let mut in_cast = false;

    for heading in roster_headings(doc) {
        if starts_with_ignore_case(&heading.title, ADDITIONAL_MARKER) {
            let shape = RosterShape::AdditionalMembers {
                list: next_element_sibling(heading.anchor).filter(|el| is_list(*el)),
            };
            groups.push(parse_shape(doc, ADDITIONAL_GROUP_TITLE.to_string(), shape));
            tracing::debug!("Reached '{}' marker; roster scanning stops", ADDITIONAL_GROUP_TITLE);
            break;
        }

        let is_cast_heading = heading.title.trim_end_matches(':').trim().eq_ignore_ascii_case(CAST_HEADING);
        if !in_cast {
            if is_cast_heading {
                in_cast = true;
            } else {
                continue;
            }
        } else if !is_cast_heading && tag_name(heading.anchor) == "h2" {
            tracing::debug!("Cast section ends at '{}'", heading.title);
            break;
        }

        match detect_shape(heading.anchor) {
            Some(shape) => groups.push(parse_shape(doc, heading.title, shape)),
            None => tracing::trace!("No roster content under '{}'", heading.title),
        }
    }

    groups.retain(|group| !group.entries.is_empty());
    tracing::debug!("Extracted {} cast groups", groups.len());
    groups
}

/// `h2`/`h3` headings, plus paragraphs acting as headings: a bold label such as
/// `<p><b>Guest Appearance</b></p>`, or the additional-members marker paragraph.
fn roster_headings(doc: &WikiDocument) -> Vec<RosterHeading<'_>> {
    let mut headings = Vec::new();
    for element in doc.select(&ROSTER_HEADING_SELECTOR) {
        if tag_name(element) != "p" {
            headings.push(RosterHeading {
                title: heading_text(element),
                anchor: element,
            });
            continue;
        }

        let text = element_text(element);
        if starts_with_ignore_case(&text, ADDITIONAL_MARKER) {
            headings.push(RosterHeading {
                title: text,
                anchor: element,
            });
        } else if let Some(bold) = child_elements(element).find(|child| tag_name(*child) == "b") {
            let title = element_text(bold);
            if !title.is_empty() {
                headings.push(RosterHeading {
                    title,
                    anchor: element,
                });
            }
        }
    }
    headings
}

fn is_roster_boundary(element: ElementRef<'_>) -> bool {
    match tag_name(element) {
        "h1" | "h2" | "h3" | "h4" => true,
        "p" => child_elements(element).any(|child| tag_name(child) == "b"),
        _ => false,
    }
}

fn detect_shape(anchor: ElementRef<'_>) -> Option<RosterShape<'_>> {
    let next = next_element_sibling(anchor)?;
    if is_list(next) {
        return Some(RosterShape::List { list: next });
    }

    let tables: Vec<_> = following_elements(anchor)
        .take_while(|el| !is_roster_boundary(*el))
        .filter(|el| tag_name(*el) == "table")
        .collect();
    if tables.is_empty() {
        None
    } else {
        Some(RosterShape::Tabular { tables })
    }
}

fn parse_shape(doc: &WikiDocument, title: String, shape: RosterShape<'_>) -> CastGroup {
    let entries = match shape {
        RosterShape::Tabular { tables } => tables
            .into_iter()
            .flat_map(|table| parse_table(doc, table))
            .filter_map(RawCastEntry::into_entry)
            .collect(),
        RosterShape::List { list } => parse_list(doc, list),
        RosterShape::AdditionalMembers { list } => {
            list.map(|list| parse_list(doc, list)).unwrap_or_default()
        }
    };
    CastGroup { title, entries }
}

/// Zips the link, name and character rows of one portrait table by column index.
fn parse_table(doc: &WikiDocument, table: ElementRef<'_>) -> Vec<RawCastEntry> {
    let rows: Vec<ElementRef<'_>> = table.select(&ROW_SELECTOR).collect();
    if rows.len() < 3 {
        tracing::trace!("Skipping cast table with {} rows", rows.len());
        return Vec::new();
    }

    let link_cells = row_cells(rows[1]);
    let name_cells = row_cells(rows[rows.len() - 2]);
    let character_cells = row_cells(rows[rows.len() - 1]);

    link_cells
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let link = first_link(*cell);
            let href = link.and_then(|a| attr(a, "href"));

            let name = name_cells
                .get(index)
                .map(|c| element_text(*c))
                .filter(|n| !n.is_empty())
                .or_else(|| link.map(element_text).filter(|n| !n.is_empty()))
                .or_else(|| link.and_then(|a| attr(a, "title")).map(str::to_string));

            let image_url = first_image_src(*cell)
                .or_else(|| name_cells.get(index).and_then(|c| first_image_src(*c)))
                .map(|src| doc.absolute(src));

            RawCastEntry {
                id: href.and_then(last_path_segment),
                name,
                profile_url: href.map(|h| doc.absolute(h)),
                image_url,
                character: character_cells.get(index).map(|c| element_text(*c)),
            }
        })
        .collect()
}

fn row_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.select(&CELL_SELECTOR).collect()
}

/// "Actor link - character" items; the character is whatever follows the link text.
fn parse_list(doc: &WikiDocument, list: ElementRef<'_>) -> Vec<CastEntry> {
    list.select(&ITEM_SELECTOR)
        .filter_map(|item| {
            let link = first_link(item)?;
            let name = element_text(link);
            let href = attr(link, "href");

            let item_text = element_text(item);
            let remainder = item_text.replacen(&name, "", 1);
            let character = remainder
                .trim()
                .trim_start_matches(['-', '–'])
                .trim()
                .to_string();

            RawCastEntry {
                id: href.and_then(last_path_segment),
                name: Some(name),
                profile_url: href.map(|h| doc.absolute(h)),
                image_url: first_image_src(item).map(|src| doc.absolute(src)),
                character: Some(character),
            }
            .into_entry()
        })
        .collect()
}
