// src/extractors/document.rs

// --- Imports ---
use once_cell::sync::Lazy;
use scraper::{node::Node, ElementRef, Html, Selector};

use crate::utils::text::{absolute_url, clean_whitespace};

// --- CSS Selectors (Lazy Static) ---
static HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6").expect("Failed to compile HEADING_SELECTOR")
});

// MediaWiki wraps the visible heading text in a span next to the "[edit]" link
static HEADLINE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".mw-headline").expect("Failed to compile HEADLINE_SELECTOR")
});

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("Failed to compile LINK_SELECTOR"));

static IMAGE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("Failed to compile IMAGE_SELECTOR"));

/// A parsed wiki page plus the base URL its relative links resolve against.
/// Missing sections are empty selections, never errors.
pub struct WikiDocument {
    html: Html,
    base_url: String,
}

impl WikiDocument {
    pub fn parse(text: &str, base_url: &str) -> Self {
        Self {
            html: Html::parse_document(text),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// All elements matching `selector`, in document order.
    pub fn select<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html.select(selector)
    }

    pub fn first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    /// First `h1`..`h6` whose visible text contains `marker`.
    pub fn heading_containing(&self, marker: &str) -> Option<ElementRef<'_>> {
        self.html
            .select(&HEADING_SELECTOR)
            .find(|heading| heading_text(*heading).contains(marker))
    }

    /// First heading whose visible text equals `title`, ignoring case.
    pub fn heading_titled(&self, title: &str) -> Option<ElementRef<'_>> {
        self.html
            .select(&HEADING_SELECTOR)
            .find(|heading| heading_text(*heading).eq_ignore_ascii_case(title))
    }

    pub fn absolute(&self, href: &str) -> String {
        absolute_url(&self.base_url, href)
    }
}

// --- Element accessors ---

pub fn tag_name<'a>(element: ElementRef<'a>) -> &'a str {
    element.value().name()
}

pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name).map(str::trim).filter(|v| !v.is_empty())
}

pub fn is_list(element: ElementRef<'_>) -> bool {
    matches!(tag_name(element), "ul" | "ol")
}

/// Full visible text of an element, whitespace collapsed.
pub fn element_text(element: ElementRef<'_>) -> String {
    clean_whitespace(&element.text().collect::<String>())
}

/// Visible heading text without the "[edit]" decoration.
pub fn heading_text(element: ElementRef<'_>) -> String {
    match element.select(&HEADLINE_SELECTOR).next() {
        Some(headline) => element_text(headline),
        None => element_text(element),
    }
}

/// Text of the element's direct text-node children only; child elements are skipped.
pub fn own_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in element.children() {
        if let Node::Text(text) = child.value() {
            out.push_str(text);
        }
    }
    clean_whitespace(&out)
}

pub fn next_element_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Element siblings after `element`, skipping text and comment nodes.
pub fn following_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element.next_siblings().filter_map(ElementRef::wrap)
}

pub fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element.children().filter_map(ElementRef::wrap)
}

pub fn first_link(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.select(&LINK_SELECTOR).next()
}

pub fn links<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element.select(&LINK_SELECTOR)
}

pub fn first_image_src(element: ElementRef<'_>) -> Option<&str> {
    element
        .select(&IMAGE_SELECTOR)
        .next()
        .and_then(|img| attr(img, "src"))
}
