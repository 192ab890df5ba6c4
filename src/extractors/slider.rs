// src/extractors/slider.rs
use once_cell::sync::Lazy;
use scraper::Selector;

use crate::extractors::document::{attr, first_link, WikiDocument};
use crate::utils::text::last_path_segment;
use crate::wiki::models::ShowSummary;

static SLIDE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".amazingslider-slides li").expect("Failed to compile SLIDE_SELECTOR")
});

static SLIDE_IMAGE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("Failed to compile SLIDE_IMAGE_SELECTOR"));

/// Featured shows of the main page slider. The image `alt` is the title; slides missing
/// a title, link, id or image are skipped.
pub fn extract_slider(doc: &WikiDocument) -> Vec<ShowSummary> {
    doc.select(&SLIDE_SELECTOR)
        .filter_map(|slide| {
            let image = slide.select(&SLIDE_IMAGE_SELECTOR).next()?;
            let title = attr(image, "alt")?;
            let src = attr(image, "src")?;
            let href = first_link(slide).and_then(|a| attr(a, "href"))?;
            let id = last_path_segment(href)?;

            Some(ShowSummary {
                id,
                title: title.to_string(),
                url: doc.absolute(href),
                image_url: doc.absolute(src),
            })
        })
        .collect()
}
