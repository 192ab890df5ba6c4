// src/utils/text.rs
//! Free-standing text helpers shared by the extractors.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RUN_RE"));

/// Normalizes a profile label into a single lower-camel token.
///
/// `"Release Date:"` becomes `"releaseDate"`, `"TV Movie"` becomes `"tvMovie"`.
pub fn to_camel_case(label: &str) -> String {
    let lowered: String = label
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    let mut out = String::with_capacity(lowered.len());
    for (index, word) in lowered.split_whitespace().enumerate() {
        if index == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize_first(word));
        }
    }
    out
}

/// Collapses whitespace runs into single spaces and trims both ends.
pub fn clean_whitespace(text: &str) -> String {
    WHITESPACE_RUN_RE.replace_all(text, " ").trim().to_string()
}

/// Keeps ASCII letters, digits and spaces.
pub fn only_alphanumeric(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    text.to_lowercase().starts_with(&prefix.to_lowercase())
}

pub fn contains_ignore_case(text: &str, needle: &str) -> bool {
    text.to_lowercase().contains(&needle.to_lowercase())
}

/// Turns user input such as `"goblin (korean drama)"` into a page id
/// (`"Goblin_(Korean_Drama)"`). Percent-escapes are decoded first.
pub fn format_title(raw: &str) -> String {
    let trimmed = raw.trim();
    let decoded = urlencoding::decode(trimmed)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| trimmed.to_string());

    decoded
        .split(' ')
        .map(|word| match word.strip_prefix('(') {
            Some(rest) => format!("({}", capitalize_first(rest)),
            None => capitalize_first(word),
        })
        .collect::<Vec<_>>()
        .join("_")
}

/// Last non-empty `/` segment of a link target, used as the page id.
pub fn last_path_segment(href: &str) -> Option<String> {
    href.trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Resolves a site-relative link target against the wiki base URL.
pub fn absolute_url(base_url: &str, href: &str) -> String {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if let Some(rest) = href.strip_prefix("//") {
        format!("https://{}", rest)
    } else if href.starts_with('/') {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    } else {
        format!("{}/{}", base_url.trim_end_matches('/'), href)
    }
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_labels() {
        assert_eq!(to_camel_case("Release Date:"), "releaseDate");
        assert_eq!(to_camel_case("TV Movie"), "tvMovie");
        assert_eq!(to_camel_case("Drama"), "drama");
        assert_eq!(to_camel_case("  Revised   Romanization "), "revisedRomanization");
        assert_eq!(to_camel_case("Hangul/Japanese"), "hanguljapanese");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn whitespace_is_collapsed() {
        assert_eq!(clean_whitespace("  a \n\t b  c "), "a b c");
    }

    #[test]
    fn alphanumeric_filter_keeps_spaces() {
        assert_eq!(only_alphanumeric("Goblin: The Lonely & Great God!"), "Goblin The Lonely  Great God");
    }

    #[test]
    fn prefix_checks() {
        assert!(starts_with_ignore_case("Goblin (Korean Drama)", "goblin"));
        assert!(!starts_with_ignore_case("Goblin", ""));
        assert!(contains_ignore_case("tvMovie", "MOVIE"));
    }

    #[test]
    fn titles_become_page_ids() {
        assert_eq!(format_title("goblin (korean drama)"), "Goblin_(Korean_Drama)");
        assert_eq!(format_title("Lee%20Min-Ho"), "Lee_Min-Ho");
        assert_eq!(format_title(" Kim_Go-Eun "), "Kim_Go-Eun");
    }

    #[test]
    fn path_segments_and_urls() {
        assert_eq!(last_path_segment("/Lee_Min-Ho").as_deref(), Some("Lee_Min-Ho"));
        assert_eq!(last_path_segment("https://asianwiki.com/Goblin/").as_deref(), Some("Goblin"));
        assert_eq!(last_path_segment(""), None);

        let base = "https://asianwiki.com";
        assert_eq!(absolute_url(base, "/Goblin"), "https://asianwiki.com/Goblin");
        assert_eq!(absolute_url(base, "https://x.org/a"), "https://x.org/a");
        assert_eq!(absolute_url("https://asianwiki.com/", "Goblin"), "https://asianwiki.com/Goblin");
    }
}
