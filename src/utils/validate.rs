// src/utils/validate.rs
//! Input preconditions checked before any document is fetched.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::error::WikiError;
use crate::utils::text::format_title;

const MIN_ID_LENGTH: usize = 3;

// language[-Script][-REGION], e.g. "en", "id", "zh-Hant", "pt-BR", "es-419"
static LANGUAGE_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<lang>[A-Za-z]{2,3})(?:[-_][A-Za-z]{4})?(?:[-_](?:[A-Za-z]{2}|\d{3}))?$")
        .expect("Failed to compile LANGUAGE_TAG_RE")
});

// ISO 639-1 primary language subtags.
const ISO_639_1: &[&str] = &[
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg",
    "bh", "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv",
    "cy", "da", "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi",
    "fj", "fo", "fr", "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr",
    "ht", "hu", "hy", "hz", "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja",
    "jv", "ka", "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw",
    "ky", "la", "lb", "lg", "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml",
    "mn", "mr", "ms", "mt", "my", "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv",
    "ny", "oc", "oj", "om", "or", "os", "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro",
    "ru", "rw", "sa", "sc", "sd", "se", "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr",
    "ss", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti", "tk", "tl", "tn", "to", "tr",
    "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo", "wa", "wo", "xh", "yi",
    "yo", "za", "zh", "zu",
];

// Three-letter tags with no two-letter equivalent that translation backends accept.
const EXTRA_LANGUAGES: &[&str] = &["fil", "haw", "hmn", "ceb", "yue"];

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// A validated locale identifier, normalized to `ll[-Ssss][-RR]` casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn parse(raw: &str) -> Result<Self, WikiError> {
        let raw = raw.trim();
        let caps = LANGUAGE_TAG_RE
            .captures(raw)
            .ok_or_else(|| WikiError::BadRequest(format!("Invalid language code '{}'", raw)))?;

        let primary = caps["lang"].to_lowercase();
        if !ISO_639_1.contains(&primary.as_str()) && !EXTRA_LANGUAGES.contains(&primary.as_str()) {
            return Err(WikiError::BadRequest(format!("Invalid language code '{}'", raw)));
        }

        let normalized = raw
            .split(['-', '_'])
            .enumerate()
            .map(|(index, part)| match (index, part.len()) {
                (0, _) => part.to_lowercase(),
                (_, 4) => {
                    let lower = part.to_lowercase();
                    let mut chars = lower.chars();
                    chars
                        .next()
                        .map(|c| c.to_uppercase().chain(chars).collect::<String>())
                        .unwrap_or_default()
                }
                _ => part.to_uppercase(),
            })
            .collect::<Vec<_>>()
            .join("-");

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rejects ids that are too short and returns the wiki page id form of the input.
pub fn validate_id(raw: &str) -> Result<String, WikiError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_ID_LENGTH {
        return Err(WikiError::BadRequest(format!(
            "Id must be at least {} characters long",
            MIN_ID_LENGTH
        )));
    }
    Ok(format_title(trimmed))
}

/// Parses an optional language argument; absence means "no translation".
pub fn validate_language(raw: Option<&str>) -> Result<Option<LanguageCode>, WikiError> {
    raw.map(LanguageCode::parse).transpose()
}

/// English month name for a 1-based month number.
pub fn month_name(month: u32) -> Result<&'static str, WikiError> {
    match month {
        1..=12 => Ok(MONTHS[(month - 1) as usize]),
        0 => Err(WikiError::BadRequest("Month must be greater than 0".to_string())),
        _ => Err(WikiError::BadRequest("Month must be less than 13".to_string())),
    }
}

pub fn validate_page(page: usize) -> Result<usize, WikiError> {
    if page == 0 {
        return Err(WikiError::BadRequest("Page numbers start at 1".to_string()));
    }
    Ok(page)
}
