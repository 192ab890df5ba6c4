// src/extractors/classify.rs
//! Entity type detection from the discriminating keys of a profile section.

use crate::utils::error::WikiError;
use crate::wiki::models::{EntityType, FieldMap, ShowType};

/// Ordered (normalized label, outcome) rules. Keys are scanned in document order and the
/// first key with a rule decides the type.
const CLASSIFICATION_RULES: &[(&str, EntityType)] = &[
    ("drama", EntityType::Drama),
    ("movie", EntityType::Movie),
    ("tvMovie", EntityType::Movie),
    ("name", EntityType::Person),
];

/// Outcome for a single normalized label, if it is a discriminating key.
pub fn classify_label(key: &str) -> Option<EntityType> {
    CLASSIFICATION_RULES
        .iter()
        .find(|(label, _)| *label == key)
        .map(|(_, outcome)| *outcome)
}

pub fn classify(fields: &FieldMap) -> EntityType {
    let detected = fields
        .keys()
        .find_map(classify_label)
        .unwrap_or(EntityType::Unknown);
    tracing::debug!("Classified page as {}", detected);
    detected
}

/// Show-only callers accept Drama and Movie.
pub fn require_show(detected: EntityType) -> Result<ShowType, WikiError> {
    detected.show_type().ok_or(WikiError::UnsupportedType {
        detected,
        expected: "Drama and Movie",
    })
}

/// Person-only callers accept Person.
pub fn require_person(detected: EntityType) -> Result<(), WikiError> {
    match detected {
        EntityType::Person => Ok(()),
        other => Err(WikiError::UnsupportedType {
            detected: other,
            expected: "Person",
        }),
    }
}
