// src/wiki/models.rs
//! Typed records produced by the extraction engine. Everything here is built per request
//! and serialized at the boundary; nothing is cached or shared.

use std::fmt;

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Entity type derived from the discriminating keys of a profile section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityType {
    Drama,
    Movie,
    Person,
    Unknown,
}

impl EntityType {
    pub fn show_type(self) -> Option<ShowType> {
        match self {
            EntityType::Drama => Some(ShowType::Drama),
            EntityType::Movie => Some(ShowType::Movie),
            EntityType::Person | EntityType::Unknown => None,
        }
    }

    pub fn search_category(self) -> Option<SearchCategory> {
        match self {
            EntityType::Drama => Some(SearchCategory::Drama),
            EntityType::Movie => Some(SearchCategory::Movie),
            EntityType::Person => Some(SearchCategory::Person),
            EntityType::Unknown => None,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityType::Drama => "Drama",
            EntityType::Movie => "Movie",
            EntityType::Person => "Person",
            EntityType::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShowType {
    Drama,
    Movie,
}

impl ShowType {
    /// Listing name used by the schedule templates (`UpcomingDramas`, `UpcomingMovies`).
    pub fn listing_name(self) -> &'static str {
        match self {
            ShowType::Drama => "Dramas",
            ShowType::Movie => "Movies",
        }
    }
}

/// Category of a search hit. Hits whose category cannot be read are not typed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchCategory {
    Drama,
    Movie,
    Person,
}

/// A single profile value after coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Absent,
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Ordered label -> value mapping. Insertion order is document order; re-inserting an
/// existing label replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, FieldValue)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut FieldValue)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Calendar range parsed from a week/date descriptor. `start <= end` whenever `end` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Option<Self> {
        match end {
            Some(end) if end < start => None,
            _ => Some(Self { start, end }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub text: String,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Synopsis {
    pub original: String,
    pub translated: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    pub rating: Option<u8>,
    pub vote_count: Option<u32>,
    #[serde(rename = "type")]
    pub show_type: ShowType,
    #[serde(flatten)]
    pub fields: FieldMap,
    pub release_date_range: Option<DateRange>,
    pub synopsis: Synopsis,
    pub notes: Option<Vec<Note>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    pub id: Option<String>,
    pub title: String,
    pub url: Option<String>,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppearanceGroup {
    pub title: String,
    pub entries: Vec<Appearance>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub fields: FieldMap,
    pub rating: Option<u8>,
    pub vote_count: Option<u32>,
    pub biographies: Vec<String>,
    pub notes: Option<Vec<Note>>,
    pub appearances: Vec<AppearanceGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CastEntry {
    pub id: String,
    pub name: String,
    pub profile_url: String,
    pub image_url: Option<String>,
    pub character: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastGroup {
    pub title: String,
    pub entries: Vec<CastEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub category: SearchCategory,
    pub url: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub titles: Vec<SearchMatch>,
    pub texts: Vec<SearchMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEntry {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub show_type: ShowType,
    pub network: Option<String>,
    pub week: Option<String>,
    pub week_range: Option<DateRange>,
    pub image_url: Option<String>,
}

/// Featured show on the main page slider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowSummary {
    pub id: String,
    pub title: String,
    pub url: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: usize,
    pub size: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagedCollection<T> {
    pub data: Vec<T>,
    pub page: PageInfo,
}
