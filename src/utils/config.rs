// src/utils/config.rs
use chrono::{Datelike, Utc};
use chrono_tz::Tz;

pub const DEFAULT_BASE_URL: &str = "https://asianwiki.com";
pub const DEFAULT_PAGE_SIZE: usize = 5;
// Be polite to the wiki: one short pause before every page fetch.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 150;
pub const DEFAULT_TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
const WIKI_USER_AGENT: &str = concat!("wiki_extractor/", env!("CARGO_PKG_VERSION"));

/// Runtime settings shared by the collaborators and entry points.
#[derive(Debug, Clone)]
pub struct WikiConfig {
    pub base_url: String,
    pub page_size: usize,
    /// Timezone the site's schedules are written in; decides the implied "current year".
    pub source_timezone: Tz,
    pub user_agent: String,
    pub request_delay_ms: u64,
    pub translate_endpoint: String,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            source_timezone: chrono_tz::Asia::Jakarta,
            user_agent: WIKI_USER_AGENT.to_string(),
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            translate_endpoint: DEFAULT_TRANSLATE_ENDPOINT.to_string(),
        }
    }
}

impl WikiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Year used for schedule descriptors that omit one.
    pub fn current_year(&self) -> i32 {
        Utc::now().with_timezone(&self.source_timezone).year()
    }

    pub fn current_month(&self) -> u32 {
        Utc::now().with_timezone(&self.source_timezone).month()
    }

    pub fn page_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    pub fn main_page_url(&self) -> String {
        self.page_url("Main_Page")
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/index.php?fulltext=Search&search={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    pub fn image_search_url(&self, query: &str) -> String {
        format!(
            "{}/index.php?profile=images&fulltext=Search&search={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    /// Schedule template page, e.g. `Template:UpcomingDramasApril`.
    pub fn upcoming_url(&self, listing: &str, month: &str) -> String {
        self.page_url(&format!("Template:Upcoming{}{}", listing, month))
    }
}
