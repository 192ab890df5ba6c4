// src/main.rs
mod extractors;
mod service;
mod utils;
mod wiki;

use std::io::Write;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use service::WikiService;
use utils::config::{WikiConfig, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_DELAY_MS};
use utils::{AppError, WikiError};
use wiki::models::ShowType;

/// Command Line Interface for the AsianWiki extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the wiki
    #[arg(long, global = true, env = "ASIANWIKI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Entries per page for paginated listings
    #[arg(long, global = true, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Pause before every page fetch, in milliseconds
    #[arg(long, global = true, default_value_t = DEFAULT_REQUEST_DELAY_MS)]
    delay_ms: u64,

    /// Debug-level logging (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drama or movie details
    Show {
        id: String,
        /// Translate localized fields and the synopsis into this language
        #[arg(short, long)]
        lang: Option<String>,
    },
    /// Cast groups of a drama or movie
    Casts { id: String },
    /// Person profile and filmography
    Person {
        id: String,
        #[arg(short, long)]
        lang: Option<String>,
    },
    /// Full-text search
    Search { query: String },
    /// Upcoming schedule for a month
    Upcoming {
        /// Month number (1-12); defaults to the current month in the wiki's timezone
        #[arg(short, long)]
        month: Option<u32>,
        /// Only one listing; both when omitted
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Featured shows on the main page
    Slider,
    /// Detected page type
    Type { id: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Drama,
    Movie,
}

impl From<KindArg> for ShowType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Drama => ShowType::Drama,
            KindArg::Movie => ShowType::Movie,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.verbose);
    tracing::debug!("Starting with args: {:?}", args);

    // 3. Build configuration and collaborators
    if args.page_size == 0 {
        return Err(AppError::Config("--page-size must be at least 1".to_string()));
    }
    let config = WikiConfig {
        page_size: args.page_size,
        request_delay_ms: args.delay_ms,
        ..WikiConfig::default()
    }
    .with_base_url(args.base_url.as_str());
    let service = WikiService::from_config(config)?;

    // 4. Run the requested command
    match run(&service, args.command).await {
        Ok(json) => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
            Ok(())
        }
        Err(AppError::Wiki(err)) => {
            tracing::error!("Request failed ({}): {}", err.status_code(), err);
            Err(AppError::Wiki(err))
        }
        Err(err) => Err(err),
    }
}

async fn run(service: &WikiService, command: Command) -> Result<String, AppError> {
    match command {
        Command::Show { id, lang } => to_json(service.show_detail(&id, lang.as_deref()).await),
        Command::Casts { id } => to_json(service.show_casts(&id).await),
        Command::Person { id, lang } => to_json(service.person_detail(&id, lang.as_deref()).await),
        Command::Search { query } => to_json(service.search(&query).await),
        Command::Upcoming { month, kind, page } => {
            let month = month.unwrap_or_else(|| service.config().current_month());
            to_json(service.upcoming(month, kind.map(ShowType::from), page).await)
        }
        Command::Slider => to_json(service.slider().await),
        Command::Type { id } => to_json(service.content_type(&id).await),
    }
}

fn to_json<T: Serialize>(result: Result<T, WikiError>) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(&result?)?)
}
