// src/wiki/mod.rs
pub mod client;
pub mod images;
pub mod models;
pub mod translate;

pub use client::{DocumentFetcher, HttpFetcher};
pub use images::{ImageLookup, WikiImageLookup};
pub use translate::{GoogleTranslator, Translator};
