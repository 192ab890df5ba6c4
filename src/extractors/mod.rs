// src/extractors/mod.rs
pub mod cast;
pub mod classify;
pub mod date_range;
pub mod document;
pub mod paging;
pub mod person;
pub mod profile;
pub mod search;
pub mod slider;
pub mod synopsis;
pub mod upcoming;

