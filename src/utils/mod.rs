//! Shared helpers: dates, slugs, text processing.

pub mod date;
pub mod slug;
pub mod text;
