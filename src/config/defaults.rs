//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn url() -> Option<String> {
        None
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }

    pub fn email() -> String {
        "user@noreply.papyr".into()
    }

    pub fn language() -> String {
        "en-US".into()
    }

    pub fn root() -> String {
        "/".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use super::super::SlugMode;
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn posts() -> String {
        "posts".into()
    }

    pub fn layout() -> String {
        "_layout.html".into()
    }

    pub fn excerpt_length() -> usize {
        210
    }

    pub fn slug() -> SlugMode {
        SlugMode::default()
    }
}
