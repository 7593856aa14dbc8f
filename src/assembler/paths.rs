//! Page path derivation.
//!
//! Maps a source file to its `pagePath`, `outputPath` and `layoutPath`
//! record fields.
//!
//! # Path Mapping Examples
//!
//! | pagePath                | root     | outputPath                   |
//! |-------------------------|----------|------------------------------|
//! | `posts/2020/x.md`       | `/`      | `posts/2020/x.html`          |
//! | `posts/2020/x.md`       | `/blog/` | `blog/posts/2020/x.html`     |
//! | `about.md`              | `/`      | `about.html`                 |
//! | `docs/README.md`        | `/`      | `docs/index.html`            |

use super::AssembleError;
use std::io;
use std::path::{Component, Path};

/// Compute the source-relative `pagePath` with forward slashes.
pub fn page_path(source: &Path, content_dir: &Path) -> Result<String, AssembleError> {
    let relative = source.strip_prefix(content_dir).map_err(|_| {
        AssembleError::ContentResolution {
            path: source.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not inside content directory {}", content_dir.display()),
            ),
        }
    })?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| AssembleError::ContentResolution {
                    path: source.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::InvalidData, "invalid path encoding"),
                })?;
                parts.push(part);
            }
            _ => continue,
        }
    }

    Ok(parts.join("/"))
}

/// Derive `outputPath` from `pagePath` and the URL root.
///
/// Pure and deterministic: same inputs always yield the same output. The
/// markdown extension becomes `.html`; a `README.md` becomes the `index.html`
/// of its directory; the root (minus its leading slash) is prefixed.
pub fn output_path(page_path: &str, root: &str) -> String {
    let (dir, file) = match page_path.rsplit_once('/') {
        Some((dir, file)) => (dir, file),
        None => ("", page_path),
    };

    let stem = file
        .rsplit_once('.')
        .map_or(file, |(stem, _ext)| stem);
    let file = if stem.eq_ignore_ascii_case("readme") {
        "index.html".to_owned()
    } else {
        format!("{stem}.html")
    };

    let mut result = root.trim_start_matches('/').to_owned();
    if !result.is_empty() && !result.ends_with('/') {
        result.push('/');
    }
    if !dir.is_empty() {
        result.push_str(dir);
        result.push('/');
    }
    result.push_str(&file);
    result
}

/// Resolve `layoutPath`: the nearest layout file, walking from the page's
/// directory up to the content root. Falls back to the root layout path even
/// when no layout file exists on disk.
pub fn layout_path(page_path: &str, content_dir: &Path, layout_name: &str) -> String {
    let mut dir = match page_path.rsplit_once('/') {
        Some((dir, _file)) => dir,
        None => "",
    };

    loop {
        let candidate = if dir.is_empty() {
            layout_name.to_owned()
        } else {
            format!("{dir}/{layout_name}")
        };
        if content_dir.join(&candidate).is_file() {
            return candidate;
        }
        match dir.rsplit_once('/') {
            Some((parent, _)) => dir = parent,
            None if !dir.is_empty() => dir = "",
            None => return layout_name.to_owned(),
        }
    }
}
