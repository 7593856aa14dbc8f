//! Site initialization module.
//!
//! Creates new site structure with default configuration.

use crate::config::SiteConfig;
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Default config filename
const CONFIG_FILE: &str = "papyr.toml";

/// Default site directory structure
const SITE_DIRS: &[&str] = &["content", "content/posts"];

/// Default root layout
const LAYOUT_FILE: &str = "content/_layout.html";
const LAYOUT_TEMPLATE: &str = "\
<!DOCTYPE html>
<html>
  <head><title>{{ title }}</title></head>
  <body>{{ content }}</body>
</html>
";

/// Starter pages written on init
const STARTER_PAGES: &[(&str, &str)] = &[
    (
        "content/README.md",
        "# Home\n\nWelcome to your new site.\n",
    ),
    (
        "content/posts/hello.md",
        "---\ntitle: Hello World\ndate: 2026/01/01\ncategories: [general]\ntags: [first]\n---\n\
         # Hello World\n\n## First section\n\nYour first post.\n",
    ),
];

/// Create a new site with default structure
pub fn new_site(config: &'static SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Safety check: if no name was provided (init in current dir),
    // the directory must be completely empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `papyr init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(root)?;
    init_default_config(root)?;
    init_starter_content(root)?;

    crate::log!("init"; "site created at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(root: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(root.join(CONFIG_FILE), content)?;
    Ok(())
}

/// Create site directory structure
fn init_site_structure(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `papyr init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Write the root layout and starter pages
fn init_starter_content(root: &Path) -> Result<()> {
    fs::write(root.join(LAYOUT_FILE), LAYOUT_TEMPLATE)?;
    for (rel, content) in STARTER_PAGES {
        let path = root.join(rel);
        fs::write(&path, content)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}
