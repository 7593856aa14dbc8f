//! Site configuration management for `papyr.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                         |
//! |-------------|-------------------------------------------------|
//! | `[site]`    | Site metadata (title, author, url, root, head)  |
//! | `[build]`   | Content/output paths, posts dir, excerpt, slug  |
//! | `[extra]`   | User-defined custom fields                      |
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "My Blog"
//! description = "A personal blog"
//! url = "https://example.com"
//! root = "/"
//!
//! [build]
//! content = "content"
//! output = "public"
//!
//! [extra]
//! analytics_id = "UA-12345"
//! ```

mod build;
pub mod defaults;
mod error;
mod merge;
mod site;

// Re-export public types used by other modules
pub use build::SlugMode;
pub use error::ConfigError;

// Internal imports used in this module
use build::BuildSection;
use site::SiteSection;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing papyr.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub site: SiteSection,

    /// Build settings
    #[serde(default)]
    pub build: BuildSection,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Get CLI arguments reference
    pub fn get_cli(&self) -> &'static Cli {
        self.cli.unwrap()
    }

    /// Prefix (with trailing `/`) under which pages count as blog posts.
    pub fn posts_prefix(&self) -> String {
        format!("{}/", self.build.posts.trim_end_matches('/'))
    }

    /// The merged `config` object attached to every page record.
    ///
    /// Base map holding `root`, overlaid with `[site]`, overlaid with
    /// `[extra]`. Later keys override earlier ones.
    pub fn merged(&self) -> Result<Map<String, Value>, ConfigError> {
        merge::merged(self)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        // Determine the final root path based on command
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => {
                let base = cli
                    .root
                    .as_ref()
                    .cloned()
                    .unwrap_or_else(|| self.get_root().to_owned());
                base.join(name)
            }
            _ => cli
                .root
                .as_ref()
                .cloned()
                .unwrap_or_else(|| self.get_root().to_owned()),
        };

        self.set_root(&root);
        self.update_path_with_root(&root);

        if let Commands::Build {
            clean,
            drafts,
            url_root,
        } = &cli.command
        {
            self.build.clean = *clean;
            Self::update_option(&mut self.build.drafts, drafts.as_ref());
            if let Some(url_root) = url_root {
                self.site.root = url_root.clone();
            }
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let cli = self.get_cli();

        // Apply CLI overrides first
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        // Normalize root to absolute path
        let root = Self::normalize_path(root);
        self.set_root(&root);

        // Normalize config path
        self.config_path = Self::normalize_path(&root.join(&cli.config));

        // Normalize all directory paths
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!("Config file not found");
        }

        if !self.site.root.starts_with('/') {
            bail!(ConfigError::Validation(
                "[site.root] must start with `/`".into()
            ));
        }

        if let Some(base_url) = &self.site.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[site.url] must start with http:// or https://".into()
            ));
        }

        if self.build.excerpt_length == 0 {
            bail!(ConfigError::Validation(
                "[build.excerpt_length] must be greater than zero".into()
            ));
        }

        if self.build.content == self.build.output {
            bail!(ConfigError::Validation(
                "[build.content] and [build.output] must differ".into()
            ));
        }

        if self.build.posts.is_empty() || self.build.posts.contains('/') {
            bail!(ConfigError::Validation(
                "[build.posts] must be a single directory name".into()
            ));
        }

        if let Commands::Init { .. } = &self.get_cli().command
            && self.get_root().exists()
        {
            bail!("Path already exists");
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
