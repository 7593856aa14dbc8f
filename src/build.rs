//! Site building orchestration.
//!
//! Coordinates page discovery, parallel assembly and record output.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── collect_sources() ──► Discover markdown files under content/
//!     │
//!     ├── assemble_page()   ──► One record per page, in parallel
//!     │                         (failures are logged, siblings continue)
//!     │
//!     ├── attach_index()    ──► Aggregate posts, attach blog snapshot
//!     │
//!     └── write_record()    ──► One pretty-printed JSON file per record
//! ```

use crate::{
    assembler::assemble_page,
    blog,
    config::SiteConfig,
    log,
    logger::ProgressBars,
    record::PageRecord,
};
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};
use walkdir::WalkDir;

/// Build the entire site, assembling all page records in parallel.
///
/// A failing page does not abort the build: its error is logged, every other
/// page is still assembled, and the build fails at the end with the failure
/// count. The blog snapshot is computed once over the successful records, so
/// every written record carries the identical index.
///
/// If `config.build.clean` is true, clears the output directory first.
pub fn build_site(config: &'static SiteConfig) -> Result<Vec<PageRecord>> {
    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    let sources = collect_sources(&config.build.content);
    log!("build"; "found {} pages", sources.len());

    let progress = ProgressBars::new(&[("pages", sources.len())]);
    let failures = AtomicUsize::new(0);

    let mut records: Vec<PageRecord> = sources
        .par_iter()
        .filter_map(|path| {
            let result = match assemble_page(path, config) {
                Ok(record) => record,
                Err(e) => {
                    failures.fetch_add(1, Ordering::Relaxed);
                    log!("error"; "{}: {:#}", path.display(), e);
                    None
                }
            };
            progress.inc_by_name("pages");
            result
        })
        .collect();

    progress.finish();

    // Deterministic output order regardless of rayon scheduling
    records.sort_by(|a, b| a.page_path.cmp(&b.page_path));
    blog::attach_index(&mut records);

    for record in &records {
        write_record(record, output)?;
    }

    let failed = failures.into_inner();
    if failed > 0 {
        bail!("{failed} page(s) failed to build");
    }

    log!("build"; "done, {} records written", records.len());
    Ok(records)
}

/// Clear (when asked) and recreate the output directory.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;
    Ok(())
}

/// Discover markdown sources under the content directory.
///
/// Files and directories whose name starts with `_` are skipped; that
/// covers layouts (`_layout.html`) and any other non-page content.
pub fn collect_sources(content: &Path) -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = WalkDir::new(content)
        .into_iter()
        .filter_entry(|entry| {
            !entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with('_'))
        })
        .filter_map(Result::ok)
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "md")
        })
        .map(|entry| entry.into_path())
        .collect();
    sources.sort();
    sources
}

/// Write one record as pretty-printed JSON, mirroring its `outputPath`
/// under the output directory with a `.json` extension.
fn write_record(record: &PageRecord, output: &Path) -> Result<()> {
    let path = output.join(Path::new(&record.output_path).with_extension("json"));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(record)?;
    fs::write(&path, json).with_context(|| format!("Failed to write: {}", path.display()))?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
