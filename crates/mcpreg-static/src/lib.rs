//! Static export
//!
//! Writes the response of every read endpoint as `<path>/index.json` so the
//! registry can be hosted from a plain file server. Each payload comes from
//! the same [`Catalog`] operation the HTTP handler calls and is encoded with
//! `serde_json::to_vec`, the encoder behind axum's `Json`, so files are
//! byte-identical to live responses.
//!
//! Any filesystem failure aborts the whole export.

mod layout;

pub use layout::{ExportLayout, INDEX_FILE};

use anyhow::{bail, Context as _, Result};
use mcpreg_core::registry::LegacyRegistryDocument;
use mcpreg_core::catalog::LATEST_TOKEN;
use mcpreg_core::{api_info, Catalog, ListQuery};
use serde::Serialize;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Files copied verbatim from the assets directory
pub const PASSTHROUGH_ASSETS: &[&str] = &["index.html", ".nojekyll"];

/// Legacy registry document name
pub const LEGACY_REGISTRY_FILE: &str = "registry.json";

/// Static export configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory the site is written into (created if missing)
    pub output_dir: PathBuf,
    /// Directory holding the passthrough assets; `None` skips copying them
    pub assets_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("_site"),
            assets_dir: Some(PathBuf::from("site")),
        }
    }
}

/// What an export produced
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    /// Files written, relative to the output directory, in write order
    pub files: Vec<PathBuf>,
}

/// Sequential writer of the static site
pub struct StaticExporter<'a> {
    catalog: &'a Catalog,
    config: ExportConfig,
    report: ExportReport,
}

impl<'a> StaticExporter<'a> {
    pub fn new(catalog: &'a Catalog, config: ExportConfig) -> Self {
        Self {
            catalog,
            config,
            report: ExportReport::default(),
        }
    }

    /// Write the whole site
    pub fn export(mut self) -> Result<ExportReport> {
        let catalog = self.catalog;
        let output_dir = self.config.output_dir.clone();
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;

        info!(
            "[Export] Writing {} servers to {}",
            catalog.len(),
            output_dir.display()
        );

        self.write_json(&ExportLayout::root(), &api_info())?;
        self.write_json(
            &ExportLayout::servers(),
            &catalog.list(&ListQuery::default()),
        )?;
        self.write_servers()?;
        self.write_json(
            Path::new(LEGACY_REGISTRY_FILE),
            &LegacyRegistryDocument::from_entries(catalog.entries()),
        )?;
        self.copy_assets()?;

        info!(
            "[Export] Static site generation complete: {} files in {}",
            self.report.files.len(),
            output_dir.display()
        );
        Ok(self.report)
    }

    /// Per-name resources, keyed by (short name, version)
    fn write_servers(&mut self) -> Result<()> {
        let catalog = self.catalog;
        let mut seen_names = HashSet::new();
        let mut seen_versions = HashSet::new();

        for entry in catalog.entries() {
            let short = entry.server.short_name();

            if seen_names.insert(short) {
                let versions = catalog.versions(short).with_context(|| {
                    format!("Failed to list versions for {}", entry.name())
                })?;
                self.write_json(&ExportLayout::versions(short)?, &versions)?;

                let latest_flagged = catalog
                    .entries()
                    .iter()
                    .any(|e| e.is_latest() && e.server.short_name() == short);
                if latest_flagged {
                    let latest = catalog
                        .latest(short)
                        .with_context(|| format!("Failed to resolve latest for {}", short))?;
                    self.write_json(&ExportLayout::version(short, LATEST_TOKEN)?, latest)?;
                }
            }

            if entry.version() == LATEST_TOKEN {
                bail!(
                    "{} has version \"{}\", which collides with the latest route",
                    entry.name(),
                    LATEST_TOKEN
                );
            }

            if seen_versions.insert((short, entry.version())) {
                let resolved = catalog.version(short, entry.version()).with_context(|| {
                    format!("Failed to resolve {}@{}", short, entry.version())
                })?;
                self.write_json(&ExportLayout::version(short, entry.version())?, resolved)?;
            }
        }

        Ok(())
    }

    fn copy_assets(&mut self) -> Result<()> {
        let Some(assets_dir) = self.config.assets_dir.clone() else {
            debug!("[Export] No assets directory configured, skipping passthrough files");
            return Ok(());
        };

        for asset in PASSTHROUGH_ASSETS {
            let src = assets_dir.join(asset);
            let dest = self.config.output_dir.join(asset);
            fs::copy(&src, &dest).with_context(|| {
                format!("Failed to copy {} to {}", src.display(), dest.display())
            })?;
            debug!("[Export] Copied: {}", asset);
            self.report.files.push(PathBuf::from(asset));
        }

        Ok(())
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, relative: &Path, payload: &T) -> Result<()> {
        let bytes = serde_json::to_vec(payload)
            .with_context(|| format!("Failed to serialize {}", relative.display()))?;

        let full_path = self.config.output_dir.join(relative);
        if let Some(dir) = full_path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        fs::write(&full_path, bytes)
            .with_context(|| format!("Failed to write {}", full_path.display()))?;

        debug!("[Export] Generated: {}", relative.display());
        self.report.files.push(relative.to_path_buf());
        Ok(())
    }
}

/// Export `catalog` with `config`
pub fn export(catalog: &Catalog, config: ExportConfig) -> Result<ExportReport> {
    StaticExporter::new(catalog, config).export()
}

/// URL path a written file answers for (`v0.1/servers/index.json` -> `/v0.1/servers`)
pub fn url_path_for(relative: &Path) -> Option<String> {
    if relative.file_name()? != OsStr::new(INDEX_FILE) {
        return None;
    }
    let dir = relative.parent()?;
    let segments: Vec<&str> = dir.iter().filter_map(|s| s.to_str()).collect();
    Some(format!("/{}", segments.join("/")))
}
