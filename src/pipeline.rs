use anyhow::Result;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

use crate::classify::{EntityRecord, classify};
use crate::config::ScanConfig;
use crate::directive::build_directive;
use crate::error::ScanError;
use crate::extract::parse_source;
use crate::locate::locate_sources;
use crate::repackage::Repackager;

#[derive(Debug)]
pub struct ScanOutcome {
    pub scanned_files: usize,
    pub entities: Vec<EntityRecord>,
}

#[derive(Debug, Serialize)]
pub struct BundleReport {
    pub scanned_files: usize,
    pub entity_count: usize,
    pub entities: Vec<String>,
    pub directive: String,
    pub output_path: String,
    pub duration_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct ListReport {
    pub scanned_files: usize,
    pub entity_count: usize,
    pub entities: Vec<String>,
    pub duration_ms: u64,
}

/// Runs locate → parse → classify over the configured roots and accumulates
/// entity records in discovery order.
///
/// Each file's content is read and released before the next file is opened.
/// The first unreadable or unparseable file aborts the scan; a partial
/// entity list must never reach the manifest.
pub fn scan(config: &ScanConfig) -> Result<ScanOutcome> {
    let sources = locate_sources(&config.roots, &config.includes, &config.excludes)?;

    let mut entities = Vec::new();
    for source in &sources {
        info!("parsing {}", source.relative.display());

        let content =
            std::fs::read_to_string(&source.path).map_err(|e| ScanError::FileAccess {
                path: source.path.clone(),
                source: e,
            })?;
        let unit = parse_source(&source.path, &content)?;

        let base_name = source
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        if let Some(record) = classify(&unit, &base_name) {
            entities.push(record);
        }
    }

    info!("found {} entity classes", entities.len());
    Ok(ScanOutcome {
        scanned_files: sources.len(),
        entities,
    })
}

/// The full run: scan, build the directive, hand it to the packaging step.
pub fn run_bundle(config: &ScanConfig, repackager: &dyn Repackager) -> Result<BundleReport> {
    let start = Instant::now();

    let outcome = scan(config)?;
    let directive = build_directive(&outcome.entities);
    let summary = repackager.repackage(&directive)?;
    info!("updated jar {}", summary.output_path.display());

    Ok(BundleReport {
        scanned_files: outcome.scanned_files,
        entity_count: outcome.entities.len(),
        entities: qualified_names(&outcome.entities),
        directive,
        output_path: summary.output_path.to_string_lossy().to_string(),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Scan-only run for `list`; never touches an archive.
pub fn run_list(config: &ScanConfig) -> Result<ListReport> {
    let start = Instant::now();
    let outcome = scan(config)?;

    Ok(ListReport {
        scanned_files: outcome.scanned_files,
        entity_count: outcome.entities.len(),
        entities: qualified_names(&outcome.entities),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

fn qualified_names(entities: &[EntityRecord]) -> Vec<String> {
    entities.iter().map(|e| e.qualified_name.clone()).collect()
}
