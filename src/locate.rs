use anyhow::{Context, Result};
use ignore::WalkBuilder;
use ignore::overrides::{Override, OverrideBuilder};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_INCLUDE: &str = "**/*.java";

/// One candidate source file, discarded after classification.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub relative: PathBuf,
}

/// Enumerates files under each root whose relative path matches at least one
/// include pattern and no exclude pattern. Exclude patterns always win.
///
/// Roots keep their given order and results are sorted by relative path
/// within each root, so discovery order is deterministic across runs. A root
/// that does not exist yields nothing for that root. Symlinks are not
/// followed, and a visited set drops duplicates when roots overlap.
pub fn locate_sources(
    roots: &[PathBuf],
    includes: &[String],
    excludes: &[String],
) -> Result<Vec<SourceFile>> {
    let mut results = Vec::new();
    let mut visited: HashSet<PathBuf> = HashSet::new();

    for root in roots {
        if !root.is_dir() {
            debug!("skipping missing source root {}", root.display());
            continue;
        }

        let matcher = build_matcher(root, includes, excludes)?;
        let mut found = locate_under_root(root, &matcher, &mut visited);
        found.sort_by(|a, b| a.relative.cmp(&b.relative));
        results.extend(found);
    }

    Ok(results)
}

fn build_matcher(root: &Path, includes: &[String], excludes: &[String]) -> Result<Override> {
    let mut builder = OverrideBuilder::new(root);
    for glob in includes {
        builder
            .add(glob)
            .with_context(|| format!("Invalid include pattern: {glob}"))?;
    }
    // Appended after the includes: gitignore semantics are last-match-wins,
    // which gives excludes precedence on paths matching both.
    for glob in excludes {
        builder
            .add(&format!("!{glob}"))
            .with_context(|| format!("Invalid exclude pattern: {glob}"))?;
    }
    builder.build().context("Failed to compile glob patterns")
}

fn locate_under_root(
    root: &Path,
    matcher: &Override,
    visited: &mut HashSet<PathBuf>,
) -> Vec<SourceFile> {
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false)
        .build();

    let mut found = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!("skipping unreadable entry under {}: {err}", root.display());
                continue;
            }
        };

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        let relative = match path.strip_prefix(root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => continue,
        };

        if !matcher.matched(&relative, false).is_whitelist() {
            continue;
        }
        if !visited.insert(path.to_path_buf()) {
            continue;
        }

        found.push(SourceFile {
            path: path.to_path_buf(),
            relative,
        });
    }

    found
}
