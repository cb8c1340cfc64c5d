use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::locate::DEFAULT_INCLUDE;

/// Everything the pipeline needs, resolved to plain values before it runs.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub roots: Vec<PathBuf>,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
}

pub fn resolve_scan_config(cli: &Cli) -> ScanConfig {
    ScanConfig {
        roots: resolve_roots(cli),
        includes: resolve_includes(cli),
        excludes: cli.exclude.clone(),
    }
}

fn resolve_roots(cli: &Cli) -> Vec<PathBuf> {
    if !cli.root.is_empty() {
        return cli.root.clone();
    }
    vec![PathBuf::from("src/main/java")]
}

fn resolve_includes(cli: &Cli) -> Vec<String> {
    if !cli.include.is_empty() {
        return cli.include.clone();
    }
    vec![DEFAULT_INCLUDE.to_string()]
}

pub fn resolve_output_dir(jar: &Path, output_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = output_dir {
        return dir.to_path_buf();
    }
    jar.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Base manifest merged under the directive header. An explicit `--manifest`
/// wins; otherwise `<output-dir>/META-INF/MANIFEST.MF` is picked up when it
/// exists, and no base at all is a valid answer.
pub fn resolve_manifest_path(output_dir: &Path, manifest: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = manifest {
        return Some(p.to_path_buf());
    }

    let conventional = output_dir.join("META-INF").join("MANIFEST.MF");
    if conventional.exists() {
        return Some(conventional);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(args)
    }

    #[test]
    fn scan_config_defaults_to_maven_layout() {
        let cfg = resolve_scan_config(&cli(&["entity-manifest", "directive"]));
        assert_eq!(cfg.roots, vec![PathBuf::from("src/main/java")]);
        assert_eq!(cfg.includes, vec![DEFAULT_INCLUDE.to_string()]);
        assert!(cfg.excludes.is_empty());
    }

    #[test]
    fn explicit_roots_and_patterns_win() {
        let cfg = resolve_scan_config(&cli(&[
            "entity-manifest",
            "directive",
            "--root",
            "a",
            "--root",
            "b",
            "--include",
            "**/*.jav",
            "--exclude",
            "**/generated/**",
        ]));
        assert_eq!(cfg.roots, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(cfg.includes, vec!["**/*.jav".to_string()]);
        assert_eq!(cfg.excludes, vec!["**/generated/**".to_string()]);
    }

    #[test]
    fn output_dir_falls_back_to_jar_parent() {
        let jar = PathBuf::from("target/app.jar");
        assert_eq!(resolve_output_dir(&jar, None), PathBuf::from("target"));
        assert_eq!(
            resolve_output_dir(&jar, Some(Path::new("dist"))),
            PathBuf::from("dist")
        );
        assert_eq!(
            resolve_output_dir(Path::new("app.jar"), None),
            PathBuf::from(".")
        );
    }

    #[test]
    fn manifest_path_prefers_explicit_value() {
        let explicit = PathBuf::from("custom/MANIFEST.MF");
        assert_eq!(
            resolve_manifest_path(Path::new("target"), Some(&explicit)),
            Some(explicit)
        );
        // No explicit path and no conventional file on disk: no base manifest.
        assert_eq!(
            resolve_manifest_path(Path::new("/nonexistent-output-dir"), None),
            None
        );
    }
}
