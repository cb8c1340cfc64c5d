use anyhow::Result;
use clap::Parser;
use entity_manifest::cli::{Cli, Commands, OutputFormat};
use entity_manifest::config::{resolve_manifest_path, resolve_output_dir, resolve_scan_config};
use entity_manifest::directive::build_directive;
use entity_manifest::pipeline::{BundleReport, ListReport, run_bundle, run_list, scan};
use entity_manifest::repackage::JarRepackager;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = resolve_scan_config(&cli);

    match cli.command.clone() {
        Commands::Bundle {
            jar,
            output_dir,
            manifest,
            format,
            output,
        } => {
            let out_dir = resolve_output_dir(&jar, output_dir.as_deref());
            let manifest_path = resolve_manifest_path(&out_dir, manifest.as_deref());
            let repackager = JarRepackager::new(jar, out_dir, manifest_path);

            let report = run_bundle(&config, &repackager)?;
            write_output(&render_bundle(&report, format)?, output.as_deref())?;
        }
        Commands::List { format, output } => {
            let report = run_list(&config)?;
            write_output(&render_list(&report, format)?, output.as_deref())?;
        }
        Commands::Directive => {
            let outcome = scan(&config)?;
            println!("{}", build_directive(&outcome.entities));
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn render_bundle(report: &BundleReport, format: OutputFormat) -> Result<String> {
    let content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str(&format!("scanned_files: {}\n", report.scanned_files));
            out.push_str(&format!("entity_count: {}\n", report.entity_count));
            for name in &report.entities {
                out.push_str(&format!("- {name}\n"));
            }
            out.push_str(&format!("directive: {}\n", report.directive));
            out.push_str(&format!("output_path: {}\n", report.output_path));
            out.push_str(&format!("duration_ms: {}\n", report.duration_ms));
            out
        }
    };
    Ok(content)
}

fn render_list(report: &ListReport, format: OutputFormat) -> Result<String> {
    let content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str(&format!("scanned_files: {}\n", report.scanned_files));
            out.push_str(&format!("entity_count: {}\n", report.entity_count));
            for name in &report.entities {
                out.push_str(&format!("- {name}\n"));
            }
            out.push_str(&format!("duration_ms: {}\n", report.duration_ms));
            out
        }
    };
    Ok(content)
}

fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
    } else {
        print!("{content}");
        if !content.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}
