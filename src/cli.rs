use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "entity-manifest")]
#[command(about = "Scan Java sources for @Entity classes and embed them as a Hibernate-Contribution manifest header")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Source roots to scan (repeatable)
    #[arg(long, value_name = "DIR", global = true)]
    pub root: Vec<PathBuf>,

    /// Glob patterns selecting source files (repeatable)
    #[arg(long, value_name = "GLOB", global = true)]
    pub include: Vec<String>,

    /// Glob patterns removing files from the selection (repeatable)
    #[arg(long, value_name = "GLOB", global = true)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Scan, build the directive and rebuild the jar with the header
    Bundle {
        /// Archive to repackage
        #[arg(long, value_name = "JAR")]
        jar: PathBuf,

        /// Directory the rebuilt archive is written to (default: the jar's directory)
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Base MANIFEST.MF merged with the directive header
        #[arg(long, value_name = "FILE")]
        manifest: Option<PathBuf>,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Scan and report entity classes without touching any archive
    List {
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Scan and print the raw directive string
    Directive,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
