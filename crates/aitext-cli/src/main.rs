mod commands;
mod output;

use aitext_core::model::ExtractionMethod;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "aitext",
    version,
    about = "Extract text from Adobe Illustrator (.ai) and PDF files"
)]
struct Cli {
    /// Log each extraction step to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the text of one file
    Extract {
        /// Path to the .ai or .pdf file
        input_file: PathBuf,

        /// Extraction method
        #[arg(short, long, value_enum, default_value_t = MethodArg::Auto)]
        method: MethodArg,

        /// Where to write the text (default: <name>_extracted_text.txt next to the input)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// JSON config file (line_tolerance, accepted)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Stdout format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Print only, do not write a text file
        #[arg(long)]
        no_save: bool,
    },
    /// Show which extraction backends are available
    Backends,
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    /// Layout, then direct read, then conversion
    Auto,
    /// Read the file as a PDF page by page
    Direct,
    /// Convert to PDF first (not available)
    Convert,
    /// Reconstruct lines from positioned text
    Layout,
}

impl From<MethodArg> for ExtractionMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Auto => ExtractionMethod::Auto,
            MethodArg::Direct => ExtractionMethod::Direct,
            MethodArg::Convert => ExtractionMethod::Convert,
            MethodArg::Layout => ExtractionMethod::Layout,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Extract {
            input_file,
            method,
            output,
            config,
            format,
            no_save,
        } => commands::extract::run(
            input_file,
            method.into(),
            output,
            config,
            format,
            !no_save,
        ),
        Commands::Backends => commands::backends::list(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
