use std::path::PathBuf;

use clap::Parser;
use gcodemesh::{format_summary, importer_from_config, init_logging, Config, OutputFormat};
use tracing::debug;

#[derive(Parser)]
#[command(version, about = "Turn G-code deposition moves into polyline meshes")]
struct Cli {
    /// G-code file to import
    file: PathBuf,

    /// Output format: "summary" or "json" (overrides the config file)
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Configuration file (.toml or .json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_or_default()?,
    };

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    init_logging(level)?;
    debug!(
        "gcodemesh {} (built {})",
        gcodemesh::VERSION,
        gcodemesh::BUILD_DATE
    );

    let scene = importer_from_config(&config).read_file(&cli.file)?;

    match cli.format.unwrap_or(config.output.format) {
        OutputFormat::Summary => print!("{}", format_summary(&scene)),
        OutputFormat::Json => println!("{}", scene.to_json(cli.pretty || config.output.pretty)?),
    }

    Ok(())
}
