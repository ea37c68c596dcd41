//! CLI entry point for the quadkit-expand extract expander.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use quadkit_core::config::{load_settings, ExpandConfig};
use quadkit_expand::{run_expansion, ExpansionReport};

#[derive(Parser)]
#[command(name = "quadkit-expand")]
#[command(about = "Expand an N-Quads extract with directly and inversely linked resources")]
struct Cli {
    /// Existing extract to expand; new quads are appended to it.
    #[arg(long)]
    existing: Option<PathBuf>,

    /// Full source dump to pull linked quads from.
    #[arg(long)]
    source: Option<PathBuf>,

    /// Bracketed IRI of the graph emitted quads are moved into.
    #[arg(long)]
    output_graph: Option<String>,

    /// Print the run report as JSON instead of a text summary.
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,

    /// Config file prefix (default: quadkit).
    #[arg(short, long, default_value = "quadkit")]
    config: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let logs = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if cli.log_json {
        logs.json().init();
    } else {
        logs.init();
    }

    let config = resolve_config(&cli)?;

    let report = run_expansion(&config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&config, &report);
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> anyhow::Result<ExpandConfig> {
    let mut config = load_settings(&cli.config)?.expand;
    if let Some(path) = &cli.existing {
        config.existing_path = path.clone();
    }
    if let Some(path) = &cli.source {
        config.source_path = path.clone();
    }
    if let Some(graph) = &cli.output_graph {
        config.output_graph = graph.clone();
    }
    Ok(config)
}

fn print_summary(config: &ExpandConfig, report: &ExpansionReport) {
    println!("Safe nodes:           {}", report.safe_nodes);
    println!("  existing subjects:  {}", report.existing_subjects);
    println!("  existing objects:   {}", report.existing_objects);
    println!("  linked resources:   {}", report.linked_resources);
    println!("Triples already present: {}", report.existing_triples);
    println!("Direct triples added:    {}", report.extract.direct);
    println!("Inverse triples added:   {}", report.extract.inverse);
    println!("Total added:             {}", report.added());
    println!("Duplicates skipped:      {}", report.extract.skipped_duplicates);
    println!("Output: {}", config.existing_path.display());
}
