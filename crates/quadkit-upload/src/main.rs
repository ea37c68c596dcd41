//! CLI entry point for the quadkit-upload bulk loader.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use quadkit_core::config::{load_settings, Settings};
use quadkit_sparql::SparqlClient;
use quadkit_upload::batch::{run_batch, BatchReport};
use quadkit_upload::confirm::{AssumeYes, Confirm, StdinConfirm};
use quadkit_upload::error::UploadError;
use quadkit_upload::loader::upload_file;

#[derive(Parser)]
#[command(name = "quadkit-upload")]
#[command(about = "Load N-Quads files into a SPARQL endpoint")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// SPARQL endpoint URL.
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Basic-auth user.
    #[arg(long, global = true)]
    username: Option<String>,

    /// Basic-auth password.
    #[arg(long, global = true)]
    password: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Folder location as seen by the endpoint (e.g. file:///srv/import).
    #[arg(long, global = true)]
    base_uri: Option<String>,

    /// Print reports as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Config file prefix (default: quadkit).
    #[arg(short, long, default_value = "quadkit", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Load a single file.
    Load {
        /// The .nq file to load.
        #[arg(long)]
        file: PathBuf,

        /// Load into this named graph instead of the graphs in the file.
        #[arg(long)]
        graph: Option<String>,
    },
    /// Validate and load every .nq file in a folder.
    Batch {
        /// Folder containing .nq files.
        #[arg(long)]
        folder: Option<PathBuf>,

        /// Graph IRI prefix every file must use.
        #[arg(long)]
        namespace: Option<String>,

        /// Drop all graphs under the namespace before loading.
        #[arg(long)]
        clear_namespace: bool,

        /// Lines checked per file during namespace validation.
        #[arg(long)]
        sample_lines: Option<usize>,

        /// Do not ask for confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let logs = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if cli.log_json {
        logs.json().init();
    } else {
        logs.init();
    }

    let mut settings = load_settings(&cli.config)?;
    apply_connection_flags(&cli, &mut settings);
    settings.sparql.validate()?;

    let client = SparqlClient::new(&settings.sparql)?;

    match cli.command {
        Command::Load {
            ref file,
            ref graph,
        } => {
            let outcome = upload_file(
                &client,
                file,
                graph.as_deref(),
                settings.upload.base_uri.as_deref(),
            )
            .await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
            if !outcome.success {
                anyhow::bail!("Upload of {} failed: {}", file.display(), outcome.message);
            }
            if !cli.json {
                println!("Loaded {}", file.display());
            }
        }
        Command::Batch {
            ref folder,
            ref namespace,
            clear_namespace,
            sample_lines,
            yes,
        } => {
            let upload = &mut settings.upload;
            if let Some(folder) = folder {
                upload.folder = folder.clone();
            }
            if let Some(namespace) = namespace {
                upload.namespace = namespace.clone();
            }
            if let Some(n) = sample_lines {
                upload.sample_lines = n;
            }
            upload.clear_namespace |= clear_namespace;
            upload.assume_yes |= yes;

            let mut confirm: Box<dyn Confirm> = if upload.assume_yes {
                Box::new(AssumeYes)
            } else {
                Box::new(StdinConfirm)
            };

            match run_batch(&client, upload, confirm.as_mut()).await {
                Ok(report) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&report)?);
                    } else {
                        print_batch_summary(&report);
                    }
                    if !report.is_success() {
                        anyhow::bail!(
                            "Batch finished with {} load failure(s) and {} drop failure(s)",
                            report.failed,
                            report.drop_failures
                        );
                    }
                }
                Err(UploadError::NamespaceViolation { reports }) => {
                    for report in &reports {
                        eprintln!(
                            "{}: {} of {} sampled lines outside the namespace",
                            report.path.display(),
                            report.mismatches,
                            report.lines_checked
                        );
                        for m in &report.examples {
                            eprintln!(
                                "  line {}: {}",
                                m.line,
                                m.graph.as_deref().unwrap_or("(no graph)")
                            );
                        }
                    }
                    anyhow::bail!("Namespace validation failed; nothing was uploaded");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

fn apply_connection_flags(cli: &Cli, settings: &mut Settings) {
    if let Some(endpoint) = &cli.endpoint {
        settings.sparql.endpoint = endpoint.clone();
    }
    if let Some(username) = &cli.username {
        settings.sparql.username = Some(username.clone());
    }
    if let Some(password) = &cli.password {
        settings.sparql.password = Some(password.clone());
    }
    if let Some(timeout) = cli.timeout_secs {
        settings.sparql.timeout_secs = timeout;
    }
    if let Some(base) = &cli.base_uri {
        settings.upload.base_uri = Some(base.clone());
    }
}

fn print_batch_summary(report: &BatchReport) {
    println!("Files:          {}", report.files.len());
    if report.graphs_dropped > 0 || report.drop_failures > 0 {
        println!("Graphs dropped: {}", report.graphs_dropped);
        println!("Drop failures:  {}", report.drop_failures);
    }
    println!("Loaded:         {}", report.loaded);
    println!("Failed:         {}", report.failed);
    for outcome in report.outcomes.iter().filter(|o| !o.success) {
        println!("  {}: {}", outcome.file.display(), outcome.message);
    }
}
