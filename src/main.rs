use anyhow::Context;
use clap::{Parser, Subcommand};
use microcms_source::app::ports::IdGeneratorPort;
use microcms_source::config::Config;
use microcms_source::constants::DEFAULT_CONFIG_PATH;
use microcms_source::infra::content_graph::InMemoryContentGraph;
use microcms_source::infra::http_client::ReqwestHttp;
use microcms_source::infra::id_generator::RandomIdGenerator;
use microcms_source::infra::json_output::write_collections;
use microcms_source::options::validate;
use microcms_source::{logging, observability, MicrocmsSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "microcms-source")]
#[command(about = "Pull microCMS content into a local content graph")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every configured source and write one JSON file per collection
    Ingest {
        /// Path to the TOML configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Overrides `output_dir` from the configuration
        #[arg(long)]
        output: Option<PathBuf>,
        /// Write Prometheus metrics to this file once the run ends
        #[arg(long)]
        metrics_file: Option<PathBuf>,
        /// Seed for node identifiers, for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Validate the configured sources without touching the network
    Check {
        /// Path to the TOML configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let mut config = Config::load(path).with_context(|| format!("loading {}", path.display()))?;
    config.apply_env();
    Ok(config)
}

async fn ingest(
    config: Config,
    output: Option<PathBuf>,
    metrics_file: Option<PathBuf>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    if metrics_file.is_some() {
        observability::init().map_err(|e| anyhow::anyhow!("{}", e))?;
    }

    let http = Arc::new(ReqwestHttp::new(config.http.timeout())?);
    let ids: Arc<dyn IdGeneratorPort> = match seed {
        Some(seed) => Arc::new(RandomIdGenerator::seeded(seed)),
        None => Arc::new(RandomIdGenerator::new()),
    };
    let graph = InMemoryContentGraph::new();

    // Every source is validated before the first request goes out.
    for (index, options) in config.sources.into_iter().enumerate() {
        MicrocmsSource::new(graph.as_ref(), options, http.clone(), ids.clone())
            .with_context(|| format!("source #{}", index + 1))?;
    }

    let reports = graph.run_sources().await?;
    let output_dir = output.unwrap_or(config.output_dir);
    let written = write_collections(&output_dir, &graph.collections(), chrono::Utc::now())?;

    println!("\n📊 Ingestion results:");
    for report in &reports {
        println!(
            "   {}: {} node(s) from {} page(s)",
            report.type_name, report.nodes_added, report.pages_fetched
        );
    }
    println!("   Output files: {}", written.len());
    info!("Wrote {} collection file(s) to {}", written.len(), output_dir.display());

    if let Some(path) = metrics_file {
        if let Some(rendered) = observability::render() {
            std::fs::write(&path, rendered).with_context(|| format!("writing {}", path.display()))?;
        }
    }
    Ok(())
}

fn check(config: Config) -> anyhow::Result<()> {
    let mut failures = 0;
    for (index, options) in config.sources.into_iter().enumerate() {
        match validate(options) {
            Ok(source) => println!(
                "✅ source #{}: {} -> {} ({}, limit {})",
                index + 1,
                source.base_url(),
                source.type_name(),
                source.content_type,
                source.limit
            ),
            Err(e) => {
                failures += 1;
                println!("❌ source #{}: {}", index + 1, e);
            }
        }
    }
    if failures > 0 {
        anyhow::bail!("{} source(s) failed validation", failures);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _guard = logging::init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ingest { config, output, metrics_file, seed } => {
            let config = load_config(&config)?;
            ingest(config, output, metrics_file, seed).await
        }
        Commands::Check { config } => check(load_config(&config)?),
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}
