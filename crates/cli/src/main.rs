mod cli;
mod metrics;

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use discovery_core::{
    classify_results, load_config, load_definitions, parse_definition, parse_quality,
    quality_score, rank_all, score_all_with_reasons, select_best_result, validate_config,
    validate_definition, Config, QualityInfo, SearchResult,
};

use cli::{Args, Command};
use metrics::{encode_metrics, COMMANDS_RUN};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries JSON output only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => Config::default(),
    };
    validate_config(&config).context("Configuration validation failed")?;

    let command = args.command.name();
    let result = execute(args.command, &config).await;
    let status = if result.is_ok() { "success" } else { "error" };
    COMMANDS_RUN.with_label_values(&[command, status]).inc();

    if args.metrics {
        eprint!("{}", encode_metrics()?);
    }

    result
}

async fn execute(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Classify { titles } => classify(titles),
        Command::Check { file } => check(&file),
        Command::Load { dir } => {
            let dir = dir.unwrap_or_else(|| config.definitions.dir.clone());
            load(&dir, config).await
        }
        Command::Rank {
            results,
            query,
            min_seeders,
            prefer,
            block,
            explain,
            best,
        } => {
            let mut options = config.score_options();
            if let Some(query) = query {
                options = options.with_search_query(query);
            }
            if let Some(min_seeders) = min_seeders {
                options = options.with_min_seeders(min_seeders);
            }
            if !prefer.is_empty() {
                options = options.with_preferred_qualities(prefer);
            }
            options.blocked_tags.extend(block);

            let results = classify_results(read_results(&results)?);
            info!(count = results.len(), "Ranking search results");

            if explain {
                print_json(&score_all_with_reasons(results, &options))
            } else if best {
                print_json(&select_best_result(results, &options))
            } else {
                print_json(&rank_all(results, &options))
            }
        }
    }
}

#[derive(Serialize)]
struct ClassifiedTitle {
    title: String,
    quality: QualityInfo,
    score: u32,
}

fn classify(titles: Vec<String>) -> Result<()> {
    let classified: Vec<ClassifiedTitle> = titles
        .into_iter()
        .map(|title| {
            let quality = parse_quality(&title);
            let score = quality_score(&quality);
            ClassifiedTitle {
                title,
                quality,
                score,
            }
        })
        .collect();
    print_json(&classified)
}

fn check(file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read definition {:?}", file))?;

    let definition = match parse_definition(&text).and_then(|d| validate_definition(&d).map(|_| d)) {
        Ok(definition) => definition,
        Err(e) => bail!("{}: {} ({})", file.display(), e.tag(), e),
    };

    info!(id = %definition.id, "Definition is valid");
    print_json(&definition)
}

async fn load(dir: &Path, config: &Config) -> Result<()> {
    let catalog = load_definitions(dir, &config.definitions.fanout())
        .await
        .context("Failed to load definitions")?;

    #[derive(Serialize)]
    struct LoadSummary<'a> {
        ids: Vec<&'a str>,
        report: &'a discovery_core::BatchReport,
    }

    print_json(&LoadSummary {
        ids: catalog.definitions.iter().map(|d| d.id.as_str()).collect(),
        report: &catalog.report,
    })
}

fn read_results(path: &Path) -> Result<Vec<SearchResult>> {
    let text = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read search results from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read search results from {:?}", path))?
    };

    serde_json::from_str(&text).context("Search results must be a JSON array of results")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
