use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use risk_engine::config::{self, Config};
use risk_engine::fixtures::{sample_group_json, sample_organizer_json};
use risk_engine::output;
use risk_engine::scoring::{score_group, score_organizer, GroupRiskInput, OrganizerRiskInput};
use risk_engine::server::{self, DemoState};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Entity {
    Organizer,
    Group,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a config file interactively
    Init,
    /// Run the strict validating API (/health, /calculate-risk)
    ServeApi {
        /// Listen address, overrides api.bind from the config
        #[arg(long)]
        bind: Option<String>,
    },
    /// Run the demo service (/, /health, /api/organizer-risk, /api/group-risk)
    ServeDemo {
        /// Listen address, overrides demo.bind from the config
        #[arg(long)]
        bind: Option<String>,
    },
    /// Score a single record from a JSON file, stdin ("-"), or the sample record
    Score {
        entity: Entity,
        /// JSON file with the record; "-" reads stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long, conflicts_with = "tsv")]
        json: bool,
        /// Print score, level and model version tab-separated
        #[arg(long)]
        tsv: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "risk-engine")]
#[command(about = "Weighted organizer and group risk scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/risk-engine/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = cli.command {
        if let Err(e) = config::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if let Err(e) = init_logging(&config, cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(EXIT_FAILURE);
    }
    debug!("Loaded config: {:?}", config);

    let outcome = match cli.command {
        Commands::Init => Ok(()),
        Commands::ServeApi { bind } => {
            let addr = bind.unwrap_or_else(|| config.api_bind().to_string());
            server::serve(server::api_router(), &addr, "risk API").await
        }
        Commands::ServeDemo { bind } => {
            let addr = bind.unwrap_or_else(|| config.demo_bind().to_string());
            server::serve(server::demo_router(DemoState::default()), &addr, "risk demo").await
        }
        Commands::Score {
            entity,
            input,
            json,
            tsv,
        } => run_score(entity, input, json, tsv),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_FAILURE);
    }

    std::process::exit(EXIT_SUCCESS);
}

fn init_logging(config: &Config, verbose: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        // Already checked by validate_config
        config::parse_log_level(config.log_level()).unwrap_or(Level::INFO)
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn read_record(path: Option<PathBuf>, sample: Value) -> Result<Value> {
    let Some(path) = path else {
        debug!("No input given, scoring the sample record");
        return Ok(sample);
    };

    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read record from stdin")?;
        buf
    } else {
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read record from {}", path.display()))?
    };

    serde_json::from_str(&content).context("Record is not valid JSON")
}

fn run_score(entity: Entity, input: Option<PathBuf>, json: bool, tsv: bool) -> Result<()> {
    let (title, result) = match entity {
        Entity::Organizer => {
            let record = read_record(input, sample_organizer_json())?;
            (
                "Organizer risk",
                score_organizer(&OrganizerRiskInput::from_value(&record)),
            )
        }
        Entity::Group => {
            let record = read_record(input, sample_group_json())?;
            (
                "Group risk",
                score_group(&GroupRiskInput::from_value(&record)),
            )
        }
    };

    if json {
        let rendered =
            serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{}", rendered);
    } else if tsv {
        println!("{}", output::format_tsv(&result));
    } else {
        let use_colors = output::should_use_colors();
        println!("{}", output::format_result(title, &result, use_colors));
    }

    Ok(())
}
