mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod report;

use clap::Parser;
use cli::{Cli, Commands, FieldArgs};
use config::Config;
use datasources::AnalysisServiceClient;
use error::{AdvisorError, Result};
use logic::{
    assess_aridity, cancel_pair, compute_management_plan, compute_simple_deficit, JobOutcome,
    JobWatcher,
};
use models::{ClimateAggregates, ClimateInput, FormAnswers, SystemKind};
use report::{AdvisoryReport, Section};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const STOP_NOTICE_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => {
            Config::setup_interactive()?;
            Ok(())
        }
        Commands::Check => check(Config::load(cli.config)?).await,
        Commands::Simple(args) => {
            let config = Config::load_or_default(cli.config)?;
            let (form, climate) = field_inputs(&args, &config)?;
            let diagnostic = compute_simple_deficit(&form, &climate)?;
            emit(cli.json, &diagnostic, report::render_diagnostic)
        }
        Commands::Plan(args) => {
            let config = Config::load_or_default(cli.config)?;
            let (form, climate) = field_inputs(&args, &config)?;
            let form = form.with_system(resolve_system(&args, &config)?);
            let plan = compute_management_plan(&form, &climate)?;
            emit(cli.json, &plan, report::render_plan)
        }
        Commands::Advise(args) => {
            let config = Config::load_or_default(cli.config)?;
            let (form, climate) = field_inputs(&args, &config)?;
            let form = form.with_system(resolve_system(&args, &config)?);
            emit(cli.json, &advise(&form, &climate), report::render_report)
        }
        Commands::Fetch => {
            let config = Config::load(cli.config)?;
            let client = service_client(&config)?;

            let submission = client.fetch_form_answers().await?;
            let form = FormAnswers::from_wizard(&submission, config.defaults.system()?)?;
            let climate = client.fetch_climate().await?;
            emit(cli.json, &advise(&form, &climate), report::render_report)
        }
        Commands::Watch { job } => {
            let config = Config::load(cli.config)?;
            watch(&config, &job).await
        }
    }
}

async fn check(config: Config) -> Result<()> {
    println!("Configuration OK");
    if !config.service.enabled {
        println!("Analysis service: disabled");
        return Ok(());
    }

    let client = AnalysisServiceClient::new(config.service.clone());
    match client.test_connection().await {
        Ok(true) => println!("Analysis service: OK ({})", config.service.base_url),
        Ok(false) => println!("Analysis service: ERROR ({})", config.service.base_url),
        Err(e) => println!("Analysis service: OFFLINE ({})", e),
    }
    Ok(())
}

async fn watch(config: &Config, job_id: &str) -> Result<()> {
    let client = Arc::new(service_client(config)?);
    let watcher = JobWatcher::new(
        client,
        config.service.poll_interval(),
        config.service.completion_marker.clone(),
    );

    let (handle, token) = cancel_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });

    println!("Watching analysis job {} (Ctrl-C to cancel)", job_id);
    let outcome = watcher
        .watch(job_id, token, |line| {
            println!("[{}] {}", chrono::Local::now().format("%H:%M:%S"), line);
        })
        .await?;

    match outcome {
        JobOutcome::Completed { logs } => {
            println!("Analysis complete ({} log lines)", logs.len());
        }
        JobOutcome::Cancelled { stop_notice } => {
            println!("Cancelled; asking the service to stop");
            if tokio::time::timeout(STOP_NOTICE_TIMEOUT, stop_notice)
                .await
                .is_err()
            {
                tracing::warn!("Stop request did not finish within {:?}", STOP_NOTICE_TIMEOUT);
            }
        }
    }
    Ok(())
}

fn service_client(config: &Config) -> Result<AnalysisServiceClient> {
    if !config.service.enabled {
        return Err(AdvisorError::Config(
            "analysis service is disabled in config".into(),
        ));
    }
    Ok(AnalysisServiceClient::new(config.service.clone()))
}

fn advise(form: &FormAnswers, climate: &ClimateAggregates) -> AdvisoryReport {
    AdvisoryReport {
        diagnostic: Section::from_result(compute_simple_deficit(form, climate)),
        plan: Section::from_result(compute_management_plan(form, climate)),
        aridity: assess_aridity(climate),
    }
}

/// Resolve command-line field answers and climate, filling gaps from config defaults.
///
/// The irrigation system is left unset; only the management plan needs it.
fn field_inputs(args: &FieldArgs, config: &Config) -> Result<(FormAnswers, ClimateAggregates)> {
    let cycle = args
        .cycle
        .as_deref()
        .unwrap_or(config.defaults.cycle_range.as_str());
    let soil = args.soil.as_deref().unwrap_or(config.defaults.soil.as_str());

    let form = FormAnswers::from_options(&args.crop, cycle, soil)?;
    Ok((form, load_climate(args)?))
}

fn resolve_system(args: &FieldArgs, config: &Config) -> Result<SystemKind> {
    match args.system.as_deref() {
        Some(s) => SystemKind::from_str(s).ok_or_else(|| {
            AdvisorError::invalid_input(format!("unknown irrigation system '{}'", s))
        }),
        None => config.defaults.system(),
    }
}

fn load_climate(args: &FieldArgs) -> Result<ClimateAggregates> {
    if let Some(path) = &args.climate {
        let content = std::fs::read_to_string(path)?;
        return Ok(ClimateInput::from_json(&content)?.into_aggregates());
    }

    if args.et.is_empty() && args.precip.is_empty() {
        tracing::warn!("No climate given (--climate or --et/--precip); rates will be zero");
    }
    Ok(ClimateAggregates::new(args.et.clone(), args.precip.clone()))
}

fn emit<T: Serialize>(json: bool, value: &T, render: fn(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", render(value));
    }
    Ok(())
}
