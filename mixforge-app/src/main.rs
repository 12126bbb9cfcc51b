use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use mixforge_core::{ForestPredictor, MixEvaluator};
use mixforge_schemas::mix::MixDesign;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, OutputFormat};
use crate::workflow::MixOverrides;

mod config;
mod report;
mod workflow;

/// Concrete compressive strength prediction from mix proportions.
#[derive(Debug, Parser)]
#[command(name = "mixforge", version, about)]
struct Cli {
    /// Configuration file (defaults to ./mixforge.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Strength model artifact, overriding the configured path
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Predict the strength of a single mix
    Predict(PredictArgs),
    /// Evaluate every mix of a CSV file
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Show the loaded model's details
    Info,
}

#[derive(Debug, Args)]
struct PredictArgs {
    /// Mix request file (YAML or JSON); unspecified fields use the reference mix
    #[arg(long)]
    mix: Option<PathBuf>,

    #[command(flatten)]
    fields: MixFieldArgs,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Shorthand for `--format json`
    #[arg(long, conflicts_with = "format")]
    json: bool,

    /// Append the evaluation to this CSV log
    #[arg(long)]
    log: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct MixFieldArgs {
    /// Cement (kg/m³)
    #[arg(long)]
    cement: Option<f64>,
    /// Blast furnace slag (kg/m³)
    #[arg(long)]
    slag: Option<f64>,
    /// Fly ash (kg/m³)
    #[arg(long)]
    fly_ash: Option<f64>,
    /// Water (kg/m³)
    #[arg(long)]
    water: Option<f64>,
    /// Superplasticizer (kg/m³)
    #[arg(long)]
    superplasticizer: Option<f64>,
    /// Coarse aggregate (kg/m³)
    #[arg(long)]
    coarse_aggregate: Option<f64>,
    /// Fine aggregate (kg/m³)
    #[arg(long)]
    fine_aggregate: Option<f64>,
    /// Curing age (days)
    #[arg(long)]
    age: Option<u32>,
}

impl From<MixFieldArgs> for MixOverrides {
    fn from(args: MixFieldArgs) -> Self {
        Self {
            cement: args.cement,
            blast_furnace_slag: args.slag,
            fly_ash: args.fly_ash,
            water: args.water,
            superplasticizer: args.superplasticizer,
            coarse_aggregate: args.coarse_aggregate,
            fine_aggregate: args.fine_aggregate,
            age: args.age,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mixforge_core=info,mixforge_app=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    let model_path = cli.model.unwrap_or(config.model_path.clone());

    // Loaded once; a failure here holds for the whole run.
    let evaluator = MixEvaluator::from_load(ForestPredictor::load(&model_path));

    match cli.command {
        Command::Predict(args) => {
            let base = match &args.mix {
                Some(path) => config::load_mix_file(path)?,
                None => MixDesign::default(),
            };
            let mix = MixOverrides::from(args.fields).apply(base);
            let format = if args.json {
                OutputFormat::Json
            } else {
                args.format.unwrap_or(config.output_format)
            };
            let log_path = args.log.or(config.evaluation_log);

            let output = workflow::run_predict(&evaluator, &mix, format, log_path.as_deref())?;
            println!("{}", output);
        }
        Command::Batch { input, output } => {
            println!("--- Batch evaluation of '{}' ---", input.display());
            let summary = workflow::run_batch(&evaluator, &input, &output)?;
            println!(
                "Evaluated {} mixes ({} failed). Results are in '{}'",
                summary.evaluated + summary.failed,
                summary.failed,
                output.display()
            );
        }
        Command::Info => match evaluator.predictor() {
            Some(predictor) => print!("{}", report::render_model_info(predictor)),
            None => bail!(
                "Model not loaded: {}",
                evaluator.unavailable_reason().unwrap_or("unknown reason")
            ),
        },
    }

    Ok(())
}
