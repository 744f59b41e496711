mod http;
mod input;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use contract::{ApiError, DEFAULT_API_BASE, FeatureName, HyperparameterSet, PredictionApi, RecordError};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use crate::http::ReqwestApi;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON {0}")]
    Shape(&'static str),
    #[error("invalid --field `{0}`; expected NAME=NUMBER")]
    BadField(String),
    #[error("unknown feature `{0}`")]
    UnknownFeature(String),
    #[error("row {row}: {source}")]
    Record { row: usize, source: RecordError },
    #[error("{0}; supply --input, --sample or every feature via --field")]
    Incomplete(#[from] RecordError),
    #[error("sample index {index} out of range ({len} rows)")]
    SampleIndex { index: usize, len: usize },
}

#[derive(Parser, Debug)]
#[command(name = "exodash-cli", about = "Exoplanet prediction service CLI")]
struct Cli {
    #[arg(long, env = "EXODASH_API_BASE_URL", default_value = DEFAULT_API_BASE)]
    base_url: String,

    #[arg(long, env = "EXODASH_TIMEOUT_SECS", help = "Request timeout in seconds")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the service is up.
    Ping,
    /// Predict one candidate.
    Predict(PredictArgs),
    /// Predict every row of a CSV file.
    PredictFile { path: PathBuf },
    /// Predict a JSON array of feature objects.
    BatchPredict {
        #[arg(default_value = "-", help = "Input file path, or - for stdin")]
        input: String,
    },
    /// Model metrics, feature importance and stored hyperparameters.
    Metrics,
    /// Feature names and descriptions.
    Features,
    /// Show or store the service hyperparameters.
    Hyperparameters(HyperparametersCommand),
    /// Retrain the model, optionally on a replacement training CSV.
    Retrain {
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Example feature rows.
    SampleData,
    /// Per-feature importance of the trained model.
    FeatureImportance,
}

#[derive(Args, Debug)]
struct PredictArgs {
    #[arg(long, help = "JSON object file, or - for stdin")]
    input: Option<String>,

    #[arg(long, conflicts_with = "input", help = "Start from this sample-data row (0-based)")]
    sample: Option<usize>,

    #[arg(long = "field", value_name = "NAME=VALUE")]
    fields: Vec<String>,
}

#[derive(Args, Debug)]
struct HyperparametersCommand {
    #[command(subcommand)]
    command: HyperparametersSubcommand,
}

#[derive(Subcommand, Debug)]
enum HyperparametersSubcommand {
    /// Show the stored hyperparameters.
    Show,
    /// Store new hyperparameters; unspecified values keep their stored value.
    Set(SetArgs),
}

#[derive(Args, Debug, Default)]
struct SetArgs {
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    rf_n_estimators: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    rf_max_depth: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(2..))]
    rf_min_samples_split: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    xgb_n_estimators: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    xgb_max_depth: Option<u32>,
    #[arg(long, value_parser = positive_rate)]
    xgb_learning_rate: Option<f64>,
}

impl SetArgs {
    fn apply(&self, mut set: HyperparameterSet) -> HyperparameterSet {
        if let Some(v) = self.rf_n_estimators {
            set.rf_n_estimators = v;
        }
        if let Some(v) = self.rf_max_depth {
            set.rf_max_depth = v;
        }
        if let Some(v) = self.rf_min_samples_split {
            set.rf_min_samples_split = v;
        }
        if let Some(v) = self.xgb_n_estimators {
            set.xgb_n_estimators = v;
        }
        if let Some(v) = self.xgb_max_depth {
            set.xgb_max_depth = v;
        }
        if let Some(v) = self.xgb_learning_rate {
            set.xgb_learning_rate = v;
        }
        set
    }
}

fn positive_rate(raw: &str) -> Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(format!("`{raw}` is not a number greater than 0")),
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let api = ReqwestApi::new(&cli.base_url, cli.timeout_secs.map(Duration::from_secs))?;
    tracing::debug!(base_url = %cli.base_url, "exodash-cli starting");

    let output = run(&api, cli.command).await?;
    print_json(&output)
}

async fn run<A: PredictionApi + ?Sized>(api: &A, command: Command) -> Result<Value, CliError> {
    match command {
        Command::Ping => Ok(json!(api.health().await?)),
        Command::Predict(args) => run_predict(api, args).await,
        Command::PredictFile { path } => {
            let upload = input::load_csv(&path)?;
            tracing::info!(file = %upload.file_name, rows = upload.data_row_count(), "uploading");
            Ok(json!({ "predictions": api.predict_file(&upload).await? }))
        }
        Command::BatchPredict { input } => {
            let rows = input::vectors_from_json(&input::read_source(&input)?)?;
            let predictions = api.batch_predict(&rows).await?;
            Ok(json!({ "predictions": predictions, "total": predictions.len() }))
        }
        Command::Metrics => Ok(json!(api.get_metrics().await?)),
        Command::Features => Ok(json!({ "features": api.get_features().await? })),
        Command::Hyperparameters(command) => match command.command {
            HyperparametersSubcommand::Show => Ok(json!({ "hyperparameters": api.get_hyperparameters().await? })),
            HyperparametersSubcommand::Set(args) => {
                let set = args.apply(api.get_hyperparameters().await?);
                api.update_hyperparameters(&set).await?;
                tracing::warn!("hyperparameters stored; run `retrain` to apply them");
                Ok(json!({ "hyperparameters": set }))
            }
        },
        Command::Retrain { file } => {
            let upload = file.as_deref().map(input::load_csv).transpose()?;
            Ok(json!({ "metrics": api.retrain(upload.as_ref()).await? }))
        }
        Command::SampleData => Ok(json!({ "sample_data": api.get_sample_data().await? })),
        Command::FeatureImportance => Ok(json!({ "feature_importance": api.get_feature_importance().await? })),
    }
}

async fn run_predict<A: PredictionApi + ?Sized>(api: &A, args: PredictArgs) -> Result<Value, CliError> {
    let overrides = args
        .fields
        .iter()
        .map(|raw| input::parse_field(raw))
        .collect::<Result<Vec<(FeatureName, f64)>, _>>()?;

    let base = match (args.input, args.sample) {
        (Some(path), _) => Some(input::record_from_json(&input::read_source(&path)?)?),
        (None, Some(index)) => {
            let samples = api.get_sample_data().await?;
            let len = samples.len();
            Some(
                samples
                    .into_iter()
                    .nth(index)
                    .ok_or(CliError::SampleIndex { index, len })?,
            )
        }
        (None, None) => None,
    };

    let vector = input::build_vector(base, &overrides)?;
    Ok(json!({ "predictions": api.predict(&vector).await? }))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
