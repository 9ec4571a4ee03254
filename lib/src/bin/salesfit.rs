use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use salesfit::{
    logging,
    series::{self, SalesHistory, WeeklyForecast},
    ModelSelector, TrainingConfig, TrainingOutcome,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

#[derive(Parser)]
#[command(name = "salesfit", version, about = "Fit and compare weekly sales models")]
struct Cli {
    /// JSON file with training hyperparameters; missing fields use defaults
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Train both models on a `{"X": [[..]], "y": [..]}` request
    Train {
        #[arg(value_name = "PATH")]
        request: PathBuf,
    },
    /// Train on a sales history CSV and forecast the following weeks
    Forecast {
        #[arg(value_name = "PATH")]
        history: PathBuf,
        #[arg(short, long, value_name = "INT", default_value_t = 4)]
        weeks: usize,
    },
}

#[derive(Deserialize)]
struct TrainRequest {
    #[serde(rename = "X")]
    x: Vec<Vec<f64>>,
    y: Vec<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForecastReport {
    #[serde(flatten)]
    outcome: TrainingOutcome,
    total_revenue: f64,
    forecast: Vec<WeeklyForecast>,
}

fn load_config(path: Option<&Path>) -> Result<TrainingConfig> {
    let Some(path) = path else {
        return Ok(TrainingConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: TrainingConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::install_logger()?;
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Train { request } => {
            let text = fs::read_to_string(&request)
                .with_context(|| format!("reading request {}", request.display()))?;
            let request: TrainRequest =
                serde_json::from_str(&text).context("parsing training request")?;
            let outcome = salesfit::train_with_config(request.x, request.y, &config)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Forecast { history, weeks } => {
            let history = SalesHistory::from_path(&history)
                .with_context(|| format!("loading history {}", history.display()))?;
            let data = history.to_training_set()?;
            let outcome = ModelSelector::new(config.with_n_features(series::CUBIC_WIDTH))
                .select(&data)?;
            let forecast = series::forecast(&outcome.recommended().model, data.len(), weeks)?;
            let report = ForecastReport {
                outcome,
                total_revenue: history.total_revenue(),
                forecast,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
