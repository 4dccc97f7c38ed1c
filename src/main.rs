use chrono::Timelike;
use clap::Parser;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use enerts::analytics::{AlertEvaluator, LoggingAlertHandler};
use enerts::io::{load_or_generate, simulate_realtime};
use enerts::{resample_view, Alert, EnergyConfig, EnergyConsumption, ForecastEngine, ForecastResult};

const DEFAULT_DATA_FILE: &str = "data/sample_energy_data.csv";

/// Resample energy readings, forecast them and check the alert threshold
#[derive(Parser, Debug)]
#[command(name = "enerts", version = enerts::VERSION, about)]
struct Args {
    /// CSV file with `timestamp,consumption` rows (generated when missing)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// View to forecast: daily, weekly or monthly
    #[arg(short, long)]
    period: Option<String>,

    /// Forecasting model: statistical or trend_heuristic
    #[arg(short, long)]
    model: Option<String>,

    /// Number of future points to forecast
    #[arg(short, long)]
    steps: Option<usize>,

    /// Alert threshold in the configured unit
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "enerts=info,warn")]
    log_level: String,
}

impl Args {
    /// Flags given on the command line take precedence over the configuration
    fn apply(&self, config: &mut EnergyConfig) -> enerts::Result<()> {
        if let Some(data) = &self.data {
            config.data_file = Some(data.clone());
        }
        if let Some(period) = &self.period {
            config.default_period = period.clone();
        }
        if let Some(model) = &self.model {
            config.default_model = model.clone();
        }
        if let Some(steps) = self.steps {
            config.forecast_steps = steps;
        }
        if let Some(threshold) = self.threshold {
            config.alert_threshold = threshold;
        }
        config.validate()
    }
}

#[derive(Serialize)]
struct Report {
    period: String,
    data: Vec<EnergyConsumption>,
    predictions: ForecastResult,
    current_consumption: f64,
    alert: Option<Alert>,
    forecast_alerts: Vec<Alert>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // log records from the library are bridged into the subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = EnergyConfig::load()?;
    args.apply(&mut config)?;

    let data_file = config
        .data_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    let mut rng = rand::rng();
    let raw = load_or_generate(&data_file, &mut rng)?;
    let history = resample_view(&raw, &config.default_period)?;

    let engine = ForecastEngine::new();
    let predictions = engine.predict(&history, config.model_kind()?, config.forecast_steps)?;

    let evaluator = AlertEvaluator::new(config.alert_config()?)
        .with_handler(Box::new(LoggingAlertHandler::new("enerts")));
    let last = history.latest_value().unwrap_or(0.0);
    let current_consumption = simulate_realtime(last, chrono::Utc::now().time().hour(), &mut rng);

    let report = Report {
        period: config.default_period.clone(),
        data: history.to_records(&config.unit),
        alert: evaluator.evaluate(current_consumption),
        forecast_alerts: evaluator.evaluate_forecast(&predictions),
        predictions,
        current_consumption,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
