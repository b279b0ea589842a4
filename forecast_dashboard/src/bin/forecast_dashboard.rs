use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use forecast_client::{
    ForecastService, HttpForecastService,
    models::horizon::{HistoryPeriod, PredictionDays},
    providers::http::params::DEFAULT_HISTORY_LIMIT,
};
use forecast_dashboard::{
    chart::render_chart,
    dashboard::{Dashboard, FETCH_FAILED_MESSAGE},
    report::{catalog_line, history_line, render_report},
    settings::{DashboardConfig, load_config_path},
    svg::render_svg,
};
use serde_json::json;
use shared_utils::logging::{DEFAULT_FILTER, init_tracing};
use tracing::{error, warn};

#[derive(Parser)]
#[command(version, about = "Forecast dashboard CLI")]
struct Cli {
    /// Path to the dashboard config file (TOML)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Check that the forecast service is reachable
    Ping,
    /// List selectable instruments
    Catalog,
    /// Fetch a forecast plus analysis and print the dashboard
    Predict(PredictArgs),
    /// List recent forecasts made by the service
    History {
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: u32,
    },
}

#[derive(Args)]
struct PredictArgs {
    /// Instrument symbol (e.g. "AAPL")
    #[arg(long)]
    symbol: Option<String>,

    /// Forecast horizon in days (7, 15, 30 or 60 in the UI; any positive number works)
    #[arg(long)]
    days: Option<PredictionDays>,

    /// History window to train on: 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, max
    #[arg(long)]
    period: Option<HistoryPeriod>,

    /// Also write the chart as an SVG document
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,

    /// Print chart geometry and metrics as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(DEFAULT_FILTER);
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_path(path)?,
        None => DashboardConfig::default(),
    }
    .with_env_overrides();

    let service = Arc::new(
        HttpForecastService::new(&config.service).context("failed to set up forecast client")?,
    );

    match cli.cmd {
        Cmd::Ping => {
            let banner = service.ping().await?;
            println!("{} ({})", banner, service.base_url());
        }

        Cmd::Catalog => {
            let dashboard = Dashboard::new(service.clone(), service);
            for instrument in dashboard.load_catalog().await?.iter() {
                println!("{}", catalog_line(instrument));
            }
        }

        Cmd::Predict(args) => predict(&config, service, args).await?,

        Cmd::History { limit } => {
            for p in service.fetch_history(limit).await? {
                println!("{}", history_line(&p));
            }
        }
    }

    Ok(())
}

async fn predict(config: &DashboardConfig, service: Arc<HttpForecastService>, args: PredictArgs) -> Result<()> {
    let request = config
        .defaults
        .request(args.symbol.as_deref(), args.period, args.days);
    if !request.prediction_days.is_preset() {
        warn!(
            days = request.prediction_days.get(),
            presets = ?PredictionDays::PRESETS,
            "horizon is not one of the dashboard presets"
        );
    }

    let dashboard = Dashboard::new(service.clone(), service);
    if dashboard.is_listed(&request.symbol).await == Some(false) {
        warn!(symbol = %request.symbol, "symbol is not in the service catalog");
    }

    let refresh = dashboard.refresh(request).await.map_err(|err| {
        error!(error = %err, timeout = err.is_timeout(), "forecast refresh failed");
        anyhow::Error::new(err).context(FETCH_FAILED_MESSAGE)
    })?;
    let state = refresh.state;

    let chart = render_chart(&state.sequence, &state.chart_title(), &config.chart)
        .context(FETCH_FAILED_MESSAGE)?;

    if let Some(path) = &args.svg {
        std::fs::write(path, render_svg(&chart))
            .with_context(|| format!("write chart to {}", path.display()))?;
    }

    if args.json {
        let doc = json!({
            "generation": state.generation,
            "request": state.request,
            "fetched_at": state.fetched_at,
            "metrics": state.metrics,
            "chart": chart,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!("{}", render_report(&state, &chart));
    }

    Ok(())
}
