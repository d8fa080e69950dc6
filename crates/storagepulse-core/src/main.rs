//! StoragePulse CLI
//!
//! Command-line interface for the StoragePulse analytics engine.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

use storagepulse::alerting::unacknowledged;
use storagepulse::config::LoggingConfig;
use storagepulse::models::{
    Alert, CandidateProvider, CostBreakdown, Forecast, HeatmapCell, HourlyLatency, LatencyBand,
    MetricsSnapshot, ProviderRecord, ScenarioInput, ScenarioResult, HOURS_PER_DAY,
};
use storagepulse::registry::ProviderRegistry;
use storagepulse::{AnalyticsEngine, Config};

/// StoragePulse - Analytics for cloud storage fleets
#[derive(Parser)]
#[command(name = "storagepulse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "STORAGEPULSE_CONFIG")]
    config: Option<PathBuf>,

    /// JSON provider catalog (built-in catalog if not specified)
    #[arg(long, global = true, env = "STORAGEPULSE_CATALOG")]
    catalog: Option<PathBuf>,

    /// Fixed RNG seed for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List the provider catalog
    Providers,

    /// Show fleet-wide metrics
    Metrics,

    /// Show each provider's share of the total cost
    Costs,

    /// Project cost and storage for the coming months
    Forecast {
        /// Number of months to project (configured default if not specified)
        #[arg(long)]
        horizon: Option<usize>,
    },

    /// Estimate the impact of a hypothetical fleet change
    Simulate {
        /// Name of a provider to add
        #[arg(long, requires = "add_cost")]
        add_name: Option<String>,

        /// Cost per unit of the added provider
        #[arg(long, requires = "add_name")]
        add_cost: Option<f64>,

        /// Expected latency of the added provider in milliseconds
        #[arg(long, requires = "add_name")]
        add_latency: Option<f64>,

        /// Id of a provider to remove
        #[arg(long)]
        remove: Option<String>,

        /// Usage change in percent (negative for a decrease)
        #[arg(long, allow_hyphen_values = true)]
        usage: Option<f64>,
    },

    /// Evaluate alert rules
    Alerts {
        /// Acknowledge the alert at this 1-based position
        #[arg(long)]
        ack: Option<usize>,
    },

    /// Show the hour-by-provider latency heatmap
    Heatmap {
        /// Show per-hour latencies of the last day instead
        #[arg(long)]
        timeline: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.logging, cli.verbose);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(logging: &LoggingConfig, verbose: bool) {
    let log_level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    // Logs go to stderr so JSON output on stdout stays parseable
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let path = cli
        .config
        .clone()
        .or_else(|| Config::default_path().filter(|p| p.exists()));

    let mut config = Config::load(path.as_deref()).with_context(|| match &path {
        Some(path) => format!("failed to load {}", path.display()),
        None => "failed to load configuration".to_string(),
    })?;

    if cli.seed.is_some() {
        config.engine.seed = cli.seed;
    }
    if cli.catalog.is_some() {
        config.engine.catalog_path.clone_from(&cli.catalog);
    }

    Ok(config)
}

fn load_registry(path: Option<&Path>) -> anyhow::Result<ProviderRegistry> {
    match path {
        Some(path) => ProviderRegistry::from_json_file(path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => Ok(ProviderRegistry::seeded()),
    }
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let registry = load_registry(config.engine.catalog_path.as_deref())?;

    info!(
        providers = registry.len(),
        latency = %humantime::format_duration(config.engine.simulated_latency),
        seeded = config.engine.seed.is_some(),
        "Starting analytics engine"
    );

    let engine = AnalyticsEngine::new(registry, &config)?;
    let format = cli.format;

    match cli.command {
        Commands::Providers => {
            let providers = engine.providers().await;
            emit(format, providers.as_slice(), print_providers)
        }
        Commands::Metrics => {
            let snapshot = engine.metrics().await;
            emit(format, &snapshot, print_metrics)
        }
        Commands::Costs => {
            let breakdown = engine.cost_breakdown().await;
            emit(format, &breakdown, print_costs)
        }
        Commands::Forecast { horizon } => {
            let forecast = engine.forecast(horizon).await?;
            emit(format, &forecast, print_forecast)
        }
        Commands::Simulate {
            add_name,
            add_cost,
            add_latency,
            remove,
            usage,
        } => {
            let add_provider = add_name.zip(add_cost).map(|(name, cost)| CandidateProvider {
                latency_ms: add_latency,
                ..CandidateProvider::new(name, cost)
            });
            let scenario = ScenarioInput {
                add_provider,
                remove_provider: remove,
                usage_increase_pct: usage,
            };
            debug!(?scenario, "Running scenario");

            let result = engine.simulate(&scenario).await?;
            emit(format, &result, print_scenario)
        }
        Commands::Alerts { ack } => {
            let mut alerts = engine.alerts().await;
            if let Some(position) = ack {
                let id = position
                    .checked_sub(1)
                    .and_then(|index| alerts.get(index))
                    .map(|alert| alert.id)
                    .with_context(|| {
                        format!("no alert at position {position} ({} raised)", alerts.len())
                    })?;
                alerts = engine.acknowledge(&alerts, id).await;
            }
            emit(format, alerts.as_slice(), print_alerts)
        }
        Commands::Heatmap { timeline: false } => {
            let cells = engine.heatmap().await;
            emit(format, cells.as_slice(), print_heatmap)
        }
        Commands::Heatmap { timeline: true } => {
            let timeline = engine.latency_timeline().await;
            emit(format, timeline.as_slice(), print_timeline)
        }
    }
}

fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    print_text: fn(&T),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print_text(value),
    }
    Ok(())
}

fn print_providers(providers: &[ProviderRecord]) {
    println!(
        "{:<14} {:<28} {:>10} {:>8} {:>12}  Status",
        "ID", "Name", "Latency", "Cost", "Reliability"
    );
    for p in providers {
        println!(
            "{:<14} {:<28} {:>7.1} ms {:>8.3} {:>11.2}%  {:?}",
            p.id, p.name, p.latency_ms, p.cost_per_unit, p.reliability_pct, p.status
        );
    }
}

fn print_metrics(snapshot: &MetricsSnapshot) {
    println!("Fleet Metrics");
    println!("─────────────────────────────");
    println!("Providers:       {}", snapshot.provider_count);
    println!("Total storage:   {:.1} GB", snapshot.total_storage_gb());
    println!("Total cost:      {:.2}", snapshot.total_cost);
    println!("Avg cost:        {:.2}", snapshot.avg_cost());
    println!("Total requests:  {}", snapshot.total_requests);
    println!("Avg latency:     {:.1} ms", snapshot.avg_latency_ms);
    println!("Monthly growth:  {:.1}%", snapshot.monthly_growth_pct);
}

fn print_costs(breakdown: &CostBreakdown) {
    println!("{:<28} {:>10} {:>6}", "Provider", "Cost", "Share");
    for share in &breakdown.shares {
        println!(
            "{:<28} {:>10.2} {:>5.0}%",
            share.provider_name, share.absolute_cost, share.percentage_of_total
        );
    }
    println!("{:<28} {:>10.2}", "Total", breakdown.total_cost);

    if let (Some(cheapest), Some(priciest)) = (breakdown.cheapest(), breakdown.most_expensive()) {
        println!();
        println!(
            "Cheapest:        {} ({:.2})",
            cheapest.provider_name, cheapest.absolute_cost
        );
        println!(
            "Most expensive:  {} ({:.2})",
            priciest.provider_name, priciest.absolute_cost
        );
    }
}

fn print_forecast(forecast: &Forecast) {
    println!(
        "{:<12} {:>12} {:>14} {:>11}",
        "Period", "Cost", "Storage (GB)", "Confidence"
    );
    for point in &forecast.points {
        println!(
            "{:<12} {:>12.2} {:>14} {:>10}%",
            point.period, point.predicted_cost, point.predicted_storage_gb, point.confidence_pct
        );
    }
    println!();
    println!("Latency trend:   {:?}", forecast.latency_trend);
    println!("Storage growth:  {:?}", forecast.storage_growth);
    print_recommendations(&forecast.recommendations);
}

fn print_scenario(result: &ScenarioResult) {
    println!("Scenario Impact");
    println!("─────────────────────────────");
    println!(
        "Cost:     {:.2} -> {:.2} ({:+.2})",
        result.current_cost, result.projected_cost, result.cost_impact
    );
    println!(
        "Latency:  {:.1} ms -> {:.1} ms ({:+.1})",
        result.current_latency, result.projected_latency, result.latency_impact
    );
    println!("Savings:  {:.2}", result.cost_savings);
    println!("Risk:     {:?}", result.risk);
    print_recommendations(&result.recommendations);
}

fn print_alerts(alerts: &[Alert]) {
    if alerts.is_empty() {
        println!("No alerts");
        return;
    }
    for (position, alert) in alerts.iter().enumerate() {
        println!("{}", alert_line(position + 1, alert));
    }
    println!();
    println!(
        "{} of {} unacknowledged",
        unacknowledged(alerts).len(),
        alerts.len()
    );
}

fn alert_line(position: usize, alert: &Alert) -> String {
    let mark = if alert.acknowledged { "✓" } else { " " };
    // derived Debug ignores width, so pad the rendered names
    let severity = format!("{:?}", alert.severity);
    let alert_type = format!("{:?}", alert.alert_type);
    format!(
        "{position:>3} [{mark}] {severity:<8} {alert_type:<12} {}",
        alert.message
    )
}

fn print_heatmap(cells: &[HeatmapCell]) {
    for row in cells.chunks(usize::from(HOURS_PER_DAY)) {
        let Some(first) = row.first() else { continue };
        let values: Vec<String> = row.iter().map(|c| format!("{:>3.0}", c.latency_ms)).collect();
        let peak = row.iter().map(HeatmapCell::band).max().unwrap_or(LatencyBand::Excellent);
        let peak = format!("{peak:?}");
        println!("{:<28} {} {peak:>9}", first.provider, values.join(" "));
    }
}

fn print_timeline(timeline: &[HourlyLatency]) {
    for hour in timeline {
        let values: Vec<String> = hour
            .latencies
            .iter()
            .map(|(id, latency)| format!("{id}={latency:.0}"))
            .collect();
        println!("{}  {}", hour.time, values.join(" "));
    }
}

fn print_recommendations(recommendations: &[String]) {
    if recommendations.is_empty() {
        return;
    }
    println!();
    println!("Recommendations:");
    for r in recommendations {
        println!("  - {r}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storagepulse::models::{AlertType, Severity, FLEET_SCOPE};

    #[test]
    fn test_alert_columns_line_up() {
        let info = Alert::new(AlertType::Cost, Severity::Info, FLEET_SCOPE, "budget");
        let warning = Alert::new(AlertType::Predictive, Severity::Warning, FLEET_SCOPE, "full");

        let first = alert_line(1, &info);
        let second = alert_line(2, &warning);

        assert_eq!(first, "  1 [ ] Info     Cost         budget");
        assert_eq!(second, "  2 [ ] Warning  Predictive   full");
        assert_eq!(first.find("budget"), second.find("full"));
    }
}
