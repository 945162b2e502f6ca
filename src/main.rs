//! StorePulse CLI
//!
//! Command-line front end for the dashboard core:
//! - Print the dashboard for a period selection
//! - Replay a burst of selection changes through the debouncer
//! - Generate a default config file

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use storepulse::config::generate_default_config;
use storepulse::dashboard::format::{
    comparison_label, format_axis_date, format_grouped, format_kpi_value, format_pct_change,
    format_ratio_pct, period_label,
};
use storepulse::period::parse_iso_date;
use storepulse::{
    BaseSeries, ComparisonKey, Config, Dashboard, DashboardSnapshot, Debouncer, LoggingConfig,
    MetricsSynthesizer, PartialRange, PeriodKey, PeriodResolver, Selection,
};

#[derive(Parser)]
#[command(name = "storepulse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Storefront analytics dashboard on synthetic data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the dashboard for one selection
    Snapshot {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Fire a burst of selection changes and show which refresh wins
    Simulate {
        /// Gap between consecutive changes (ms)
        #[arg(long, default_value = "100")]
        gap_ms: u64,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct SelectionArgs {
    /// Period (today, yesterday, last7, last28, last365, custom)
    #[arg(short, long)]
    pub period: Option<String>,

    /// Comparison (previous_period, previous_year, custom)
    #[arg(long)]
    pub comparison: Option<String>,

    /// Custom period start (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Custom period end (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Custom comparison start (YYYY-MM-DD)
    #[arg(long)]
    pub compare_from: Option<String>,

    /// Custom comparison end (YYYY-MM-DD)
    #[arg(long)]
    pub compare_to: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing config to {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_tracing(&config.logging)?;

    tracing::info!("StorePulse v{}", env!("CARGO_PKG_VERSION"));

    let json = cli.format.eq_ignore_ascii_case("json");
    match cli.command {
        Commands::Snapshot { selection } => {
            let selection = build_selection(&config, &selection)?;
            let mut dashboard = build_dashboard(&config);
            let snapshot = dashboard.refresh(&selection)?;
            print_snapshot(&selection, snapshot, json)?;
        }
        Commands::Simulate { gap_ms } => simulate(&config, gap_ms, json).await?,
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("storepulse={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path))?;
            let writer = std::sync::Mutex::new(file);
            if logging.is_json() {
                registry
                    .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
                    .init();
            } else {
                registry
                    .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer))
                    .init();
            }
        }
        None if logging.is_json() => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        None => {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

fn build_dashboard(config: &Config) -> Dashboard {
    let resolver = PeriodResolver::now();
    let mut rng = match config.synth.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let base = Arc::new(BaseSeries::generate(
        resolver.today(),
        config.synth.history_days,
        &mut rng,
    ));
    tracing::info!(
        days = base.len(),
        start = %base.start(),
        "Generated base series"
    );

    Dashboard::new(resolver, MetricsSynthesizer::new(base, rng))
}

fn build_selection(config: &Config, args: &SelectionArgs) -> anyhow::Result<Selection> {
    let mut selection = config.dashboard.initial_selection();

    if let Some(period) = &args.period {
        selection.set_period(PeriodKey::from(period.as_str()));
    }
    if let Some(comparison) = &args.comparison {
        selection.set_comparison(ComparisonKey::from(comparison.as_str()));
    }
    if args.from.is_some() || args.to.is_some() {
        selection.set_custom_period(PartialRange::new(
            parse_opt_date(&args.from)?,
            parse_opt_date(&args.to)?,
        ));
    }
    if args.compare_from.is_some() || args.compare_to.is_some() {
        selection.set_custom_comparison(PartialRange::new(
            parse_opt_date(&args.compare_from)?,
            parse_opt_date(&args.compare_to)?,
        ));
    }

    Ok(selection)
}

fn parse_opt_date(value: &Option<String>) -> anyhow::Result<Option<NaiveDate>> {
    Ok(value.as_deref().map(parse_iso_date).transpose()?)
}

async fn simulate(config: &Config, gap_ms: u64, json: bool) -> anyhow::Result<()> {
    let dashboard = Arc::new(tokio::sync::Mutex::new(build_dashboard(config)));
    let debouncer = Debouncer::from_millis(config.dashboard.debounce_ms);
    let refreshes = Arc::new(AtomicUsize::new(0));

    let burst = [
        Selection::new(PeriodKey::Today, ComparisonKey::PreviousPeriod),
        Selection::new(PeriodKey::Last7, ComparisonKey::PreviousPeriod),
        Selection::new(PeriodKey::Last28, ComparisonKey::PreviousYear),
        Selection::new(PeriodKey::Last7, ComparisonKey::PreviousYear),
    ];
    let last = burst[burst.len() - 1];

    for selection in burst {
        tracing::info!(
            period = %selection.period,
            comparison = %selection.comparison,
            "Selection changed"
        );
        dashboard.lock().await.begin_refresh();

        let dashboard = dashboard.clone();
        let refreshes = refreshes.clone();
        debouncer.schedule(move || async move {
            let mut dashboard = dashboard.lock().await;
            match dashboard.refresh(&selection) {
                Ok(snapshot) => {
                    refreshes.fetch_add(1, Ordering::SeqCst);
                    tracing::info!(days = snapshot.trend.len(), "Dashboard refreshed");
                }
                Err(e) => tracing::warn!("Refresh failed: {}", e),
            }
        });

        tokio::time::sleep(Duration::from_millis(gap_ms)).await;
    }

    tokio::time::sleep(debouncer.delay() + Duration::from_millis(50)).await;
    while debouncer.is_pending() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let dashboard = dashboard.lock().await;
    tracing::info!(
        changes = burst.len(),
        refreshes = refreshes.load(Ordering::SeqCst),
        "Burst settled"
    );
    print_snapshot(&last, dashboard.snapshot(), json)
}

fn print_snapshot(
    selection: &Selection,
    snapshot: &DashboardSnapshot,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    if snapshot.is_incomplete {
        println!("Selection incomplete: pick both dates of the custom range.");
        return Ok(());
    }

    if let (Some(current), Some(comparison)) = (snapshot.current, snapshot.comparison) {
        println!("Period:     {} ({})", current, period_label(selection));
        println!("Comparison: {} ({})", comparison, comparison_label(selection));
    }

    println!("\nKPIs");
    for kpi in &snapshot.kpis {
        println!(
            "  {:<16} {:>22}  {} {}",
            kpi.label,
            format_kpi_value(kpi.value, kpi.unit),
            trend_arrow(kpi.pct_change),
            format_pct_change(kpi.pct_change)
        );
    }

    if let Some(detail) = &snapshot.detail {
        println!("\nDetail");
        println!("  Popular products without stock:       {}", detail.popular_products_without_stock);
        println!("  Orders with payments in authorization: {}", detail.orders_with_payments_in_authorization);
        println!("  Orders in the last hour:              {}", detail.orders_in_last_hour);
    }

    println!("\nTrend (current / previous)");
    let trend = &snapshot.trend;
    for idx in 0..trend.len() {
        println!(
            "  {}  orders {:>6} / {:<6}  conversion {:>6} / {}",
            format_axis_date(trend.dates[idx]),
            trend.current_period_orders[idx],
            trend.previous_period_orders[idx],
            format_ratio_pct(trend.current_period_conv[idx], 2),
            format_ratio_pct(trend.previous_period_conv[idx], 2)
        );
    }

    println!("\nSales funnel");
    for step in &snapshot.funnel {
        println!(
            "  {:<22} {:>12} {:>6.1}%  {:+.2} pp",
            step.step,
            format_grouped(step.count as f64, 0),
            step.pct,
            step.delta_pp
        );
    }

    println!("\nTop products");
    for (rank, product) in snapshot.top_products.iter().enumerate() {
        println!(
            "  {}. {:<40} {:>18}  {} {}",
            rank + 1,
            product.name,
            format_kpi_value(product.revenue, Some(storepulse::Currency::Ars)),
            trend_arrow(product.pct_change),
            format_pct_change(product.pct_change)
        );
    }

    Ok(())
}

fn trend_arrow(pct: f64) -> &'static str {
    if pct >= 0.0 {
        "↑"
    } else {
        "↓"
    }
}
