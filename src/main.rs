//! CLI entry point for the waste dashboard tool.
//!
//! Provides subcommands for dataset-wide KPIs, ranked city leaderboards,
//! rendering individual charts to SVG, and batch per-city JSON reports.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use waste_dashboard::{
    aggregators::{
        boxplot, campaigns, gauge, heatmap, kpi,
        pie::{self, PieMode},
        radar, sankey, scatter, waterfall, yearly,
    },
    dashboard::Dashboard,
    fetch::fetch_source,
    model::{SankeyFilter, Selection},
    output::{append_city_rankings, print_json, write_reports, write_svg},
    render::{geometry, palette::Palette, svg::to_svg},
    stats,
};

#[derive(Parser)]
#[command(name = "waste_dashboard")]
#[command(about = "A tool to analyze municipal waste datasets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute dataset-wide KPIs from a CSV file or URL
    Kpi {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,
    },
    /// Rank cities by total generated waste
    Cities {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// CSV file to append the ranked leaderboard to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Render a single chart to SVG
    Chart {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Which chart to render
        #[arg(short, long, value_enum)]
        kind: ChartKind,

        /// City scope; defaults to the first city in the dataset
        #[arg(short, long)]
        city: Option<String>,

        /// Year scope, where the chart honors one
        #[arg(short, long)]
        year: Option<i32>,

        /// Restrict flow charts to a single waste type
        #[arg(short = 't', long)]
        waste_type: Option<String>,

        /// Additional cities for the comparison radar (repeatable)
        #[arg(long = "compare")]
        compare: Vec<String>,

        /// Use recycled estimates instead of generated volumes (pie only)
        #[arg(long, default_value_t = false)]
        recycled: bool,

        /// Zero-based page of the campaigns ranking
        #[arg(short, long, default_value_t = 0)]
        page: usize,

        /// Output SVG path
        #[arg(short, long, default_value = "chart.svg")]
        output: String,

        /// Canvas width in pixels
        #[arg(long, default_value_t = 800.0)]
        width: f64,

        /// Canvas height in pixels
        #[arg(long, default_value_t = 480.0)]
        height: f64,
    },
    /// Write one JSON report per city plus an index
    Report {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Directory to write report JSON files into
        #[arg(short, long, default_value = "reports")]
        output_dir: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ChartKind {
    Trend,
    Pie,
    Sankey,
    Waterfall,
    Boxplot,
    Gauge,
    Radar,
    Scatter,
    Campaigns,
    Heatmap,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/waste_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("waste_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Kpi { source } => {
            let bytes = fetch_source(&source).await?;
            let dashboard = Dashboard::from_csv_bytes(&bytes);
            let summary = kpi::aggregate(dashboard.records(), dashboard.city_stats());
            print_json(&summary)?;

            let recyclers = kpi::top_recyclers(dashboard.records());
            print_json(&recyclers)?;
        }
        Commands::Cities { source, output } => {
            let bytes = fetch_source(&source).await?;
            let dashboard = Dashboard::from_csv_bytes(&bytes);
            let ranked = stats::rank_cities(dashboard.city_stats());

            print_json(&ranked)?;

            if let Some(path) = output {
                let rows = append_city_rankings(&path, dashboard.records())?;
                info!(path, rows = rows.len(), "Leaderboard appended");
            }
        }
        Commands::Chart {
            source,
            kind,
            city,
            year,
            waste_type,
            compare,
            recycled,
            page,
            output,
            width,
            height,
        } => {
            let bytes = fetch_source(&source).await?;
            let mut dashboard = Dashboard::from_csv_bytes(&bytes);

            let mut selection = dashboard.selection().clone();
            if let Some(city) = city {
                if !dashboard.select_city(&city) {
                    bail!("unknown city: {city}");
                }
                selection = dashboard.selection().clone();
            }
            selection.year = year;
            selection.page = page;
            selection.radar_cities = compare;
            selection.sankey = waste_type
                .map(SankeyFilter::WasteType)
                .or(year.map(SankeyFilter::Year));

            let document = render_chart(&dashboard, &selection, kind, recycled, width, height);
            write_svg(&output, &document)?;
        }
        Commands::Report { source, output_dir } => {
            let bytes = fetch_source(&source).await?;
            let dashboard = Dashboard::from_csv_bytes(&bytes);

            let index = write_reports(dashboard.records(), &output_dir)?;
            print_json(&index)?;
        }
    }

    Ok(())
}

/// Runs the aggregation and layout for one chart kind and serializes the
/// result as a standalone SVG document.
fn render_chart(
    dashboard: &Dashboard,
    selection: &Selection,
    kind: ChartKind,
    recycled: bool,
    width: f64,
    height: f64,
) -> String {
    let records = dashboard.records();
    let palette = Palette::default();

    let primitives = match kind {
        ChartKind::Trend => {
            let totals = yearly::aggregate(records, selection);
            geometry::line_chart(&totals, width, height, &palette)
        }
        ChartKind::Pie => {
            let mode = if recycled {
                PieMode::Recycled
            } else {
                PieMode::Generated
            };
            let slices = pie::aggregate(records, selection, mode);
            geometry::pie_chart(&slices, width, height, &palette)
        }
        ChartKind::Sankey => {
            let graph = sankey::aggregate(records, selection);
            geometry::sankey_chart(&graph, width, height, &palette)
        }
        ChartKind::Waterfall => {
            let breakdown = waterfall::aggregate(records, selection);
            geometry::waterfall_chart(&breakdown, width, height, &palette)
        }
        ChartKind::Boxplot => {
            let years = boxplot::aggregate(records, selection);
            geometry::boxplot_chart(&years, width, height, &palette)
        }
        ChartKind::Gauge => {
            let stats = gauge::aggregate(records, selection);
            geometry::gauge_chart(&stats, width, height, &palette)
        }
        ChartKind::Radar => {
            let chart = radar::aggregate(records, selection);
            geometry::radar_chart(&chart, width, height, &palette)
        }
        ChartKind::Scatter => {
            let bubbles = scatter::aggregate(records, selection);
            geometry::scatter_chart(&bubbles, width, height, &palette)
        }
        ChartKind::Campaigns => {
            let page = campaigns::aggregate(records, selection);
            geometry::bar_chart(&page, width, height, &palette)
        }
        ChartKind::Heatmap => {
            let matrix = heatmap::aggregate(records, selection);
            geometry::heatmap_chart(&matrix, width, height, &palette)
        }
    };

    to_svg(width, height, &primitives)
}
