use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use rankgap::config::AppConfig;
use rankgap::error::AppError;
use rankgap::telemetry;
use rankgap::workflows::gap::{
    gap_router, AhrefsProvider, DataForSeoProvider, GapCache, GapRunOptions, KeywordGapResult,
    KeywordGapService, ProviderRegistry, SystemClock,
};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

mod demo;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "rankgap",
    about = "Classify competitor keyword gaps into scored opportunity buckets",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run the gap engine locally
    Gap {
        #[command(subcommand)]
        command: GapCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum GapCommand {
    /// Analyze a bundled footwear fixture with a canned provider
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
struct DemoArgs {
    /// Emit the raw result as JSON instead of the rendered report
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Gap {
            command: GapCommand::Demo(args),
        } => run_gap_demo(args).await,
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let dataforseo = config
        .providers
        .dataforseo_credentials()
        .map(|(login, password)| DataForSeoProvider::new(login, password));
    let ahrefs = config
        .providers
        .ahrefs_token
        .clone()
        .map(AhrefsProvider::new);
    let registry = Arc::new(ProviderRegistry::new(dataforseo, ahrefs));
    let cache = Arc::new(GapCache::new(Arc::new(SystemClock)));
    let service = Arc::new(KeywordGapService::new(registry, cache));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(gap_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "keyword gap service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_gap_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = demo::fixture_configuration();
    let provider = Arc::new(demo::FixtureProvider::default());
    let cache = Arc::new(GapCache::new(Arc::new(SystemClock)));
    let service = KeywordGapService::new(provider, cache);

    let result = service.compute(&config, &GapRunOptions::default()).await;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        render_gap_report(&result);
    }

    Ok(())
}

fn render_gap_report(result: &KeywordGapResult) {
    println!("Keyword gap demo");
    println!(
        "Brand: {} vs {} competitor(s)",
        result.brand_domain,
        result.competitors.len()
    );
    println!("Configuration: {}", result.configuration);

    println!(
        "\n{} keywords evaluated: {} pass ({}%), {} review ({}%), {} out of play ({}%)",
        result.stats.total,
        result.stats.passed,
        result.stats.passed_pct,
        result.stats.review,
        result.stats.review_pct,
        result.stats.out_of_play,
        result.stats.out_of_play_pct
    );

    if result.top_opportunities.is_empty() {
        println!("\nTop opportunities: none");
    } else {
        println!("\nTop opportunities");
        for group in &result.top_opportunities {
            println!("- {}", group.theme);
            for keyword in &group.keywords {
                println!(
                    "  {} {} (score {:.0}, volume {}) - {}",
                    keyword.status_icon,
                    keyword.keyword,
                    keyword.opportunity_score,
                    keyword.search_volume,
                    keyword.reason
                );
            }
        }
    }

    if !result.needs_review.is_empty() {
        println!("\nNeeds review");
        for keyword in &result.needs_review {
            println!(
                "  {} {} (capability {:.2}) - {}",
                keyword.status_icon, keyword.keyword, keyword.capability_score, keyword.reason
            );
        }
    }

    if !result.out_of_play.is_empty() {
        println!("\nOut of play");
        for keyword in &result.out_of_play {
            println!("  {} {} - {}", keyword.status_icon, keyword.keyword, keyword.reason);
        }
    }

    println!(
        "\nFilters applied: {} competitor brand, {} size/variant, {} excluded, {} outside fence",
        result.filters_applied.competitor_brand,
        result.filters_applied.size_variant,
        result.filters_applied.excluded,
        result.filters_applied.outside_fence
    );
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
