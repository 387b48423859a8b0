use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stargaze::api::{create_router, AppState};
use stargaze::client::{GalleryController, HttpGateway, LoadState, Notifier};
use stargaze::config::Config;
use stargaze::models::parse_date;
use stargaze::view::{render_text, GalleryView, Intent};

#[derive(Parser)]
#[command(name = "stargaze")]
#[command(about = "NASA Astronomy Picture of the Day gallery with AI-simplified explanations")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the image and explanation gateways (default)
    Serve,
    /// Show today's picture
    Today(ViewArgs),
    /// Show the last seven days, newest first
    Recent(ViewArgs),
    /// Show the picture for one date (YYYY-MM-DD)
    Date {
        date: String,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Show the picture for one date with its AI explanation
    Explain {
        date: String,
        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(clap::Args)]
struct ViewArgs {
    /// Gateway base URL, overriding STARGAZE_GATEWAY_URL
    #[arg(long)]
    gateway: Option<String>,
    /// Show full NASA descriptions instead of the preview
    #[arg(long)]
    full: bool,
}

/// Alerts go straight to the terminal.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    let command = args.command.unwrap_or(Command::Serve);
    let default_filter = match command {
        Command::Serve => "stargaze=info,tower_http=debug",
        _ => "stargaze=warn",
    };
    init_tracing(default_filter);

    let config = Config::from_env();

    match command {
        Command::Serve => serve(config).await,
        Command::Today(view) => {
            run_client(&config, view, |controller| async move {
                controller.dispatch(Intent::Today).await;
                controller
            })
            .await
        }
        Command::Recent(view) => {
            run_client(&config, view, |controller| async move {
                controller.dispatch(Intent::Recent).await;
                controller
            })
            .await
        }
        Command::Date { date, view } => {
            let date = parse_date("date", &date)?;
            run_client(&config, view, |controller| async move {
                controller.fetch_date(date).await;
                controller
            })
            .await
        }
        Command::Explain { date, view } => {
            let date = parse_date("date", &date)?;
            run_client(&config, view, |controller| async move {
                if controller.fetch_date(date).await == LoadState::Loaded {
                    controller.dispatch(Intent::Explain(date)).await;
                }
                controller
            })
            .await
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    if !config.apod.is_configured() {
        tracing::warn!("NASA_API_KEY is not set, /api/nasa will answer 500 until it is");
    }
    if !config.explain.is_configured() {
        tracing::warn!(
            "GEMINI_API_KEY is not set, /api/explain and /api/summary will answer 500 until it is"
        );
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(model = %config.explain.model, "Explanation model");

    let app = create_router(AppState::new(config));

    tracing::info!("Stargaze starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/health", addr);
    tracing::info!("  API docs:     http://{}/api/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn run_client<F, Fut>(config: &Config, view: ViewArgs, action: F) -> anyhow::Result<()>
where
    F: FnOnce(GalleryController) -> Fut,
    Fut: std::future::Future<Output = GalleryController>,
{
    let base_url = view
        .gateway
        .as_deref()
        .unwrap_or(&config.client.gateway_url);
    let gateway = HttpGateway::new(base_url)?;
    let controller = GalleryController::with_notifier(Arc::new(gateway), Arc::new(ConsoleNotifier));

    let controller = action(controller).await;
    let snapshot = controller.snapshot();

    let expanded: HashSet<NaiveDate> = if view.full {
        snapshot.images.iter().map(|image| image.date).collect()
    } else {
        HashSet::new()
    };

    print!("{}", render_text(&GalleryView::new(&snapshot, &expanded)));

    if let LoadState::Failed { message } = snapshot.load {
        anyhow::bail!(message);
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping server...");
}
