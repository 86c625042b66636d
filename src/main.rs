use std::sync::Arc;
use wellpal_backend::config::Config;
use wellpal_backend::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Loads .env before reading the environment
    let config = Config::from_env()?;

    init_logging(&config)?;

    let bind_address = config.bind_address();
    let shared_state = Arc::new(AppState::from_config(config));
    let app = build_router(shared_state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("🛑 WellPal Backend shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}

fn init_logging(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if config.debug {
            "debug,wellpal_backend=trace,reqwest=info,hyper=info,tower=info".to_string()
        } else {
            "info,wellpal_backend=info,reqwest=warn,hyper=warn,tower=warn".to_string()
        }
    });

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log_level))?;

    let fmt_layer = if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .with_thread_ids(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("🚀 {} starting up...", config.app_name);
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Log level: {}", log_level);
    tracing::info!(
        "Configuration - API prefix: {}, Gemini AI: {}, CORS origins: {}",
        config.api_prefix,
        if config.google_api_key.is_some() { "✅" } else { "❌" },
        config.allowed_origins.len()
    );

    Ok(())
}
