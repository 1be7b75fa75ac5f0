//! Parley API server binary.
//!
//! Serves the survey and chat endpoints, backed by PostgreSQL and a local
//! Ollama instance.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use parley_api::config::ApiConfig;
use parley_core::llm::ollama::OllamaClient;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// CLI arguments for the API server.
///
/// Settings left out fall back to the environment (and `.env`), then to the
/// defaults documented on [`ApiConfig::from_env`].
#[derive(Parser, Debug)]
#[command(name = "parley_server", about = "Parley survey and chat API server")]
struct Args {
    /// Address to listen on [env: BIND_ADDR].
    #[arg(long)]
    bind: Option<String>,

    /// PostgreSQL connection URL [env: DATABASE_URL].
    #[arg(long)]
    database_url: Option<String>,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Ollama API base URL [env: OLLAMA_BASE_URL].
    #[arg(long)]
    ollama_url: Option<String>,

    /// Model used for generated replies [env: OLLAMA_MODEL].
    #[arg(long)]
    ollama_model: Option<String>,

    /// Timeout for a single generation request, in seconds [env: OLLAMA_TIMEOUT_SECS].
    #[arg(long)]
    ollama_timeout_secs: Option<u64>,

    /// Skip running embedded migrations at startup.
    #[arg(long, default_value_t = false)]
    no_migrate: bool,
}

impl Args {
    /// Overlay explicitly passed flags onto `config`.
    fn apply(&self, mut config: ApiConfig) -> ApiConfig {
        if let Some(bind) = &self.bind {
            config.bind_addr = bind.clone();
        }
        if let Some(url) = &self.database_url {
            config.database_url = url.clone();
        }
        if let Some(url) = &self.ollama_url {
            config.ollama.base_url = url.clone();
        }
        if let Some(model) = &self.ollama_model {
            config.ollama.model = model.clone();
        }
        if let Some(secs) = self.ollama_timeout_secs {
            config.ollama.timeout = Duration::from_secs(secs);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,parley_api=debug,parley_core=debug".into()),
        )
        .init();

    let args = Args::parse();
    let config = args.apply(ApiConfig::from_env());

    info!(
        bind = %config.bind_addr,
        max_connections = args.max_connections,
        ollama_url = %config.ollama.base_url,
        model = %config.ollama.model,
        "starting parley_server"
    );

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database_url)
        .await?;

    if args.no_migrate {
        info!("skipping database migrations");
    } else {
        info!("running database migrations");
        parley_api::migrate(&pool).await?;
    }

    let generator = OllamaClient::new(&config.ollama)?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let state = parley_api::AppState {
        pool,
        generator: Arc::new(generator),
    };
    let app = parley_api::router(state);

    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use parley_core::llm::config::OllamaConfig;

    use super::*;

    fn base_config() -> ApiConfig {
        ApiConfig {
            bind_addr: "127.0.0.1:8000".into(),
            database_url: "postgres://from-env/survey_db".into(),
            ollama: OllamaConfig::default(),
        }
    }

    #[test]
    fn no_flags_keep_environment_config() {
        let args = Args::try_parse_from(["parley_server"]).expect("parse");
        assert_eq!(args.max_connections, 5);
        assert!(!args.no_migrate);

        let config = args.apply(base_config());
        assert_eq!(config.database_url, "postgres://from-env/survey_db");
        assert_eq!(config.ollama, OllamaConfig::default());
    }

    #[test]
    fn flags_override_only_what_they_name() {
        let args = Args::try_parse_from([
            "parley_server",
            "--ollama-url",
            "http://gpu:11434",
            "--ollama-model",
            "llama3",
            "--ollama-timeout-secs",
            "10",
            "--max-connections",
            "2",
        ])
        .expect("parse");
        let config = args.apply(base_config());
        assert_eq!(config.ollama.base_url, "http://gpu:11434");
        assert_eq!(config.ollama.model, "llama3");
        assert_eq!(config.ollama.timeout, Duration::from_secs(10));
        assert_eq!(config.bind_addr, "127.0.0.1:8000");
        assert_eq!(config.database_url, "postgres://from-env/survey_db");
        assert_eq!(args.max_connections, 2);
    }
}
