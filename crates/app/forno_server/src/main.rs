//! Forno HTTP server binary.
//!
//! Serves the chat page and the JSON chat endpoints, forwarding messages to
//! the Gemini API.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use forno_api::config::ApiConfig;
use forno_core::gateway::config::GeminiConfig;
use forno_core::gateway::gemini::GeminiGateway;
use forno_core::session::InMemorySessionStore;
use tracing::{info, warn};

/// CLI arguments; every flag falls back to its environment variable.
#[derive(Parser, Debug)]
#[command(name = "forno_server", about = "Forno chat server", version)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:5000")]
    bind_addr: String,

    /// Gemini model id.
    #[arg(long, env = "GEMINI_MODEL", default_value = forno_core::gateway::config::DEFAULT_MODEL)]
    model: String,

    /// Gemini API base URL (scheme and host).
    #[arg(long, env = "GEMINI_API_BASE", default_value = forno_core::gateway::config::DEFAULT_API_BASE)]
    api_base: String,

    /// Timeout for a single Gemini call, in seconds.
    #[arg(long, env = "GEMINI_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Turns kept in history before each Gemini call (at least 1).
    #[arg(
        long,
        env = "MAX_HISTORY_TURNS",
        default_value_t = forno_core::conversation::MAX_TURNS,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    max_history_turns: usize,

    /// Idle time, in seconds, after which a session is forgotten.
    #[arg(long, env = "SESSION_TTL_SECS", default_value_t = 7200)]
    session_ttl_secs: u64,

    /// Mark the session cookie `Secure`.
    #[arg(long, env = "SECURE_COOKIES", default_value_t = false)]
    secure_cookies: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,forno_api=debug,forno_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        bind_addr: args.bind_addr,
        max_history_turns: args.max_history_turns,
        session_ttl: Duration::from_secs(args.session_ttl_secs),
        secure_cookies: args.secure_cookies,
    };

    // The key is read from the environment only, never from the command line.
    let gemini = GeminiConfig {
        model: args.model,
        api_base: args.api_base,
        timeout: Duration::from_secs(args.timeout_secs),
        ..GeminiConfig::from_env()
    };
    if gemini.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; every chat message will fail until it is configured");
    }

    info!(
        model = %gemini.model,
        max_history_turns = config.max_history_turns,
        session_ttl_secs = args.session_ttl_secs,
        "starting forno_server v{}",
        forno_core::version()
    );

    let sessions = Arc::new(InMemorySessionStore::with_ttl(config.session_ttl));
    let cleanup = sessions.spawn_cleanup_task();

    let state = forno_api::AppState {
        gateway: Arc::new(GeminiGateway::new(gemini)),
        sessions,
        config: config.clone(),
    };

    let app = forno_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    cleanup.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_history_window_is_rejected() {
        let err = Args::try_parse_from(["forno_server", "--max-history-turns", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);

        let args = Args::try_parse_from(["forno_server", "--max-history-turns", "1"]).unwrap();
        assert_eq!(args.max_history_turns, 1);
    }
}
