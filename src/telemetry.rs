use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Initialize structured logging for the matchflow engine.
///
/// Logs go to stderr so the CLI's progress and result output on stdout
/// stays machine-readable. `RUST_LOG` wins when set; otherwise the
/// configured `log_level` applies. `json` switches to JSON-structured lines.
pub fn init_telemetry(log_level: &str, json: bool) -> Result<()> {
    let filter = resolve_filter(EnvFilter::try_from_default_env().ok(), log_level);

    if json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true),
            )
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    tracing::debug!("matchflow telemetry initialized");
    Ok(())
}

fn resolve_filter(env: Option<EnvFilter>, fallback: &str) -> EnvFilter {
    env.unwrap_or_else(|| EnvFilter::new(fallback))
}

/// Generate a correlation ID for linking the events of one search session.
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create a span carrying the common search-session attributes.
pub fn create_search_span(role: &str, lane: &str, correlation_id: &str) -> tracing::Span {
    tracing::info_span!(
        "match_search",
        role = role,
        lane = lane,
        correlation.id = correlation_id,
    )
}
