use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the JSON stdout subscriber once per process.
///
/// `RUST_LOG` takes precedence over `default_directives`. An unparsable
/// `RUST_LOG` falls back to the defaults and is reported after install.
pub fn init_tracing(default_directives: &str) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = filter_from(rust_log.as_deref(), default_directives);
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_span_list(true))
        .try_init()
        .is_ok();
    if let Some(raw) = rust_log.filter(|raw| installed && EnvFilter::try_new(raw).is_err()) {
        tracing::warn!(rust_log = %raw, "ignoring unparsable RUST_LOG");
    }
}

fn filter_from(rust_log: Option<&str>, default_directives: &str) -> EnvFilter {
    rust_log
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .or_else(|| EnvFilter::try_new(default_directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
