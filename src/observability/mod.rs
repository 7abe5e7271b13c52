mod config;

use anyhow::Result;
use config::ServiceContext;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_LOG_FILTER: &str = "info";

pub fn init_observability(component: &str) -> Result<()> {
    let service_context = ServiceContext::from_env(component);

    // RUST_LOG overrides the default; an unparsable value is reported once
    // tracing is up instead of silently dropping logs.
    let (env_filter, filter_warning) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(err) if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() => (
            EnvFilter::new(DEFAULT_LOG_FILTER),
            Some(format!(
                "RUST_LOG is invalid; defaulting to {DEFAULT_LOG_FILTER} (parse error: {err})"
            )),
        ),
        Err(_) => (EnvFilter::new(DEFAULT_LOG_FILTER), None),
    };

    // Local time so a configured TZ shows its offset in logs.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    if let Some(warning) = filter_warning {
        warn!(
            service = %service_context.service_name,
            environment = %service_context.environment,
            component = %service_context.component,
            warning = %warning,
            "Observability config warning"
        );
    }

    info!(
        service = %service_context.service_name,
        environment = %service_context.environment,
        component = %service_context.component,
        "Observability initialized"
    );

    Ok(())
}
