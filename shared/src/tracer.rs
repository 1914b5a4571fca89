use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{fmt, prelude::__tracing_subscriber_SubscriberExt, EnvFilter, Registry};

/// Sets the global tracing subscriber for a service.
///
/// the log level is read from `RUST_LOG` and defaults to `info`. development
/// builds print human readable lines, everything else prints one JSON object
/// per event so logs can be shipped as is.
pub fn init(service_name: &str, is_development: bool) -> Result<(), SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if is_development {
        let subscriber = Registry::default()
            .with(filter)
            .with(fmt::layer().pretty().with_target(false));

        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = Registry::default()
            .with(filter)
            .with(fmt::layer().json().with_current_span(false));

        tracing::subscriber::set_global_default(subscriber)?;
    }

    tracing::info!(service = service_name, "[TRACER] initialized");
    Ok(())
}
