use crate::Environment;
use tracing::{debug, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install color-eyre for startup error reports.
///
/// Call it first thing in `main`. Repeated calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Filter used when `RUST_LOG` is unset.
fn default_directives(environment: &Environment) -> &'static str {
    match environment {
        Environment::Production => "info,tower_http=info,mongodb=warn",
        Environment::Development => "debug,tower_http=debug,mongodb=info,hyper=info",
    }
}

/// Initialize the global tracing subscriber.
///
/// Production writes flattened JSON lines without targets, development writes
/// pretty multi-line output. Both carry `tracing_error::ErrorLayer` so eyre
/// reports include span traces. Only the first call installs a subscriber.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(environment)));

    let output = match environment {
        Environment::Production => fmt::layer()
            .json()
            .with_target(false)
            .flatten_event(true)
            .boxed(),
        Environment::Development => fmt::layer()
            .pretty()
            .with_file(false)
            .with_line_number(false)
            .boxed(),
    };

    let installed = tracing_subscriber::registry()
        .with(output)
        .with(ErrorLayer::default())
        .with(filter)
        .try_init();

    match installed {
        Ok(()) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}
