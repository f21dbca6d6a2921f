use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global `fmt` subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the front end logs at `info` and the
/// library only reports problems, unless `timed` asks for its build timings.
/// Records emitted through the `log` facade are forwarded as well.
pub fn init_logger(timed: bool) {
    let default_directives = if timed {
        LevelFilter::INFO.to_string()
    } else {
        format!("{},connscan_core={}", LevelFilter::INFO, LevelFilter::WARN)
    };
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_directives.clone());
    let env_filter = EnvFilter::try_new(&rust_log).unwrap_or_else(|err| {
        eprintln!(
            "invalid {}, falling back to '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            default_directives,
            err,
        );
        EnvFilter::new(&default_directives)
    });

    let result = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .try_init();
    if let Err(err) = result {
        eprintln!("failed to install the log subscriber: {err}");
    }
}
