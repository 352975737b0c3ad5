use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line human readable events.
    Compact,
    /// JSON lines on stderr, for log collectors.
    Json,
}

fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "course_schedule=debug,info"
    } else {
        "course_schedule=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

pub fn init_logger(verbose: bool, format: LogFormat) {
    let base = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let layer = match format {
        LogFormat::Compact => base.compact().boxed(),
        LogFormat::Json => base.json().boxed(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter(verbose)))
        .init();
}
