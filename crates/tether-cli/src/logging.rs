use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const TARGETS: [&str; 4] = ["tether_cli", "tether_core", "tether_overlay", "tether_config"];

/// `RUST_LOG` wins when set; otherwise every tether crate logs at `level`.
pub fn env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)))
}

fn directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. Logs go to stderr so stdout stays parseable.
pub fn init(level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
