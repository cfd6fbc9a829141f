use tracing::Level;

pub const LOG_ENV: &str = "WHITELIST_LOG";

/// Installs the fmt subscriber on stderr so stdout stays reserved for
/// command output. Safe to call more than once.
pub fn init() {
    let level = parse_level(std::env::var(LOG_ENV).ok().as_deref());
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn parse_level(raw: Option<&str>) -> Level {
    raw.and_then(|value| value.trim().parse::<Level>().ok())
        .unwrap_or(Level::INFO)
}
