// Tracing setup
//
// Installs a fmt subscriber at the level resolved by `LoggingConfig`.

use crate::config::LoggingConfig;

/// Parse a level name, falling back to INFO
pub fn parse_level(level: &str) -> tracing::Level {
    match level.parse() {
        Ok(level) => level,
        Err(_) => {
            eprintln!("Warning: Invalid log level '{}', falling back to 'info'", level);
            tracing::Level::INFO
        }
    }
}

/// Install the global subscriber. Returns false if one was already set.
pub fn init(config: &LoggingConfig) -> bool {
    let level = parse_level(&config.effective_level());
    tracing_subscriber::fmt()
        .with_max_level(level)
        .try_init()
        .is_ok()
}
