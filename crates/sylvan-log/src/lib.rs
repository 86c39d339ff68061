//! Structured logging for Sylvan.
//!
//! Console output with uptime timestamps and module paths, plus an optional
//! JSON log file in debug builds. The filter comes from `RUST_LOG` when set,
//! otherwise from the configured `debug.log_level`.

use std::path::Path;

use sylvan_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config provides one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "sylvan.log";

/// Resolve the filter directive string for the given config.
pub fn filter_directives(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - Optional directory for the JSON log file (debug builds only)
/// * `debug_build` - Whether this is a debug build (enables file logging)
/// * `config` - Optional configuration supplying the log level
///
/// Records emitted through the `log` facade are captured as well.
///
/// ```no_run
/// use sylvan_config::Config;
///
/// let config = Config::default();
/// sylvan_log::init_logging(None, false, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_directives(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    // Diagnostics go to stderr so scene output on stdout stays clean.
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_without_config() {
        assert_eq!(filter_directives(None), "info");
    }

    #[test]
    fn test_filter_from_config() {
        let mut config = Config::default();
        config.debug.log_level = "debug,sylvan_trees=trace".to_string();
        assert_eq!(filter_directives(Some(&config)), "debug,sylvan_trees=trace");
    }

    #[test]
    fn test_blank_level_falls_back_to_default() {
        let mut config = Config::default();
        config.debug.log_level = "   ".to_string();
        assert_eq!(filter_directives(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_resolved_directives_parse() {
        let mut config = Config::default();
        for level in ["info", "warn,sylvan_config=debug", "sylvan_trees::distribute=trace"] {
            config.debug.log_level = level.to_string();
            let directives = filter_directives(Some(&config));
            assert!(
                EnvFilter::try_new(&directives).is_ok(),
                "rejected filter {directives}"
            );
        }
        assert!(EnvFilter::try_new(filter_directives(None)).is_ok());
    }
}
