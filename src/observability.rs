//! Logging setup for binaries and tests.
//!
//! The library only emits `tracing` events. [`init_logging`] installs a
//! stderr subscriber once per process; later calls are no-ops. Parser crates
//! log every HTML recovery at debug level, so their targets are silenced by
//! default.

use std::sync::OnceLock;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Targets turned off unless `RUST_LOG` says otherwise.
pub const DEFAULT_QUIET_TARGETS: &[&str] = &["html5ever", "selectors", "hyper", "reqwest"];

/// Output encoding for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Configuration passed to [`init_logging`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub default_filter: String,
    /// Targets logged at `off` in addition to the default filter.
    pub quiet_targets: Vec<String>,
    /// Preferred log encoding.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            quiet_targets: DEFAULT_QUIET_TARGETS.iter().map(ToString::to_string).collect(),
            format: LogFormat::Text,
        }
    }
}

/// Build the filter: `RUST_LOG` when set and valid, else the configured
/// default with each quiet target switched off.
#[must_use]
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let mut filter = EnvFilter::try_new(&config.default_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    for target in &config.quiet_targets {
        match format!("{target}=off").parse::<Directive>() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(err) => eprintln!("ignoring quiet target {target:?}: {err}"),
        }
    }
    filter
}

/// Install the global stderr subscriber. Returns `false` when logging was
/// already initialised by an earlier call or another subscriber.
pub fn init_logging(config: LogConfig) -> bool {
    if INSTALLED.get().is_some() {
        return false;
    }

    let filter = build_filter(&config);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = match config.format {
        LogFormat::Text => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    };

    let _ = INSTALLED.set(());
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_targets_become_off_directives() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let filter = build_filter(&LogConfig {
            default_filter: "debug".to_string(),
            quiet_targets: vec!["html5ever".to_string()],
            format: LogFormat::Text,
        });
        let rendered = filter.to_string();
        assert!(rendered.contains("html5ever=off"));
        assert!(rendered.contains("debug"));
    }

    #[test]
    fn second_init_is_a_no_op() {
        init_logging(LogConfig::default());
        assert!(!init_logging(LogConfig::default()));
    }
}
