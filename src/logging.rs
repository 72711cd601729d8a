//! Logger setup for binaries and tests.
//!
//! The library itself only talks to the `log` facade. Hosts that do not bring
//! their own logger can call [`init_logging`] early in `main`.

use std::sync::Once;

use log::LevelFilter;

/// Logger configuration.
///
/// `filter` uses the `env_logger` filter syntax (e.g. `"warn"` or
/// `"qrstyle=debug"`). Without it, `RUST_LOG` is honored, then `info`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: None, write_style: env_logger::WriteStyle::Auto }
    }
}

impl LoggingConfig {
    /// Maps a `-v` count to a crate filter: 0 keeps the default, 1 is
    /// `debug`, 2 and more is `trace`.
    pub fn with_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => return Self::default(),
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        Self { filter: Some(format!("qrstyle={level}")), ..Self::default() }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(LevelFilter::Info);
        }
        builder.write_style(config.write_style);

        // another logger may already be installed by the host
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
