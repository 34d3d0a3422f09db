use clap::ValueEnum;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::settings::{Configuration, LogFormat, LoggingConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match *self {
            LogLevel::TRACE => "TRACE",
            LogLevel::DEBUG => "DEBUG",
            LogLevel::INFO => "INFO",
            LogLevel::WARN => "WARN",
            LogLevel::ERROR => "ERROR",
        }
    }
}

/// Resolve the effective logging config (CLI level wins over the file) and install it.
pub fn run(configuration: &Configuration, arg_log_level: Option<LogLevel>) {
    let logging_config = resolve(configuration.logging(), arg_log_level);
    init_logging(&logging_config);
}

fn resolve(file_config: LoggingConfig, arg_log_level: Option<LogLevel>) -> LoggingConfig {
    match arg_log_level {
        Some(level) => LoggingConfig::new(level.as_str().to_lowercase(), file_config.format),
        None => file_config,
    }
}

/// Initialize tracing with the desired config.
pub fn init_logging(cfg: &LoggingConfig) {
    let env_filter = EnvFilter::try_new(&cfg.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match cfg.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .flatten_event(true)
                .with_ansi(false);

            let _ = registry.with(layer).try_init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(true);

            let _ = registry.with(layer).try_init();
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_level_overrides_file_level_but_keeps_format() {
        let file = LoggingConfig::new("warn".to_owned(), LogFormat::Json);
        let resolved = resolve(file, Some(LogLevel::DEBUG));
        assert_eq!(resolved, LoggingConfig::new("debug".to_owned(), LogFormat::Json));
    }

    #[test]
    fn file_level_is_used_without_cli_override() {
        let file = LoggingConfig::new("warn".to_owned(), LogFormat::Compact);
        assert_eq!(resolve(file.clone(), None), file);
    }
}
