use std::sync::Arc;
use std::time::Duration;

use spdlog::sink::{RotatingFileSink, RotationPolicy, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, LoggerBuilder};

use crate::config::{Config, Log, LogLevel};

impl From<LogLevel> for Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        }
    }
}

fn add_console_sinks(builder: &mut LoggerBuilder) -> spdlog::Result<()> {
    let stdout = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stdout)
        .level_filter(LevelFilter::MoreVerbose(Level::Warn))
        .build()?);

    let stderr = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stderr)
        .level_filter(LevelFilter::MoreSevereEqual(Level::Warn))
        .build()?);

    builder.sink(stdout).sink(stderr);

    Ok(())
}

fn build_logger(log: &Log) -> spdlog::Result<Arc<spdlog::Logger>> {
    let mut builder = spdlog::Logger::builder();

    if let Some(ref location) = log.location {
        let daily_sink = Arc::new(RotatingFileSink::builder()
            .base_path(location)
            .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
            .max_files(60)
            .rotate_on_open(false)
            .build()?);
        builder.sink(daily_sink);
    }
    if log.log_to_console || log.location.is_none() {
        add_console_sinks(&mut builder)?;
    }

    let logger = Arc::new(builder.build()?);
    logger.set_flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info));
    logger.set_flush_period(Some(Duration::from_secs(2)));
    logger.set_level_filter(LevelFilter::MoreSevereEqual(log.level.into()));
    Ok(logger)
}

/// Installs the configured logger as the default one.
/// Without a `[log]` section spdlog's console logger stays in place.
pub fn configure_logger(config: &Config) -> spdlog::Result<()> {
    if let Some(ref log) = config.log {
        spdlog::set_default_logger(build_logger(log)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_only_logger() {
        let log = Log {
            level: LogLevel::Debug,
            log_to_console: false,
            location: None,
        };
        let logger = build_logger(&log).unwrap();
        assert_eq!(logger.sinks().len(), 2);
        assert!(logger.should_log(Level::Debug));
        assert!(!logger.should_log(Level::Trace));
    }

    #[test]
    fn test_file_logger() {
        let dir = tempfile::tempdir().unwrap();
        let log = Log {
            level: LogLevel::Warn,
            log_to_console: false,
            location: Some(dir.path().join("viewer.log")),
        };
        let logger = build_logger(&log).unwrap();
        assert_eq!(logger.sinks().len(), 1);
        assert!(logger.should_log(Level::Error));
        assert!(!logger.should_log(Level::Info));
    }
}
