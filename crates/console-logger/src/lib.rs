//! Console Logger
//!
//! A `log` backend for the browser: every record goes to the devtools
//! console method matching its level, prefixed with the app name and target.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use wasm_bindgen::JsValue;

pub struct ConsoleLogger {
    app_name: &'static str,
    level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(app_name: &'static str, level: LevelFilter) -> Self {
        Self { app_name, level }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from(format_record(self.app_name, record));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug => web_sys::console::log_1(&line),
            Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger as the global `log` backend
pub fn init_logger(app_name: &'static str, level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(ConsoleLogger::new(app_name, level)))?;
    log::set_max_level(level);
    Ok(())
}

/// Parse a level name, falling back to `Info`
pub fn parse_level(value: &str) -> LevelFilter {
    value.trim().parse().unwrap_or(LevelFilter::Info)
}

/// `[APP] LEVEL target: message`
pub fn format_record(app_name: &str, record: &Record) -> String {
    format!("[{}] {} {}: {}", app_name, record.level(), short_target(record.target()), record.args())
}

/// Drop the crate prefix: `simulator_core::flows` becomes `flows`
fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_record() {
        let record = Record::builder()
            .level(Level::Warn)
            .target("simulator_core::flows")
            .args(format_args!("completing user block 4 failed"))
            .build();
        assert_eq!(format_record("SIM", &record), "[SIM] WARN flows: completing user block 4 failed");
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }

    #[test]
    fn test_init_logger_installs_once() {
        assert!(init_logger("SIM", LevelFilter::Warn).is_ok());
        assert_eq!(log::max_level(), LevelFilter::Warn);
        assert!(init_logger("SIM", LevelFilter::Debug).is_err());
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = ConsoleLogger::new("SIM", LevelFilter::Info);
        assert!(logger.enabled(&Metadata::builder().level(Level::Error).build()));
        assert!(!logger.enabled(&Metadata::builder().level(Level::Debug).build()));
    }
}
