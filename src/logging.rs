use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

// Debug topics understood by the filter
pub const TOPICS: [&str; 4] = ["session", "spawn", "scores", "ui"];

// Custom logger structure
#[derive(Debug)]
struct AimTrainerLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl AimTrainerLogger {
    fn allows(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Topic filters only narrow debug and trace output
        if let Some(filters) = &self.debug_filters {
            if metadata.level() >= log::Level::Debug {
                return filters.contains(metadata.target())
                    || filters.iter().any(|f| metadata.target().starts_with(f.as_str()));
            }
        }
        true
    }
}

impl log::Log for AimTrainerLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.allows(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let mut output = format!(
            "{timestamp} {level_color}{level:5}{reset} {target}: {message}",
            level = record.level(),
            target = record.target(),
            message = record.args()
        );

        // Module path when the target was overridden by a topic macro
        if let Some(module_path) = record.module_path() {
            if module_path != record.target() {
                output.push_str(&format!(" [{}]", module_path));
            }
        }

        // Write failures are ignored
        let mut stdout = io::stdout();
        let _ = writeln!(stdout, "{}", output);
        let _ = stdout.flush();
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

static LOGGER: OnceLock<AimTrainerLogger> = OnceLock::new();

/// Parse a comma separated topic list, e.g. "session,scores"
pub fn parse_debug_filter(filter: &str) -> HashSet<String> {
    filter
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

// Initialize the logger with optional debug filters
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| AimTrainerLogger {
        level,
        debug_filters: debug_filter.as_deref().map(parse_debug_filter),
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

// Helper macros for specific debug topics
#[macro_export]
macro_rules! debug_session {
    ($($arg:tt)*) => {
        log::debug!(target: "session", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_spawn {
    ($($arg:tt)*) => {
        log::debug!(target: "spawn", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_scores {
    ($($arg:tt)*) => {
        log::debug!(target: "scores", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_ui {
    ($($arg:tt)*) => {
        log::debug!(target: "ui", "{}", format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, MetadataBuilder};

    fn logger(level: LevelFilter, filter: Option<&str>) -> AimTrainerLogger {
        AimTrainerLogger {
            level,
            debug_filters: filter.map(parse_debug_filter),
        }
    }

    fn meta(level: Level, target: &str) -> Metadata<'_> {
        MetadataBuilder::new().level(level).target(target).build()
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("nonsense"), LevelFilter::Info);
    }

    #[test]
    fn test_parse_debug_filter() {
        let filters = parse_debug_filter(" session, scores ,,");
        assert_eq!(filters.len(), 2);
        assert!(filters.contains("session"));
        assert!(filters.contains("scores"));
    }

    #[test]
    fn test_level_threshold() {
        let l = logger(LevelFilter::Info, None);
        assert!(l.allows(&meta(Level::Warn, "session")));
        assert!(!l.allows(&meta(Level::Debug, "session")));
    }

    #[test]
    fn test_topic_filter_only_narrows_debug() {
        let l = logger(LevelFilter::Trace, Some("scores"));
        assert!(l.allows(&meta(Level::Debug, "scores")));
        assert!(!l.allows(&meta(Level::Debug, "spawn")));
        assert!(!l.allows(&meta(Level::Trace, "session")));
        assert!(l.allows(&meta(Level::Info, "spawn")));
    }
}
