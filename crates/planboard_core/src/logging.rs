//! Process logging bootstrap.
//!
//! # Responsibility
//! - Start one `flexi_logger` backend per process: rolling files when a
//!   directory is configured, stderr otherwise.
//! - Record panics as log events before the default hook runs.
//!
//! # Invariants
//! - The first successful `init_logging` fixes the settings for the process;
//!   later calls succeed only when they ask for the same settings.
//! - Initialization never panics.
//! - Log lines carry ids and counts only, never titles or note bodies.

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, LogSpecification, Logger, LoggerHandle, Naming,
    WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const LOG_FILE_BASENAME: &str = "planboard";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;
const PANIC_SUMMARY_CHARS: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Where log records end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Rotating files under this absolute directory. Warnings and errors are
    /// echoed to stderr as well.
    Directory(PathBuf),
}

/// Validated logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub target: LogTarget,
}

impl LogSettings {
    /// Validates a level name and an optional absolute log directory.
    pub fn parse(level: &str, log_dir: Option<&str>) -> Result<Self, String> {
        let level = parse_level(level)?;
        let target = match log_dir {
            Some(dir) => LogTarget::Directory(parse_log_dir(dir)?),
            None => LogTarget::Stderr,
        };
        Ok(Self { level, target })
    }
}

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Initializes process logging.
///
/// # Errors
/// - Unknown `level`, or `off`.
/// - Blank or relative `log_dir`, or a directory that cannot be created.
/// - Logging already running with different settings.
/// - Backend start failure.
pub fn init_logging(level: &str, log_dir: Option<&str>) -> Result<(), String> {
    let requested = LogSettings::parse(level, log_dir)?;
    let active = ACTIVE.get_or_try_init(|| start(requested.clone()))?;
    if active.settings != requested {
        return Err(format!(
            "logging already running as {}; refusing to switch to {}",
            describe(&active.settings),
            describe(&requested)
        ));
    }
    Ok(())
}

/// Settings of the running logger, or `None` before `init_logging`.
pub fn logging_status() -> Option<LogSettings> {
    ACTIVE.get().map(|active| active.settings.clone())
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(settings: LogSettings) -> Result<ActiveLogger, String> {
    let logger = Logger::with(LogSpecification::builder().default(settings.level).build());

    let handle = match &settings.target {
        LogTarget::Stderr => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::detailed_format)
            .start(),
        LogTarget::Directory(dir) => {
            std::fs::create_dir_all(dir)
                .map_err(|err| format!("cannot create log directory `{}`: {err}", dir.display()))?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(ROTATE_AT_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
                )
                .append()
                .write_mode(WriteMode::BufferAndFlush)
                .duplicate_to_stderr(Duplicate::Warn)
                .format_for_files(flexi_logger::detailed_format)
                .start()
        }
    }
    .map_err(|err| format!("failed to start logger: {err}"))?;

    PANIC_HOOK.get_or_init(install_panic_hook);
    info!(
        "event=logging_init module=core status=ok {} os={} version={}",
        describe(&settings),
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        settings,
        _handle: handle,
    })
}

fn describe(settings: &LogSettings) -> String {
    let target = match &settings.target {
        LogTarget::Stderr => "stderr".to_string(),
        LogTarget::Directory(dir) => dir.display().to_string(),
    };
    format!("level={} target={target}", settings.level)
}

fn parse_level(level: &str) -> Result<LevelFilter, String> {
    match LevelFilter::from_str(level.trim()) {
        Ok(LevelFilter::Off) | Err(_) => Err(format!(
            "unsupported log level `{}`; expected trace|debug|info|warn|error",
            level.trim()
        )),
        Ok(filter) => Ok(filter),
    }
}

fn parse_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log directory cannot be blank".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log directory must be absolute, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!(
            "event=panic module=core status=error location={location} payload={}",
            one_line(&payload, PANIC_SUMMARY_CHARS)
        );
        previous(info);
    }));
}

/// Flattens `value` onto one line and caps it at `max_chars` characters.
fn one_line(value: &str, max_chars: usize) -> String {
    let flat = value.replace(['\n', '\r'], " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut capped = flat.chars().take(max_chars).collect::<String>();
    capped.push_str("...");
    capped
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, one_line, LogSettings, LogTarget};
    use log::LevelFilter;

    #[test]
    fn settings_accept_known_levels_case_insensitively() {
        let settings = LogSettings::parse(" WARN ", None).unwrap();
        assert_eq!(settings.level, LevelFilter::Warn);
        assert_eq!(settings.target, LogTarget::Stderr);
        assert!(LogSettings::parse("verbose", None).is_err());
        assert!(LogSettings::parse("off", None).is_err());
    }

    #[test]
    fn settings_reject_relative_and_blank_directories() {
        let relative = LogSettings::parse("info", Some("logs/dev")).unwrap_err();
        assert!(relative.contains("absolute"));
        let blank = LogSettings::parse("info", Some("  ")).unwrap_err();
        assert!(blank.contains("blank"));
    }

    #[test]
    fn one_line_flattens_and_caps() {
        assert_eq!(one_line("a\nb", 10), "a b");
        assert_eq!(one_line("line1\nline2", 4), "line...");
    }

    #[test]
    fn repeated_init_must_match_the_running_settings() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let log_dir_str = log_dir.to_str().unwrap().to_string();

        init_logging("info", Some(&log_dir_str)).unwrap();
        init_logging("INFO", Some(&log_dir_str)).unwrap();

        let level_change = init_logging("debug", Some(&log_dir_str)).unwrap_err();
        assert!(level_change.contains("refusing to switch"));
        let target_change = init_logging("info", None).unwrap_err();
        assert!(target_change.contains("refusing to switch"));

        let active = logging_status().unwrap();
        assert_eq!(active.level, LevelFilter::Info);
        assert_eq!(active.target, LogTarget::Directory(log_dir));
    }
}
