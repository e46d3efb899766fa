use anyhow::Context;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs::OpenOptions;

/// Picks the log level: `-v` flags win over the configured level, and
/// without either only warnings and errors are shown.
pub fn resolve_level(verbosity: u8, configured: Option<&str>) -> LevelFilter {
    match verbosity {
        0 => configured.map(parse_level).unwrap_or(LevelFilter::Warn),
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Warn, // Default to Warn for any other value
    }
}

/// Installs the global logger: colored records on stderr, plus plain records
/// appended to `log_file` when one is configured.
pub fn setup_logger(level: LevelFilter, log_file: Option<&str>) -> anyhow::Result<()> {
    let colors = ColoredLevelConfig::new()
        .trace(Color::BrightBlack)
        .debug(Color::BrightBlue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    let stderr = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr());

    let mut dispatch = fern::Dispatch::new().level(level).chain(stderr);

    if let Some(file_path) = log_file {
        match OpenOptions::new().create(true).append(true).open(file_path) {
            Ok(file) => {
                dispatch = dispatch.chain(
                    fern::Dispatch::new()
                        .format(|out, message, record| {
                            out.finish(format_args!(
                                "[{} {} {}] {}",
                                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                                record.level(),
                                record.target(),
                                message
                            ))
                        })
                        .chain(file),
                );
            }
            Err(e) => {
                eprintln!("Warning: Failed to open log file '{file_path}': {e}");
                eprintln!("Continuing without file logging.");
            }
        }
    }

    dispatch.apply().context("a global logger is already installed")?;

    log::debug!("Logger initialized with level: {level}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_overrides_configured_level() {
        assert_eq!(resolve_level(0, None), LevelFilter::Warn);
        assert_eq!(resolve_level(0, Some("DEBUG")), LevelFilter::Debug);
        assert_eq!(resolve_level(0, Some("bogus")), LevelFilter::Warn);
        assert_eq!(resolve_level(1, Some("error")), LevelFilter::Info);
        assert_eq!(resolve_level(2, None), LevelFilter::Debug);
        assert_eq!(resolve_level(5, None), LevelFilter::Trace);
    }
}
