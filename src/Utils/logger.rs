use chrono::Local;
use simplelog::*;
use std::error::Error;
use std::fs::File;

/// Maps a loglevel string to a filter. `None` means logging is switched off.
///
/// Accepted: "off", "none", "debug", "info", "warn", "error". No level given means info.
pub fn parse_loglevel(loglevel: Option<&str>) -> Result<Option<LevelFilter>, Box<dyn Error>> {
    let level = match loglevel {
        None => return Ok(Some(LevelFilter::Info)),
        Some(level) => level.to_lowercase(),
    };
    match level.as_str() {
        "off" | "none" => Ok(None),
        "debug" => Ok(Some(LevelFilter::Debug)),
        "info" => Ok(Some(LevelFilter::Info)),
        "warn" => Ok(Some(LevelFilter::Warn)),
        "error" => Ok(Some(LevelFilter::Error)),
        "trace" => Ok(Some(LevelFilter::Trace)),
        _ => Err(format!(
            "loglevel must be off, none, trace, debug, info, warn or error, got \"{}\"",
            level
        )
        .into()),
    }
}

/// Installs the global logger: terminal output, plus `log_<date_time>.txt` if `log_to_file`.
///
/// # Returns
/// `true` if a logger was installed by this call, `false` if logging is off or a global
/// logger already exists.
pub fn init_logger(loglevel: Option<&str>, log_to_file: bool) -> Result<bool, Box<dyn Error>> {
    let Some(log_option) = parse_loglevel(loglevel)? else {
        return Ok(false);
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if log_to_file {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let name = format!("log_{}.txt", date_and_time);
        loggers.push(WriteLogger::new(
            log_option,
            Config::default(),
            File::create(name)?,
        ));
    }
    match CombinedLogger::init(loggers) {
        Ok(()) => {
            log::info!("logging started with loglevel: {}", log_option);
            Ok(true)
        }
        // somebody was faster, keep their logger
        Err(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_loglevel() {
        assert_eq!(parse_loglevel(None).unwrap(), Some(LevelFilter::Info));
        assert_eq!(parse_loglevel(Some("debug")).unwrap(), Some(LevelFilter::Debug));
        assert_eq!(parse_loglevel(Some("WARN")).unwrap(), Some(LevelFilter::Warn));
        assert_eq!(parse_loglevel(Some("error")).unwrap(), Some(LevelFilter::Error));
        assert_eq!(parse_loglevel(Some("off")).unwrap(), None);
        assert_eq!(parse_loglevel(Some("none")).unwrap(), None);
        assert!(parse_loglevel(Some("verbose")).is_err());
    }

    #[test]
    fn test_logging_off_installs_nothing() {
        assert!(!init_logger(Some("off"), false).unwrap());
        assert!(init_logger(Some("loud"), false).is_err());
    }
}
