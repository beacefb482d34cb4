// Logging and verbosity control

use tracing::Level;

/// Maximum log level for the given CLI flags; `--quiet` wins over `--verbose`
pub fn log_level(verbose: bool, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Install the stderr subscriber for the given CLI flags
pub fn init_logging(verbose: bool, quiet: bool) {
    // A subscriber may already be installed, e.g. by a test harness
    let _ = tracing_subscriber::fmt()
        .with_max_level(log_level(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_levels() {
        assert_eq!(log_level(false, false), Level::WARN);
        assert_eq!(log_level(true, false), Level::DEBUG);
        assert_eq!(log_level(false, true), Level::ERROR);
        assert_eq!(log_level(true, true), Level::ERROR);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(false, true);
        init_logging(true, false);
    }
}
