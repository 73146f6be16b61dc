//! Logging setup shared by binaries built on the library.

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::error::{AssayError, Result};

/// Maps CLI verbosity flags to a maximum log level.
///
/// `quiet` wins over any verbosity. With neither flag only warnings and
/// errors are shown, so reports written to stdout stay uncluttered.
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, 2) => Level::DEBUG,
        (false, _) => Level::TRACE,
    }
}

/// Initializes structured logging on stderr.
///
/// `RUST_LOG`, when set, takes precedence over the verbosity flags.
///
/// # Example
/// ```rust,no_run
/// use assay::logging::init_logging;
///
/// init_logging(1, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = level_for(verbose, quiet);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_ascii_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| AssayError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // A global subscriber can only be installed once per process, so only the
    // level mapping is tested here.
    #[test]
    fn test_verbosity_levels() {
        let cases = [
            ((0, true), Level::ERROR),
            ((5, true), Level::ERROR),
            ((0, false), Level::WARN),
            ((1, false), Level::INFO),
            ((2, false), Level::DEBUG),
            ((9, false), Level::TRACE),
        ];

        for ((verbose, quiet), expected) in cases {
            assert_eq!(
                level_for(verbose, quiet),
                expected,
                "verbose={}, quiet={}",
                verbose,
                quiet
            );
        }
    }
}
