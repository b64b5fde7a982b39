use crate::error::Result;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

/// Pick the log level from the CLI flags. `quiet` wins over `verbose`.
pub fn log_level(verbose: bool, quiet: bool) -> Level {
    if quiet {
        Level::WARN
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Install the global subscriber: stderr by default, or an appended log file.
pub fn init_logging(verbose: bool, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(log_level(verbose, quiet))
        .with_target(false);

    // A subscriber may already be installed (tests, embedding); keep it.
    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }

    Ok(())
}
