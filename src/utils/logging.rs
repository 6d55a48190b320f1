use log::LevelFilter;

pub fn print_verbose(verbose: bool, msg: &str) {
    if verbose {
        println!("Verbose: {}", msg);
    }
}

pub fn log_error(msg: &str) {
    eprintln!("Error: {}", msg);
}

/// Default level for the `log` facade; `RUST_LOG` overrides it.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the process-wide logger. Returns `false` when a logger was
/// already installed; the existing one is kept.
pub fn init_logger(verbose: bool) -> bool {
    match env_logger::Builder::new()
        .filter_level(default_level(verbose))
        .parse_default_env()
        .format_timestamp(None)
        .try_init()
    {
        Ok(()) => true,
        Err(e) => {
            log::debug!("Keeping the existing logger: {}", e);
            false
        }
    }
}
