use env_logger::{Builder, Env};

/// Initialize the `log` backend. `RUST_LOG` wins over the default level.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    // try_init: tests and repeated calls must not panic
    let _ = Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(verbose)
        .try_init();
}
