use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over the configured level; an unparsable level falls
/// back to `info`.
pub fn init(level: &str) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match level.parse::<EnvFilter>() {
            Ok(filter) => filter,
            Err(e) => {
                eprintln!("warning: log level {level:?} is not a valid filter ({e}); using \"info\"");
                EnvFilter::new("info")
            }
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
