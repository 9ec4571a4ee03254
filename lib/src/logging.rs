use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;

/// Installs a compact `tracing` subscriber for the binaries.
///
/// The level comes from `RUST_LOG` (default `info`). Events go to stderr so
/// JSON written to stdout stays machine readable. The library itself only
/// emits events and never installs a subscriber.
pub fn install_logger() -> Result<(), SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_rejected() {
        // Whichever call comes first wins; the global default cannot be replaced.
        let _ = install_logger();
        assert!(install_logger().is_err());
    }
}
