use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "pg2ora=info,pg2ora_cli=info";
const VERBOSE_FILTER: &str = "pg2ora=debug,pg2ora_cli=debug";

/// Log to stderr; stdout carries the converted SQL.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}
