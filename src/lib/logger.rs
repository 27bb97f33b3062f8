use anyhow::Result;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Quiet by default: only swallowed failures show up on stderr.
/// RUST_LOG overrides, as usual.
pub fn init() -> Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env()?,
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
