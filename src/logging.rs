use anyhow::Context;
use tracing::Subscriber;
use tracing_subscriber::{
    filter::LevelFilter, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
    EnvFilter,
};

/// Installs the process-wide structured logger on stderr. Stdout belongs to
/// the console sink.
pub fn init_logging() -> anyhow::Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    log_subscriber(env_filter, std::io::stderr)
        .try_init()
        .context("failed to initialize logging")
}

pub fn log_subscriber<W>(env_filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
}
