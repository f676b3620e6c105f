use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod settings;
pub mod validation;

pub use settings::ClientSettings;

const DEFAULT_FILTER: &str = "limesurvey_rpc=info,limesurvey=info,reqwest=warn,hyper=warn";

/// Initialize logging with structured output and environment-based level filtering.
///
/// `RUST_LOG` wins; otherwise `level` (from `--log-level` or settings)
/// applies to this crate.
pub fn init_logging(level: Option<&str>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match level {
        Some(level) => EnvFilter::new(format!(
            "limesurvey_rpc={level},limesurvey={level},reqwest=warn,hyper=warn"
        )),
        None => EnvFilter::new(DEFAULT_FILTER),
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_names(false)
                .with_file(true)
                .with_line_number(true)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()?;

    tracing::debug!("Structured logging initialized");
    Ok(())
}

/// Initialize logging for testing with reduced verbosity
pub fn init_test_logging() -> anyhow::Result<()> {
    let env_filter = EnvFilter::new("limesurvey_rpc=debug");

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_test_writer().compact())
        .try_init()
        .or_else(|_| Ok(())) // Ignore if already initialized
}
