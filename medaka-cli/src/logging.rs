//! Logging initialisation for the medaka CLI.
//!
//! Diagnostics are `tracing` events written to `stderr`, so command output
//! on `stdout` stays parseable. The filter comes from `MEDAKA_LOG` (falling
//! back to `RUST_LOG`, then a workspace default), and `MEDAKA_LOG_FORMAT`
//! switches between line-oriented and JSON output.

use std::{env, sync::OnceLock};

use thiserror::Error;
use tracing::Subscriber;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, registry::LookupSpan,
    util::SubscriberInitExt,
};

const FORMAT_ENV: &str = "MEDAKA_LOG_FORMAT";
const FILTER_ENV: &str = "MEDAKA_LOG";

/// Filter applied when neither `MEDAKA_LOG` nor `RUST_LOG` is set. The
/// UPGMA builder emits one membership trace per merge at `info`, so the
/// workspace crates sit at `info` while everything else stays at `warn`.
const DEFAULT_FILTER: &str = "warn,medaka_core=info,medaka_providers_coords=info,medaka_cli=info";

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Output formats selectable through `MEDAKA_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Line-oriented output for terminals.
    #[default]
    Human,
    /// One JSON object per event, for log pipelines.
    Json,
}

impl LogFormat {
    fn from_env() -> Result<Self, LoggingError> {
        match env::var(FORMAT_ENV) {
            Ok(raw) => Self::parse(&raw),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(source @ env::VarError::NotUnicode(_)) => Err(LoggingError::BadEnvironment {
                name: FORMAT_ENV,
                source,
            }),
        }
    }

    fn parse(raw: &str) -> Result<Self, LoggingError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(LoggingError::UnknownFormat {
                provided: raw.trim().to_owned(),
            }),
        }
    }
}

/// Errors raised while initialising structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// An environment variable held non-UTF-8 bytes.
    #[error("environment variable `{name}` is not valid UTF-8: {source}")]
    BadEnvironment {
        /// Name of the offending variable.
        name: &'static str,
        /// Underlying lookup failure.
        #[source]
        source: env::VarError,
    },
    /// `MEDAKA_LOG_FORMAT` named a format the CLI does not provide.
    #[error("`MEDAKA_LOG_FORMAT` must be `human` or `json` (got `{provided}`)")]
    UnknownFormat {
        /// Raw value supplied by the user.
        provided: String,
    },
    /// A filter variable held an unparseable directive.
    #[error("`{name}` is not a valid filter directive: {source}")]
    InvalidFilter {
        /// Variable the directive came from.
        name: &'static str,
        /// Parse failure reported by `tracing-subscriber`.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
}

/// Installs the global subscriber once; later calls are no-ops.
///
/// If another subscriber already owns the global slot (as under some test
/// harnesses), events keep flowing to it and this call still succeeds.
///
/// # Errors
/// Returns [`LoggingError`] when `MEDAKA_LOG_FORMAT`, `MEDAKA_LOG`, or
/// `RUST_LOG` is malformed.
pub fn init_logging() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }
    let format = LogFormat::from_env()?;
    let filter = filter_from_env()?;

    // `log`-facade records from dependencies become tracing events.
    let _ = LogTracer::init();

    let registry = tracing_subscriber::registry().with(filter);
    let _ = match format {
        LogFormat::Human => registry.with(human_layer()).try_init(),
        LogFormat::Json => registry.with(json_layer()).try_init(),
    };
    let _ = INSTALLED.set(());
    Ok(())
}

fn filter_from_env() -> Result<EnvFilter, LoggingError> {
    for name in [FILTER_ENV, "RUST_LOG"] {
        if let Ok(raw) = env::var(name) {
            return EnvFilter::try_new(&raw)
                .map_err(|source| LoggingError::InvalidFilter { name, source });
        }
    }
    Ok(EnvFilter::new(DEFAULT_FILTER))
}

fn human_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    // Span-close events carry run timings; enter/exit would drown the
    // per-merge traces the UPGMA builder already emits.
    tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE)
}

fn json_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(true)
        .with_writer(std::io::stderr)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("human", LogFormat::Human)]
    #[case("", LogFormat::Human)]
    #[case("JSON", LogFormat::Json)]
    #[case(" json ", LogFormat::Json)]
    fn parse_accepts_supported_formats(#[case] raw: &str, #[case] expected: LogFormat) {
        let format = LogFormat::parse(raw).expect("format must parse");
        assert_eq!(format, expected);
    }

    #[test]
    fn parse_rejects_unknown_formats() {
        let err = LogFormat::parse("yaml").expect_err("yaml is not supported");
        match err {
            LoggingError::UnknownFormat { provided } => assert_eq!(provided, "yaml"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn default_filter_directives_parse() {
        EnvFilter::try_new(DEFAULT_FILTER).expect("default filter must be valid");
    }

    #[test]
    fn init_logging_is_idempotent() {
        init_logging().expect("logging must initialise");
        init_logging().expect("subsequent calls must be no-ops");
    }
}
