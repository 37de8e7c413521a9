//! Structured diagnostics for the `infodemics` binary.
//!
//! Events and closed spans are written to stderr through a single
//! `tracing-subscriber` registry, so run and stats reports on stdout are never
//! interleaved with log lines. Crates that still emit through the `log` facade
//! are bridged into the same pipeline.

use std::{env, io, sync::OnceLock};

use clap::ValueEnum;
use thiserror::Error;
use tracing::{debug, warn};
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, registry::Registry,
    util::SubscriberInitExt,
};

/// Environment variable consulted when `--log-format` is absent.
pub const LOG_FORMAT_ENV: &str = "INFODEMICS_LOG_FORMAT";

/// Directive applied when `RUST_LOG` is unset or unparseable.
const FALLBACK_DIRECTIVE: &str = "info";

static ACTIVE_FORMAT: OnceLock<LogFormat> = OnceLock::new();

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Rendering of diagnostic events on stderr.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    /// Compact lines intended for a terminal.
    #[default]
    Human,
    /// One JSON object per event, carrying the enclosing span list.
    Json,
}

impl LogFormat {
    /// Picks the format for this process.
    ///
    /// An explicit choice wins; otherwise [`LOG_FORMAT_ENV`] is read, and an
    /// unset variable means [`LogFormat::Human`].
    ///
    /// # Errors
    /// Returns [`LoggingError`] when the variable holds something other than
    /// `human` or `json`, or is not valid Unicode.
    pub fn resolve(explicit: Option<Self>) -> Result<Self, LoggingError> {
        explicit.map_or_else(Self::from_env, Ok)
    }

    fn from_env() -> Result<Self, LoggingError> {
        match env::var(LOG_FORMAT_ENV) {
            Ok(raw) => raw.parse(),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(source @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
                name: LOG_FORMAT_ENV,
                source,
            }),
        }
    }

    fn layer(self) -> BoxedLayer {
        let base = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_span_events(FmtSpan::CLOSE);
        match self {
            Self::Human => base.with_target(false).boxed(),
            Self::Json => base
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .boxed(),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalised = raw.trim().to_ascii_lowercase();
        <Self as ValueEnum>::from_str(&normalised, true).map_err(|_| {
            LoggingError::UnsupportedFormat {
                provided: normalised,
            }
        })
    }
}

/// Failures that stop the binary before any command runs.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The format variable was set to bytes that are not UTF-8.
    #[error("`{name}` is not valid Unicode: {source}")]
    InvalidUnicode {
        /// Variable that was read.
        name: &'static str,
        /// Error reported by [`std::env::var`].
        #[source]
        source: env::VarError,
    },
    /// The format variable named neither `human` nor `json`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Trimmed, lower-cased value that was rejected.
        provided: String,
    },
}

/// Installs the process-wide subscriber and returns the format in effect.
///
/// `RUST_LOG` filters events and defaults to `info`. Later calls leave the
/// first installation untouched and return its format. When another
/// subscriber already owns the global slot, a warning is sent through it and
/// the call still succeeds.
///
/// # Errors
/// Propagates [`LogFormat::resolve`] failures.
pub fn init_logging(requested: Option<LogFormat>) -> Result<LogFormat, LoggingError> {
    if let Some(active) = ACTIVE_FORMAT.get() {
        return Ok(*active);
    }

    let format = LogFormat::resolve(requested)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(FALLBACK_DIRECTIVE));

    // The `log` slot may already be taken by an embedding application.
    if LogTracer::init().is_err() {
        debug!("log facade already bridged");
    }

    match tracing_subscriber::registry()
        .with(format.layer())
        .with(filter)
        .try_init()
    {
        Ok(()) => debug!(?format, "structured logging installed"),
        Err(source) => warn!(error = %source, "keeping existing tracing subscriber"),
    }

    Ok(*ACTIVE_FORMAT.get_or_init(|| format))
}
