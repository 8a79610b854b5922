//! # Logger
//!
//! Installs the global tracing subscriber for the gate binaries: a console layer, an optional
//! rolling log file written off-thread, and an [`EnvFilter`] that `RUST_LOG` can override.
//! Both layers share one [`LogFormat`], so `--json` affects everything a run prints. Colors are
//! only used when the console is a terminal.
//!
//! ## Example
//!
//! ```rust
//! # use gate_logger::{LevelFilter, LogFormat, Logger};
//!
//! let _logger = Logger::builder("gate-check")
//!     .level(LevelFilter::DEBUG)
//!     .format(LogFormat::Compact)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Line format of every enabled layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single lines.
    #[default]
    Compact,
    /// One JSON object per line.
    Json,
}

/// Where console output goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    #[default]
    Stderr,
    /// No console output; only useful together with a log directory.
    Off,
}

#[derive(Debug)]
struct FileConfig {
    directory: PathBuf,
    rotation: Rotation,
    max_files: usize,
}

/// A builder for configuring and initializing the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    level: LevelFilter,
    format: LogFormat,
    console: ConsoleTarget,
    env_filter: Option<String>,
    file: Option<FileConfig>,
}

impl LoggerBuilder {
    /// Sets the minimum level emitted when neither `RUST_LOG` nor [`Self::env_filter`] says
    /// otherwise.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Shorthand for `DEBUG` when `verbose` is set, `INFO` otherwise.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn verbose(self, verbose: bool) -> Self {
        self.level(if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO })
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, target: ConsoleTarget) -> Self {
        self.console = target;
        self
    }

    /// Adds an explicit filter (e.g. `gate_kernel=trace,gate_totp=debug`).
    ///
    /// Invalid filters make [`LoggerBuilder::init`] fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Also writes to daily rolling files named after the logger in `directory`.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.file = Some(FileConfig {
            directory: directory.into(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
        });
        self
    }

    /// Sets the rotation of log files; ignored without [`Self::directory`].
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.rotation = rotation;
        }
        self
    }

    /// Sets how many log files to keep; ignored without [`Self::directory`].
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn max_files(mut self, max: usize) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.max_files = max;
        }
        self
    }

    /// Consumes the builder and initializes the global tracing subscriber.
    ///
    /// # Returns
    /// A [`Logger`] handle. Keep it alive until shutdown: it owns the worker flushing the
    /// log file.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, bad filter, zero
    ///   `max_files` or no enabled output.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] if the log file cannot be set up.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let env_filter = self.build_env_filter()?;

        let mut layers = Vec::new();
        match self.console {
            ConsoleTarget::Stdout => {
                layers.push(self.fmt_layer(io::stdout, io::stdout().is_terminal()));
            },
            ConsoleTarget::Stderr => {
                layers.push(self.fmt_layer(io::stderr, io::stderr().is_terminal()));
            },
            ConsoleTarget::Off => {},
        }

        let guard = match &self.file {
            Some(file) => {
                fs::create_dir_all(&file.directory).context(format!(
                    "Failed to create {}",
                    file.directory.display()
                ))?;

                let appender = RollingFileAppender::builder()
                    .rotation(file.rotation.clone())
                    .filename_prefix(&self.name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(file.max_files)
                    .build(&file.directory)?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                layers.push(self.fmt_layer(writer, false));
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(layers)
            .try_init()
            .context(format!("Failed to install logger \"{}\"", self.name))?;

        Ok(Logger { guard })
    }

    fn fmt_layer<S, W>(&self, writer: W, ansi: bool) -> BoxedLayer<S>
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a> + 'static,
        W: for<'w> tracing_subscriber::fmt::MakeWriter<'w> + Send + Sync + 'static,
    {
        let base = layer().with_writer(writer);
        match self.format {
            LogFormat::Compact => base.compact().with_ansi(ansi).boxed(),
            LogFormat::Json => base.json().with_ansi(false).boxed(),
        }
    }

    fn validate(&self) -> Result<(), LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }

        if self.file.as_ref().is_some_and(|file| file.max_files == 0) {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }

        if self.console == ConsoleTarget::Off && self.file.is_none() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging output enabled. Enable the console or a log directory."
                    .into(),
                context: None,
            });
        }

        Ok(())
    }

    fn build_env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        self.env_filter.as_ref().map_or_else(
            || Ok(builder.from_env_lossy()),
            |filter| {
                builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                    message: format!("Invalid env filter '{filter}': {e}").into(),
                    context: None,
                })
            },
        )
    }
}

/// A handle to the initialized logging system.
///
/// Holds the background worker guard of the log file, if any. Drop it only on shutdown.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`]; `name` prefixes rolling log files
    /// (e.g. `gate-check.2026-10-16.log`).
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            level: LevelFilter::INFO,
            format: LogFormat::default(),
            console: ConsoleTarget::default(),
            env_filter: None,
            file: None,
        }
    }

    /// Returns `true` if a log file is being written.
    #[must_use]
    pub const fn writes_file(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Logging system shutting down, flushing buffers...");
        }
    }
}
