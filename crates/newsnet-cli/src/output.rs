//! Shared output layer for text/JSON parity across CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its result
//! accordingly. Progress lines (`[INFO] ...`) go to stdout through
//! [`Progress`]; errors go to stderr through [`render_error`].

use newsnet_core::NetworkError;
use serde::Serialize;
use std::io::{self, Write};

/// The output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Human,
    /// Machine-readable JSON, one object per command.
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Stdout progress reporter for the long-running stages.
///
/// Silent under `--quiet` and under `--json`, so JSON stdout stays parseable.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    enabled: bool,
}

impl Progress {
    pub const fn new(quiet: bool, mode: OutputMode) -> Self {
        Self {
            enabled: !quiet && !mode.is_json(),
        }
    }

    /// Print `[INFO] <message>`.
    pub fn info(self, message: impl AsRef<str>) {
        if self.enabled {
            println!("[INFO] {}", message.as_ref());
        }
    }
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (`E####`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Create a simple error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            error_code: None,
        }
    }

    /// Build from any error reaching `main`.
    ///
    /// A [`NetworkError`] anywhere in the chain supplies the code and hint.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        err.downcast_ref::<NetworkError>()
            .map_or_else(|| Self::new(format!("{err:#}")), Self::from)
    }
}

impl From<&NetworkError> for CliError {
    fn from(err: &NetworkError) -> Self {
        let code = err.error_code();
        Self {
            message: err.to_string(),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }
}

/// Render a serializable value to stdout in the requested format.
///
/// In JSON mode the value is serialized with `serde_json`; otherwise
/// `human_fn` writes the text form.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Human => human_fn(value, &mut out)?,
    }
    Ok(())
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(mode, error, &mut out)?;
    Ok(())
}

fn write_error(mode: OutputMode, error: &CliError, out: &mut dyn Write) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut *out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Human => {
            match error.error_code {
                Some(ref code) => writeln!(out, "error[{code}]: {}", error.message)?,
                None => writeln!(out, "error: {}", error.message)?,
            }
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  hint: {suggestion}")?;
            }
        }
    }
    Ok(())
}
