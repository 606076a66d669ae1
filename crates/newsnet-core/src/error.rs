use std::fmt;
use std::io;
use std::path::PathBuf;

/// Machine-readable error codes for scripted pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    MissingColumn,
    MalformedRecord,
    EmptyGraph,
    EigenvectorNoConvergence,
    ArtifactReadFailed,
    ArtifactWriteFailed,
    TaggerFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::MissingColumn => "E2001",
            Self::MalformedRecord => "E2002",
            Self::EmptyGraph => "E3001",
            Self::EigenvectorNoConvergence => "E3002",
            Self::ArtifactReadFailed => "E4001",
            Self::ArtifactWriteFailed => "E4002",
            Self::TaggerFailed => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::MissingColumn => "Input file is missing an expected column",
            Self::MalformedRecord => "Input file contains a malformed record",
            Self::EmptyGraph => "No edges survive weight filtering",
            Self::EigenvectorNoConvergence => "Eigenvector centrality did not converge",
            Self::ArtifactReadFailed => "Input file could not be read",
            Self::ArtifactWriteFailed => "Output file could not be written",
            Self::TaggerFailed => "Entity tagger failed",
        }
    }

    /// Optional remediation hint surfaced next to the error.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in newsnet.toml and retry."),
            Self::MissingColumn => {
                Some("Check the header row; column names are matched case-sensitively.")
            }
            Self::MalformedRecord => None,
            Self::EmptyGraph => Some("Lower the weight cutoff with `--cutoff-edgeweight`."),
            Self::EigenvectorNoConvergence => Some(
                "Raise analyze.eigenvector.max_iterations or loosen analyze.eigenvector.tolerance.",
            ),
            Self::ArtifactReadFailed => Some("Check that the file exists and is readable."),
            Self::ArtifactWriteFailed => Some("Check disk space and write permissions."),
            Self::TaggerFailed => {
                Some("Verify the tagger command runs standalone and speaks JSON lines.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// NetworkError
// ---------------------------------------------------------------------------

/// Every failure either stage reports to the user.
///
/// None of these are retried: inputs are read once and all computations are
/// deterministic.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The configuration file exists but could not be parsed.
    #[error("invalid config {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// A tabular input lacks a column the stage depends on.
    #[error("{path}: missing expected column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    /// A row of a tabular input could not be decoded.
    #[error("{path}: row {row}: {reason}")]
    MalformedRecord {
        path: PathBuf,
        row: u64,
        reason: String,
    },

    /// Rows merged into one edge add up past the largest storable weight.
    #[error("edge {node_a} -- {node_b}: merged weight exceeds {max}", max = u64::MAX)]
    WeightOverflow { node_a: String, node_b: String },

    /// Weight filtering removed every edge.
    #[error("no edges have weight greater than {cutoff}; nothing to analyze")]
    EmptyGraph { cutoff: u64 },

    /// Power iteration for eigenvector centrality ran out of iterations.
    #[error(
        "eigenvector centrality did not converge within {max_iterations} iterations \
         (tolerance {tolerance:e})"
    )]
    Convergence { max_iterations: usize, tolerance: f64 },

    /// An input artifact could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An output artifact could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The entity tagger failed or broke its protocol.
    #[error("entity tagger failed: {0}")]
    Tagger(String),
}

impl NetworkError {
    /// The stable [`ErrorCode`] for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Config { .. } => ErrorCode::ConfigParseError,
            Self::MissingColumn { .. } => ErrorCode::MissingColumn,
            Self::MalformedRecord { .. } | Self::WeightOverflow { .. } => {
                ErrorCode::MalformedRecord
            }
            Self::EmptyGraph { .. } => ErrorCode::EmptyGraph,
            Self::Convergence { .. } => ErrorCode::EigenvectorNoConvergence,
            Self::Read { .. } => ErrorCode::ArtifactReadFailed,
            Self::Write { .. } => ErrorCode::ArtifactWriteFailed,
            Self::Tagger(_) => ErrorCode::TaggerFailed,
        }
    }

    /// Remediation text for this error, falling back to the code summary.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.error_code();
        code.hint().unwrap_or_else(|| code.message()).to_string()
    }

    /// True for the data-error family (missing column, malformed row or
    /// unrepresentable merged weight).
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::MissingColumn { .. } | Self::MalformedRecord { .. } | Self::WeightOverflow { .. }
        )
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used across the workspace.
pub type Result<T, E = NetworkError> = std::result::Result<T, E>;
