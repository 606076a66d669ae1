//! Entity tagger seam.
//!
//! Named-entity recognition is an external capability. The pipeline only
//! needs tagged spans in document order, so every backend implements
//! [`EntityTagger`]:
//!
//! - [`GazetteerTagger`]: dictionary lookup against a names file.
//! - [`CommandTagger`]: a long-running NER process spoken to over JSON lines.
//!
//! Tests plug in their own stub implementations.

mod command;
mod gazetteer;

use std::io;
use std::path::PathBuf;

use newsnet_core::NetworkError;
use serde::{Deserialize, Serialize};

pub use command::CommandTagger;
pub use gazetteer::GazetteerTagger;

/// A recognized entity: its surface text and type label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSpan {
    pub text: String,
    pub label: String,
}

impl TaggedSpan {
    #[must_use]
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Errors raised by tagger backends.
#[derive(Debug, thiserror::Error)]
pub enum TaggerError {
    /// The gazetteer file could not be read.
    #[error("failed to read gazetteer {path}: {source}")]
    Gazetteer {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The tagger process could not be started.
    #[error("failed to start tagger `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The tagger command line was empty.
    #[error("tagger command is empty")]
    EmptyCommand,

    /// Pipe I/O with the tagger process failed.
    #[error("tagger i/o: {0}")]
    Io(#[from] io::Error),

    /// The tagger process closed its output before answering.
    #[error("tagger `{program}` exited before answering")]
    Exited { program: String },

    /// The tagger answered with something other than a span array.
    #[error("tagger `{program}` sent an invalid response: {reason}")]
    Protocol { program: String, reason: String },
}

impl From<TaggerError> for NetworkError {
    fn from(err: TaggerError) -> Self {
        match err {
            TaggerError::Gazetteer { path, source } => Self::Read { path, source },
            other => Self::Tagger(other.to_string()),
        }
    }
}

/// Anything that can tag entities in a document.
pub trait EntityTagger {
    /// Tag `text`, returning spans in order of appearance.
    ///
    /// # Errors
    ///
    /// Returns a [`TaggerError`] if the backend fails.
    fn tag(&mut self, text: &str) -> Result<Vec<TaggedSpan>, TaggerError>;
}

impl<T: EntityTagger + ?Sized> EntityTagger for Box<T> {
    fn tag(&mut self, text: &str) -> Result<Vec<TaggedSpan>, TaggerError> {
        (**self).tag(text)
    }
}

/// Person mentions of `text`, in order of appearance.
///
/// Spans whose label is not `person_label` are discarded. Repeated names are
/// kept; each occurrence is a separate mention.
///
/// # Errors
///
/// Propagates the tagger's failure.
pub fn extract_person_mentions<T: EntityTagger + ?Sized>(
    tagger: &mut T,
    text: &str,
    person_label: &str,
) -> Result<Vec<String>, TaggerError> {
    Ok(tagger
        .tag(text)?
        .into_iter()
        .filter(|span| span.label == person_label)
        .map(|span| span.text)
        .collect())
}
