//! Labelled news corpus reader.
//!
//! The corpus is a headed CSV with (at least) a label column and a text
//! column. Only rows carrying the configured label are yielded. Article
//! bodies routinely span several lines; the CSV reader handles quoting.

use std::fs;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use newsnet_core::config::ExtractConfig;
use newsnet_core::csvio;
use newsnet_core::error::Result;
use tracing::{debug, info, instrument};

/// One article kept from the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// 1-based line on which the record starts in the source file.
    pub row: u64,
    pub text: String,
}

/// Streaming reader over the documents of a corpus file.
///
/// Construction validates the header, so a missing column is reported before
/// any tagging work starts.
pub struct CorpusReader {
    path: PathBuf,
    reader: csv::Reader<fs::File>,
    label_idx: usize,
    text_idx: usize,
    keep_label: String,
    record: StringRecord,
    scanned: u64,
    kept: u64,
}

impl CorpusReader {
    /// Open `path` and locate the label and text columns.
    ///
    /// # Errors
    ///
    /// - [`newsnet_core::NetworkError::Read`] if the file cannot be opened.
    /// - [`newsnet_core::NetworkError::MissingColumn`] if either column is absent.
    #[instrument(skip(config), fields(path = %path.display()))]
    pub fn open(path: &Path, config: &ExtractConfig) -> Result<Self> {
        let mut reader = csvio::open_reader(path)?;
        let headers = csvio::headers(&mut reader, path)?;
        let label_idx = csvio::column_index(&headers, &config.label_column, path)?;
        let text_idx = csvio::column_index(&headers, &config.text_column, path)?;

        debug!(label_idx, text_idx, "corpus columns located");

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            label_idx,
            text_idx,
            keep_label: config.keep_label.clone(),
            record: StringRecord::new(),
            scanned: 0,
            kept: 0,
        })
    }

    /// Rows read so far, kept or not.
    #[must_use]
    pub const fn scanned(&self) -> u64 {
        self.scanned
    }

    /// Rows yielded so far.
    #[must_use]
    pub const fn kept(&self) -> u64 {
        self.kept
    }
}

impl Iterator for CorpusReader {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read_record(&mut self.record) {
                Ok(false) => {
                    info!(
                        scanned = self.scanned,
                        kept = self.kept,
                        label = %self.keep_label,
                        "corpus exhausted"
                    );
                    return None;
                }
                Ok(true) => {}
                Err(e) => return Some(Err(csvio::map_csv_error(&self.path, e))),
            }

            self.scanned += 1;
            if self.record.get(self.label_idx) != Some(self.keep_label.as_str()) {
                continue;
            }

            self.kept += 1;
            let row = self.record.position().map_or(0, csv::Position::line);
            let text = self.record.get(self.text_idx).unwrap_or_default().to_string();
            return Some(Ok(Document { row, text }));
        }
    }
}

/// Read every kept document from `path` into memory.
///
/// The extraction pipeline streams through [`CorpusReader`] instead; this is
/// for callers that want the whole filtered corpus at once.
///
/// # Errors
///
/// See [`CorpusReader::open`]; malformed rows surface as
/// [`newsnet_core::NetworkError::MalformedRecord`].
pub fn load_corpus(path: &Path, config: &ExtractConfig) -> Result<Vec<Document>> {
    CorpusReader::open(path, config)?.collect()
}
