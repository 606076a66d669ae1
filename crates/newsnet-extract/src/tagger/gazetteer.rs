//! Dictionary tagger.
//!
//! # File format
//!
//! One entry per line, optionally followed by a tab and a label:
//!
//! ```text
//! # comments and blank lines are skipped
//! Hillary Clinton
//! Donald Trump
//! State Department	ORG
//! ```
//!
//! Entries without a label are `PERSON`.
//!
//! # Matching
//!
//! Text and entries are split into alphanumeric word tokens; everything else
//! (spaces, punctuation, apostrophes) separates tokens. An entry matches a run
//! of consecutive text tokens exactly (case-sensitive). At each position the
//! longest entry wins and matching resumes after it, so "Bill Clinton" is one
//! mention, not "Bill Clinton" plus "Clinton". Spans carry the entry's text,
//! which keeps spelling consistent across documents.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use super::{EntityTagger, TaggedSpan, TaggerError};

const DEFAULT_LABEL: &str = "PERSON";

#[derive(Debug, Clone)]
struct Entry {
    tokens: Vec<String>,
    span: TaggedSpan,
}

/// Longest-match dictionary tagger.
#[derive(Debug, Clone, Default)]
pub struct GazetteerTagger {
    /// First token → entries starting with it, longest first.
    index: HashMap<String, Vec<Entry>>,
    len: usize,
}

impl GazetteerTagger {
    /// Build from `(name, label)` entries. Later duplicates of a name are ignored.
    #[must_use]
    pub fn from_entries<I, S, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, L)>,
        S: Into<String>,
        L: Into<String>,
    {
        let mut tagger = Self::default();
        for (name, label) in entries {
            tagger.insert(name.into(), label.into());
        }
        for bucket in tagger.index.values_mut() {
            bucket.sort_by(|a, b| b.tokens.len().cmp(&a.tokens.len()));
        }
        tagger
    }

    /// Parse the gazetteer file format described in the module docs.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        Self::from_entries(content.lines().filter_map(|line| {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                return None;
            }
            let (name, label) = line
                .split_once('\t')
                .map_or((line, DEFAULT_LABEL), |(n, l)| (n, l.trim()));
            Some((name.trim().to_string(), label.to_string()))
        }))
    }

    /// Load a gazetteer file.
    ///
    /// # Errors
    ///
    /// Returns [`TaggerError::Gazetteer`] if the file cannot be read.
    #[instrument(fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, TaggerError> {
        let content = fs::read_to_string(path).map_err(|source| TaggerError::Gazetteer {
            path: path.to_path_buf(),
            source,
        })?;
        let tagger = Self::parse(&content);
        debug!(entries = tagger.len(), "gazetteer loaded");
        Ok(tagger)
    }

    /// Number of distinct entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn insert(&mut self, name: String, label: String) {
        let tokens: Vec<String> = tokens(&name).map(str::to_string).collect();
        let Some(first) = tokens.first().cloned() else {
            return;
        };
        let bucket = self.index.entry(first).or_default();
        if bucket.iter().any(|e| e.tokens == tokens) {
            return;
        }
        bucket.push(Entry {
            tokens,
            span: TaggedSpan::new(name, label),
        });
        self.len += 1;
    }

    fn find(&self, text: &str) -> Vec<TaggedSpan> {
        let words: Vec<&str> = tokens(text).collect();
        let mut spans = Vec::new();
        let mut i = 0;

        while i < words.len() {
            let matched = self.index.get(words[i]).and_then(|bucket| {
                bucket.iter().find(|entry| {
                    let end = i + entry.tokens.len();
                    end <= words.len()
                        && entry
                            .tokens
                            .iter()
                            .zip(&words[i..end])
                            .all(|(a, b)| a.as_str() == *b)
                })
            });

            match matched {
                Some(entry) => {
                    spans.push(entry.span.clone());
                    i += entry.tokens.len();
                }
                None => i += 1,
            }
        }

        spans
    }
}

impl EntityTagger for GazetteerTagger {
    fn tag(&mut self, text: &str) -> Result<Vec<TaggedSpan>, TaggerError> {
        Ok(self.find(text))
    }
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}
