//! Corpus → mentions → weighted edge list.
//!
//! [`Extractor`] drives a tagger over a stream of documents, folding each
//! document's person pairs into a [`PairCounter`] as it goes. Only the
//! running counts are held in memory, never the corpus or the pair sequence.

use std::path::Path;

use newsnet_core::WeightedEdge;
use newsnet_core::edgelist;
use newsnet_core::error::Result;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::corpus::Document;
use crate::pairs::{PairCounter, PairPolicy, PairTally};
use crate::tagger::{EntityTagger, extract_person_mentions};

/// Documents between progress log lines.
const PROGRESS_EVERY: u64 = 500;

/// Summary of one extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    #[serde(flatten)]
    pub tally: PairTally,
    pub distinct_edges: usize,
}

/// Edges produced by a run, plus the stats describing it.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub edges: Vec<WeightedEdge>,
    pub stats: ExtractionStats,
}

/// Tagging and pairing stage.
pub struct Extractor<'t, T: EntityTagger + ?Sized> {
    tagger: &'t mut T,
    person_label: String,
    policy: PairPolicy,
}

impl<'t, T: EntityTagger + ?Sized> Extractor<'t, T> {
    #[must_use]
    pub fn new(tagger: &'t mut T, person_label: impl Into<String>, policy: PairPolicy) -> Self {
        Self {
            tagger,
            person_label: person_label.into(),
            policy,
        }
    }

    /// Tag every document and count the resulting pairs.
    ///
    /// # Errors
    ///
    /// Stops at the first document the reader or the tagger fails on.
    #[instrument(skip_all, fields(person_label = %self.person_label))]
    pub fn run<I>(&mut self, documents: I) -> Result<ExtractionOutcome>
    where
        I: IntoIterator<Item = Result<Document>>,
    {
        let mut counter = PairCounter::new(self.policy);

        for document in documents {
            let document = document?;
            let mentions =
                extract_person_mentions(&mut *self.tagger, &document.text, &self.person_label)?;
            debug!(row = document.row, mentions = mentions.len(), "document tagged");
            counter.observe_document(&mentions);

            let seen = counter.tally().documents;
            if seen % PROGRESS_EVERY == 0 {
                info!(
                    documents = seen,
                    distinct_pairs = counter.distinct_pairs(),
                    "extraction progress"
                );
            }
        }

        let stats = ExtractionStats {
            tally: counter.tally(),
            distinct_edges: counter.distinct_pairs(),
        };
        info!(
            documents = stats.tally.documents,
            pairs = stats.tally.pairs,
            edges = stats.distinct_edges,
            "extraction finished"
        );

        Ok(ExtractionOutcome {
            edges: counter.into_edges(),
            stats,
        })
    }
}

/// Write the weighted edge list to `destination`.
///
/// # Errors
///
/// Returns [`newsnet_core::NetworkError::Write`] if the file or its parent
/// directory cannot be written.
pub fn persist(edges: &[WeightedEdge], destination: &Path) -> Result<()> {
    edgelist::write_edgelist(destination, edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::{GazetteerTagger, TaggedSpan, TaggerError};
    use newsnet_core::NetworkError;

    fn doc(row: u64, text: &str) -> Result<Document> {
        Ok(Document {
            row,
            text: text.to_string(),
        })
    }

    fn people() -> GazetteerTagger {
        GazetteerTagger::from_entries([
            ("Alice", "PERSON"),
            ("Bob", "PERSON"),
            ("Carol", "PERSON"),
            ("Oslo", "GPE"),
        ])
    }

    #[test]
    fn counts_pairs_across_documents() {
        let mut tagger = people();
        let mut extractor = Extractor::new(&mut tagger, "PERSON", PairPolicy::default());

        let outcome = extractor
            .run([
                doc(2, "Alice and Bob met Carol in Oslo."),
                doc(3, "Bob called Alice."),
                doc(4, "Nobody here."),
            ])
            .expect("run");

        assert_eq!(
            outcome.edges,
            vec![
                WeightedEdge::new("Alice", "Bob", 2),
                WeightedEdge::new("Alice", "Carol", 1),
                WeightedEdge::new("Bob", "Carol", 1),
            ]
        );
        assert_eq!(outcome.stats.tally.documents, 3);
        assert_eq!(outcome.stats.tally.documents_with_pairs, 2);
        assert_eq!(outcome.stats.distinct_edges, 3);
    }

    #[test]
    fn reader_error_stops_the_run() {
        let mut tagger = people();
        let mut extractor = Extractor::new(&mut tagger, "PERSON", PairPolicy::default());

        let err = extractor
            .run([
                doc(2, "Alice and Bob"),
                Err(NetworkError::MalformedRecord {
                    path: "news.csv".into(),
                    row: 3,
                    reason: "ragged".into(),
                }),
            ])
            .expect_err("malformed");
        assert!(matches!(err, NetworkError::MalformedRecord { row: 3, .. }));
    }

    #[test]
    fn tagger_error_is_reported() {
        struct Broken;
        impl EntityTagger for Broken {
            fn tag(&mut self, _text: &str) -> std::result::Result<Vec<TaggedSpan>, TaggerError> {
                Err(TaggerError::EmptyCommand)
            }
        }

        let mut tagger = Broken;
        let mut extractor = Extractor::new(&mut tagger, "PERSON", PairPolicy::default());
        let err = extractor.run([doc(2, "x")]).expect_err("tagger fails");
        assert_eq!(err.error_code().code(), "E5001");
    }

    #[test]
    fn empty_corpus_yields_empty_edge_list() {
        let mut tagger = people();
        let mut extractor = Extractor::new(&mut tagger, "PERSON", PairPolicy::default());
        let outcome = extractor.run(std::iter::empty()).expect("run");
        assert!(outcome.edges.is_empty());
        assert_eq!(outcome.stats.tally.documents, 0);
    }

    #[test]
    fn persist_writes_readable_edge_list() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data").join("edges.csv");
        let edges = vec![WeightedEdge::new("Alice", "Bob", 2)];

        persist(&edges, &path).expect("persist");
        assert_eq!(edgelist::read_edgelist(&path).expect("read"), edges);
    }
}
