#![forbid(unsafe_code)]
//! newsnet-extract library.
//!
//! Turns a labelled news corpus into a weighted, undirected edge list of
//! person names that co-occur within the same article.
//!
//! ```text
//! corpus.csv
//!     ↓  corpus::CorpusReader          (keep label == REAL, take text)
//! Document
//!     ↓  tagger::extract_person_mentions (PERSON spans, document order)
//! Vec<String>
//!     ↓  pairs::PairCounter::observe_document (2-combinations, canonical)
//! HashMap<EntityPair, u64>
//!     ↓  PairCounter::into_edges
//! Vec<WeightedEdge>  →  edgelist::write_edgelist
//! ```
//!
//! # Conventions
//!
//! - **Errors**: [`newsnet_core::NetworkError`]; tagger failures convert from
//!   [`tagger::TaggerError`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod corpus;
pub mod pairs;
pub mod pipeline;
pub mod tagger;

pub use corpus::{CorpusReader, Document, load_corpus};
pub use pairs::{PairCounter, PairPolicy, build_pairs, document_pairs, weigh_pairs};
pub use pipeline::{ExtractionOutcome, ExtractionStats, Extractor, persist};
pub use tagger::{EntityTagger, TaggedSpan, extract_person_mentions};
