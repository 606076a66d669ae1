//! Pairing and weighting of person mentions.
//!
//! # Pairing
//!
//! A document with mentions `[m0, m1, …, m(k-1)]` contributes the
//! 2-combinations of the mention *positions*: `(mi, mj)` for every `i < j`,
//! each canonicalized into an [`EntityPair`]. A name mentioned twice is two
//! positions, so `["Alice", "Bob", "Alice"]` yields `(Alice, Bob)` twice. It
//! also yields `(Alice, Alice)`; such self-pairs are dropped unless
//! [`PairPolicy::keep_self_pairs`] is set, because a self-loop carries no
//! network meaning.
//!
//! # Weighting
//!
//! The weight of a pair is the number of times it was produced across the
//! whole corpus, not per document. [`PairCounter`] folds each document's
//! pairs into a running count as soon as they are formed, so the
//! corpus-wide pair sequence is never held in memory.

use std::collections::HashMap;

use newsnet_core::{EntityPair, WeightedEdge};
use serde::Serialize;

/// What to do with pairs whose endpoints are the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairPolicy {
    pub keep_self_pairs: bool,
}

/// Running co-occurrence counts plus bookkeeping for the run summary.
#[derive(Debug, Clone, Default)]
pub struct PairCounter {
    policy: PairPolicy,
    counts: HashMap<EntityPair, u64>,
    tally: PairTally,
}

/// Counters describing what a [`PairCounter`] has seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PairTally {
    pub documents: u64,
    pub documents_with_pairs: u64,
    pub mentions: u64,
    pub pairs: u64,
    pub self_pairs_dropped: u64,
}

impl PairCounter {
    #[must_use]
    pub fn new(policy: PairPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Fold one document's mention list into the counts.
    pub fn observe_document<S: AsRef<str>>(&mut self, mentions: &[S]) {
        let k = mentions.len() as u64;
        self.tally.documents += 1;
        self.tally.mentions += k;

        let before = self.tally.pairs;
        for pair in document_pairs(mentions, self.policy) {
            self.add(pair);
        }

        // Every positional pair not counted was a dropped self-pair.
        let positional = k * k.saturating_sub(1) / 2;
        self.tally.self_pairs_dropped += positional - (self.tally.pairs - before);
        if self.tally.pairs > before {
            self.tally.documents_with_pairs += 1;
        }
    }

    /// Count one already-formed pair.
    pub fn add(&mut self, pair: EntityPair) {
        *self.counts.entry(pair).or_insert(0) += 1;
        self.tally.pairs += 1;
    }

    #[must_use]
    pub const fn tally(&self) -> PairTally {
        self.tally
    }

    /// Number of distinct pairs counted so far.
    #[must_use]
    pub fn distinct_pairs(&self) -> usize {
        self.counts.len()
    }

    /// Weight of one pair (0 if never seen).
    #[must_use]
    pub fn weight(&self, pair: &EntityPair) -> u64 {
        self.counts.get(pair).copied().unwrap_or(0)
    }

    /// Finish counting.
    ///
    /// Edges come out by weight descending, then by `(nodeA, nodeB)`, which
    /// makes the written artifact reproducible run to run.
    #[must_use]
    pub fn into_edges(self) -> Vec<WeightedEdge> {
        let mut counted: Vec<(EntityPair, u64)> = self.counts.into_iter().collect();
        counted.sort_unstable_by(|(pa, wa), (pb, wb)| wb.cmp(wa).then_with(|| pa.cmp(pb)));
        counted
            .into_iter()
            .map(|(pair, weight)| pair.with_weight(weight))
            .collect()
    }
}

impl Extend<EntityPair> for PairCounter {
    fn extend<I: IntoIterator<Item = EntityPair>>(&mut self, iter: I) {
        for pair in iter {
            self.add(pair);
        }
    }
}

/// Canonical pairs of one document: `(mi, mj)` for every `i < j`, minus
/// self-pairs unless `policy` keeps them.
pub fn document_pairs<S: AsRef<str>>(
    mentions: &[S],
    policy: PairPolicy,
) -> impl Iterator<Item = EntityPair> + '_ {
    mentions
        .iter()
        .enumerate()
        .flat_map(move |(i, a)| {
            mentions[i + 1..]
                .iter()
                .map(move |b| EntityPair::new(a.as_ref(), b.as_ref()))
        })
        .filter(move |pair| policy.keep_self_pairs || !pair.is_self_pair())
}

/// Canonical pairs for each document's mention list, flattened.
///
/// Duplicates across (and within) documents are kept; they are what the
/// weights count.
#[must_use]
pub fn build_pairs<S: AsRef<str>>(
    mentions_per_document: &[Vec<S>],
    policy: PairPolicy,
) -> Vec<EntityPair> {
    mentions_per_document
        .iter()
        .flat_map(|mentions| document_pairs(mentions, policy))
        .collect()
}

/// Count each distinct pair, producing one weighted edge per pair.
#[must_use]
pub fn weigh_pairs<I: IntoIterator<Item = EntityPair>>(pairs: I) -> Vec<WeightedEdge> {
    let mut counter = PairCounter::new(PairPolicy::default());
    counter.extend(pairs);
    counter.into_edges()
}
