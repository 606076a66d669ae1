//! Fruchterman-Reingold spring layout.
//!
//! # Algorithm
//!
//! Nodes start at seeded random positions in the unit square. Each
//! iteration every pair of nodes repels with force `k² / d` and every edge
//! attracts its endpoints with force `d² / k`, where `k = sqrt(1 / n)` is
//! the ideal edge length. Each node then moves along its net displacement by
//! at most the current temperature, which starts at 0.1 and cools linearly
//! towards zero.
//!
//! Attraction is unweighted: co-occurrence counts span several orders of
//! magnitude and would collapse heavy pairs onto each other.
//!
//! Finished positions are centred on the origin and scaled so the farthest
//! coordinate sits at ±1. The same graph, seed and iteration count always
//! give the same layout.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::instrument;

use crate::graph::build::CooccurrenceGraph;

const MIN_DISTANCE: f64 = 0.01;
const INITIAL_TEMPERATURE: f64 = 0.1;

/// Node positions, indexed by `NodeIndex::index()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub positions: Vec<[f64; 2]>,
}

impl Layout {
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Lay out `g` with `iterations` rounds of Fruchterman-Reingold from `seed`.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn spring_layout(g: &CooccurrenceGraph, iterations: usize, seed: u64) -> Layout {
    let n = g.node_count();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos: Vec<[f64; 2]> = (0..n).map(|_| [rng.r#gen::<f64>(), rng.r#gen::<f64>()]).collect();

    if n <= 1 {
        return Layout {
            positions: rescale(pos),
        };
    }

    let adj = g.adjacency();
    let k = (1.0 / n as f64).sqrt();
    let mut t = INITIAL_TEMPERATURE;
    let dt = t / (iterations as f64 + 1.0);
    let mut disp = vec![[0.0_f64; 2]; n];

    for _ in 0..iterations {
        for d in &mut disp {
            *d = [0.0, 0.0];
        }

        for i in 0..n {
            for j in (i + 1)..n {
                let dx = pos[i][0] - pos[j][0];
                let dy = pos[i][1] - pos[j][1];
                let dist = dx.hypot(dy).max(MIN_DISTANCE);
                let repulse = k * k / (dist * dist);
                disp[i][0] += dx * repulse;
                disp[i][1] += dy * repulse;
                disp[j][0] -= dx * repulse;
                disp[j][1] -= dy * repulse;
            }
        }

        for (i, nbrs) in adj.iter().enumerate() {
            for &j in nbrs {
                let dx = pos[i][0] - pos[j][0];
                let dy = pos[i][1] - pos[j][1];
                let dist = dx.hypot(dy).max(MIN_DISTANCE);
                let attract = dist / k;
                disp[i][0] -= dx * attract;
                disp[i][1] -= dy * attract;
            }
        }

        for (p, d) in pos.iter_mut().zip(&disp) {
            let length = d[0].hypot(d[1]);
            let length = if length < MIN_DISTANCE { 0.1 } else { length };
            p[0] += d[0] * t / length;
            p[1] += d[1] * t / length;
        }

        t -= dt;
    }

    Layout {
        positions: rescale(pos),
    }
}

/// Centre on the origin and scale the largest coordinate to 1.
#[allow(clippy::cast_precision_loss)]
fn rescale(mut pos: Vec<[f64; 2]>) -> Vec<[f64; 2]> {
    if pos.is_empty() {
        return pos;
    }
    let n = pos.len() as f64;
    let cx = pos.iter().map(|p| p[0]).sum::<f64>() / n;
    let cy = pos.iter().map(|p| p[1]).sum::<f64>() / n;

    let mut lim: f64 = 0.0;
    for p in &mut pos {
        p[0] -= cx;
        p[1] -= cy;
        lim = lim.max(p[0].abs()).max(p[1].abs());
    }
    if lim > 0.0 {
        for p in &mut pos {
            p[0] /= lim;
            p[1] /= lim;
        }
    }
    pos
}
