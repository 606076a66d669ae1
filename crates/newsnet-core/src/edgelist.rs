//! The weighted edge list artifact (`nodeA,nodeB,weight`).
//!
//! The extractor writes it, the analyzer reads it, and third-party tools may
//! produce it too, so the reader validates the header instead of trusting
//! column order. Extra columns (a pandas index, say) are ignored.

use std::path::Path;

use tracing::{info, instrument};

use crate::csvio;
use crate::error::{NetworkError, Result};
use crate::model::WeightedEdge;

/// Header of the edge-list CSV, in output order.
pub const EDGELIST_COLUMNS: [&str; 3] = ["nodeA", "nodeB", "weight"];

/// Load a weighted edge list.
///
/// # Errors
///
/// - [`NetworkError::MissingColumn`] if `nodeA`, `nodeB` or `weight` is absent.
/// - [`NetworkError::MalformedRecord`] if a row has the wrong field count or
///   a weight that is not a non-negative integer.
/// - [`NetworkError::Read`] if the file cannot be read.
#[instrument(fields(path = %path.display()))]
pub fn read_edgelist(path: &Path) -> Result<Vec<WeightedEdge>> {
    let mut reader = csvio::open_reader(path)?;
    let headers = csvio::headers(&mut reader, path)?;
    for column in EDGELIST_COLUMNS {
        csvio::column_index(&headers, column, path)?;
    }

    let edges = reader
        .deserialize::<WeightedEdge>()
        .map(|row| row.map_err(|e| csvio::map_csv_error(path, e)))
        .collect::<Result<Vec<_>>>()?;

    info!(edges = edges.len(), "edge list loaded");
    Ok(edges)
}

/// Persist a weighted edge list with header `nodeA,nodeB,weight`.
///
/// The parent directory is created if needed, and the file is replaced
/// atomically. An empty list still produces a header-only file.
///
/// # Errors
///
/// Returns [`NetworkError::Write`] on any filesystem failure.
#[instrument(skip(edges), fields(path = %path.display(), edges = edges.len()))]
pub fn write_edgelist(path: &Path, edges: &[WeightedEdge]) -> Result<()> {
    csvio::write_atomically(path, |w| {
        w.write_record(EDGELIST_COLUMNS)?;
        for edge in edges {
            w.write_record([
                edge.node_a.as_str(),
                edge.node_b.as_str(),
                edge.weight.to_string().as_str(),
            ])?;
        }
        Ok(())
    })?;
    info!("edge list written");
    Ok(())
}
