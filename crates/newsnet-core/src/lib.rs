#![forbid(unsafe_code)]
//! newsnet-core library.
//!
//! Types and file formats shared by the extraction and analysis stages. The
//! two stages only communicate through the weighted edge list on disk, so the
//! edge-list reader and writer live here next to the data model they encode.
//!
//! # Conventions
//!
//! - **Errors**: [`error::NetworkError`] for failures a user must see;
//!   `anyhow::Result` at the binary layer.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod csvio;
pub mod edgelist;
pub mod error;
pub mod model;
pub mod timing;

pub use error::{ErrorCode, NetworkError};
pub use model::{EntityPair, WeightedEdge};
