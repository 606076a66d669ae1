use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use newsnet_core::NetworkError;
use newsnet_core::config::NetworkConfig;
use newsnet_core::timing;
use newsnet_graph::{
    NetworkSummary, build_graph, compute_centrality, filter_by_weight, layout_and_render,
    load_edges, summarize, write_centrality_csv,
};
use serde::Serialize;
use tracing::info;

use crate::output::{OutputMode, Progress, render};

pub const GRAPH_FILE: &str = "network_graph.png";
pub const CENTRALITY_FILE: &str = "centrality_measures.csv";
pub const SUMMARY_FILE: &str = "network_information.txt";

/// Arguments for `newsnet analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Weighted edge list CSV, resolved inside the data directory.
    #[arg(short = 'i', long, default_value = "weighted_edgelist_realnews.csv")]
    pub input_weighted_edgelist: PathBuf,

    /// Keep edges whose weight is strictly greater than this
    /// [default: analyze.cutoff from the config, 500].
    #[arg(short = 'c', long)]
    pub cutoff_edgeweight: Option<u64>,

    /// Directory holding the edge list.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory receiving the picture, centrality table and report.
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,
}

/// Paths written by an analysis run plus its summary.
#[derive(Debug, Serialize)]
struct AnalyzeReport {
    graph: PathBuf,
    graph_dot: PathBuf,
    centrality: PathBuf,
    information: PathBuf,
    eigenvector_iterations: usize,
    summary: NetworkSummary,
}

/// Analyze a weighted edge list and write the three output artifacts.
///
/// Every metric is computed before the first file is written, so a run that
/// fails on an empty graph or a non-converging eigenvector leaves the output
/// directory untouched.
///
/// # Errors
///
/// - [`NetworkError::EmptyGraph`] if no edge between two distinct people is
///   heavier than the cutoff.
/// - [`NetworkError::Convergence`] if eigenvector centrality does not converge.
/// - Read, data and write errors from the edge list and artifacts.
pub fn run_analyze(
    args: &AnalyzeArgs,
    config: &NetworkConfig,
    output: OutputMode,
    progress: Progress,
    root: &Path,
) -> Result<()> {
    progress.info("Initializing network analysis...");

    let input = root.join(&args.data_dir).join(&args.input_weighted_edgelist);
    let output_dir = root.join(&args.output_dir);
    let cutoff = args.cutoff_edgeweight.unwrap_or(config.analyze.cutoff);

    progress.info(format!("Preparing '{}'...", input.display()));
    let edges = timing::timed("analyze.load", || load_edges(&input))?;
    let kept = filter_by_weight(&edges, cutoff);
    let g = timing::timed("analyze.graph", || build_graph(&kept))?;
    // Self-loop rows survive the filter but never become edges.
    if g.edge_count() == 0 {
        return Err(NetworkError::EmptyGraph { cutoff }.into());
    }
    info!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        cutoff,
        "analysis graph ready"
    );

    let table = timing::timed("analyze.centrality", || {
        compute_centrality(&g, &config.analyze.eigenvector)
    })?;
    let summary = summarize(&g, &table, cutoff, config.analyze.top_n);

    progress.info(format!(
        "Creating network graph and saving it in '{}'...",
        output_dir.display()
    ));
    let artifacts = timing::timed("analyze.render", || {
        layout_and_render(&g, &output_dir.join(GRAPH_FILE), &config.render)
    })?;

    progress.info(format!(
        "Calculating centrality measures and saving them in '{}'...",
        output_dir.display()
    ));
    let centrality = output_dir.join(CENTRALITY_FILE);
    write_centrality_csv(&table, &centrality)?;

    progress.info(format!(
        "Extracting network information and saving it in '{}'...",
        output_dir.display()
    ));
    let information = output_dir.join(SUMMARY_FILE);
    summary.write_text(&information)?;

    progress.info(format!(
        "Done! The network visualization, centrality measures and network information are in '{}'.",
        output_dir.display()
    ));

    let report = AnalyzeReport {
        graph: artifacts.png,
        graph_dot: artifacts.dot,
        centrality,
        information,
        eigenvector_iterations: table.eigenvector_iterations,
        summary,
    };
    render(output, &report, |r, w| write!(w, "{}", r.summary.to_text()))
}
