//! Network visualization output.
//!
//! - [`render_png`] draws a laid-out graph with `plotters`: edges as
//!   straight lines, nodes as filled circles sized by degree, each node
//!   labelled with its name.
//! - [`write_dot`] writes the same graph as Graphviz DOT with person names
//!   as node labels and weights as edge labels.
//!
//! [`layout_and_render`] does both, using the configured canvas size,
//! iteration count, seed and label font.
//!
//! Labels need a TrueType font. The configured `render.font` is tried
//! first, then a few common system fonts. The first one that loads is
//! registered for the rest of the process; with none available the picture
//! is drawn without labels and a warning is logged.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use image::{ImageFormat, RgbImage};
use newsnet_core::NetworkError;
use newsnet_core::config::RenderConfig;
use newsnet_core::csvio::ensure_parent_dir;
use newsnet_core::error::Result;
use petgraph::dot::{Config, Dot};
use petgraph::visit::EdgeRef;
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};
use tracing::{debug, info, instrument, warn};

use crate::graph::build::CooccurrenceGraph;
use crate::layout::{Layout, spring_layout};

const BACKGROUND: RGBColor = WHITE;
const EDGE_COLOR: RGBColor = RGBColor(170, 170, 170);
const NODE_COLOR: RGBColor = RGBColor(31, 119, 180);
const LABEL_COLOR: RGBColor = BLACK;
const LABEL_FAMILY: &str = "sans-serif";
const LABEL_SIZE: f64 = 14.0;
const MARGIN: f64 = 0.05;
const MIN_RADIUS: f64 = 4.0;
const MAX_RADIUS: f64 = 18.0;

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Font registered with `plotters` for labels, once per process.
static LABEL_FONT: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Paths of the files written by [`layout_and_render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifacts {
    pub png: PathBuf,
    pub dot: PathBuf,
}

/// Lay out `g` and write `destination` (PNG) plus a `.dot` sibling.
///
/// # Errors
///
/// Returns [`NetworkError::Write`] if either file cannot be written.
#[instrument(skip(g, config), fields(nodes = g.node_count(), path = %destination.display()))]
pub fn layout_and_render(
    g: &CooccurrenceGraph,
    destination: &Path,
    config: &RenderConfig,
) -> Result<RenderedArtifacts> {
    let layout = spring_layout(g, config.layout_iterations, config.seed);
    let labels = g.node_count() > 0 && labels_available(config.font.as_deref());

    render_png(g, &layout, (config.width, config.height), labels, destination)?;
    let dot = destination.with_extension("dot");
    write_dot(g, &dot)?;

    info!(
        png = %destination.display(),
        dot = %dot.display(),
        labels,
        "network visualization written"
    );
    Ok(RenderedArtifacts {
        png: destination.to_path_buf(),
        dot,
    })
}

/// Draw `g` at `layout` positions onto a `(width, height)` PNG, labelling
/// nodes with their names when `labels` is set.
///
/// `labels` must only be set once a label font has been registered (see
/// [`labels_available`]).
///
/// # Errors
///
/// Returns [`NetworkError::Write`] if drawing fails or the image cannot be
/// encoded or saved.
pub fn render_png(
    g: &CooccurrenceGraph,
    layout: &Layout,
    size: (u32, u32),
    labels: bool,
    path: &Path,
) -> Result<()> {
    let (width, height) = (size.0.max(1), size.1.max(1));
    let mut buffer = vec![0_u8; width as usize * height as usize * 3];

    draw_network(g, layout, &mut buffer, (width, height), labels)
        .map_err(|e| write_error(path, io::Error::other(e)))?;

    let img = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| write_error(path, io::Error::other("pixel buffer does not match canvas")))?;

    ensure_parent_dir(path)?;
    let file = fs::File::create(path).map_err(|source| write_error(path, source))?;
    let mut writer = BufWriter::new(file);
    img.write_to(&mut writer, ImageFormat::Png)
        .map_err(|e| write_error(path, image_to_io(e)))?;
    writer.flush().map_err(|source| write_error(path, source))
}

/// Write `g` as an undirected Graphviz DOT file.
///
/// # Errors
///
/// Returns [`NetworkError::Write`] if the file cannot be written.
pub fn write_dot(g: &CooccurrenceGraph, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let dot = Dot::with_config(&g.graph, &[Config::GraphContentOnly]);
    let body = format!("graph {{\n{dot}}}\n");
    fs::write(path, body).map_err(|source| write_error(path, source))
}

/// Register a label font with `plotters` unless one already is.
///
/// Returns whether labels can be drawn. Only the first call does any work;
/// later calls report the outcome of the first.
#[must_use]
pub fn labels_available(configured: Option<&Path>) -> bool {
    LABEL_FONT
        .get_or_init(|| register_label_font(configured))
        .is_some()
}

fn register_label_font(configured: Option<&Path>) -> Option<PathBuf> {
    let Some(path) = resolve_font(configured) else {
        warn!("no label font found; network picture is drawn without node names");
        return None;
    };
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "label font unreadable");
            return None;
        }
    };
    // plotters keeps registered fonts for the life of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    if register_font(LABEL_FAMILY, FontStyle::Normal, bytes).is_err() {
        warn!(path = %path.display(), "label font is not a usable TrueType font");
        return None;
    }
    debug!(path = %path.display(), "label font registered");
    Some(path)
}

/// First existing font file: `configured`, then the system candidates.
fn resolve_font(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        warn!(path = %path.display(), "configured label font not found");
    }
    SYSTEM_FONTS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn draw_network(
    g: &CooccurrenceGraph,
    layout: &Layout,
    buffer: &mut [u8],
    size: (u32, u32),
    labels: bool,
) -> std::result::Result<(), String> {
    let root = BitMapBackend::with_buffer(buffer, size).into_drawing_area();
    root.fill(&BACKGROUND).map_err(|e| e.to_string())?;

    let project = Projection::new(size.0, size.1);
    let point = |idx: usize| {
        layout
            .positions
            .get(idx)
            .map_or((0, 0), |p| project.apply(*p))
    };

    for edge in g.graph.edge_references() {
        let (a, b) = (edge.source().index(), edge.target().index());
        if a != b {
            root.draw(&PathElement::new(vec![point(a), point(b)], &EDGE_COLOR))
                .map_err(|e| e.to_string())?;
        }
    }

    let max_degree = g
        .graph
        .node_indices()
        .map(|v| g.graph.neighbors(v).count())
        .max()
        .unwrap_or(0)
        .max(1);

    let radii: Vec<i32> = g
        .graph
        .node_indices()
        .map(|v| node_radius(g.graph.neighbors(v).count(), max_degree))
        .collect();

    for v in g.graph.node_indices() {
        let radius = radii[v.index()];
        root.draw(&Circle::new(point(v.index()), radius, NODE_COLOR.filled()))
            .map_err(|e| e.to_string())?;
    }

    if labels {
        let style = (LABEL_FAMILY, LABEL_SIZE).into_font().color(&LABEL_COLOR);
        for v in g.graph.node_indices() {
            let (x, y) = point(v.index());
            let anchor = (x + radii[v.index()] + 2, y - radii[v.index()]);
            root.draw(&Text::new(g.graph[v].clone(), anchor, style.clone()))
                .map_err(|e| e.to_string())?;
        }
    }

    root.present().map_err(|e| e.to_string())
}

/// Maps layout coordinates in `[-1, 1]` to pixel coordinates.
struct Projection {
    width: f64,
    height: f64,
}

impl Projection {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn apply(&self, p: [f64; 2]) -> (i32, i32) {
        let span = 1.0 - 2.0 * MARGIN;
        let x = (MARGIN + (p[0] + 1.0) / 2.0 * span) * (self.width - 1.0);
        // Image rows grow downwards.
        let y = (MARGIN + (1.0 - p[1]) / 2.0 * span) * (self.height - 1.0);
        (x.round() as i32, y.round() as i32)
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn node_radius(degree: usize, max_degree: usize) -> i32 {
    let share = (degree as f64 / max_degree as f64).sqrt();
    (MIN_RADIUS + (MAX_RADIUS - MIN_RADIUS) * share).round() as i32
}

fn image_to_io(err: image::ImageError) -> io::Error {
    match err {
        image::ImageError::IoError(e) => e,
        other => io::Error::other(other.to_string()),
    }
}

fn write_error(path: &Path, source: io::Error) -> NetworkError {
    NetworkError::Write {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
