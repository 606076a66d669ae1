use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// File name looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "newsnet.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub tagger: TaggerConfig,
    #[serde(default)]
    pub analyze: AnalyzeConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Corpus filtering and pairing policy for the extraction stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    #[serde(default = "default_label_column")]
    pub label_column: String,
    #[serde(default = "default_text_column")]
    pub text_column: String,
    /// Only rows whose label equals this value are read.
    #[serde(default = "default_keep_label")]
    pub keep_label: String,
    /// Tagger label that marks a person mention.
    #[serde(default = "default_person_label")]
    pub person_label: String,
    /// Keep pairs whose endpoints are the same name.
    #[serde(default)]
    pub keep_self_pairs: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            label_column: default_label_column(),
            text_column: default_text_column(),
            keep_label: default_keep_label(),
            person_label: default_person_label(),
            keep_self_pairs: false,
        }
    }
}

/// Which entity tagger backs the extraction stage.
///
/// `command` wins over `gazetteer` when both are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggerConfig {
    #[serde(default)]
    pub command: Option<Vec<String>>,
    #[serde(default = "default_gazetteer")]
    pub gazetteer: PathBuf,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            command: None,
            gazetteer: default_gazetteer(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeConfig {
    /// Edges with weight less than or equal to this are dropped.
    #[serde(default = "default_cutoff")]
    pub cutoff: u64,
    /// Rows per centrality listing in the summary report.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default)]
    pub eigenvector: EigenvectorConfig,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            cutoff: default_cutoff(),
            top_n: default_top_n(),
            eigenvector: EigenvectorConfig::default(),
        }
    }
}

/// Bounds for the eigenvector power iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EigenvectorConfig {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Use edge weights instead of plain adjacency.
    #[serde(default)]
    pub weighted: bool,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            weighted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_image_side")]
    pub width: u32,
    #[serde(default = "default_image_side")]
    pub height: u32,
    #[serde(default = "default_layout_iterations")]
    pub layout_iterations: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// TrueType font for node labels; a few common system fonts are tried
    /// when unset.
    #[serde(default)]
    pub font: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_image_side(),
            height: default_image_side(),
            layout_iterations: default_layout_iterations(),
            seed: default_seed(),
            font: None,
        }
    }
}

/// Load configuration.
///
/// With an explicit path the file must exist. Without one,
/// `<root>/newsnet.toml` is used when present and defaults otherwise.
///
/// # Errors
///
/// Returns [`NetworkError::Read`] if an explicit file is missing or
/// unreadable, and [`NetworkError::Config`] if it does not parse.
pub fn load_config(explicit: Option<&Path>, root: &Path) -> Result<NetworkConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = root.join(DEFAULT_CONFIG_FILE);
            if !candidate.exists() {
                return Ok(NetworkConfig::default());
            }
            candidate
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|e| NetworkError::Read {
        path: path.clone(),
        source: e,
    })?;

    toml::from_str::<NetworkConfig>(&content).map_err(|e| NetworkError::Config {
        path,
        reason: e.message().to_string(),
    })
}

fn default_label_column() -> String {
    "label".to_string()
}

fn default_text_column() -> String {
    "text".to_string()
}

fn default_keep_label() -> String {
    "REAL".to_string()
}

fn default_person_label() -> String {
    "PERSON".to_string()
}

fn default_gazetteer() -> PathBuf {
    PathBuf::from("data/gazetteer.txt")
}

const fn default_cutoff() -> u64 {
    500
}

const fn default_top_n() -> usize {
    10
}

const fn default_max_iterations() -> usize {
    100
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_image_side() -> u32 {
    2000
}

const fn default_layout_iterations() -> usize {
    50
}

const fn default_seed() -> u64 {
    42
}
