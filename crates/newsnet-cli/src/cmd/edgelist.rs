use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use newsnet_core::NetworkError;
use newsnet_core::config::NetworkConfig;
use newsnet_core::timing;
use newsnet_extract::pipeline::ExtractionStats;
use newsnet_extract::tagger::{CommandTagger, EntityTagger, GazetteerTagger};
use newsnet_extract::{CorpusReader, Extractor, PairPolicy, persist};
use serde::Serialize;
use tracing::debug;

use crate::output::{OutputMode, Progress, render};

/// Arguments for `newsnet edgelist`.
#[derive(Args, Debug)]
pub struct EdgelistArgs {
    /// Corpus CSV, resolved inside the data directory.
    #[arg(short = 'i', long, default_value = "fake_or_real_news.csv")]
    pub input_data: PathBuf,

    /// Edge list CSV to write, resolved inside the data directory.
    #[arg(short = 'o', long, default_value = "weighted_edgelist_realnews.csv")]
    pub output_filename: PathBuf,

    /// Directory holding the corpus and receiving the edge list.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Tag persons by dictionary lookup against this names file.
    #[arg(long, conflicts_with = "tagger_cmd")]
    pub gazetteer: Option<PathBuf>,

    /// Tag persons with an external NER process speaking JSON lines.
    ///
    /// Split into words the way a POSIX shell would, so quoted arguments
    /// and paths with spaces survive.
    #[arg(long, value_name = "CMD")]
    pub tagger_cmd: Option<String>,
}

/// Result of an extraction run, as rendered to stdout.
#[derive(Debug, Serialize)]
struct EdgelistReport {
    input: PathBuf,
    output: PathBuf,
    rows_scanned: u64,
    #[serde(flatten)]
    stats: ExtractionStats,
}

/// Which tagger backs this run: CLI flags first, then the config file.
#[derive(Debug, PartialEq, Eq)]
enum TaggerChoice {
    Command(Vec<String>),
    Gazetteer(PathBuf),
}

fn choose_tagger(
    args: &EdgelistArgs,
    config: &NetworkConfig,
    root: &Path,
) -> Result<TaggerChoice, NetworkError> {
    if let Some(ref cmd) = args.tagger_cmd {
        let argv = shlex::split(cmd)
            .filter(|argv| !argv.is_empty())
            .ok_or_else(|| NetworkError::Tagger(format!("cannot split --tagger-cmd {cmd:?}")))?;
        return Ok(TaggerChoice::Command(argv));
    }
    if let Some(ref path) = args.gazetteer {
        return Ok(TaggerChoice::Gazetteer(root.join(path)));
    }
    Ok(match config.tagger.command {
        Some(ref argv) => TaggerChoice::Command(argv.clone()),
        None => TaggerChoice::Gazetteer(root.join(&config.tagger.gazetteer)),
    })
}

fn open_tagger(choice: &TaggerChoice) -> Result<Box<dyn EntityTagger>> {
    let tagger: Box<dyn EntityTagger> = match choice {
        TaggerChoice::Command(argv) => {
            debug!(?argv, "starting command tagger");
            Box::new(CommandTagger::spawn(argv).map_err(NetworkError::from)?)
        }
        TaggerChoice::Gazetteer(path) => {
            let tagger = GazetteerTagger::load(path).map_err(NetworkError::from)?;
            debug!(path = %path.display(), entries = tagger.len(), "gazetteer loaded");
            Box::new(tagger)
        }
    };
    Ok(tagger)
}

/// Build the weighted edge list from a labelled corpus.
///
/// # Errors
///
/// Fails if the data directory cannot be created, the tagger cannot be
/// started, the corpus is unreadable or malformed, or the edge list cannot
/// be written.
pub fn run_edgelist(
    args: &EdgelistArgs,
    config: &NetworkConfig,
    output: OutputMode,
    progress: Progress,
    root: &Path,
) -> Result<()> {
    progress.info("Initializing the creation of the weighted edgelist...");

    let data_dir = root.join(&args.data_dir);
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating data directory {}", data_dir.display()))?;
    let input = data_dir.join(&args.input_data);
    let destination = data_dir.join(&args.output_filename);

    let mut tagger = timing::timed("edgelist.tagger", || {
        open_tagger(&choose_tagger(args, config, root)?)
    })?;

    progress.info(format!("Loading and preprocessing {}...", input.display()));
    let mut reader = CorpusReader::open(&input, &config.extract)?;

    progress.info("Extracting named entities and counting co-occurrences...");
    let policy = PairPolicy {
        keep_self_pairs: config.extract.keep_self_pairs,
    };
    let mut extractor = Extractor::new(
        tagger.as_mut(),
        config.extract.person_label.as_str(),
        policy,
    );
    let outcome = timing::timed("edgelist.extract", || extractor.run(&mut reader))?;

    progress.info(format!(
        "Saving weighted edgelist as '{}'...",
        destination.display()
    ));
    timing::timed("edgelist.write", || persist(&outcome.edges, &destination))?;

    progress.info(format!(
        "Done! The weighted edgelist has been saved as '{}'.",
        destination.display()
    ));

    let report = EdgelistReport {
        input,
        output: destination,
        rows_scanned: reader.scanned(),
        stats: outcome.stats,
    };
    render(output, &report, |r, w| {
        writeln!(
            w,
            "{} documents, {} pairs, {} weighted edges -> {}",
            r.stats.tally.documents,
            r.stats.tally.pairs,
            r.stats.distinct_edges,
            r.output.display()
        )
    })
}
