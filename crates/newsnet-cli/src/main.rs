#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use newsnet_core::config::load_config;
use newsnet_core::timing;
use output::{CliError, OutputMode, Progress};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "newsnet: person co-occurrence networks from news corpora",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit command timing report to stderr.
    #[arg(long, global = true)]
    timing: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress progress messages.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file [default: ./newsnet.toml when present].
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    const fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Build the weighted person co-occurrence edge list",
        long_about = "Tag persons in every REAL article of a labelled news corpus and count \
                      how often each pair of people is mentioned in the same article.",
        after_help = "EXAMPLES:\n    # Default corpus and output inside ./data\n    newsnet edgelist\n\n    # Custom corpus with a names file\n    newsnet edgelist -i articles.csv --gazetteer names.txt\n\n    # External NER process\n    newsnet edgelist --tagger-cmd \"python3 tag_persons.py\""
    )]
    Edgelist(cmd::edgelist::EdgelistArgs),

    #[command(
        about = "Analyze a weighted edge list",
        long_about = "Filter the edge list by weight, then write a network picture, a \
                      centrality table and a network summary to the output directory.",
        after_help = "EXAMPLES:\n    # Default edge list and cutoff\n    newsnet analyze\n\n    # Keep only pairs seen more than 100 times\n    newsnet analyze -c 100\n\n    # Emit machine-readable output\n    newsnet analyze --json"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    newsnet completions bash\n\n    # Save zsh completions to a file\n    newsnet completions zsh -o ~/.zfunc/_newsnet"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("NEWSNET_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "newsnet=debug,info"
        } else {
            "newsnet=info,warn"
        })
    });

    let format = env::var("NEWSNET_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let project_root = env::current_dir()?;
    let output = cli.output_mode();
    let progress = Progress::new(cli.quiet, output);

    match &cli.command {
        Commands::Edgelist(args) => {
            let config = load_config(cli.config.as_deref(), &project_root)?;
            debug!(?config, "configuration loaded");
            timing::timed("cmd.edgelist", || {
                cmd::edgelist::run_edgelist(args, &config, output, progress, &project_root)
            })
        }
        Commands::Analyze(args) => {
            let config = load_config(cli.config.as_deref(), &project_root)?;
            debug!(?config, "configuration loaded");
            timing::timed("cmd.analyze", || {
                cmd::analyze::run_analyze(args, &config, output, progress, &project_root)
            })
        }
        Commands::Completions(args) => timing::timed("cmd.completions", || {
            let mut command = Cli::command();
            cmd::completions::run_completions(args, &mut command, progress)
        }),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let timing_enabled = cli.timing || timing::timing_enabled_from_env();
    timing::set_timing_enabled(timing_enabled);
    timing::clear_timings();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    let command_result = run(&cli);

    if timing_enabled {
        let report = timing::collect_report();
        if report.is_empty() {
            eprintln!("timing report: no samples recorded");
        } else {
            eprintln!("timing report:");
            eprintln!("{}", report.display_table());
            eprintln!("timing report (json):");
            match serde_json::to_string_pretty(&report.to_json()) {
                Ok(json) => eprintln!("{json}"),
                Err(e) => eprintln!("timing report (json) unavailable: {e}"),
            }
        }
    }

    match command_result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(render_err) = output::render_error(output, &CliError::from_anyhow(&err)) {
                eprintln!("error: {err:#} (while reporting: {render_err})");
            }
            ExitCode::FAILURE
        }
    }
}
