use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Command};
use clap_complete::{Shell, generate};
use newsnet_core::NetworkError;
use newsnet_core::csvio::ensure_parent_dir;

use crate::output::Progress;

/// Arguments for `newsnet completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate the completion script for.
    #[arg(value_enum)]
    pub shell: Shell,

    /// Save the script to this file instead of printing it.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Generate a completion script for `command`, named after its binary.
///
/// # Errors
///
/// Returns [`NetworkError::Write`] if the script cannot be saved, or an I/O
/// error if stdout is closed.
pub fn run_completions(
    args: &CompletionsArgs,
    command: &mut Command,
    progress: Progress,
) -> Result<()> {
    let script = completion_script(args.shell, command);
    match args.output {
        Some(ref path) => {
            save_script(path, &script)?;
            progress.info(format!(
                "Saved {} completions for '{}' to '{}'.",
                args.shell,
                command.get_name(),
                path.display()
            ));
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(&script)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn completion_script(shell: Shell, command: &mut Command) -> Vec<u8> {
    let bin = command.get_name().to_string();
    let mut script = Vec::new();
    generate(shell, command, bin, &mut script);
    script
}

fn save_script(path: &Path, script: &[u8]) -> Result<(), NetworkError> {
    ensure_parent_dir(path)?;
    fs::write(path, script).map_err(|source| NetworkError::Write {
        path: path.to_path_buf(),
        source,
    })
}
