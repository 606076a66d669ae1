//! External NER process over a JSON-lines protocol.
//!
//! The process is started once and fed one request per document:
//!
//! ```text
//! → {"text":"Hillary Clinton met Bernie Sanders in Iowa."}
//! ← [{"text":"Hillary Clinton","label":"PERSON"},{"text":"Bernie Sanders","label":"PERSON"},{"text":"Iowa","label":"GPE"}]
//! ```
//!
//! Each response must be a single line holding a JSON array of spans in
//! document order. A thin spaCy wrapper fits this contract in a dozen lines.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::{EntityTagger, TaggedSpan, TaggerError};

#[derive(Serialize)]
struct Request<'a> {
    text: &'a str,
}

/// Tagger backed by a child process.
///
/// The child is killed and reaped when the tagger is dropped.
pub struct CommandTagger {
    program: String,
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
    line: String,
}

impl CommandTagger {
    /// Start `argv[0]` with the remaining arguments.
    ///
    /// # Errors
    ///
    /// Returns [`TaggerError::EmptyCommand`] for an empty `argv`, or
    /// [`TaggerError::Spawn`] if the process cannot be started.
    #[instrument]
    pub fn spawn(argv: &[String]) -> Result<Self, TaggerError> {
        let (program, args) = argv.split_first().ok_or(TaggerError::EmptyCommand)?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| TaggerError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take().map(BufReader::new);
        let Some(stdout) = stdout else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(TaggerError::Exited {
                program: program.clone(),
            });
        };

        debug!(pid = child.id(), "tagger process started");

        Ok(Self {
            program: program.clone(),
            child,
            stdin,
            stdout,
            line: String::new(),
        })
    }

    fn exited(&self) -> TaggerError {
        TaggerError::Exited {
            program: self.program.clone(),
        }
    }
}

impl EntityTagger for CommandTagger {
    fn tag(&mut self, text: &str) -> Result<Vec<TaggedSpan>, TaggerError> {
        let stdin = self.stdin.as_mut().ok_or_else(|| TaggerError::Exited {
            program: self.program.clone(),
        })?;

        let mut request = serde_json::to_vec(&Request { text }).map_err(|e| {
            TaggerError::Protocol {
                program: self.program.clone(),
                reason: e.to_string(),
            }
        })?;
        request.push(b'\n');

        if let Err(e) = stdin.write_all(&request).and_then(|()| stdin.flush()) {
            return Err(if e.kind() == std::io::ErrorKind::BrokenPipe {
                self.exited()
            } else {
                TaggerError::Io(e)
            });
        }

        self.line.clear();
        if self.stdout.read_line(&mut self.line)? == 0 {
            return Err(self.exited());
        }

        serde_json::from_str::<Vec<TaggedSpan>>(self.line.trim_end()).map_err(|e| {
            TaggerError::Protocol {
                program: self.program.clone(),
                reason: e.to_string(),
            }
        })
    }
}

impl Drop for CommandTagger {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Err(e) = self.child.kill() {
            debug!(error = %e, "tagger already exited");
        }
        if let Err(e) = self.child.wait() {
            warn!(error = %e, program = %self.program, "failed to reap tagger process");
        }
    }
}
