//! shell and run commands - Drive a registrar from lines of input
//!
//! A [`Session`] owns one [`Registrar`] for its whole lifetime and executes
//! shell lines against it. `reg shell` feeds it stdin; `reg run` feeds it a
//! script file. Nothing survives the session.
//!
//! # Malformed Lines
//!
//! Unknown commands, non-numeric ids, missing fields and over-long names are
//! line errors. The interactive shell reports them and keeps going; a script
//! run stops at the first one unless `--keep-going` is set.

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use clap::error::ErrorKind;
use thiserror::Error;

use super::load_config;
use crate::cli::args::{ShellCommand, ShellLine};
use crate::core::config::{Config, OutputFormat};
use crate::engine::{Context, CourseView, Registrar, StudentView, UndoOutcome};
use crate::ui::output::{self, Verbosity};
use crate::ui::render::{self, Reply};

/// Errors from executing one line.
#[derive(Debug, Error)]
pub enum LineError {
    /// The line did not parse as a shell command.
    #[error("{}", summarize(.0))]
    Parse(#[from] clap::Error),

    /// A name exceeded the configured limit.
    #[error("name '{name}' is longer than {max} characters")]
    NameTooLong { name: String, max: usize },

    /// Writing a reply failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    /// Serializing a reply failed.
    #[error("failed to encode reply: {0}")]
    Encode(#[from] serde_json::Error),
}

/// First line of a clap error, without its `error: ` prefix.
fn summarize(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

/// Whether the session should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// What to do with a malformed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    /// Print it and continue.
    Report,
    /// Stop with an error.
    Abort,
}

/// A registrar plus the settings that shape its replies.
pub struct Session<W: Write> {
    registrar: Registrar,
    format: OutputFormat,
    max_name_len: usize,
    verbosity: Verbosity,
    prompt: Option<String>,
    out: W,
}

impl<W: Write> Session<W> {
    /// Start a session with an empty registrar.
    pub fn new(config: &Config, ctx: &Context, out: W) -> Self {
        let format = if ctx.json {
            OutputFormat::Json
        } else {
            config.output_format()
        };
        Self {
            registrar: Registrar::with_history_capacity(config.history_capacity()),
            format,
            max_name_len: config.max_name_len(),
            verbosity: ctx.verbosity(),
            prompt: None,
            out,
        }
    }

    /// Show `prompt` before each line.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn registrar(&self) -> &Registrar {
        &self.registrar
    }

    /// Finish the session and hand back the writer.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Write the prompt, if any.
    pub fn show_prompt(&mut self) -> io::Result<()> {
        if let Some(prompt) = &self.prompt {
            write!(self.out, "{}", prompt)?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Execute one line of input.
    ///
    /// Blank lines and `#` comments do nothing.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow, LineError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        match ShellLine::parse_line(line) {
            Ok(command) => self.execute(command),
            Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                write!(self.out, "{}", err)?;
                Ok(Flow::Continue)
            }
            Err(err) => Err(LineError::Parse(err)),
        }
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, command: ShellCommand) -> Result<Flow, LineError> {
        output::debug(format!("dispatch: {:?}", command), self.verbosity);

        let reply = match command {
            ShellCommand::AddStudent { id, name } => {
                self.check_name(&name)?;
                match self.registrar.add_student(id, name.as_str()) {
                    Ok(()) => Reply::StudentAdded { id, name },
                    Err(_) => Reply::DuplicateStudent { id },
                }
            }
            ShellCommand::AddCourse { id, name } => {
                self.check_name(&name)?;
                if !self.registrar.add_course(id, name.as_str()) {
                    output::debug(
                        format!("course {} already in catalog; insert ignored", id),
                        self.verbosity,
                    );
                }
                Reply::CourseAdded { id, name }
            }
            ShellCommand::Enqueue {
                student_id,
                course_ids,
            } => {
                self.registrar
                    .submit_requests(student_id, course_ids.iter().copied());
                Reply::Queued {
                    student_id,
                    course_ids,
                }
            }
            ShellCommand::Process => {
                let results = self.registrar.process_all_pending();
                output::debug(
                    format!("drained {} request(s)", results.len()),
                    self.verbosity,
                );
                Reply::Processed { results }
            }
            ShellCommand::Undo => {
                let outcome = self.registrar.undo_last_registration();
                if let UndoOutcome::Discarded { reason, .. } = outcome {
                    output::debug(
                        format!("undo record discarded: {:?}", reason),
                        self.verbosity,
                    );
                }
                Reply::Undo { outcome }
            }
            ShellCommand::Students => Reply::Students {
                students: self.registrar.list_students(),
            },
            ShellCommand::Courses => Reply::Courses {
                courses: self.registrar.list_courses(),
            },
            ShellCommand::FindStudent { id } => Reply::StudentLookup {
                id,
                student: self.registrar.find_student(id).map(StudentView::from),
            },
            ShellCommand::FindCourse { id } => Reply::CourseLookup {
                id,
                course: self.registrar.find_course(id).map(CourseView::from),
            },
            ShellCommand::Status => Reply::Status {
                status: self.registrar.status(),
            },
            ShellCommand::History => Reply::History {
                entries: self.registrar.history().cloned().collect(),
            },
            ShellCommand::Exit => return Ok(Flow::Exit),
        };

        self.reply(&reply)?;
        Ok(Flow::Continue)
    }

    fn check_name(&self, name: &str) -> Result<(), LineError> {
        if name.chars().count() > self.max_name_len {
            return Err(LineError::NameTooLong {
                name: name.to_string(),
                max: self.max_name_len,
            });
        }
        Ok(())
    }

    fn reply(&mut self, reply: &Reply) -> Result<(), LineError> {
        if reply.is_acknowledgement() && !self.verbosity.shows_acknowledgements() {
            return Ok(());
        }
        let rendered = render::render(reply, self.format, &self.registrar)?;
        writeln!(self.out, "{}", rendered)?;
        Ok(())
    }
}

/// Feed every line of `input` to the session.
///
/// `source` names the input in error messages (`stdin`, a script path).
pub fn drive<R: BufRead, W: Write>(
    session: &mut Session<W>,
    input: R,
    source: &str,
    on_error: OnError,
) -> Result<()> {
    session.show_prompt().context("failed to write prompt")?;

    for (index, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {}", source))?;

        match session.execute_line(&line) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(LineError::Io(err)) => return Err(err).context("failed to write output"),
            Err(err) => {
                let message = format!("{}:{}: {}", source, index + 1, err);
                match on_error {
                    OnError::Report => output::error(message),
                    OnError::Abort => bail!(message),
                }
            }
        }

        session.show_prompt().context("failed to write prompt")?;
    }

    Ok(())
}

/// Run the interactive shell on stdin.
pub fn shell(ctx: &Context) -> Result<()> {
    let config = load_config(ctx)?;
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();

    let mut session = Session::new(&config, ctx, io::stdout());
    if interactive && !ctx.quiet && !ctx.json {
        session = session.with_prompt(config.prompt());
    }

    drive(&mut session, stdin.lock(), "stdin", OnError::Report)?;

    if interactive {
        // Leave the terminal on a fresh line after EOF.
        let mut out = session.into_output();
        writeln!(out).ok();
    }
    Ok(())
}

/// Execute a script file.
pub fn run_script(ctx: &Context, script: &Path, keep_going: bool) -> Result<()> {
    let config = load_config(ctx)?;
    let file = File::open(script)
        .with_context(|| format!("Failed to open script '{}'", script.display()))?;

    output::debug(format!("running script {}", script.display()), ctx.verbosity());

    let mut session = Session::new(&config, ctx, io::stdout());
    let on_error = if keep_going {
        OnError::Report
    } else {
        OnError::Abort
    };
    drive(
        &mut session,
        BufReader::new(file),
        &script.display().to_string(),
        on_error,
    )
}
