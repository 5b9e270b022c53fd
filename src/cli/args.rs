//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Read this config file on top of the global one
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Hide acknowledgements
//! - `--json`: Emit replies as JSON
//!
//! # Shell Lines
//!
//! Lines read by `shell` and `run` are parsed with [`ShellLine`], a multicall
//! parser where the first word is the command name.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::{CourseId, StudentId};

/// Registrar - in-memory course registration with queued requests and undo
#[derive(Parser, Debug)]
#[command(name = "reg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file layered over the global config
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Hide acknowledgements (added, queued)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit one JSON object per reply
    #[arg(long, global = true)]
    pub json: bool,

    /// Command to run (defaults to `shell`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read registration commands from stdin
    #[command(
        name = "shell",
        long_about = "Read registration commands from stdin, one per line.\n\n\
            State lives only as long as the session. Type 'help' for the list \
            of commands and 'exit' to leave.",
        after_help = "\
WORKFLOW EXAMPLES:
    reg
    reg> add-student 1 Alice
    reg> add-course 10 CS101
    reg> enqueue 1 10
    reg> process
    Registered Alice to CS101
    reg> undo
    Undo: Removed course 10 from student Alice"
    )]
    Shell,

    /// Execute a file of shell commands
    #[command(
        name = "run",
        long_about = "Execute a file of shell commands.\n\n\
            Blank lines and lines starting with '#' are ignored. The first \
            malformed line stops the run unless --keep-going is given."
    )]
    Run {
        /// Script to execute
        script: PathBuf,

        /// Report malformed lines and continue
        #[arg(long)]
        keep_going: bool,
    },

    /// Get, set, or list configuration values
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    reg completion bash >> ~/.bashrc

    # Zsh
    reg completion zsh > ~/.zfunc/_reg"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value in the global config file
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// One line of shell input.
#[derive(Parser, Debug)]
#[command(multicall = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands accepted inside the shell.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    /// Add a student
    AddStudent {
        /// Student id
        id: StudentId,
        /// Student name (one word)
        name: String,
    },

    /// Add a course; a repeated id keeps the first name
    AddCourse {
        /// Course id
        id: CourseId,
        /// Course name (one word)
        name: String,
    },

    /// Queue registration requests for one student
    Enqueue {
        /// Student id
        student_id: StudentId,
        /// Course ids, processed in the order given
        #[arg(required = true)]
        course_ids: Vec<CourseId>,
    },

    /// Process every pending request
    Process,

    /// Undo the most recent registration
    Undo,

    /// List students and their courses
    Students,

    /// List courses in id order
    Courses,

    /// Look up a student
    FindStudent {
        /// Student id
        id: StudentId,
    },

    /// Look up a course
    FindCourse {
        /// Course id
        id: CourseId,
    },

    /// Show structure sizes
    Status,

    /// Show the activity history
    History,

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

impl ShellLine {
    /// Parse a line of whitespace-separated words.
    pub fn parse_line(line: &str) -> Result<ShellCommand, clap::Error> {
        Self::try_parse_from(line.split_whitespace()).map(|parsed| parsed.command)
    }
}
