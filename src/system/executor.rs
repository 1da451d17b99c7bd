// src/system/executor.rs

//! Command execution and output classification.

use crate::models::{ExecOptions, SearchPaths};
use crate::system::logger::{self, CommandLogger};
use crate::system::shell::{CapturedStreams, Shell, SystemShell};
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use thiserror::Error;

lazy_static! {
    /// Trace left by an interpreter that failed to `exec` the command, e.g.
    /// "...:in `exec': No such file or directory (Errno::ENOENT)".
    static ref EXEC_FAILURE: Regex = Regex::new(r":in\s`exec':\s(.+)\s\(.+\)$")
        .expect("exec failure pattern is a valid regex");
}

/// Why an executable could not be resolved, run or read.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// A registered executable was not found on any search path.
    #[error("Unable to find the executable '{name}' in: {search_paths}")]
    ExecutableNotFound {
        /// The logical name.
        name: String,
        /// The directories that were searched.
        search_paths: SearchPaths,
    },
    /// The primary stream was empty while the secondary one was not.
    #[error("Command: \"{command}\"\nOutput: \"{output}\"")]
    Process {
        /// The command as handed to the shell, env prefix included.
        command: String,
        /// The secondary stream, chomped and reduced to its reason.
        output: String,
    },
    /// No binding exists under that logical or callable name.
    #[error("No executable named '{0}' has been registered.")]
    UnknownExecutable(String),
    /// The shell itself could not be spawned.
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    /// The primary stream is not valid UTF-8.
    #[error("Command '{command}' produced output that was not valid UTF-8")]
    InvalidUtf8Output {
        /// The command as handed to the shell.
        command: String,
        /// The decoding error.
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Runs single commands through a [`Shell`] and classifies their output.
pub struct ProcessRunner {
    shell: Box<dyn Shell>,
    logger: Option<Arc<dyn CommandLogger>>,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(Box::new(SystemShell))
    }
}

impl std::fmt::Debug for ProcessRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessRunner")
            .field("logger", &self.logger.is_some())
            .finish_non_exhaustive()
    }
}

impl ProcessRunner {
    /// A runner over `shell` that logs through the process-wide logger.
    pub fn new(shell: Box<dyn Shell>) -> Self {
        Self {
            shell,
            logger: None,
        }
    }

    /// Uses `logger` instead of the process-wide one.
    pub fn with_logger(mut self, logger: Arc<dyn CommandLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Executes `command_line` and returns what it wrote to its primary stream
    /// (stdout, or stderr when `switch_stdout_and_stderr` is set).
    ///
    /// The command fails with [`ExecutionError::Process`] when the primary
    /// stream is empty and the secondary one is not. The exit status plays no
    /// part in that decision. Blocks until the process has exited.
    pub fn execute(
        &self,
        command_line: &str,
        options: &ExecOptions,
    ) -> Result<String, ExecutionError> {
        let command = with_env_prefix(command_line, options);

        if let Some(logger) = self.logger.clone().or_else(logger::installed) {
            logger.debug(&format!("Executing: `{}'", command));
        }

        let streams = self
            .shell
            .run(&command)
            .map_err(|e| ExecutionError::CommandFailed(command.clone(), e))?;
        log::debug!(
            "Command '{}' finished with exit code {:?}",
            command,
            streams.exit_code
        );

        classify_output(command, streams, options.streams_switched())
    }
}

/// Prepends `K='v'` assignments for every configured environment variable.
fn with_env_prefix(command_line: &str, options: &ExecOptions) -> String {
    match &options.env {
        Some(env) if !env.is_empty() => format!("{} {}", env.to_shell_prefix(), command_line),
        _ => command_line.to_string(),
    }
}

fn classify_output(
    command: String,
    streams: CapturedStreams,
    switched: bool,
) -> Result<String, ExecutionError> {
    let CapturedStreams { stdout, stderr, .. } = streams;
    let (primary, secondary) = if switched {
        (stderr, stdout)
    } else {
        (stdout, stderr)
    };

    if primary.is_empty() && !secondary.is_empty() {
        let diagnostic = String::from_utf8_lossy(&secondary);
        return Err(ExecutionError::Process {
            command,
            output: extract_diagnostic(&diagnostic),
        });
    }

    String::from_utf8(primary).map_err(|e| ExecutionError::InvalidUtf8Output { command, source: e })
}

/// Strips one trailing line ending (`\r\n`, `\n` or `\r`) and reduces
/// interpreter `exec` traces to their reason.
fn extract_diagnostic(raw: &str) -> String {
    let chomped = raw
        .strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .or_else(|| raw.strip_suffix('\r'))
        .unwrap_or(raw);

    EXEC_FAILURE
        .captures(chomped)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| chomped.to_string(), |reason| reason.as_str().to_string())
}
