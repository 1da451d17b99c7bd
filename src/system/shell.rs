// src/system/shell.rs

//! The shell primitive every command goes through.

use std::io;
use std::process::{Command, Stdio};

/// Everything a finished shell invocation wrote to its output streams.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedStreams {
    /// Bytes written to standard output.
    pub stdout: Vec<u8>,
    /// Bytes written to standard error.
    pub stderr: Vec<u8>,
    /// `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

/// Runs command text through a shell.
///
/// Command text handed to a `Shell` is interpreted, not exec'd as argv:
/// quoting, `&&` chaining and `K='v'` prefixes all depend on it. Paths and
/// argument text are concatenated without escaping, so anything reaching
/// this trait is an injection surface.
pub trait Shell: Send + Sync {
    /// Runs `command_line` to completion and captures both streams.
    fn run(&self, command_line: &str) -> io::Result<CapturedStreams>;
}

/// The platform shell: `sh -c` on Unix, `cmd /C` on Windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl SystemShell {
    fn command(command_line: &str) -> Command {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command_line);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command_line);
            cmd
        }
    }
}

impl Shell for SystemShell {
    fn run(&self, command_line: &str) -> io::Result<CapturedStreams> {
        // `output` drains both pipes concurrently, closes them and reaps the
        // child before returning, on success and on error alike.
        let output = Self::command(command_line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CapturedStreams {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.status.code(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_system_shell_captures_both_streams() {
        let streams = SystemShell.run("echo out; echo err >&2").unwrap();
        assert_eq!(streams.stdout, b"out\n");
        assert_eq!(streams.stderr, b"err\n");
        assert_eq!(streams.exit_code, Some(0));
    }

    #[test]
    fn test_system_shell_interprets_chaining() {
        let streams = SystemShell.run("false && echo never").unwrap();
        assert!(streams.stdout.is_empty());
        assert_eq!(streams.exit_code, Some(1));
    }

    #[test]
    fn test_system_shell_stdin_is_closed() {
        let streams = SystemShell.run("cat").unwrap();
        assert!(streams.stdout.is_empty());
    }
}
