//! Process runner seam.
//!
//! Command output reaches the caller through the `on_line` callback, one line
//! at a time as the child produces it, rather than through a captured global
//! stdout. Long mirror runs therefore show progress while they work.

use std::io::{self, BufRead, BufReader};
use std::process::{Command, Stdio};

use crate::command::CommandLine;
use crate::error::SyncError;

/// Runs external commands to completion.
pub trait ProcessRunner {
    /// Run `command`, passing each stdout line to `on_line` as it arrives.
    ///
    /// Returns `SyncError::CommandFailed` on a non-zero exit.
    fn run(
        &mut self,
        command: &CommandLine,
        on_line: &mut dyn FnMut(&str),
    ) -> Result<(), SyncError>;
}

/// [`ProcessRunner`] that spawns real processes. stderr is inherited.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(
        &mut self,
        command: &CommandLine,
        on_line: &mut dyn FnMut(&str),
    ) -> Result<(), SyncError> {
        let rendered = command.render();
        let spawn_err = |source: std::io::Error| SyncError::Spawn {
            command: rendered.clone(),
            source,
        };

        tracing::debug!("spawning: {rendered}");
        let mut child = Command::new(&command.program)
            .args(command.argv())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(spawn_err)?;

        let streamed = match child.stdout.take() {
            Some(stdout) => stream_lines(BufReader::new(stdout), on_line),
            None => Ok(()),
        };
        if streamed.is_err() {
            let _ = child.kill();
        }
        // Always reap the child, even when reading its output failed.
        let status = child.wait().map_err(spawn_err)?;
        streamed.map_err(spawn_err)?;
        if status.success() {
            Ok(())
        } else {
            Err(SyncError::CommandFailed {
                command: rendered,
                code: status.code(),
            })
        }
    }
}

/// Feed `reader` to `on_line` one line at a time, without line terminators.
fn stream_lines(mut reader: impl BufRead, on_line: &mut dyn FnMut(&str)) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        on_line(line.trim_end_matches(['\n', '\r']));
    }
}
