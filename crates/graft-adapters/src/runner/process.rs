//! Process-spawning command runner.

use std::path::Path;
use std::process::{Command, Stdio};

use graft_core::{
    application::{ApplicationError, ports::CommandRunner},
    domain::{CommandSpec, CommandStatus},
    error::GraftResult,
};
use tracing::{debug, instrument};

/// Runs delegated commands as child processes. Standard streams are
/// inherited so installer and generator output reaches the operator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    #[instrument(skip_all, fields(command = %command, cwd = %cwd.display()))]
    fn run(&self, command: &CommandSpec, cwd: &Path) -> GraftResult<CommandStatus> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ApplicationError::CommandSpawn {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        debug!(code = ?status.code(), "Command finished");
        Ok(CommandStatus {
            code: status.code(),
        })
    }
}
