//! Command runner that records instead of spawning.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use graft_core::{
    application::{ApplicationError, ports::CommandRunner},
    domain::{CommandSpec, CommandStatus},
    error::GraftResult,
};
use tracing::info;

#[derive(Debug, Default)]
struct Recording {
    commands: Vec<CommandSpec>,
    failures: Vec<(String, i32)>,
}

/// Records every command and reports success, unless the rendered command
/// starts with a prefix registered through [`RecordingRunner::fail_on`].
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make commands whose rendered form starts with `prefix` exit with
    /// `code`.
    pub fn fail_on(self, prefix: impl Into<String>, code: i32) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failures.push((prefix.into(), code));
        }
        self
    }

    /// Commands run so far, rendered as command lines.
    pub fn commands(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.commands.iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &CommandSpec, _cwd: &Path) -> GraftResult<CommandStatus> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| ApplicationError::CommandSpawn {
                command: command.to_string(),
                reason: "recorder lock poisoned".into(),
            })?;

        info!(command = %command, "Recording command");
        inner.commands.push(command.clone());

        let rendered = command.to_string();
        let status = inner
            .failures
            .iter()
            .find(|(prefix, _)| rendered.starts_with(prefix.as_str()))
            .map_or(CommandStatus::success(), |(_, code)| {
                CommandStatus::exited(*code)
            });
        Ok(status)
    }
}
