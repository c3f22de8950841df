//! Domain value objects: InjectPosition, DuplicateGuard, Toolchain, CommandSpec.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. The
//! enums carry their string representations and `FromStr` parsers so that
//! recipe files, configuration and CLI flags all agree on spelling.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── InjectPosition ───────────────────────────────────────────────────────────

/// Where injected text lands relative to its anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjectPosition {
    Before,
    #[default]
    After,
}

impl InjectPosition {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl fmt::Display for InjectPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InjectPosition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            other => Err(DomainError::InvalidValue {
                field: "position",
                value: other.into(),
            }),
        }
    }
}

// ── DuplicateGuard ───────────────────────────────────────────────────────────

/// Policy applied before splicing text into a file.
///
/// `SkipIfPresent` leaves the file untouched when the text already occurs
/// anywhere in it; `Always` splices unconditionally, so re-running the same
/// injection inserts a second copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateGuard {
    #[default]
    SkipIfPresent,
    Always,
}

impl DuplicateGuard {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SkipIfPresent => "skip-if-present",
            Self::Always => "always",
        }
    }
}

impl fmt::Display for DuplicateGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicateGuard {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "skip-if-present" | "skip" => Ok(Self::SkipIfPresent),
            "always" => Ok(Self::Always),
            other => Err(DomainError::InvalidValue {
                field: "guard",
                value: other.into(),
            }),
        }
    }
}

// ── CommandSpec / CommandStatus ──────────────────────────────────────────────

/// A fully resolved external command: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Exit status of a delegated command. `code` is `None` when the process was
/// terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub code: Option<i32>,
}

impl CommandStatus {
    pub const fn success() -> Self {
        Self { code: Some(0) }
    }

    pub const fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

// ── Toolchain ────────────────────────────────────────────────────────────────

/// Command prefixes used to delegate dependency installs, generators and
/// framework tasks.
///
/// Defaults target a Rails project:
///
/// | purpose  | command                                  |
/// |----------|------------------------------------------|
/// | install  | `bundle add <name> [--group <group>]`    |
/// | generate | `bin/rails generate <generator> <args..>`|
/// | task     | `bin/rails <task>`                       |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toolchain {
    pub install: Vec<String>,
    pub generate: Vec<String>,
    pub task: Vec<String>,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            install: vec!["bundle".into(), "add".into()],
            generate: vec!["bin/rails".into(), "generate".into()],
            task: vec!["bin/rails".into()],
        }
    }
}

impl Toolchain {
    pub fn install_command(
        &self,
        name: &str,
        group: Option<&str>,
    ) -> Result<CommandSpec, DomainError> {
        let mut cmd = prefix(&self.install, "install")?.arg(name);
        if let Some(group) = group {
            cmd = cmd.arg("--group").arg(group);
        }
        Ok(cmd)
    }

    pub fn generate_command(
        &self,
        generator: &str,
        args: &[String],
    ) -> Result<CommandSpec, DomainError> {
        Ok(prefix(&self.generate, "generate")?
            .arg(generator)
            .args(args.iter().cloned()))
    }

    pub fn task_command(&self, task: &str) -> Result<CommandSpec, DomainError> {
        Ok(prefix(&self.task, "task")?.arg(task))
    }
}

fn prefix(parts: &[String], purpose: &'static str) -> Result<CommandSpec, DomainError> {
    let (program, rest) = parts
        .split_first()
        .filter(|(program, _)| !program.trim().is_empty())
        .ok_or(DomainError::EmptyToolchainCommand { purpose })?;
    Ok(CommandSpec::new(program.clone()).args(rest.iter().cloned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_parses_both_spellings() {
        assert_eq!(
            DuplicateGuard::from_str("skip_if_present").unwrap(),
            DuplicateGuard::SkipIfPresent
        );
        assert_eq!(DuplicateGuard::from_str("ALWAYS").unwrap(), DuplicateGuard::Always);
        assert!(DuplicateGuard::from_str("sometimes").is_err());
    }

    #[test]
    fn position_round_trips_through_display() {
        for pos in [InjectPosition::Before, InjectPosition::After] {
            assert_eq!(InjectPosition::from_str(&pos.to_string()).unwrap(), pos);
        }
    }

    #[test]
    fn default_toolchain_builds_rails_commands() {
        let tc = Toolchain::default();

        let install = tc.install_command("bullet", Some("development")).unwrap();
        assert_eq!(install.to_string(), "bundle add bullet --group development");

        let generate = tc
            .generate_command("devise", &["Admin".to_string()])
            .unwrap();
        assert_eq!(generate.to_string(), "bin/rails generate devise Admin");

        assert_eq!(
            tc.task_command("db:migrate").unwrap().to_string(),
            "bin/rails db:migrate"
        );
    }

    #[test]
    fn empty_toolchain_prefix_is_rejected() {
        let tc = Toolchain {
            task: vec![],
            ..Toolchain::default()
        };
        assert_eq!(
            tc.task_command("db:migrate"),
            Err(DomainError::EmptyToolchainCommand { purpose: "task" })
        );
    }

    #[test]
    fn command_display_quotes_whitespace_args() {
        let cmd = CommandSpec::new("bin/rails")
            .arg("generate")
            .arg("migration")
            .arg("username:string email:string");
        assert_eq!(
            cmd.to_string(),
            "bin/rails generate migration \"username:string email:string\""
        );
    }

    #[test]
    fn status_success_only_for_zero() {
        assert!(CommandStatus::success().is_success());
        assert!(!CommandStatus::exited(1).is_success());
        assert!(!CommandStatus { code: None }.is_success());
    }
}
