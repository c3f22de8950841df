//! Directives: the atomic scaffolding actions a recipe is made of.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Recipe                                                       │
//! │  ├── AskQuestion   key = "model", default = "User"           │
//! │  ├── RunGenerator  devise {{model}}                          │
//! │  ├── CreateFile    .traceroute.yaml                          │
//! │  ├── InjectText    layout after "<body>\n"                   │
//! │  └── WhenAnswered  "columns" ─┬── RunGenerator migration ... │
//! │                               └── RunTask db:migrate         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Directives are immutable values. Placeholders are substituted with
//! [`Directive::render`] right before a directive runs, so a directive may
//! use any answer collected by an earlier `AskQuestion`.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::answers::{Answers, placeholders};
use super::common::RelativePath;
use crate::domain::error::DomainError;
use crate::domain::value_objects::{DuplicateGuard, InjectPosition};

/// One scaffolding action.
///
/// Serialised with an `action` tag so recipe files read naturally:
///
/// ```toml
/// [[directives]]
/// action  = "create_file"
/// path    = ".traceroute.yaml"
/// content = "ignore_unreachable_actions: []\n"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Directive {
    /// Add a package through the toolchain's installer.
    InstallDependency {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<String>,
    },

    /// Run a framework generator.
    RunGenerator {
        generator: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<String>,
    },

    /// Run a framework task such as `db:migrate`.
    RunTask { task: String },

    /// Ask the operator a question and bind the answer to `key`.
    AskQuestion {
        key: String,
        prompt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<String>,
    },

    /// Write `content` to `path`.
    CreateFile {
        path: RelativePath,
        content: String,
        #[serde(default)]
        overwrite: bool,
    },

    /// Recursively merge `source` (resolved against the recipe's assets
    /// root) into `dest`.
    CopyDirectory {
        source: PathBuf,
        dest: RelativePath,
        #[serde(default)]
        overwrite: bool,
    },

    /// Create a directory tree if it is missing.
    EnsureDirectory { path: RelativePath },

    /// Splice `text` next to the first occurrence of `anchor`.
    InjectText {
        path: RelativePath,
        anchor: String,
        #[serde(default)]
        position: InjectPosition,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        guard: Option<DuplicateGuard>,
    },

    /// Print a line for the operator.
    PrintMessage { text: String },

    /// Run `directives` only when the answer bound to `key` is non-blank.
    WhenAnswered {
        key: String,
        directives: Vec<Directive>,
    },
}

impl Directive {
    // ── Constructors ────────────────────────────────────────────────────────

    pub fn install(name: impl Into<String>) -> Self {
        Self::InstallDependency {
            name: name.into(),
            group: None,
        }
    }

    pub fn install_in_group(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self::InstallDependency {
            name: name.into(),
            group: Some(group.into()),
        }
    }

    pub fn generate<I, S>(generator: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::RunGenerator {
            generator: generator.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn task(task: impl Into<String>) -> Self {
        Self::RunTask { task: task.into() }
    }

    pub fn ask(key: impl Into<String>, prompt: impl Into<String>, default: Option<&str>) -> Self {
        Self::AskQuestion {
            key: key.into(),
            prompt: prompt.into(),
            default: default.map(str::to_string),
        }
    }

    pub fn create_file(path: &str, content: impl Into<String>, overwrite: bool) -> Self {
        Self::CreateFile {
            path: RelativePath::new(path),
            content: content.into(),
            overwrite,
        }
    }

    pub fn copy_directory(source: impl Into<PathBuf>, dest: &str, overwrite: bool) -> Self {
        Self::CopyDirectory {
            source: source.into(),
            dest: RelativePath::new(dest),
            overwrite,
        }
    }

    pub fn ensure_directory(path: &str) -> Self {
        Self::EnsureDirectory {
            path: RelativePath::new(path),
        }
    }

    pub fn inject(
        path: &str,
        anchor: impl Into<String>,
        position: InjectPosition,
        text: impl Into<String>,
    ) -> Self {
        Self::InjectText {
            path: RelativePath::new(path),
            anchor: anchor.into(),
            position,
            text: text.into(),
            guard: None,
        }
    }

    pub fn say(text: impl Into<String>) -> Self {
        Self::PrintMessage { text: text.into() }
    }

    pub fn when_answered(key: impl Into<String>, directives: Vec<Directive>) -> Self {
        Self::WhenAnswered {
            key: key.into(),
            directives,
        }
    }

    /// Override the applier-wide duplicate guard. No-op for anything other
    /// than `InjectText`.
    pub fn with_guard(self, guard: DuplicateGuard) -> Self {
        match self {
            Self::InjectText {
                path,
                anchor,
                position,
                text,
                ..
            } => Self::InjectText {
                path,
                anchor,
                position,
                text,
                guard: Some(guard),
            },
            other => other,
        }
    }

    // ── Introspection ───────────────────────────────────────────────────────

    /// Stable snake_case name of the directive kind (matches the `action` tag).
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InstallDependency { .. } => "install_dependency",
            Self::RunGenerator { .. } => "run_generator",
            Self::RunTask { .. } => "run_task",
            Self::AskQuestion { .. } => "ask_question",
            Self::CreateFile { .. } => "create_file",
            Self::CopyDirectory { .. } => "copy_directory",
            Self::EnsureDirectory { .. } => "ensure_directory",
            Self::InjectText { .. } => "inject_text",
            Self::PrintMessage { .. } => "print_message",
            Self::WhenAnswered { .. } => "when_answered",
        }
    }

    /// Text fields whose `{{placeholders}}` must name an answered key. File
    /// bodies (`CreateFile.content`, `InjectText.text`) are excluded: an
    /// unknown `{{...}}` there is template syntax of the written file and is
    /// kept literally. Nested directives of `WhenAnswered` are not included.
    fn templated_fields(&self) -> Vec<&str> {
        match self {
            Self::InstallDependency { name, group } => {
                let mut v = vec![name.as_str()];
                v.extend(group.as_deref());
                v
            }
            Self::RunGenerator { generator, args } => std::iter::once(generator.as_str())
                .chain(args.iter().map(String::as_str))
                .collect(),
            Self::RunTask { task } => vec![task.as_str()],
            Self::AskQuestion {
                prompt, default, ..
            } => {
                let mut v = vec![prompt.as_str()];
                v.extend(default.as_deref());
                v
            }
            Self::CreateFile { path, .. } => vec![path.as_str()],
            Self::CopyDirectory { source, dest, .. } => {
                vec![source.to_str().unwrap_or(""), dest.as_str()]
            }
            Self::EnsureDirectory { path } => vec![path.as_str()],
            Self::InjectText { path, anchor, .. } => vec![path.as_str(), anchor.as_str()],
            Self::PrintMessage { text } => vec![text.as_str()],
            Self::WhenAnswered { .. } => Vec::new(),
        }
    }

    /// Placeholder names this directive requires (excluding nested ones).
    pub fn placeholders(&self) -> Vec<String> {
        self.templated_fields()
            .into_iter()
            .flat_map(placeholders)
            .collect()
    }

    /// Substitute answers into every templated field.
    ///
    /// `WhenAnswered` is returned unchanged: its children are rendered one by
    /// one as they run, after any question asked inside the branch. Fails if a
    /// substituted path turns absolute.
    pub fn render(&self, answers: &Answers) -> Result<Directive, DomainError> {
        let r = |s: &str| answers.render(s);
        let rp = |p: &RelativePath| RelativePath::try_new(answers.render(p.as_str()));

        let rendered = match self {
            Self::InstallDependency { name, group } => Self::InstallDependency {
                name: r(name),
                group: group.as_deref().map(r),
            },
            Self::RunGenerator { generator, args } => Self::RunGenerator {
                generator: r(generator),
                args: args.iter().map(|a| r(a)).collect(),
            },
            Self::RunTask { task } => Self::RunTask { task: r(task) },
            Self::AskQuestion {
                key,
                prompt,
                default,
            } => Self::AskQuestion {
                key: key.clone(),
                prompt: r(prompt),
                default: default.as_deref().map(r),
            },
            Self::CreateFile {
                path,
                content,
                overwrite,
            } => Self::CreateFile {
                path: rp(path)?,
                content: r(content),
                overwrite: *overwrite,
            },
            Self::CopyDirectory {
                source,
                dest,
                overwrite,
            } => Self::CopyDirectory {
                source: PathBuf::from(r(&source.to_string_lossy())),
                dest: rp(dest)?,
                overwrite: *overwrite,
            },
            Self::EnsureDirectory { path } => Self::EnsureDirectory { path: rp(path)? },
            Self::InjectText {
                path,
                anchor,
                position,
                text,
                guard,
            } => Self::InjectText {
                path: rp(path)?,
                anchor: r(anchor),
                position: *position,
                text: r(text),
                guard: *guard,
            },
            Self::PrintMessage { text } => Self::PrintMessage { text: r(text) },
            Self::WhenAnswered { .. } => self.clone(),
        };
        Ok(rendered)
    }

    /// Keys bound by `AskQuestion` directives in this subtree, in order.
    pub fn declared_keys(&self) -> Vec<&str> {
        match self {
            Self::AskQuestion { key, .. } => vec![key.as_str()],
            Self::WhenAnswered { directives, .. } => {
                directives.iter().flat_map(Directive::declared_keys).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// One-line human description, used by plans and step reports.
impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstallDependency { name, group: None } => write!(f, "install {name}"),
            Self::InstallDependency {
                name,
                group: Some(group),
            } => write!(f, "install {name} ({group})"),
            Self::RunGenerator { generator, args } if args.is_empty() => {
                write!(f, "generate {generator}")
            }
            Self::RunGenerator { generator, args } => {
                write!(f, "generate {generator} {}", args.join(" "))
            }
            Self::RunTask { task } => write!(f, "task {task}"),
            Self::AskQuestion { key, prompt, .. } => write!(f, "ask {key}: {prompt}"),
            Self::CreateFile {
                path, overwrite, ..
            } => {
                if *overwrite {
                    write!(f, "create {path} (overwrite)")
                } else {
                    write!(f, "create {path}")
                }
            }
            Self::CopyDirectory { source, dest, .. } => {
                write!(f, "copy {} -> {dest}", source.display())
            }
            Self::EnsureDirectory { path } => write!(f, "mkdir {path}"),
            Self::InjectText {
                path,
                anchor,
                position,
                ..
            } => write!(f, "inject into {path} {position} {:?}", anchor),
            Self::PrintMessage { text } => write!(f, "say {text:?}"),
            Self::WhenAnswered { key, directives } => {
                write!(f, "when {key} is answered ({} directives)", directives.len())
            }
        }
    }
}
