//! Template Applier - executes a recipe against a project root.
//!
//! Directives run strictly in declaration order, one at a time:
//! 1. Render `{{placeholders}}` with the answers collected so far
//! 2. Execute through the ports (filesystem, operator, command runner)
//! 3. Record the outcome, or stop on the first fatal failure
//!
//! Recoverable failures (`AlreadyExists`, `SourceMissing`) are logged at WARN
//! and recorded as skipped. Everything else aborts the run with the 1-based
//! directive index. There is no retry and no rollback.

use std::path::{Path, PathBuf};

use tracing::{Span, debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError, Severity,
        ports::{CommandRunner, Filesystem, OperatorChannel},
        report::{ApplyReport, StepOutcome, StepReport},
    },
    domain::{
        Answers, CommandSpec, Directive, DomainValidator as validator, DuplicateGuard,
        InjectPosition, Recipe, SpliceOutcome, Toolchain, splice,
    },
    error::{GraftError, GraftResult},
};

type Executed = (StepOutcome, Option<String>);

/// Mutable state of a single run.
struct Run<'a> {
    root: &'a Path,
    assets: PathBuf,
    answers: Answers,
    step: usize,
    report: ApplyReport,
}

impl Run<'_> {
    fn record(
        &mut self,
        index: usize,
        directive: &Directive,
        outcome: StepOutcome,
        note: Option<String>,
    ) {
        self.report.steps.push(StepReport {
            index,
            action: directive.label(),
            directive: directive.to_string(),
            outcome,
            note,
        });
    }
}

/// Executes recipes through injected adapters.
pub struct TemplateApplier {
    filesystem: Box<dyn Filesystem>,
    operator: Box<dyn OperatorChannel>,
    runner: Box<dyn CommandRunner>,
    toolchain: Toolchain,
    guard: DuplicateGuard,
}

impl TemplateApplier {
    /// Create an applier with the default (Rails) toolchain and the
    /// `SkipIfPresent` duplicate guard.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        operator: Box<dyn OperatorChannel>,
        runner: Box<dyn CommandRunner>,
    ) -> Self {
        Self {
            filesystem,
            operator,
            runner,
            toolchain: Toolchain::default(),
            guard: DuplicateGuard::default(),
        }
    }

    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    /// Guard used by injections that do not set their own.
    pub fn with_guard(mut self, guard: DuplicateGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn guard(&self) -> DuplicateGuard {
        self.guard
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Apply every directive of `recipe` to the project at `root`.
    ///
    /// The recipe is validated first; an invalid recipe touches nothing.
    #[instrument(
        skip_all,
        fields(
            recipe = %recipe.name,
            root = %root.display(),
            run_id = tracing::field::Empty
        )
    )]
    pub fn apply(&self, recipe: &Recipe, root: &Path) -> GraftResult<ApplyReport> {
        validator::validate_recipe(recipe)?;

        let run_id = Uuid::new_v4();
        Span::current().record("run_id", tracing::field::display(run_id));
        info!(directives = recipe.directive_count(), "Applying recipe");

        let assets = recipe
            .assets
            .as_ref()
            .map_or_else(|| root.to_path_buf(), |assets| root.join(assets));

        let mut run = Run {
            root,
            assets,
            answers: Answers::new(),
            step: 0,
            report: ApplyReport::start(run_id, &recipe.name, root.to_path_buf()),
        };

        self.run_sequence(&recipe.directives, &mut run)?;

        let report = run.report.finish();
        info!(
            applied = report.applied(),
            skipped = report.skipped(),
            unchanged = report.unchanged(),
            "Recipe applied"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Sequencing
    // -------------------------------------------------------------------------

    fn run_sequence(&self, directives: &[Directive], run: &mut Run<'_>) -> GraftResult<()> {
        for directive in directives {
            run.step += 1;
            let index = run.step;

            if let Directive::WhenAnswered { key, directives } = directive {
                if run.answers.is_answered(key) {
                    debug!(step = index, key = %key, "Condition met");
                    run.record(index, directive, StepOutcome::Applied, None);
                    self.run_sequence(directives, run)?;
                } else {
                    info!(step = index, key = %key, "Condition not met, skipping branch");
                    let reason = format!("'{key}' was not answered");
                    run.record(
                        index,
                        directive,
                        StepOutcome::Skipped {
                            reason: reason.clone(),
                        },
                        None,
                    );
                    skip_branch(directives, &reason, run);
                }
                continue;
            }

            let rendered = directive
                .render(&run.answers)
                .map_err(|e| abort(index, directive, e.into()))?;

            debug!(step = index, action = rendered.label(), "{}", rendered);
            match self.execute(&rendered, run) {
                Ok((outcome, note)) => run.record(index, &rendered, outcome, note),
                Err(err) if err.severity() == Severity::Recoverable => {
                    warn!(step = index, error = %err, "Skipping directive");
                    run.record(
                        index,
                        &rendered,
                        StepOutcome::Skipped {
                            reason: err.to_string(),
                        },
                        None,
                    );
                }
                Err(err) => {
                    error!(step = index, error = %err, "Directive failed, aborting run");
                    return Err(abort(index, &rendered, err));
                }
            }
        }
        Ok(())
    }

    fn execute(&self, directive: &Directive, run: &mut Run<'_>) -> GraftResult<Executed> {
        match directive {
            Directive::InstallDependency { name, group } => {
                let command = self.toolchain.install_command(name, group.as_deref())?;
                self.delegate(&command, run.root)
            }
            Directive::RunGenerator { generator, args } => {
                let command = self
                    .toolchain
                    .generate_command(generator, &split_args(args))?;
                self.delegate(&command, run.root)
            }
            Directive::RunTask { task } => {
                let command = self.toolchain.task_command(task)?;
                self.delegate(&command, run.root)
            }
            Directive::AskQuestion {
                key,
                prompt,
                default,
            } => {
                let raw = self.operator.ask(prompt, default.as_deref())?;
                let answer = resolve_answer(&raw, default.as_deref());
                debug!(key = %key, answer = %answer, "Answer recorded");
                let note = format!("{key} = {answer:?}");
                run.answers.set(key.clone(), answer);
                Ok((StepOutcome::Applied, Some(note)))
            }
            Directive::CreateFile {
                path,
                content,
                overwrite,
            } => self.create_file(&path.under(run.root), content, *overwrite),
            Directive::CopyDirectory {
                source,
                dest,
                overwrite,
            } => self.copy_directory(&run.assets.join(source), &dest.under(run.root), *overwrite),
            Directive::EnsureDirectory { path } => self.ensure_directory(&path.under(run.root)),
            Directive::InjectText {
                path,
                anchor,
                position,
                text,
                guard,
            } => self.inject(
                &path.under(run.root),
                anchor,
                *position,
                text,
                guard.unwrap_or(self.guard),
            ),
            Directive::PrintMessage { text } => {
                self.operator.say(text)?;
                Ok((StepOutcome::Applied, None))
            }
            Directive::WhenAnswered { .. } => Err(GraftError::Internal {
                message: "conditional directive reached the executor".into(),
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Directive handlers
    // -------------------------------------------------------------------------

    fn delegate(&self, command: &CommandSpec, cwd: &Path) -> GraftResult<Executed> {
        info!(command = %command, "Running command");
        let status = self.runner.run(command, cwd)?;
        if status.is_success() {
            Ok((StepOutcome::Applied, Some(command.to_string())))
        } else {
            Err(ApplicationError::CommandFailed {
                command: command.to_string(),
                code: status.code,
            }
            .into())
        }
    }

    fn create_file(&self, path: &Path, content: &str, overwrite: bool) -> GraftResult<Executed> {
        if self.filesystem.exists(path) {
            if !overwrite {
                return Err(ApplicationError::AlreadyExists {
                    path: path.to_path_buf(),
                }
                .into());
            }
            if self
                .filesystem
                .read_to_string(path)
                .is_ok_and(|current| current == content)
            {
                return Ok((StepOutcome::Unchanged, None));
            }
        }

        self.ensure_parent(path)?;
        self.filesystem.write_file(path, content)?;
        Ok((StepOutcome::Applied, None))
    }

    fn copy_directory(&self, source: &Path, dest: &Path, overwrite: bool) -> GraftResult<Executed> {
        if !self.filesystem.is_dir(source) {
            return Err(ApplicationError::SourceMissing {
                path: source.to_path_buf(),
            }
            .into());
        }

        let files = self.filesystem.list_files(source)?;
        self.filesystem.create_dir_all(dest)?;

        let (mut copied, mut kept) = (0usize, 0usize);
        for relative in &files {
            let target = dest.join(relative);
            if !overwrite && self.filesystem.exists(&target) {
                debug!(path = %target.display(), "Keeping existing file");
                kept += 1;
                continue;
            }
            self.ensure_parent(&target)?;
            self.filesystem.copy_file(&source.join(relative), &target)?;
            copied += 1;
        }

        let outcome = if copied == 0 && kept > 0 {
            StepOutcome::Unchanged
        } else {
            StepOutcome::Applied
        };
        Ok((outcome, Some(format!("{copied} copied, {kept} skipped"))))
    }

    fn ensure_directory(&self, path: &Path) -> GraftResult<Executed> {
        if self.filesystem.is_dir(path) {
            return Ok((StepOutcome::Unchanged, None));
        }
        self.filesystem.create_dir_all(path)?;
        Ok((StepOutcome::Applied, None))
    }

    fn inject(
        &self,
        path: &Path,
        anchor: &str,
        position: InjectPosition,
        text: &str,
        guard: DuplicateGuard,
    ) -> GraftResult<Executed> {
        if !self.filesystem.exists(path) {
            return Err(ApplicationError::TargetMissing {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = self.filesystem.read_to_string(path)?;
        match splice(&content, anchor, position, text, guard) {
            SpliceOutcome::Spliced(updated) => {
                self.filesystem.write_file(path, &updated)?;
                Ok((StepOutcome::Applied, None))
            }
            SpliceOutcome::AlreadyPresent => {
                debug!(path = %path.display(), "Injected text already present");
                Ok((StepOutcome::Unchanged, Some("text already present".into())))
            }
            SpliceOutcome::AnchorMissing => Err(ApplicationError::AnchorNotFound {
                path: path.to_path_buf(),
                anchor: anchor.to_string(),
            }
            .into()),
        }
    }

    fn ensure_parent(&self, path: &Path) -> GraftResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.filesystem.create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

fn abort(index: usize, directive: &Directive, source: GraftError) -> GraftError {
    ApplicationError::ApplyFailed {
        index,
        directive: directive.to_string(),
        source: Box::new(source),
    }
    .into()
}

/// Record every directive of a skipped branch as skipped, binding its
/// questions to their defaults so later placeholders still resolve.
fn skip_branch(directives: &[Directive], reason: &str, run: &mut Run<'_>) {
    for directive in directives {
        run.step += 1;
        run.record(
            run.step,
            directive,
            StepOutcome::Skipped {
                reason: reason.to_string(),
            },
            None,
        );
        match directive {
            Directive::AskQuestion { key, default, .. } => {
                let value = default
                    .as_deref()
                    .map(|d| run.answers.render(d))
                    .unwrap_or_default();
                run.answers.set(key.clone(), value);
            }
            Directive::WhenAnswered { directives, .. } => skip_branch(directives, reason, run),
            _ => {}
        }
    }
}

/// Trimmed answer, or the default when the operator left it blank.
fn resolve_answer(raw: &str, default: Option<&str>) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        default.unwrap_or_default().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Split generator arguments on whitespace and on commas outside `{...}`,
/// so a single answer like `"username:string, price:decimal{10,2}"` becomes
/// separate arguments.
fn split_args(args: &[String]) -> Vec<String> {
    fn flush(word: &mut String, out: &mut Vec<String>) {
        if !word.is_empty() {
            out.push(std::mem::take(word));
        }
    }

    let mut out = Vec::new();
    for arg in args {
        let mut word = String::new();
        let mut depth = 0usize;
        for c in arg.chars() {
            match c {
                '{' => {
                    depth += 1;
                    word.push(c);
                }
                '}' => {
                    depth = depth.saturating_sub(1);
                    word.push(c);
                }
                ',' if depth == 0 => flush(&mut word, &mut out),
                c if c.is_whitespace() && depth == 0 => flush(&mut word, &mut out),
                c => word.push(c),
            }
        }
        flush(&mut word, &mut out);
    }
    out
}
