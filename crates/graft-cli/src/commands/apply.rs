//! Implementation of the `graft apply` command.
//!
//! Responsibility: resolve the recipe and project root, wire the local
//! adapters into a [`TemplateApplier`], and display the report.

use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument};

use graft_adapters::{DefaultsOperator, LocalFilesystem, ProcessRunner, TerminalOperator};
use graft_core::{
    application::{ApplyReport, StepOutcome, TemplateApplier, ports::OperatorChannel},
    domain::{DuplicateGuard, Recipe},
};

use crate::{
    cli::ApplyArgs,
    commands::{absolute, resolve_recipe},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `graft apply` command.
///
/// 1. Resolve the recipe (name or file) and the project root
/// 2. Early-exit with the plan if `--dry-run`
/// 3. Apply through the local filesystem, a process runner and either the
///    terminal or the defaults operator
/// 4. Print the per-directive report
#[instrument(skip_all, fields(recipe = %args.recipe))]
pub fn execute(
    args: ApplyArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let mut recipe = resolve_recipe(&args.recipe, &config)?;

    let root = match &args.root {
        Some(root) => absolute(root)?,
        None => absolute(Path::new("."))?,
    };
    if !root.is_dir() {
        return Err(CliError::InvalidRoot { path: root });
    }
    if let Some(assets) = &args.assets {
        recipe.assets = Some(absolute(assets)?);
    }

    if args.dry_run {
        return print_plan(&recipe, &root, &output);
    }

    let guard = args
        .guard
        .map(DuplicateGuard::from)
        .unwrap_or(config.apply.inject_guard);
    let operator: Box<dyn OperatorChannel> = if args.yes || config.apply.assume_yes {
        Box::new(DefaultsOperator::new())
    } else {
        Box::new(TerminalOperator::new())
    };

    let applier = TemplateApplier::new(
        Box::new(LocalFilesystem::new()),
        operator,
        Box::new(ProcessRunner::new()),
    )
    .with_toolchain(config.toolchain)
    .with_guard(guard);

    if !output.is_json() {
        output.header(&format!(
            "Applying '{}' to {}",
            recipe.name,
            root.display()
        ))?;
    }
    info!(root = %root.display(), guard = %guard, "Apply started");

    let report = applier.apply(&recipe, &root)?;

    info!(run_id = %report.run_id, "Apply completed");
    print_report(&report, &output)
}

#[derive(Serialize)]
struct PlanView<'a> {
    recipe: &'a str,
    root: &'a Path,
    steps: Vec<String>,
}

fn print_plan(recipe: &Recipe, root: &Path, output: &OutputManager) -> CliResult<()> {
    let steps = recipe.plan();
    if output.is_json() {
        output.json(&PlanView {
            recipe: &recipe.name,
            root,
            steps,
        })?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: would apply '{}' ({} directives) to {}",
        recipe.name,
        recipe.directive_count(),
        root.display(),
    ))?;
    for line in &steps {
        output.print(line)?;
    }
    Ok(())
}

fn print_report(report: &ApplyReport, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(report)?;
        return Ok(());
    }

    output.print("")?;
    for step in &report.steps {
        let line = format!("{:>3}. {}", step.index, step.directive);
        match &step.outcome {
            StepOutcome::Applied => output.print(&line)?,
            StepOutcome::Unchanged => output.print(&format!("{line} (unchanged)"))?,
            StepOutcome::Skipped { reason } => {
                output.warning(&format!("{line} (skipped)"))?;
                output.detail(reason)?;
            }
        }
        if let Some(note) = &step.note {
            output.detail(note)?;
        }
    }

    output.print("")?;
    output.success(&format!(
        "Recipe '{}' applied: {} applied, {} unchanged, {} skipped ({} ms)",
        report.recipe,
        report.applied(),
        report.unchanged(),
        report.skipped(),
        report.duration().num_milliseconds(),
    ))?;
    Ok(())
}
