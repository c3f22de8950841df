//! End-to-end runs of the built-in `devise-tailwind` recipe against a
//! skeleton Rails project.

use std::fs;
use std::path::Path;

use graft_adapters::{
    InMemoryRecipeStore, LocalFilesystem, MemoryFilesystem, RecordingRunner, ScriptedOperator,
    builtin_recipes::DEVISE_TAILWIND,
};
use graft_core::{
    application::{ApplicationError, StepOutcome},
    prelude::*,
};
use tempfile::TempDir;

const LAYOUT: &str = "<!DOCTYPE html>\n<html>\n<body>\n<%= yield %>\n</body>\n</html>\n";
const CONTROLLER: &str = "class ApplicationController < ActionController::Base\n  allow_browser versions: :modern\n\n  # Changes to the importmap will invalidate the etag for HTML responses\n  stale_when_importmap_changes\nend\n";
const HELPER: &str = "module ApplicationHelper\nend\n";

fn skeleton() -> MemoryFilesystem {
    MemoryFilesystem::new()
        .with_file("/app/app/views/layouts/application.html.erb", LAYOUT)
        .with_file("/app/app/controllers/application_controller.rb", CONTROLLER)
        .with_file("/app/app/helpers/application_helper.rb", HELPER)
        .with_file("/app/lib/shared/_nav.html.erb", "<nav></nav>\n")
        .with_file("/app/lib/shared/_flash_messages.html.erb", "<div data-controller=\"flash\"></div>\n")
        .with_file("/app/lib/templates/devise/sessions/new.html.erb", "<h1>Sign in</h1>\n")
}

fn recipe() -> Recipe {
    RecipeService::new(Box::new(InMemoryRecipeStore::with_builtin().unwrap()))
        .get(DEVISE_TAILWIND)
        .unwrap()
}

fn apply(
    fs: &MemoryFilesystem,
    operator: &ScriptedOperator,
    runner: &RecordingRunner,
) -> GraftResult<ApplyReport> {
    TemplateApplier::new(
        Box::new(fs.clone()),
        Box::new(operator.clone()),
        Box::new(runner.clone()),
    )
    .apply(&recipe(), Path::new("/app"))
}

#[test]
fn full_run_produces_expected_project() {
    let fs = skeleton();
    let operator = ScriptedOperator::new(["Admin", "username:string"]);
    let runner = RecordingRunner::new();

    let report = apply(&fs, &operator, &runner).unwrap();

    assert_eq!(
        runner.commands(),
        vec![
            "bundle add devise",
            "bundle add bullet --group development",
            "bundle add traceroute --group development",
            "bundle add better_errors --group development",
            "bundle add binding_of_caller --group development",
            "bin/rails generate devise:install",
            "bin/rails generate devise Admin",
            "bin/rails generate migration AddExtraColumnsToAdmins username:string",
            "bin/rails db:migrate",
            "bin/rails generate devise:views",
            "bin/rails generate bullet:install",
            "bin/rails generate stimulus flash",
        ]
    );

    let traceroute = fs.read_file("/app/.traceroute.yaml").unwrap();
    assert!(traceroute.starts_with("ignore_unreachable_actions:\n"));

    let flash = fs
        .read_file("/app/app/javascript/controllers/flash_controller.js")
        .unwrap();
    assert!(flash.contains("static targets = [\"alert\"]"));

    let layout = fs
        .read_file("/app/app/views/layouts/application.html.erb")
        .unwrap();
    assert!(layout.contains("<body>\n<header class=\"sticky top-0 h-20\">\n"));

    let controller = fs
        .read_file("/app/app/controllers/application_controller.rb")
        .unwrap();
    assert!(controller.contains("before_action :set_current_user, if: :user_signed_in?\n"));
    assert!(controller.contains("private\n\ndef set_current_user\n"));

    assert_eq!(
        fs.read_file("/app/app/views/layouts/shared/_nav.html.erb")
            .as_deref(),
        Some("<nav></nav>\n")
    );
    assert!(
        fs.read_file("/app/app/views/devise/sessions/new.html.erb")
            .is_some()
    );
    assert!(
        fs.read_file("/app/app/models/current.rb")
            .unwrap()
            .contains("attribute :user")
    );
    assert!(
        fs.read_file("/app/app/helpers/application_helper.rb")
            .unwrap()
            .starts_with("module ApplicationHelper\ndef render_turbo_stream_flash_messages\n")
    );

    // lib/tailwind is absent: logged and skipped, not fatal.
    assert_eq!(report.skipped(), 1);
    assert!(
        operator
            .messages()
            .contains(&"✅ Devise setup complete!".to_string())
    );
    assert_eq!(
        operator.prompts()[1],
        "Add extra columns to Admin (comma-separated, e.g., username:string)?"
    );
}

#[test]
fn blank_answers_use_defaults_and_skip_migration() {
    let fs = skeleton();
    let operator = ScriptedOperator::new(["", "  "]);
    let runner = RecordingRunner::new();

    let report = apply(&fs, &operator, &runner).unwrap();

    let commands = runner.commands();
    assert!(commands.contains(&"bin/rails generate devise User".to_string()));
    assert!(!commands.iter().any(|c| c.contains("migration")));
    assert!(!commands.iter().any(|c| c.contains("db:migrate")));
    assert!(matches!(
        report.step(10).map(|s| &s.outcome),
        Some(StepOutcome::Skipped { .. })
    ));
}

#[test]
fn second_run_leaves_injected_files_alone() {
    let fs = skeleton();
    let runner = RecordingRunner::new();
    apply(&fs, &ScriptedOperator::new(["User", ""]), &runner).unwrap();
    let layout = fs.read_file("/app/app/views/layouts/application.html.erb");
    let controller = fs.read_file("/app/app/controllers/application_controller.rb");

    let report = apply(&fs, &ScriptedOperator::new(["User", ""]), &runner).unwrap();

    assert_eq!(fs.read_file("/app/app/views/layouts/application.html.erb"), layout);
    assert_eq!(
        fs.read_file("/app/app/controllers/application_controller.rb"),
        controller
    );
    // .traceroute.yaml and current.rb already exist, lib/tailwind is missing,
    // extra columns left blank (the branch and its two directives)
    assert_eq!(report.skipped(), 6);
    assert!(
        report
            .steps
            .iter()
            .filter(|s| s.action == "inject_text")
            .all(|s| s.outcome == StepOutcome::Unchanged)
    );
    let controller = controller.unwrap();
    assert_eq!(controller.matches("protected\n").count(), 1);
    assert_eq!(controller.matches("before_action :configure_permitted_parameters").count(), 1);
}

#[test]
fn failed_migration_aborts_with_its_index() {
    let fs = skeleton();
    let runner = RecordingRunner::new().fail_on("bin/rails db:migrate", 1);

    let err = apply(&fs, &ScriptedOperator::new(["User", "username:string"]), &runner).unwrap_err();

    match err {
        GraftError::Application(ApplicationError::ApplyFailed { index, .. }) => {
            assert_eq!(index, 12)
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(fs.read_file("/app/.traceroute.yaml").is_none());
}

#[test]
fn layout_without_body_anchor_is_fatal() {
    let fs = skeleton().with_file("/app/app/views/layouts/application.html.erb", "<main></main>\n");
    let runner = RecordingRunner::new();

    let err = apply(&fs, &ScriptedOperator::new(["User", ""]), &runner).unwrap_err();

    match err {
        GraftError::Application(ApplicationError::ApplyFailed { index, source, .. }) => {
            assert_eq!(index, 23);
            assert!(matches!(
                *source,
                GraftError::Application(ApplicationError::AnchorNotFound { .. })
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        fs.read_file("/app/app/views/layouts/application.html.erb")
            .as_deref(),
        Some("<main></main>\n")
    );
}

#[test]
fn runs_against_local_filesystem() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    for (path, content) in [
        ("app/views/layouts/application.html.erb", LAYOUT),
        ("app/controllers/application_controller.rb", CONTROLLER),
        ("app/helpers/application_helper.rb", HELPER),
        ("lib/tailwind/components.css", ".btn { @apply px-4; }\n"),
    ] {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }

    let runner = RecordingRunner::new();
    let report = TemplateApplier::new(
        Box::new(LocalFilesystem::new()),
        Box::new(ScriptedOperator::new(["User", ""])),
        Box::new(runner.clone()),
    )
    .apply(&recipe(), root)
    .unwrap();

    assert!(root.join(".traceroute.yaml").is_file());
    assert!(root.join("app/views/layouts/shared").is_dir());
    assert_eq!(
        fs::read_to_string(root.join("app/assets/tailwind/components.css")).unwrap(),
        ".btn { @apply px-4; }\n"
    );
    // lib/templates/devise and lib/shared are absent, extra columns blank
    // (the branch and its two directives)
    assert_eq!(report.skipped(), 5);
}
