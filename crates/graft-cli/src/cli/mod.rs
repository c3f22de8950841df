//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use graft_core::domain::DuplicateGuard;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "graft",
    bin_name = "graft",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f331} Recipe-driven scaffolding for existing projects",
    long_about = "Graft applies recipes to an existing project: it installs \
                  dependencies, runs generators, copies files and injects \
                  snippets next to anchor text, asking questions on the way.",
    after_help = "EXAMPLES:\n\
        \x20 graft apply devise-tailwind\n\
        \x20 graft apply ./recipes/toast.toml --root ../my-app --yes\n\
        \x20 graft show devise-tailwind\n\
        \x20 graft completions bash > /usr/share/bash-completion/completions/graft",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply a recipe to a project.
    #[command(
        visible_alias = "a",
        about = "Apply a recipe to a project",
        after_help = "EXAMPLES:\n\
            \x20 graft apply devise-tailwind                 # current directory\n\
            \x20 graft apply devise-tailwind --root ../shop  # another project\n\
            \x20 graft apply ./toast.toml --yes              # accept every default\n\
            \x20 graft apply devise-tailwind --dry-run       # print the plan only"
    )]
    Apply(ApplyArgs),

    /// List available recipes.
    #[command(
        visible_alias = "ls",
        about = "List available recipes",
        after_help = "EXAMPLES:\n\
            \x20 graft list\n\
            \x20 graft list --format json"
    )]
    List(ListArgs),

    /// Show the directives of a recipe.
    #[command(
        about = "Show the directive plan of a recipe",
        after_help = "EXAMPLES:\n\
            \x20 graft show devise-tailwind\n\
            \x20 graft show devise-tailwind --toml > my-recipe.toml"
    )]
    Show(ShowArgs),

    /// Initialise a Graft configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 graft init                      # default location\n\
            \x20 graft init --force              # overwrite an existing file\n\
            \x20 graft --config graft.toml init  # explicit path"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 graft completions bash > ~/.local/share/bash-completion/completions/graft\n\
            \x20 graft completions zsh  > ~/.zfunc/_graft\n\
            \x20 graft completions fish > ~/.config/fish/completions/graft.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Graft configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 graft config get apply.inject_guard\n\
            \x20 graft config set apply.inject_guard always\n\
            \x20 graft config set toolchain.install \"bundle add\"\n\
            \x20 graft config list"
    )]
    Config(ConfigCommands),
}

impl Commands {
    /// `false` for commands that create the config file or never read it,
    /// so a `--config` path that does not exist yet is accepted.
    pub fn reads_config_file(&self) -> bool {
        !matches!(
            self,
            Self::Init(_)
                | Self::Completions(_)
                | Self::Config(ConfigCommands::Set { .. } | ConfigCommands::Path)
        )
    }
}

// ── apply ─────────────────────────────────────────────────────────────────────

/// Arguments for `graft apply`.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Built-in recipe name, a recipe from the configured recipes directory,
    /// or a path to a `.toml` recipe file.
    #[arg(value_name = "RECIPE", help = "Recipe name or path to a .toml recipe")]
    pub recipe: String,

    /// Project root the recipe is applied to.
    #[arg(
        short = 'r',
        long = "root",
        value_name = "DIR",
        help = "Project root (default: current directory)"
    )]
    pub root: Option<PathBuf>,

    /// Directory that `copy_directory` sources are resolved against.
    #[arg(
        long = "assets",
        value_name = "DIR",
        help = "Assets directory for copied files"
    )]
    pub assets: Option<PathBuf>,

    /// Accept the default answer for every question.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Answer every question with its default"
    )]
    pub yes: bool,

    /// Print the plan without touching the project.
    #[arg(long = "dry-run", help = "Show the directive plan without applying")]
    pub dry_run: bool,

    /// Duplicate guard for injections that do not set their own.
    #[arg(
        long = "guard",
        value_enum,
        value_name = "GUARD",
        help = "Injection duplicate guard (overrides config)"
    )]
    pub guard: Option<GuardArg>,
}

/// CLI spelling of [`DuplicateGuard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GuardArg {
    /// Leave the file alone when the text is already there.
    SkipIfPresent,
    /// Inject even when the text is already there.
    Always,
}

impl From<GuardArg> for DuplicateGuard {
    fn from(arg: GuardArg) -> Self {
        match arg {
            GuardArg::SkipIfPresent => Self::SkipIfPresent,
            GuardArg::Always => Self::Always,
        }
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `graft list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── show ──────────────────────────────────────────────────────────────────────

/// Arguments for `graft show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(value_name = "RECIPE", help = "Recipe name or path to a .toml recipe")]
    pub recipe: String,

    /// Print the recipe in the recipe file format instead of a plan.
    #[arg(long = "toml", help = "Print the recipe as a TOML recipe file")]
    pub toml: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `graft init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `graft completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => Self::Bash,
            Shell::Zsh => Self::Zsh,
            Shell::Fish => Self::Fish,
            Shell::PowerShell => Self::PowerShell,
            Shell::Elvish => Self::Elvish,
        }
    }
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `graft config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `apply.inject_guard`.
        key: String,
    },
    /// Set a configuration key in the config file.
    Set {
        /// Dotted key path.
        key: String,
        /// New value. Toolchain commands are split on whitespace.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_apply_command() {
        let cli = Cli::parse_from([
            "graft",
            "apply",
            "devise-tailwind",
            "--root",
            "/srv/shop",
            "--yes",
            "--guard",
            "always",
        ]);
        match cli.command {
            Commands::Apply(args) => {
                assert_eq!(args.recipe, "devise-tailwind");
                assert_eq!(args.root, Some(PathBuf::from("/srv/shop")));
                assert!(args.yes);
                assert!(!args.dry_run);
                assert_eq!(args.guard, Some(GuardArg::Always));
            }
            other => panic!("expected Apply, got {other:?}"),
        }
    }

    #[test]
    fn guard_arg_uses_kebab_case() {
        let cli = Cli::parse_from(["graft", "apply", "x", "--guard", "skip-if-present"]);
        let Commands::Apply(args) = cli.command else {
            panic!("expected Apply");
        };
        assert_eq!(
            args.guard.map(DuplicateGuard::from),
            Some(DuplicateGuard::SkipIfPresent)
        );
    }

    #[test]
    fn list_alias_and_default_format() {
        let cli = Cli::parse_from(["graft", "ls"]);
        let Commands::List(args) = cli.command else {
            panic!("expected List");
        };
        assert_eq!(args.format, ListFormat::Table);
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::parse_from(["graft", "show", "devise-tailwind", "-vv", "--no-color"]);
        assert_eq!(cli.global.verbose, 2);
        assert!(cli.global.no_color);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["graft", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn init_and_set_accept_a_missing_config_file() {
        let reads = |args: &[&str]| Cli::parse_from(args).command.reads_config_file();
        assert!(!reads(&["graft", "init"]));
        assert!(!reads(&["graft", "config", "set", "apply.assume_yes", "true"]));
        assert!(reads(&["graft", "config", "get", "apply.assume_yes"]));
        assert!(reads(&["graft", "list"]));
    }

    #[test]
    fn apply_requires_a_recipe() {
        assert!(Cli::try_parse_from(["graft", "apply"]).is_err());
    }
}
