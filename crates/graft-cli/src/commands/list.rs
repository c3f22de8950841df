//! Implementation of the `graft list` command.

use crate::{
    cli::{ListArgs, ListFormat},
    commands::recipe_service,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let recipes = recipe_service(&config)?.list()?;

    // `--output-format json` wins over the table default.
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Available Recipes:")?;
            let width = recipes.iter().map(|r| r.name.len()).max().unwrap_or(0);
            for recipe in &recipes {
                output.print(&format!(
                    "  {:<width$}  {:>3} directives  {}",
                    recipe.name, recipe.directives, recipe.description
                ))?;
            }
        }
        ListFormat::Json => output.json(&recipes)?,
        ListFormat::List => {
            for recipe in &recipes {
                output.print(&recipe.name)?;
            }
        }
    }

    Ok(())
}
