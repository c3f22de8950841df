//! `graft show`: print what a recipe would do.

use graft_adapters::recipe_loader;

use crate::{
    cli::ShowArgs,
    commands::resolve_recipe,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ShowArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let recipe = resolve_recipe(&args.recipe, &config)?;

    if args.toml {
        // Raw write: the recipe file is meant to be redirected, even with -q.
        print!("{}", recipe_loader::to_toml(&recipe)?);
        return Ok(());
    }
    if output.is_json() {
        output.json(&recipe)?;
        return Ok(());
    }

    output.header(&recipe.name)?;
    if !recipe.description.is_empty() {
        output.print(&recipe.description)?;
    }
    if let Some(assets) = &recipe.assets {
        output.print(&format!("Assets: {}", assets.display()))?;
    }
    output.print("")?;
    for line in recipe.plan() {
        output.print(&line)?;
    }
    Ok(())
}
