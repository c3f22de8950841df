//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::{Cli, CompletionsArgs};

pub fn execute(args: CompletionsArgs) -> crate::error::CliResult<()> {
    let mut cmd = Cli::command();
    let shell: clap_complete::Shell = args.shell.into();
    generate(shell, &mut cmd, "graft", &mut std::io::stdout());
    Ok(())
}
