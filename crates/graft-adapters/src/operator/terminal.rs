//! Interactive operator on the controlling terminal.

use graft_core::{
    application::{ApplicationError, ports::OperatorChannel},
    error::GraftResult,
};

/// Prompts on stdin/stdout. Uses `dialoguer` when the `interactive` feature
/// is enabled, otherwise a plain line read.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalOperator;

impl TerminalOperator {
    pub fn new() -> Self {
        Self
    }
}

impl OperatorChannel for TerminalOperator {
    #[cfg(feature = "interactive")]
    fn ask(&self, prompt: &str, default: Option<&str>) -> GraftResult<String> {
        let mut input = dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(|e| {
            ApplicationError::OperatorError {
                reason: e.to_string(),
            }
            .into()
        })
    }

    #[cfg(not(feature = "interactive"))]
    fn ask(&self, prompt: &str, default: Option<&str>) -> GraftResult<String> {
        use std::io::{BufRead, Write};

        let mut stdout = std::io::stdout().lock();
        let shown = match default {
            Some(default) => format!("{prompt} [{default}] "),
            None => format!("{prompt} "),
        };
        stdout
            .write_all(shown.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(operator_error)?;

        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(operator_error)?;
        Ok(line)
    }

    fn say(&self, text: &str) -> GraftResult<()> {
        println!("{text}");
        Ok(())
    }
}

#[cfg(not(feature = "interactive"))]
fn operator_error(e: std::io::Error) -> graft_core::error::GraftError {
    ApplicationError::OperatorError {
        reason: e.to_string(),
    }
    .into()
}
