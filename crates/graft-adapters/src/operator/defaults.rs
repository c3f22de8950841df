//! Non-interactive operator: every question takes its default.

use graft_core::{application::ports::OperatorChannel, error::GraftResult};
use tracing::info;

/// Answers every question with an empty string so the applier falls back to
/// the declared default. Messages still go to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsOperator;

impl DefaultsOperator {
    pub fn new() -> Self {
        Self
    }
}

impl OperatorChannel for DefaultsOperator {
    fn ask(&self, prompt: &str, default: Option<&str>) -> GraftResult<String> {
        info!(prompt, default = default.unwrap_or(""), "Taking default answer");
        Ok(String::new())
    }

    fn say(&self, text: &str) -> GraftResult<()> {
        println!("{text}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_are_blank() {
        let op = DefaultsOperator::new();
        assert_eq!(op.ask("Model?", Some("User")).unwrap(), "");
        assert_eq!(op.ask("Columns?", None).unwrap(), "");
    }
}
