//! Scripted operator for tests.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use graft_core::{
    application::{ApplicationError, ports::OperatorChannel},
    error::GraftResult,
};

#[derive(Debug, Default)]
struct Script {
    answers: VecDeque<String>,
    prompts: Vec<String>,
    messages: Vec<String>,
}

/// Replays canned answers in order and records every prompt and message.
/// Once the answers run out, questions get a blank answer.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOperator {
    script: Arc<Mutex<Script>>,
}

impl ScriptedOperator {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let script = Script {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Script::default()
        };
        Self {
            script: Arc::new(Mutex::new(script)),
        }
    }

    /// Prompts asked so far.
    pub fn prompts(&self) -> Vec<String> {
        self.script
            .lock()
            .map(|s| s.prompts.clone())
            .unwrap_or_default()
    }

    /// Messages shown so far.
    pub fn messages(&self) -> Vec<String> {
        self.script
            .lock()
            .map(|s| s.messages.clone())
            .unwrap_or_default()
    }
}

impl OperatorChannel for ScriptedOperator {
    fn ask(&self, prompt: &str, _default: Option<&str>) -> GraftResult<String> {
        let mut script = self
            .script
            .lock()
            .map_err(|_| ApplicationError::OperatorError {
                reason: "script lock poisoned".into(),
            })?;
        script.prompts.push(prompt.to_string());
        Ok(script.answers.pop_front().unwrap_or_default())
    }

    fn say(&self, text: &str) -> GraftResult<()> {
        let mut script = self
            .script
            .lock()
            .map_err(|_| ApplicationError::OperatorError {
                reason: "script lock poisoned".into(),
            })?;
        script.messages.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_answers_then_blanks() {
        let op = ScriptedOperator::new(["Admin"]);
        assert_eq!(op.ask("Model?", Some("User")).unwrap(), "Admin");
        assert_eq!(op.ask("Columns?", None).unwrap(), "");
        op.say("done").unwrap();

        assert_eq!(op.prompts(), vec!["Model?", "Columns?"]);
        assert_eq!(op.messages(), vec!["done"]);
    }
}
