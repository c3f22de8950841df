//! Operator channel adapters.

mod defaults;
mod scripted;
mod terminal;

pub use defaults::DefaultsOperator;
pub use scripted::ScriptedOperator;
pub use terminal::TerminalOperator;
