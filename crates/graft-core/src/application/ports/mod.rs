//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `graft-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `OperatorChannel`: Questions and messages for the operator
//!   - `CommandRunner`: Installer, generator and task delegation
//!   - `RecipeStore`: Recipe storage/retrieval
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{CommandRunner, Filesystem, OperatorChannel, RecipeStore};

#[cfg(test)]
pub use output::MockCommandRunner;
