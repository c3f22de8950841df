//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "apply a recipe" or "list recipes".

pub mod applier;
pub mod recipe_service;

pub use applier::TemplateApplier;
pub use recipe_service::{RecipeInfo, RecipeService};
