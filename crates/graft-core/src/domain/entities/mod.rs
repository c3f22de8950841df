pub mod answers;
pub mod common;
pub mod directive;
pub mod recipe;

pub use crate::domain::DomainError;
pub use answers::Answers;
pub use directive::Directive;
pub use recipe::{Recipe, RecipeBuilder};
