//! Recipe store adapters.

mod memory;

pub use memory::InMemoryRecipeStore;
