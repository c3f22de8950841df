//! Recipe aggregate: a named, ordered list of directives.
//!
//! ## Invariants (enforced by `validate()`)
//!
//! 1. `name` is non-empty
//! 2. at least one directive
//! 3. answer keys are non-empty and unique across the whole recipe
//! 4. every `{{placeholder}}` refers to a key asked by an *earlier* directive
//!    (or one of its `_snake` / `_plural` variants). File bodies are exempt:
//!    unknown placeholders in `create_file` content or injected text are
//!    written as-is
//! 5. injection anchors and dependency/generator/task names are non-empty
//!
//! Order is significant and never changed: later directives rely on the
//! filesystem effects and answers of earlier ones.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::answers::DERIVED_SUFFIXES;
use super::directive::Directive;
use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Root against which relative `CopyDirectory` sources are resolved.
    /// `None` means the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<PathBuf>,
    pub directives: Vec<Directive>,
}

impl Recipe {
    pub fn builder(name: impl Into<String>) -> RecipeBuilder {
        RecipeBuilder {
            name: name.into(),
            description: String::new(),
            assets: None,
            directives: Vec::new(),
        }
    }

    /// Number of directives including those nested in `WhenAnswered`.
    pub fn directive_count(&self) -> usize {
        fn count(directives: &[Directive]) -> usize {
            directives
                .iter()
                .map(|d| match d {
                    Directive::WhenAnswered { directives, .. } => 1 + count(directives),
                    _ => 1,
                })
                .sum()
        }
        count(&self.directives)
    }

    /// Flattened, numbered plan lines (1-based), indented for nested branches.
    pub fn plan(&self) -> Vec<String> {
        fn walk(directives: &[Directive], depth: usize, step: &mut usize, out: &mut Vec<String>) {
            for directive in directives {
                *step += 1;
                out.push(format!("{:>3}. {}{}", step, "  ".repeat(depth), directive));
                if let Directive::WhenAnswered { directives, .. } = directive {
                    walk(directives, depth + 1, step, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.directives, 0, &mut 0, &mut out);
        out
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidRecipe("name cannot be empty".into()));
        }
        if self.directives.is_empty() {
            return Err(DomainError::EmptyRecipe {
                name: self.name.clone(),
            });
        }

        let mut declared = HashSet::new();
        let mut step = 0;
        validate_sequence(&self.directives, &mut declared, &mut step)
    }
}

fn validate_sequence<'a>(
    directives: &'a [Directive],
    declared: &mut HashSet<&'a str>,
    step: &mut usize,
) -> Result<(), DomainError> {
    for directive in directives {
        *step += 1;

        for key in directive.placeholders() {
            if !is_declared(&key, declared) {
                return Err(DomainError::UndeclaredAnswer { key, step: *step });
            }
        }

        match directive {
            Directive::AskQuestion { key, .. } => {
                if key.trim().is_empty() {
                    return Err(DomainError::EmptyField {
                        field: "answer key",
                        step: *step,
                    });
                }
                if !declared.insert(key.as_str()) {
                    return Err(DomainError::DuplicateAnswerKey { key: key.clone() });
                }
            }
            Directive::InjectText { anchor, .. } if anchor.is_empty() => {
                return Err(DomainError::EmptyField {
                    field: "anchor",
                    step: *step,
                });
            }
            Directive::InstallDependency { name, .. } if name.trim().is_empty() => {
                return Err(DomainError::EmptyField {
                    field: "dependency name",
                    step: *step,
                });
            }
            Directive::RunGenerator { generator, .. } if generator.trim().is_empty() => {
                return Err(DomainError::EmptyField {
                    field: "generator",
                    step: *step,
                });
            }
            Directive::RunTask { task } if task.trim().is_empty() => {
                return Err(DomainError::EmptyField {
                    field: "task",
                    step: *step,
                });
            }
            Directive::WhenAnswered { key, directives } => {
                if !declared.contains(key.as_str()) {
                    return Err(DomainError::UndeclaredAnswer {
                        key: key.clone(),
                        step: *step,
                    });
                }
                validate_sequence(directives, declared, step)?;
            }
            _ => {}
        }
    }
    Ok(())
}

fn is_declared(name: &str, declared: &HashSet<&str>) -> bool {
    declared.contains(name)
        || DERIVED_SUFFIXES.iter().any(|suffix| {
            name.strip_suffix(suffix)
                .is_some_and(|base| declared.contains(base))
        })
}

/// Fluent builder; `build()` validates.
#[derive(Debug, Clone)]
pub struct RecipeBuilder {
    name: String,
    description: String,
    assets: Option<PathBuf>,
    directives: Vec<Directive>,
}

impl RecipeBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn assets(mut self, assets: impl Into<PathBuf>) -> Self {
        self.assets = Some(assets.into());
        self
    }

    pub fn directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn directives(mut self, directives: impl IntoIterator<Item = Directive>) -> Self {
        self.directives.extend(directives);
        self
    }

    pub fn build(self) -> Result<Recipe, DomainError> {
        let recipe = Recipe {
            name: self.name,
            description: self.description,
            assets: self.assets,
            directives: self.directives,
        };
        recipe.validate()?;
        Ok(recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::InjectPosition;

    fn ask_model() -> Directive {
        Directive::ask("model", "Model name?", Some("User"))
    }

    #[test]
    fn builder_accepts_placeholders_after_question() {
        let recipe = Recipe::builder("devise")
            .directive(ask_model())
            .directive(Directive::generate("devise", ["{{model}}"]))
            .directive(Directive::generate("migration", ["AddTo{{model_plural}}"]))
            .build();
        assert!(recipe.is_ok());
    }

    #[test]
    fn placeholder_before_question_is_rejected() {
        let err = Recipe::builder("devise")
            .directive(Directive::generate("devise", ["{{model}}"]))
            .directive(ask_model())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::UndeclaredAnswer {
                key: "model".into(),
                step: 1
            }
        );
    }

    #[test]
    fn unknown_placeholders_in_file_bodies_are_literal() {
        let recipe = Recipe::builder("vue")
            .directive(Directive::create_file(
                "app/frontend/Hello.vue",
                "<template><p>{{ message }}</p></template>\n",
                false,
            ))
            .directive(Directive::inject(
                "app/frontend/Hello.vue",
                "<p>",
                InjectPosition::Before,
                "<h1>{{ title }}</h1>",
            ))
            .build();
        assert!(recipe.is_ok());
    }

    #[test]
    fn empty_recipe_is_rejected() {
        assert!(matches!(
            Recipe::builder("nothing").build(),
            Err(DomainError::EmptyRecipe { .. })
        ));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let result = Recipe::builder("dup")
            .directive(ask_model())
            .directive(ask_model())
            .build();
        assert!(matches!(result, Err(DomainError::DuplicateAnswerKey { .. })));
    }

    #[test]
    fn empty_anchor_is_rejected() {
        let result = Recipe::builder("inject")
            .directive(Directive::inject("a.rb", "", InjectPosition::After, "x"))
            .build();
        assert!(matches!(
            result,
            Err(DomainError::EmptyField { field: "anchor", .. })
        ));
    }

    #[test]
    fn when_answered_requires_declared_key() {
        let result = Recipe::builder("cond")
            .directive(Directive::when_answered("columns", vec![Directive::task("db:migrate")]))
            .build();
        assert!(matches!(result, Err(DomainError::UndeclaredAnswer { .. })));
    }

    #[test]
    fn nested_questions_are_visible_afterwards() {
        let recipe = Recipe::builder("nested")
            .directive(ask_model())
            .directive(Directive::when_answered(
                "model",
                vec![Directive::ask("admin", "Admin?", None)],
            ))
            .directive(Directive::say("admin = {{admin}}"))
            .build()
            .unwrap();
        assert_eq!(recipe.directive_count(), 4);
    }

    #[test]
    fn plan_numbers_nested_directives() {
        let recipe = Recipe::builder("plan")
            .directive(ask_model())
            .directive(Directive::when_answered(
                "model",
                vec![Directive::task("db:migrate")],
            ))
            .build()
            .unwrap();
        let plan = recipe.plan();
        assert_eq!(plan.len(), 3);
        assert!(plan[2].starts_with("  3.   task db:migrate"));
    }
}
