//! Operator answers and `{{placeholder}}` substitution.

use std::collections::HashMap;

/// Answers collected during a run, keyed by the question's `key`.
///
/// Every stored answer also derives two variants so recipes can follow
/// framework naming conventions without extra questions:
///
/// | placeholder         | "AdminUser"   |
/// |---------------------|---------------|
/// | `{{model}}`         | `AdminUser`   |
/// | `{{model_snake}}`   | `admin_user`  |
/// | `{{model_plural}}`  | `AdminUsers`  |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    variables: HashMap<String, String>,
}

/// Suffixes of the derived variables, see [`Answers::set`].
pub const DERIVED_SUFFIXES: [&str; 2] = ["_snake", "_plural"];

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` to `key` together with its derived variants.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        self.variables
            .insert(format!("{key}_snake"), to_snake_case(&value));
        self.variables
            .insert(format!("{key}_plural"), pluralize(&value));
        self.variables.insert(key, value);
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// `true` when `key` holds a non-blank answer.
    pub fn is_answered(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.trim().is_empty())
    }

    /// Replace every `{{key}}` whose key is known. Unknown placeholders are
    /// left as-is so literal `{{...}}` in file content survives.
    pub fn render(&self, template: &str) -> String {
        if !template.contains("{{") {
            return template.to_string();
        }

        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let name = after[..end].trim();
                    match self.variables.get(name) {
                        Some(value) if is_identifier(name) => out.push_str(value),
                        _ => out.push_str(&rest[start..start + 2 + end + 2]),
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Identifier-like placeholder names referenced by `template`, in order of
/// appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else { break };
        let name = after[..end].trim();
        if is_identifier(name) {
            names.push(name.to_string());
        }
        rest = &after[end + 2..];
    }
    names
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Convert a string to snake_case.
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Naive English plural of the last word, preserving the rest verbatim.
///
/// | Input      | Output      |
/// |------------|-------------|
/// | "User"     | "Users"     |
/// | "Category" | "Categories"|
/// | "Box"      | "Boxes"     |
/// | "Day"      | "Days"      |
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_ascii_lowercase();

    if lower.ends_with('y') {
        let before_y = lower.chars().rev().nth(1);
        if before_y.is_some_and(|c| !"aeiou".contains(c)) {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return format!("{word}es");
    }
    format!("{word}s")
}

/// Split a string into lowercase words on separators, camelCase transitions
/// and acronym boundaries.
///
/// - `admin_user`, `admin-user`, `admin user`
/// - `AdminUser`, `adminUser`
/// - `HTTPClient` (acronyms)
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            // "adminUser" → "admin" + "User"
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            // "HTTPClient" → "HTTP" + "Client"
            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
