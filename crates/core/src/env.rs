//! Runner environment snapshot
//!
//! The runner passes action inputs as `INPUT_<NAME>` variables and the
//! workflow context as `GITHUB_*` variables. [`Environment`] captures them
//! once so that everything downstream works from an explicit value rather
//! than from process globals.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Immutable snapshot of environment variables
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Snapshot the current process environment
    pub fn from_process() -> Self {
        Self::from_pairs(std::env::vars())
    }

    /// Build from explicit pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Environment {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Return a copy with one variable set
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Return a copy with one action input set
    pub fn with_input(self, name: &str, value: impl Into<String>) -> Self {
        self.with_var(input_key(name), value)
    }

    /// Raw variable; empty values count as unset
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Action input, trimmed
    ///
    /// `github-token` and `github_token` are interchangeable: when the
    /// requested spelling is empty the other one is tried.
    pub fn input(&self, name: &str) -> Option<&str> {
        self.raw_input(name).or_else(|| {
            let swapped = if name.contains('-') {
                name.replace('-', "_")
            } else {
                name.replace('_', "-")
            };
            if swapped == name {
                None
            } else {
                self.raw_input(&swapped)
            }
        })
    }

    /// Action input, or `MissingInput`
    pub fn required_input(&self, name: &str) -> Result<&str> {
        self.input(name)
            .ok_or_else(|| Error::MissingInput(name.to_string()))
    }

    /// Boolean action input: `true` or `1`, case-insensitive
    pub fn bool_input(&self, name: &str) -> bool {
        self.input(name)
            .map(|v| matches!(v.to_ascii_uppercase().as_str(), "TRUE" | "1"))
            .unwrap_or(false)
    }

    fn raw_input(&self, name: &str) -> Option<&str> {
        self.vars
            .get(&input_key(name))
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Variable name the runner uses for an input
fn input_key(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_uses_runner_naming() {
        let env = Environment::from_pairs([("INPUT_POLL-INTERVAL", " 10 ")]);
        assert_eq!(env.input("poll-interval"), Some("10"));
    }

    #[test]
    fn test_input_dash_underscore_fallback() {
        let env = Environment::from_pairs([("INPUT_GITHUB_TOKEN", "t1")]);
        assert_eq!(env.input("github-token"), Some("t1"));

        let env = Environment::from_pairs([("INPUT_ISSUE-NUMBER", "7")]);
        assert_eq!(env.input("issue_number"), Some("7"));
    }

    #[test]
    fn test_requested_spelling_wins() {
        let env = Environment::from_pairs([
            ("INPUT_GITHUB-TOKEN", "dash"),
            ("INPUT_GITHUB_TOKEN", "underscore"),
        ]);
        assert_eq!(env.input("github-token"), Some("dash"));
        assert_eq!(env.input("github_token"), Some("underscore"));
    }

    #[test]
    fn test_empty_input_is_absent() {
        let env = Environment::from_pairs([("INPUT_LABELS", "  ")]);
        assert_eq!(env.input("labels"), None);
        assert!(matches!(
            env.required_input("labels"),
            Err(Error::MissingInput(name)) if name == "labels"
        ));
    }

    #[test]
    fn test_bool_input() {
        let env = Environment::default()
            .with_input("a", "TRUE")
            .with_input("b", "1")
            .with_input("c", "true")
            .with_input("d", "yes");
        assert!(env.bool_input("a"));
        assert!(env.bool_input("b"));
        assert!(env.bool_input("c"));
        assert!(!env.bool_input("d"));
        assert!(!env.bool_input("missing"));
    }
}
