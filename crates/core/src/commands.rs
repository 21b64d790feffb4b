//! Runner file commands and workflow commands
//!
//! Outputs and path entries go to the files the runner names in
//! `GITHUB_OUTPUT` and `GITHUB_PATH`. Masks are a `::command::` line on
//! stdout.
//!
//! ## File format
//!
//! ```text
//! name<<ghadelimiter_<uuid>
//! value
//! ghadelimiter_<uuid>
//! ```
//!
//! The heredoc form is used for every value so multi-line values need no
//! special casing.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use uuid::Uuid;

use crate::env::Environment;
use crate::error::{Error, Result};

/// Writes action results back to the runner
#[derive(Debug, Clone, Default)]
pub struct ActionRunner {
    output_file: Option<PathBuf>,
    path_file: Option<PathBuf>,
}

impl ActionRunner {
    /// Resolve the command files from the runner environment
    pub fn from_env(env: &Environment) -> Self {
        ActionRunner {
            output_file: env.var("GITHUB_OUTPUT").map(PathBuf::from),
            path_file: env.var("GITHUB_PATH").map(PathBuf::from),
        }
    }

    /// Set a step output
    pub fn set_output(&self, name: &str, value: &str) -> Result<()> {
        match &self.output_file {
            Some(path) => append(path, &key_value_message(name, value)?),
            None => {
                println!(
                    "{}",
                    issue_command("set-output", &[("name", name)], value)
                );
                Ok(())
            }
        }
    }

    /// Set a step output from a JSON value
    pub fn set_output_value(&self, name: &str, value: &Value) -> Result<()> {
        self.set_output(name, &to_command_value(value))
    }

    /// Prepend a directory to `PATH` for the following steps
    pub fn add_path(&self, dir: &Path) -> Result<()> {
        let dir = dir.to_string_lossy();
        match &self.path_file {
            Some(path) => append(path, &format!("{}\n", dir)),
            None => {
                println!("{}", issue_command("add-path", &[], &dir));
                Ok(())
            }
        }
    }

    /// Mask a value in the job log
    pub fn set_secret(&self, value: &str) {
        println!("{}", issue_command("add-mask", &[], value));
    }
}

fn append(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Heredoc entry for a runner command file
fn key_value_message(name: &str, value: &str) -> Result<String> {
    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
    if name.contains(&delimiter) {
        return Err(Error::Internal(format!(
            "name should not contain the delimiter {}",
            delimiter
        )));
    }
    if value.contains(&delimiter) {
        return Err(Error::Internal(format!(
            "value should not contain the delimiter {}",
            delimiter
        )));
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}

/// String form of a value as the runner expects it
///
/// Strings pass through, null becomes empty, anything else is JSON.
pub fn to_command_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Format a `::command prop=value::message` line
pub fn issue_command(command: &str, properties: &[(&str, &str)], message: &str) -> String {
    let mut line = format!("::{}", command);
    if !properties.is_empty() {
        let props: Vec<String> = properties
            .iter()
            .map(|(k, v)| format!("{}={}", k, escape_property(v)))
            .collect();
        line.push(' ');
        line.push_str(&props.join(","));
    }
    line.push_str("::");
    line.push_str(&escape_data(message));
    line
}

/// Escape the message part of a workflow command
pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a property value of a workflow command
pub fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
