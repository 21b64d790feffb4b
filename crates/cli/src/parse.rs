//! ArgMatches → action conversion.

use clap::ArgMatches;
use ghactions_core::Environment;
use ghactions_executor::Command;

/// What the user asked to run.
#[derive(Debug, PartialEq, Eq)]
pub struct CliAction {
    /// Action to execute
    pub command: Command,
    /// `-i NAME=VALUE` overrides, in order
    pub inputs: Vec<(String, String)>,
}

impl CliAction {
    /// Apply the input overrides on top of `env`.
    pub fn apply_inputs(&self, env: Environment) -> Environment {
        self.inputs
            .iter()
            .fold(env, |env, (name, value)| env.with_input(name, value.clone()))
    }
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    let command =
        Command::from_name(sub_name).ok_or_else(|| format!("Unknown command: {}", sub_name))?;

    // Global args are visible from the subcommand matches
    let inputs = sub_matches
        .get_many::<String>("input")
        .into_iter()
        .flatten()
        .map(|raw| parse_input(raw))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CliAction { command, inputs })
}

/// Split `NAME=VALUE`; the value may itself contain `=`.
pub fn parse_input(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("Invalid input '{}': expected NAME=VALUE", raw)),
    }
}
