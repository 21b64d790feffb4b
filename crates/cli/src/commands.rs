//! Clap command tree.
//!
//! One subcommand per action. Inputs normally come from the `INPUT_*`
//! variables the runner sets; `-i NAME=VALUE` overrides them for local runs.

use clap::{Arg, ArgAction, Command};
use ghactions_executor::Command as Action;

/// Build the top-level CLI.
pub fn build_cli() -> Command {
    let mut cli = Command::new("ghactions")
        .about("Run a GitHub Actions step")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("NAME=VALUE")
                .help("Set an action input, overriding INPUT_<NAME>")
                .action(ArgAction::Append)
                .global(true),
        );

    for action in Action::ALL {
        cli = cli.subcommand(Command::new(action.name()).about(action.about()));
    }
    cli
}
