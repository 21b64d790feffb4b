//! ghactions CLI: run one GitHub Actions step.
//!
//! `ghactions <ACTION> [-i NAME=VALUE]...`
//!
//! Inputs, context and command files come from the runner environment.
//! Exit code is 0 on success and 1 on any error, which is reported as an
//! `::error::` line.

mod commands;
mod parse;

use std::process;

use ghactions_core::{logging, Environment};
use ghactions_executor::Executor;
use tracing::error;

use commands::build_cli;
use parse::matches_to_action;

fn main() {
    logging::init();

    let matches = build_cli().get_matches();
    let action = match matches_to_action(&matches) {
        Ok(action) => action,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start runtime: {}", e);
            process::exit(1);
        }
    };

    let env = action.apply_inputs(Environment::from_process());
    let executor = Executor::new(env);
    match runtime.block_on(executor.execute(action.command)) {
        Ok(_) => process::exit(0),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
