//! Entry point for remoteplay.
use std::{env, io, process};

use remoteplay::{
    cli::{parse_error_exit_code, parse_launch_args, run_launch},
    commands::EXTERNAL_COMMANDS,
    lib::{errors::VALIDATION_FAILURE_EXIT_CODE, telemetry},
    runner::FrontendRunner,
    settings::FileSettingsStore,
};

fn main() {
    process::exit(bootstrap());
}

fn bootstrap() -> i32 {
    if let Err(err) = telemetry::init_tracing() {
        eprintln!("{err:?}");
        return VALIDATION_FAILURE_EXIT_CODE;
    }

    let args = match parse_launch_args(env::args_os(), EXTERNAL_COMMANDS) {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return parse_error_exit_code(&err);
        }
    };

    let store = match FileSettingsStore::from_env_or_default() {
        Ok(store) => store,
        Err(err) => {
            eprintln!("{err}");
            return VALIDATION_FAILURE_EXIT_CODE;
        }
    };
    let mut runner = FrontendRunner::from_env();

    run_launch(
        args,
        &store,
        &mut runner,
        EXTERNAL_COMMANDS,
        &mut io::stdout(),
        &mut io::stderr(),
    )
}
