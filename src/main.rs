use benefit_inputs::dmn::DmnError;
use benefit_inputs::services::output::print_error;
use benefit_inputs::services::storage::load_config;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod commands;

use cli::Cli;
use commands::{handle_check_commands, handle_pipeline_commands};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("benefit_inputs=warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    let config = load_config(cli.config.as_deref())?;
    if let Some(ok) = handle_pipeline_commands(cli, &config)? {
        return Ok(ok);
    }
    if let Some(ok) = handle_check_commands(cli)? {
        return Ok(ok);
    }
    anyhow::bail!("unhandled command")
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            let code = err
                .chain()
                .find_map(|e| e.downcast_ref::<DmnError>())
                .map_or("ERROR", DmnError::code);
            print_error(cli.json, code, &format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
