use std::process::ExitCode;

use clap::Parser;

use redpen_cli::cli_args::Args;
use redpen_cli::commands;

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    match commands::execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
