use std::process::ExitCode;

use log::error;

mod backend;
mod frontend;


fn main() -> ExitCode {
    env_logger::init();

    if let Err(error) = frontend::cli::cli() {
        error!("Experiment failed: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
