//! Pixel Matrix - command-line tool for rendering and painting pixel grids

use std::process::ExitCode;

use pixel_matrix::cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    cli::run()
}
