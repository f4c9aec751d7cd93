//! # EOD Blast Calculator CLI
//!
//! Terminal front end for the blast-effect engine. Dimensions come from
//! `--length/--width/--height` or, when omitted, from interactive prompts.
//!
//! ```text
//! calc_cli --length 50 --width 40 --height 30
//! calc_cli --json --catalog my_catalog.toml
//! calc_cli -l 50 -w 40 -H 30 --save ./reports
//! ```
//!
//! Results go to stdout. Prompts and logs go to stderr; set
//! `RUST_LOG=debug` for file and catalog details.

mod app;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use app::Args;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    let mut prompts = io::stderr();

    match app::run(&args, &mut input, &mut out, &mut prompts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            if e.is_input_error() {
                eprintln!();
                eprintln!("Please enter all three dimensions as positive numbers in centimeters.");
            }
            ExitCode::FAILURE
        }
    }
}
