//! filtercalc - LC filter component calculator
//!
//! Computes component values for low-pass, high-pass and coupled-resonator
//! band-pass LC filters.
//!
//! # Usage
//!
//! ```bash
//! filtercalc lowpass butterworth pi 10MHz -n 5
//! filtercalc hp ch t 3.5MHz -r 0.1 --plot
//! filtercalc bp bw top -f 14.175MHz -b 350kHz -n 3 --format json
//! filtercalc wizard
//! ```
//!
//! Advisory warnings go to stderr through `env_logger`; set `RUST_LOG=debug`
//! to also see the computed prototypes.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use env_logger::Env;
use lc_filter_core::cli::{run, Cli};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    let code = run(
        cli.command,
        &mut stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    );
    let _ = io::stdout().flush();
    process::exit(code);
}
