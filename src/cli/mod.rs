//! Command-line front end for the `filtercalc` binary.

mod args;
mod commands;

pub use args::{BandpassArgs, Cli, Command, LadderArgs, OutputArgs};
pub use commands::{execute, run};
