//! `clean-metagraph`: report the operation records of a metagraph store
//! that no checkpoint needs.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    support::init_tracing(&cli.log_level);
    commands::collect::run(cli.store_root, cli.json);
}
