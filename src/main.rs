mod commands;

use clap::Parser;
use std::env;

use commands::run::RunArgs;

#[derive(Parser, Debug)]
#[command(name = "bf-tape", disable_help_flag = true)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

fn main() {
    // We still pull the program name for help rendering consistency
    let program = env::args().next().unwrap_or_else(|| String::from("bf-tape"));

    let cli = Cli::parse();

    let code = commands::run::run(&program, cli.run);

    std::process::exit(code);
}
