mod args;
mod output;

use addrspec_lib::{Report, validate};
use anyhow::{Context, Result};

use std::io::{self, BufRead};

use args::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = cli.options()?;
    let mut rows: Vec<Report> = Vec::new();

    if cli.stdin {
        for line in io::stdin().lock().lines() {
            let email = line.context("read stdin")?;
            rows.push(validate(&email, &options));
        }
    } else if let Some(Commands::Validate { email }) = &cli.cmd {
        rows.push(validate(email, &options));
    } else {
        Cli::clap_command().print_help()?;
        println!();
        return Ok(());
    }

    output::write_reports(&rows, &cli)?;

    // exit codes: 0 all valid, 2 invalid addresses, 1 fatal
    if output::any_invalid(&rows) {
        std::process::exit(2);
    }
    Ok(())
}
