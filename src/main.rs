use anyhow::Result;
use clap::Parser;

use sigscan::Cli;

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version go to stdout and exit 0
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            // Usage errors exit with 1, not clap's default 2
            e.print()?;
            std::process::exit(1);
        }
    };
    cli.run()
}
