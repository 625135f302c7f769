//! CLI entry point for eddy track analysis and rotary spectra

use clap::Parser;
use eddytracks::io::cli::{Cli, Runner};
use eddytracks::io::logging;

fn main() -> eddytracks::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    Runner::new(cli).run()
}
