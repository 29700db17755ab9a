//! CLI entry point for the photo mosaic builder

use clap::Parser;
use photomosaic::io::cli::{Cli, MosaicCommand};
use photomosaic::io::logging;

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();
    let level = logging::level_for(cli.verbose, cli.quiet);
    let mut command = MosaicCommand::new(cli);
    logging::init(level, command.progress_bar())?;
    command.run()?;
    Ok(())
}
