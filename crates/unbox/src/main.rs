use clap::Parser;

use crate::cli::{App, Commands};

mod cli;
mod logging;

fn main() -> anyhow::Result<()> {
    let app = App::parse();

    logging::init(app.verbose)?;

    match app.cmd {
        Commands::Extract(arg) => arg.run(),
        Commands::VerifyHash(arg) => arg.run(),
        Commands::VerifyCrc(arg) => arg.run(),
        Commands::Remove(arg) => arg.run(),
    }
}
