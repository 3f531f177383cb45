use clap::Parser;
use weather_charts::cli::{run, Cli};
use weather_charts::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
