mod app;
mod config;
mod fire;
mod grid;
mod mapper;
mod palette;
mod poll;
mod render;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = config::Cli::parse();
    app::run(cli.into()).await
}
