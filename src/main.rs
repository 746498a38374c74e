//! memprog - SPI NAND/NOR flash and serial EEPROM programmer
//!
//! CLI entry point.

use anyhow::Result;
use clap::Parser;
use log::info;

use memprog::cli::{self, Args};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    info!("memprog v{}", env!("CARGO_PKG_VERSION"));

    cli::execute(args)?;

    Ok(())
}
