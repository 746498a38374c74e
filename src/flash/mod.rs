//! Flash engines and the probe dispatcher.
//!
//! Every device family implements [`FlashEngine`]; the dispatcher probes in
//! the same order as the original tool (NOR first, NAND second, EEPROMs
//! only when explicitly selected) and hands back one boxed engine.

pub mod eeprom;
pub mod nand;
pub mod nor;

use crate::domain::{ProbeOptions, Progress};
use crate::error::{Error, Result};
use crate::programmer::Programmer;

/// Uniform three-operation interface every engine exposes.
pub trait FlashEngine {
    /// Display name of the detected chip.
    fn name(&self) -> &str;

    /// Effective device size in bytes (NAND inflates this when ECC checking
    /// is off and the OOB area is exposed).
    fn total_size(&self) -> u32;

    /// Smallest erasable unit; 1 for EEPROMs.
    fn erase_granularity(&self) -> u32;

    fn read(&mut self, addr: u32, len: u32, progress: &dyn Fn(Progress)) -> Result<Vec<u8>>;

    fn erase(&mut self, addr: u32, len: u32, progress: &dyn Fn(Progress)) -> Result<()>;

    /// Returns the number of bytes actually programmed (skip-bad NAND writes
    /// may drop pages).
    fn write(&mut self, addr: u32, data: &[u8], progress: &dyn Fn(Progress)) -> Result<usize>;
}

/// Probe the bus and build the matching engine.
pub fn detect(mut bus: Box<dyn Programmer>, opts: &ProbeOptions) -> Result<Box<dyn FlashEngine>> {
    if let Some(name) = &opts.eeprom {
        return eeprom::select(bus, name, opts);
    }

    if let Some(chip) = nor::identify(&mut bus)? {
        let size = chip.total_size();
        if size >= 1024 * 1024 {
            println!(
                "Detected SPI NOR Flash: {}, Flash Size: {} MB",
                chip.name,
                size >> 20
            );
        } else {
            println!(
                "Detected SPI NOR Flash: {}, Flash Size: {} KB",
                chip.name,
                size >> 10
            );
        }
        return Ok(Box::new(nor::SpiNor::new(bus, chip)));
    }

    if let Some(found) = nand::identify(&mut bus)? {
        let engine = nand::SpiNand::new(bus, found, opts.nand.clone())?;
        println!(
            "Detected SPI NAND Flash: {}, Flash Size: {} MB, OOB Size: {} B",
            engine.name(),
            engine.chip().device_size >> 20,
            engine.reported_oob()
        );
        return Ok(Box::new(engine));
    }

    Err(Error::ProbeFailed)
}

/// Print the support lists for every family.
pub fn print_support_lists() {
    nand::chips::print_list();
    println!();
    nor::chips::print_list();
    println!();
    eeprom::i2c_24cxx::print_list();
    println!();
    eeprom::microwire_93cxx::print_list();
    println!();
    eeprom::spi_25xx::print_list();
}
