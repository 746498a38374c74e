//! Serial EEPROM engines: SPI 25xxx, I2C 24Cxx and Microwire 93Cxx.
//!
//! All three are selected by chip name, never probed; the lists are tried
//! in the same order as the original tool (I2C, Microwire, SPI).

pub mod i2c_24cxx;
pub mod microwire_93cxx;
pub mod spi_25xx;

use crate::domain::ProbeOptions;
use crate::error::{Error, Result};
use crate::flash::FlashEngine;
use crate::programmer::Programmer;

/// Build the engine for a named EEPROM chip.
pub fn select(
    bus: Box<dyn Programmer>,
    name: &str,
    opts: &ProbeOptions,
) -> Result<Box<dyn FlashEngine>> {
    if let Some(chip) = i2c_24cxx::find(name) {
        return Ok(Box::new(i2c_24cxx::I2cEeprom::new(bus, chip)?));
    }
    if let Some(chip) = microwire_93cxx::find(name) {
        return Ok(Box::new(microwire_93cxx::MicrowireEeprom::new(
            bus,
            chip,
            opts.microwire,
        )?));
    }
    if let Some(chip) = spi_25xx::find(name) {
        return Ok(Box::new(spi_25xx::SpiEeprom::new(bus, chip, opts.spage_size)));
    }
    Err(Error::InvalidParameter(format!("Unknown EEPROM chip {name}")))
}
