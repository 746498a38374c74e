//! Hardware programmer abstraction.
//!
//! The [`Programmer`] trait is the seam every flash engine consumes: a
//! chip-select line plus full-duplex SPI bursts, with raw command-stream
//! access for the two engines that bypass SPI (I2C EEPROM, Microwire
//! bitbang). The CH341A session implements it against real hardware; the
//! mock and simulator implement it for tests.

pub mod ch341a;
pub mod simulator;

#[cfg(test)]
pub mod mock;

pub use ch341a::Ch341a;

use crate::error::{Error, Result};

pub trait Programmer {
    /// Identification name of the programmer.
    fn name(&self) -> &str;

    /// Drive the chip-select line. `true` asserts (active low on the wire).
    fn chip_select(&mut self, assert: bool) -> Result<()>;

    /// Clock `tx` out, then clock `read_len` filler bytes and return what
    /// the chip answered during them.
    fn transfer(&mut self, tx: &[u8], read_len: usize) -> Result<Vec<u8>>;

    /// Write-only SPI burst.
    fn write(&mut self, tx: &[u8]) -> Result<()> {
        self.transfer(tx, 0).map(|_| ())
    }

    /// Single-byte write.
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write(&[byte])
    }

    /// Read-only SPI burst.
    fn read(&mut self, len: usize) -> Result<Vec<u8>> {
        self.transfer(&[], len)
    }

    /// Send a pre-built bridge command stream (UIO / I2C) and read back
    /// `read_len` raw bytes. Only bridge-specific engines use this.
    fn raw_stream(&mut self, _cmd: &[u8], _read_len: usize) -> Result<Vec<u8>> {
        Err(Error::NotSupported(
            "raw command streams not available on this programmer".into(),
        ))
    }
}

impl Programmer for Box<dyn Programmer> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn chip_select(&mut self, assert: bool) -> Result<()> {
        self.as_mut().chip_select(assert)
    }

    fn transfer(&mut self, tx: &[u8], read_len: usize) -> Result<Vec<u8>> {
        self.as_mut().transfer(tx, read_len)
    }

    fn write(&mut self, tx: &[u8]) -> Result<()> {
        self.as_mut().write(tx)
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.as_mut().write_byte(byte)
    }

    fn read(&mut self, len: usize) -> Result<Vec<u8>> {
        self.as_mut().read(len)
    }

    fn raw_stream(&mut self, cmd: &[u8], read_len: usize) -> Result<Vec<u8>> {
        self.as_mut().raw_stream(cmd, read_len)
    }
}

/// Find and open the CH341A.
pub fn discover() -> Result<Ch341a> {
    Ch341a::open()
}
