//! I2C EEPROM (24Cxx series) engine.
//!
//! Reads go through the bridge's I2C command stream: device address with
//! the bank bits folded in, data address, repeated start, then IN chunks of
//! at most 32 bytes. The write path is deliberately unsupported: the
//! original tool shipped a stub that reported success without touching the
//! chip, so there is no known-good wire sequence to reproduce.

use log::info;

use crate::domain::{I2cEepromChip, Progress};
use crate::error::{Error, Result};
use crate::flash::FlashEngine;
use crate::programmer::ch341a::protocol::{build_clock_cmd, i2c, CMD_I2C_STREAM};
use crate::programmer::Programmer;

/// 24Cxx base device address (A0..A2 straps low).
const DEVICE_ADDR: u8 = 0xA0;

/// Largest IN chunk one stream command carries.
const READ_CHUNK: u32 = 32;

/// 100 kHz stream clock for I2C.
const I2C_SPEED_100K: u8 = 1;

pub const CHIPS: &[I2cEepromChip] = &[
    I2cEepromChip { name: "24c01", size: 128, addr_bytes: 1, bank_mask: 0x00 },
    I2cEepromChip { name: "24c02", size: 256, addr_bytes: 1, bank_mask: 0x00 },
    I2cEepromChip { name: "24c04", size: 512, addr_bytes: 1, bank_mask: 0x01 },
    I2cEepromChip { name: "24c08", size: 1024, addr_bytes: 1, bank_mask: 0x03 },
    I2cEepromChip { name: "24c16", size: 2048, addr_bytes: 1, bank_mask: 0x07 },
    I2cEepromChip { name: "24c32", size: 4096, addr_bytes: 2, bank_mask: 0x00 },
    I2cEepromChip { name: "24c64", size: 8192, addr_bytes: 2, bank_mask: 0x00 },
    I2cEepromChip { name: "24c128", size: 16384, addr_bytes: 2, bank_mask: 0x00 },
    I2cEepromChip { name: "24c256", size: 32768, addr_bytes: 2, bank_mask: 0x00 },
    I2cEepromChip { name: "24c512", size: 65536, addr_bytes: 2, bank_mask: 0x00 },
    I2cEepromChip { name: "24c1024", size: 131072, addr_bytes: 2, bank_mask: 0x01 },
];

pub fn find(name: &str) -> Option<&'static I2cEepromChip> {
    CHIPS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

pub fn print_list() {
    println!("I2C EEPROM Support List:");
    for (i, chip) in CHIPS.iter().enumerate() {
        println!("{:03}. {}", i + 1, chip.name);
    }
}

pub struct I2cEeprom<P: Programmer> {
    bus: P,
    chip: &'static I2cEepromChip,
}

impl<P: Programmer> I2cEeprom<P> {
    pub fn new(mut bus: P, chip: &'static I2cEepromChip) -> Result<Self> {
        bus.raw_stream(&build_clock_cmd(I2C_SPEED_100K), 0)?;
        info!("I2C EEPROM chip: {}, Size: {} bytes", chip.name, chip.size);
        Ok(Self { bus, chip })
    }

    /// Device address byte with the bank bits for `addr` folded in.
    fn device_addr(&self, addr: u32) -> u8 {
        let bank = if self.chip.addr_bytes == 1 {
            (addr >> 8) as u8 & self.chip.bank_mask
        } else {
            (addr >> 16) as u8 & self.chip.bank_mask
        };
        DEVICE_ADDR | (bank << 1)
    }

    /// Random-address read of one chunk: set the data address with a write
    /// transfer, repeated start, read out.
    fn read_chunk(&mut self, addr: u32, len: u32) -> Result<Vec<u8>> {
        let dev = self.device_addr(addr);
        let mut cmd = Vec::with_capacity(16);
        cmd.push(CMD_I2C_STREAM);
        cmd.push(i2c::STM_START);
        cmd.push(i2c::STM_OUT | (1 + self.chip.addr_bytes));
        cmd.push(dev);
        if self.chip.addr_bytes == 2 {
            cmd.push((addr >> 8) as u8);
        }
        cmd.push(addr as u8);
        cmd.push(i2c::STM_START);
        cmd.push(i2c::STM_OUT | 1);
        cmd.push(dev | 1);
        cmd.push(i2c::STM_IN | len as u8);
        cmd.push(i2c::STM_STOP);
        cmd.push(i2c::STM_END);

        self.bus.raw_stream(&cmd, len as usize)
    }
}

impl<P: Programmer> FlashEngine for I2cEeprom<P> {
    fn name(&self) -> &str {
        self.chip.name
    }

    fn total_size(&self) -> u32 {
        self.chip.size
    }

    fn erase_granularity(&self) -> u32 {
        1
    }

    fn read(&mut self, addr: u32, len: u32, progress: &dyn Fn(Progress)) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(len as usize);
        while (out.len() as u32) < len {
            let a = addr + out.len() as u32;
            let chunk = READ_CHUNK.min(len - out.len() as u32);
            out.extend(self.read_chunk(a, chunk)?);
            progress(Progress::new(out.len() as u64, len as u64));
        }
        Ok(out)
    }

    fn erase(&mut self, _addr: u32, _len: u32, _progress: &dyn Fn(Progress)) -> Result<()> {
        Err(Error::NotSupported(
            "I2C EEPROM erase is a write, and the 24Cxx write path is not implemented".into(),
        ))
    }

    fn write(&mut self, _addr: u32, _data: &[u8], _progress: &dyn Fn(Progress)) -> Result<usize> {
        Err(Error::NotSupported(
            "I2C EEPROM write is not implemented (no verified wire sequence)".into(),
        ))
    }
}
