//! SPI NOR flash engine.
//!
//! JEDEC probe against the chip table, 3- or 4-byte addressing, status
//! polling with per-operation budgets, sector/chip erase, sector-chunked
//! reads and 256-byte page programming.

pub mod chips;

#[cfg(test)]
mod tests;

use std::thread;
use std::time::Duration;

use log::{debug, trace, warn};

use crate::domain::{NorChip, Progress};
use crate::error::{Error, Result};
use crate::flash::FlashEngine;
use crate::programmer::Programmer;

mod opcodes {
    pub const WREN: u8 = 0x06;
    pub const WRDI: u8 = 0x04;
    pub const RDSR: u8 = 0x05;
    pub const WRSR: u8 = 0x01;
    pub const READ: u8 = 0x03;
    pub const PP: u8 = 0x02;
    pub const SE: u8 = 0xD8;
    pub const RDID: u8 = 0x9F;
    pub const CHIP_ERASE: u8 = 0xC7;
    pub const EN4B: u8 = 0xB7;
    pub const EX4B: u8 = 0xE9;
    /// Spansion bank address register access.
    pub const BRRD: u8 = 0x16;
    pub const BRWR: u8 = 0x17;
    /// Winbond extended address register.
    pub const EAR: u8 = 0xC5;
}

mod status {
    pub const WIP: u8 = 0x01;
    pub const WEL: u8 = 0x02;
    pub const BP0: u8 = 0x04;
    pub const BP1: u8 = 0x08;
    pub const BP2: u8 = 0x10;
    pub const EPE: u8 = 0x20;
}

const PAGE_SIZE: u32 = 256;

const MFR_SPANSION: u8 = 0x01;
const MFR_WINBOND: u8 = 0xEF;

/// Issue the JEDEC ID command and look the reply up in the table.
pub fn identify<P: Programmer>(bus: &mut P) -> Result<Option<&'static NorChip>> {
    bus.chip_select(true)?;
    bus.write_byte(opcodes::RDID)?;
    let id = bus.read(5)?;
    bus.chip_select(false)?;

    let jedec = u32::from_be_bytes([id[1], id[2], id[3], id[4]]);
    debug!(
        "spi device id: {:02x} {:02x} {:02x} {:02x} {:02x} ({:08x})",
        id[0], id[1], id[2], id[3], id[4], jedec
    );
    Ok(chips::find(id[0], jedec))
}

pub struct SpiNor<P: Programmer> {
    bus: P,
    chip: &'static NorChip,
}

impl<P: Programmer> SpiNor<P> {
    pub fn new(bus: P, chip: &'static NorChip) -> Self {
        Self { bus, chip }
    }

    pub fn chip(&self) -> &'static NorChip {
        self.chip
    }

    #[cfg(test)]
    pub fn bus_mut(&mut self) -> &mut P {
        &mut self.bus
    }

    fn read_status(&mut self) -> Result<u8> {
        self.bus.chip_select(true)?;
        self.bus.write_byte(opcodes::RDSR)?;
        let sr = self.bus.read(1)?;
        self.bus.chip_select(false)?;
        Ok(sr[0])
    }

    fn read_reg(&mut self, code: u8) -> Result<u8> {
        self.bus.chip_select(true)?;
        self.bus.write_byte(code)?;
        let val = self.bus.read(1)?;
        self.bus.chip_select(false)?;
        Ok(val[0])
    }

    fn write_reg(&mut self, code: u8, value: u8) -> Result<()> {
        self.bus.chip_select(true)?;
        self.bus.write(&[code, value])?;
        self.bus.chip_select(false)
    }

    fn command(&mut self, code: u8) -> Result<()> {
        self.bus.chip_select(true)?;
        self.bus.write_byte(code)?;
        self.bus.chip_select(false)
    }

    fn write_enable(&mut self) -> Result<()> {
        self.command(opcodes::WREN)
    }

    fn write_disable(&mut self) -> Result<()> {
        self.command(opcodes::WRDI)
    }

    /// Poll until WIP, EPE and WEL are all clear. The budget scales with the
    /// operation; polls sleep 500 us apart.
    fn wait_ready(&mut self, budget_ms: u32) -> Result<()> {
        for _ in 0..(budget_ms + 1) * 1000 {
            let sr = self.read_status()?;
            if sr & (status::WIP | status::EPE | status::WEL) == 0 {
                return Ok(());
            }
            thread::sleep(Duration::from_micros(500));
        }
        warn!("status register never settled");
        Err(Error::Timeout)
    }

    /// Clear the block-protection bits if any are set.
    fn unprotect(&mut self) -> Result<()> {
        let sr = self.read_status()?;
        if sr & (status::BP0 | status::BP1 | status::BP2) != 0 {
            self.write_reg(opcodes::WRSR, 0)?;
        }
        Ok(())
    }

    /// Switch between 24- and 32-bit addressing after waiting out any
    /// in-flight operation.
    fn four_byte_mode(&mut self, enable: bool) -> Result<()> {
        self.wait_ready(1)?;
        self.set_addr_mode(enable)
    }

    /// The raw mode switch. Spansion goes through the bank address register
    /// with a read-back check; Winbond additionally clears its extended
    /// address register on the way out. The write path calls this directly
    /// with the write-enable latch already set, so there is no busy wait.
    fn set_addr_mode(&mut self, enable: bool) -> Result<()> {
        if self.chip.mfr_id == MFR_SPANSION {
            let br = if enable { 0x81 } else { 0x00 };
            self.write_reg(opcodes::BRWR, br)?;
            let confirm = self.read_reg(opcodes::BRRD)?;
            if confirm != br {
                return Err(Error::SpiTransport(format!(
                    "bank register readback mismatch: wrote {br:#04x}, read {confirm:#04x}"
                )));
            }
        } else {
            self.command(if enable { opcodes::EN4B } else { opcodes::EX4B })?;
            if !enable && self.chip.mfr_id == MFR_WINBOND {
                self.write_enable()?;
                self.write_reg(opcodes::EAR, 0)?;
            }
        }
        Ok(())
    }

    fn addr_bytes(&self, addr: u32) -> Vec<u8> {
        if self.chip.addr4b {
            addr.to_be_bytes().to_vec()
        } else {
            addr.to_be_bytes()[1..].to_vec()
        }
    }

    fn erase_sector(&mut self, offset: u32) -> Result<()> {
        trace!("sector erase at {offset:#x}");
        self.wait_ready(950)?;
        if self.chip.addr4b {
            self.four_byte_mode(true)?;
        }
        self.write_enable()?;

        let mut frame = vec![opcodes::SE];
        frame.extend(self.addr_bytes(offset));
        self.bus.chip_select(true)?;
        self.bus.write(&frame)?;
        self.bus.chip_select(false)?;

        self.wait_ready(950)?;
        if self.chip.addr4b {
            self.four_byte_mode(false)?;
        }
        Ok(())
    }

    fn chip_erase(&mut self) -> Result<()> {
        self.wait_ready(3)?;
        self.write_enable()?;
        self.unprotect()?;
        self.command(opcodes::CHIP_ERASE)?;
        self.wait_ready(3000)?;
        self.write_disable()
    }
}

impl<P: Programmer> FlashEngine for SpiNor<P> {
    fn name(&self) -> &str {
        self.chip.name
    }

    fn total_size(&self) -> u32 {
        self.chip.total_size()
    }

    fn erase_granularity(&self) -> u32 {
        self.chip.sector_size
    }

    fn read(&mut self, addr: u32, len: u32, progress: &dyn Fn(Progress)) -> Result<Vec<u8>> {
        if len == 0 {
            return Ok(Vec::new());
        }
        self.wait_ready(1)?;

        let sector = self.chip.sector_size;
        let mut out = Vec::with_capacity(len as usize);
        let mut read_addr = addr;

        while (out.len() as u32) < len {
            let in_sector = read_addr % sector;
            let chunk = (sector - in_sector).min(len - out.len() as u32);

            if self.chip.addr4b {
                self.four_byte_mode(true)?;
            }

            let mut frame = vec![opcodes::READ];
            frame.extend(self.addr_bytes(read_addr));
            self.bus.chip_select(true)?;
            self.bus.write(&frame)?;
            let data = self.bus.read(chunk as usize)?;
            self.bus.chip_select(false)?;

            if self.chip.addr4b {
                self.four_byte_mode(false)?;
            }

            out.extend_from_slice(&data);
            read_addr += chunk;
            progress(Progress::new(out.len() as u64, len as u64));
        }

        Ok(out)
    }

    fn erase(&mut self, addr: u32, len: u32, progress: &dyn Fn(Progress)) -> Result<()> {
        if len == 0 {
            return Err(Error::InvalidParameter("erase length is zero".into()));
        }

        if addr == 0 && len == self.total_size() {
            debug!("full chip erase");
            self.chip_erase()?;
            progress(Progress::new(len as u64, len as u64));
            return Ok(());
        }

        self.unprotect()?;
        let sector = self.chip.sector_size;
        let mut offs = addr;
        let mut remaining = len;
        while remaining > 0 {
            self.erase_sector(offs)?;
            offs += sector;
            remaining = remaining.saturating_sub(sector);
            progress(Progress::new((len - remaining) as u64, len as u64));
        }
        Ok(())
    }

    fn write(&mut self, addr: u32, data: &[u8], progress: &dyn Fn(Progress)) -> Result<usize> {
        if data.is_empty() {
            return Ok(0);
        }
        if addr + data.len() as u32 > self.total_size() {
            return Err(Error::InvalidParameter(format!(
                "write of {} bytes at {addr:#x} exceeds the device",
                data.len()
            )));
        }

        self.wait_ready(2)?;

        let mut to = addr;
        let mut offset = 0usize;
        while offset < data.len() {
            let page_offset = to % PAGE_SIZE;
            let chunk = ((PAGE_SIZE - page_offset) as usize).min(data.len() - offset);

            self.wait_ready(3)?;
            self.write_enable()?;
            self.unprotect()?;
            if self.chip.addr4b {
                self.set_addr_mode(true)?;
            }

            let mut frame = vec![opcodes::PP];
            frame.extend(self.addr_bytes(to));
            frame.extend_from_slice(&data[offset..offset + chunk]);
            self.bus.chip_select(true)?;
            self.bus.write(&frame)?;
            self.bus.chip_select(false)?;

            if self.chip.addr4b {
                self.set_addr_mode(false)?;
            }

            offset += chunk;
            to += chunk as u32;
            progress(Progress::new(offset as u64, data.len() as u64));
        }

        self.write_disable()?;
        Ok(offset)
    }
}
