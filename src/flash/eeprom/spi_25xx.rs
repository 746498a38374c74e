//! SPI EEPROM (25xxx series) engine.
//!
//! Byte or page programming with WREN + WIP polling; address width follows
//! the part's address-bit count, with the ninth address bit folded into the
//! opcode on the 25040-class parts.

use log::{debug, info};

use crate::domain::{Progress, SpiEepromChip};
use crate::error::{Error, Result};
use crate::flash::FlashEngine;
use crate::programmer::Programmer;

const WREN: u8 = 0x06;
const RDSR: u8 = 0x05;
const READ: u8 = 0x03;
const WRITE: u8 = 0x02;

const WIP: u8 = 0x01;
const WEL: u8 = 0x02;

/// Poll cap for WIP/WEL loops.
const POLL_LIMIT: u32 = 100_000;

pub const CHIPS: &[SpiEepromChip] = &[
    SpiEepromChip { name: "25010", total_bytes: 128, addr_bits: 7 },
    SpiEepromChip { name: "25020", total_bytes: 256, addr_bits: 8 },
    SpiEepromChip { name: "25040", total_bytes: 512, addr_bits: 9 },
    SpiEepromChip { name: "25080", total_bytes: 1024, addr_bits: 10 },
    SpiEepromChip { name: "25160", total_bytes: 2048, addr_bits: 11 },
    SpiEepromChip { name: "25320", total_bytes: 4096, addr_bits: 12 },
    SpiEepromChip { name: "25640", total_bytes: 8192, addr_bits: 13 },
    SpiEepromChip { name: "25128", total_bytes: 16384, addr_bits: 14 },
    SpiEepromChip { name: "25256", total_bytes: 32768, addr_bits: 15 },
    SpiEepromChip { name: "25512", total_bytes: 65536, addr_bits: 16 },
    SpiEepromChip { name: "251024", total_bytes: 131072, addr_bits: 17 },
];

pub fn find(name: &str) -> Option<&'static SpiEepromChip> {
    CHIPS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

pub fn print_list() {
    println!("SPI EEPROM Support List:");
    for (i, chip) in CHIPS.iter().enumerate() {
        println!("{:03}. {}", i + 1, chip.name);
    }
}

pub struct SpiEeprom<P: Programmer> {
    bus: P,
    chip: &'static SpiEepromChip,
    page_size: Option<u32>,
}

impl<P: Programmer> SpiEeprom<P> {
    pub fn new(bus: P, chip: &'static SpiEepromChip, page_size: Option<u32>) -> Self {
        info!(
            "SPI EEPROM chip: {}, Size: {} bytes",
            chip.name, chip.total_bytes
        );
        if let Some(ps) = page_size {
            debug!("page write mode, {ps} bytes per page");
        }
        Self {
            bus,
            chip,
            page_size,
        }
    }

    fn read_status(&mut self) -> Result<u8> {
        self.bus.chip_select(true)?;
        let result = (|| {
            self.bus.write_byte(RDSR)?;
            self.bus.read(1)
        })();
        self.bus.chip_select(false)?;
        Ok(result?[0])
    }

    fn wait_ready(&mut self) -> Result<()> {
        for _ in 0..POLL_LIMIT {
            if self.read_status()? & WIP == 0 {
                return Ok(());
            }
        }
        Err(Error::Timeout)
    }

    /// Latch the write-enable and confirm WEL actually set.
    fn write_enable(&mut self) -> Result<()> {
        for _ in 0..POLL_LIMIT {
            self.bus.chip_select(true)?;
            self.bus.write_byte(WREN)?;
            self.bus.chip_select(false)?;
            let sr = self.read_status()?;
            if sr & (WEL | WIP) == WEL {
                return Ok(());
            }
        }
        Err(Error::Timeout)
    }

    /// Opcode + address frame. 9-bit parts carry A8 in bit 3 of the opcode.
    fn addr_frame(&self, opcode: u8, addr: u32) -> Vec<u8> {
        let mut op = opcode;
        if self.chip.addr_bits == 9 && addr > 0xFF {
            op |= 0x08;
        }
        let mut frame = vec![op];
        if self.chip.addr_bits > 16 {
            frame.push((addr >> 16) as u8);
            frame.push((addr >> 8) as u8);
            frame.push(addr as u8);
        } else if self.chip.addr_bits < 10 {
            frame.push(addr as u8);
        } else {
            frame.push((addr >> 8) as u8);
            frame.push(addr as u8);
        }
        frame
    }

    fn program(&mut self, addr: u32, data: &[u8]) -> Result<()> {
        self.write_enable()?;
        let mut frame = self.addr_frame(WRITE, addr);
        frame.extend_from_slice(data);
        self.bus.chip_select(true)?;
        let result = self.bus.write(&frame);
        self.bus.chip_select(false)?;
        result?;
        self.wait_ready()
    }
}

impl<P: Programmer> FlashEngine for SpiEeprom<P> {
    fn name(&self) -> &str {
        self.chip.name
    }

    fn total_size(&self) -> u32 {
        self.chip.total_bytes
    }

    fn erase_granularity(&self) -> u32 {
        1
    }

    fn read(&mut self, addr: u32, len: u32, progress: &dyn Fn(Progress)) -> Result<Vec<u8>> {
        let frame = self.addr_frame(READ, addr);
        self.bus.chip_select(true)?;
        let result = (|| {
            self.bus.write(&frame)?;
            let mut out = Vec::with_capacity(len as usize);
            while (out.len() as u32) < len {
                let chunk = 2048.min(len - out.len() as u32);
                out.extend(self.bus.read(chunk as usize)?);
                progress(Progress::new(out.len() as u64, len as u64));
            }
            Ok(out)
        })();
        self.bus.chip_select(false)?;
        result
    }

    fn erase(&mut self, addr: u32, len: u32, progress: &dyn Fn(Progress)) -> Result<()> {
        // No erase command on these parts; erased state is written 0xFF.
        let blank = vec![0xFF; len as usize];
        self.write(addr, &blank, progress)?;
        Ok(())
    }

    fn write(&mut self, addr: u32, data: &[u8], progress: &dyn Fn(Progress)) -> Result<usize> {
        if addr + data.len() as u32 > self.chip.total_bytes {
            return Err(Error::InvalidParameter(format!(
                "write of {} bytes at {addr:#x} exceeds the device",
                data.len()
            )));
        }

        let mut offset = 0usize;
        match self.page_size {
            Some(page) => {
                while offset < data.len() {
                    let a = addr + offset as u32;
                    let chunk = ((page - a % page) as usize).min(data.len() - offset);
                    self.program(a, &data[offset..offset + chunk])?;
                    offset += chunk;
                    progress(Progress::new(offset as u64, data.len() as u64));
                }
            }
            None => {
                for (i, &byte) in data.iter().enumerate() {
                    self.program(addr + i as u32, &[byte])?;
                    offset = i + 1;
                    progress(Progress::new(offset as u64, data.len() as u64));
                }
            }
        }
        Ok(offset)
    }
}
