//! Microwire EEPROM (93Cxx series) engine.
//!
//! Three-wire bitbang over the bridge's UIO stream: CS on D0, CLK on D3,
//! DI on D5, DO sampled on D7 through the input path. The chips are small,
//! so every operation goes through a whole-device buffer like the original:
//! read everything, modify, erase-all, write everything back.

use log::{debug, info};

use crate::domain::{MicrowireOptions, MwEepromChip, Progress};
use crate::error::{Error, Result};
use crate::flash::FlashEngine;
use crate::programmer::ch341a::protocol::{uio, CMD_UIO_STREAM};
use crate::programmer::Programmer;

const PIN_CS: u8 = 0x01;
const PIN_CLK: u8 = 0x08;
const PIN_DI: u8 = 0x20;
const PIN_DO: u8 = 0x80;

/// D0-D5 as outputs, D6/D7 as inputs.
const DIR_MASK: u8 = 0x3F;

/// Ready polls after an erase or program before giving up.
const READY_POLL_LIMIT: u32 = 100_000;

// Start bit + two opcode bits
const OP_READ: u8 = 0b110;
const OP_WRITE: u8 = 0b101;
const OP_EXTENDED: u8 = 0b100;

pub const CHIPS: &[MwEepromChip] = &[
    MwEepromChip { name: "93c06", size: 32 },
    MwEepromChip { name: "93c16", size: 64 },
    MwEepromChip { name: "93c46", size: 128 },
    MwEepromChip { name: "93c56", size: 256 },
    MwEepromChip { name: "93c66", size: 512 },
    MwEepromChip { name: "93c76", size: 1024 },
    MwEepromChip { name: "93c86", size: 2048 },
    MwEepromChip { name: "93c96", size: 4096 },
];

pub fn find(name: &str) -> Option<&'static MwEepromChip> {
    CHIPS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

pub fn print_list() {
    println!("Microwire EEPROM Support List:");
    for (i, chip) in CHIPS.iter().enumerate() {
        println!("{:03}. {}", i + 1, chip.name);
    }
}

pub struct MicrowireEeprom<P: Programmer> {
    bus: P,
    chip: &'static MwEepromChip,
    opts: MicrowireOptions,
}

impl<P: Programmer> MicrowireEeprom<P> {
    pub fn new(mut bus: P, chip: &'static MwEepromChip, opts: MicrowireOptions) -> Result<Self> {
        bus.raw_stream(&[CMD_UIO_STREAM, uio::STM_DIR | DIR_MASK, uio::STM_END], 0)?;
        let org_bits = if opts.org_8bit { 8 } else { 16 };
        match opts.fix_addr_len {
            Some(bits) => info!(
                "Microwire EEPROM chip: {}, Size: {} bytes, Org: {} bits, fix addr len: {}",
                chip.name, chip.size, org_bits, bits
            ),
            None => info!(
                "Microwire EEPROM chip: {}, Size: {} bytes, Org: {} bits, fix addr len: Auto",
                chip.name, chip.size, org_bits
            ),
        }
        Ok(Self { bus, chip, opts })
    }

    fn word_bits(&self) -> u32 {
        if self.opts.org_8bit {
            8
        } else {
            16
        }
    }

    fn word_count(&self) -> u32 {
        self.chip.size / (self.word_bits() / 8)
    }

    fn addr_bits(&self) -> u32 {
        match self.opts.fix_addr_len {
            Some(bits) => bits as u32,
            None => {
                let words = self.word_count();
                32 - (words - 1).leading_zeros()
            }
        }
    }

    fn set_pins(&mut self, bits: u8) -> Result<()> {
        self.bus
            .raw_stream(&[CMD_UIO_STREAM, uio::STM_OUT | (bits & DIR_MASK), uio::STM_END], 0)?;
        Ok(())
    }

    fn get_pins(&mut self) -> Result<u8> {
        let data = self
            .bus
            .raw_stream(&[CMD_UIO_STREAM, uio::STM_IN, uio::STM_END], 1)?;
        Ok(data[0])
    }

    /// Clock one bit out on DI, sample DO on the rising edge.
    fn clock_bit(&mut self, bit: bool) -> Result<bool> {
        let base = PIN_CS | if bit { PIN_DI } else { 0 };
        self.set_pins(base)?;
        self.set_pins(base | PIN_CLK)?;
        let sample = self.get_pins()?;
        self.set_pins(base)?;
        Ok(sample & PIN_DO != 0)
    }

    fn select(&mut self) -> Result<()> {
        self.set_pins(PIN_CS)
    }

    fn deselect(&mut self) -> Result<()> {
        self.set_pins(0)
    }

    /// Start bit, opcode, then the address field MSB-first.
    fn send_command(&mut self, op: u8, addr: u32) -> Result<()> {
        for i in (0..3).rev() {
            self.clock_bit(op & (1 << i) != 0)?;
        }
        let bits = self.addr_bits();
        for i in (0..bits).rev() {
            self.clock_bit(addr & (1 << i) != 0)?;
        }
        Ok(())
    }

    /// After an erase or program, the chip drives DO low until it finishes.
    fn wait_ready(&mut self) -> Result<()> {
        self.deselect()?;
        self.select()?;
        for _ in 0..READY_POLL_LIMIT {
            if self.get_pins()? & PIN_DO != 0 {
                self.deselect()?;
                return Ok(());
            }
        }
        self.deselect()?;
        Err(Error::Timeout)
    }

    /// Extended-opcode address fields: the top two address bits select the
    /// sub-operation.
    fn extended_addr(&self, top_bits: u32) -> u32 {
        top_bits << (self.addr_bits() - 2)
    }

    fn erase_write_enable(&mut self) -> Result<()> {
        self.select()?;
        self.send_command(OP_EXTENDED, self.extended_addr(0b11))?;
        self.deselect()
    }

    fn erase_write_disable(&mut self) -> Result<()> {
        self.select()?;
        self.send_command(OP_EXTENDED, self.extended_addr(0b00))?;
        self.deselect()
    }

    fn erase_all(&mut self) -> Result<()> {
        debug!("erase all");
        self.erase_write_enable()?;
        self.select()?;
        self.send_command(OP_EXTENDED, self.extended_addr(0b10))?;
        self.wait_ready()?;
        self.erase_write_disable()
    }

    /// Continuous read of the whole array.
    fn read_all(&mut self) -> Result<Vec<u8>> {
        let word_bits = self.word_bits();
        let words = self.word_count();
        let mut out = Vec::with_capacity(self.chip.size as usize);

        self.select()?;
        self.send_command(OP_READ, 0)?;
        // Leading dummy zero bit before the first data bit
        self.clock_bit(false)?;
        for _ in 0..words {
            let mut word: u32 = 0;
            for _ in 0..word_bits {
                word = (word << 1) | self.clock_bit(false)? as u32;
            }
            if word_bits == 16 {
                out.push((word >> 8) as u8);
            }
            out.push(word as u8);
        }
        self.deselect()?;
        Ok(out)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let word_bits = self.word_bits();
        self.erase_write_enable()?;
        for (word_addr, chunk) in data.chunks(word_bits as usize / 8).enumerate() {
            let word = if word_bits == 16 {
                ((chunk[0] as u32) << 8) | chunk[1] as u32
            } else {
                chunk[0] as u32
            };
            self.select()?;
            self.send_command(OP_WRITE, word_addr as u32)?;
            for i in (0..word_bits).rev() {
                self.clock_bit(word & (1 << i) != 0)?;
            }
            self.wait_ready()?;
        }
        self.erase_write_disable()
    }
}

impl<P: Programmer> FlashEngine for MicrowireEeprom<P> {
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
        let all = self.read_all()?;
        let start = addr as usize;
        let end = (addr + len) as usize;
        if end > all.len() {
            return Err(Error::InvalidParameter(format!(
                "read of {len} bytes at {addr:#x} exceeds the device"
            )));
        }
        progress(Progress::new(len as u64, len as u64));
        Ok(all[start..end].to_vec())
    }

    fn erase(&mut self, addr: u32, len: u32, progress: &dyn Fn(Progress)) -> Result<()> {
        let partial = addr != 0 || len < self.chip.size;
        if partial {
            let mut all = self.read_all()?;
            all[addr as usize..(addr + len) as usize].fill(0xFF);
            self.erase_all()?;
            self.write_all(&all)?;
        } else {
            self.erase_all()?;
        }
        progress(Progress::new(len as u64, len as u64));
        Ok(())
    }

    fn write(&mut self, addr: u32, data: &[u8], progress: &dyn Fn(Progress)) -> Result<usize> {
        if addr + data.len() as u32 > self.chip.size {
            return Err(Error::InvalidParameter(format!(
                "write of {} bytes at {addr:#x} exceeds the device",
                data.len()
            )));
        }

        let mut all = if addr != 0 || (data.len() as u32) < self.chip.size {
            self.read_all()?
        } else {
            vec![0xFF; self.chip.size as usize]
        };
        all[addr as usize..addr as usize + data.len()].copy_from_slice(data);

        self.erase_all()?;
        self.write_all(&all)?;
        progress(Progress::new(data.len() as u64, data.len() as u64));
        Ok(data.len())
    }
}
