//! Byte-level chip simulators for end-to-end tests without hardware.
//!
//! Each simulator implements [`Programmer`] and models one chip as a small
//! SPI state machine: a command byte latched at chip-select, address bytes
//! collected, then data streamed in or out. State lives behind an `Rc` so a
//! test can keep a handle for inspection and fault injection while the
//! engine owns the bus.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::domain::DummyByte;
use crate::error::Result;
use crate::programmer::Programmer;

// Status register 0xC0 bits
const OIP: u8 = 0x01;
const E_FAIL: u8 = 0x04;
const P_FAIL: u8 = 0x08;

/// Internal state of a simulated SPI NAND chip.
pub struct NandState {
    memory: Vec<u8>,
    cache: Vec<u8>,
    features: HashMap<u8, u8>,
    /// Bytes streamed out after a 0x9F opcode (ID prefix + ID bytes).
    id_stream: Vec<u8>,
    page_size: usize,
    oob_size: usize,
    pages_per_block: usize,
    pages: usize,
    write_enabled: bool,
    column: usize,
    die: u8,
    /// Pages whose program-execute raises P_FAIL.
    fail_program: HashSet<u32>,
    /// Blocks whose erase raises E_FAIL.
    fail_erase: HashSet<u32>,
    /// Pages whose load reports this ECC pattern in 0xC0.
    ecc_fail: HashSet<u32>,
    ecc_fail_bits: u8,
    /// How this chip frames read-from-cache headers.
    read_dummy: DummyByte,
    /// Every opcode latched, in order.
    op_log: Vec<u8>,
}

impl NandState {
    fn stride(&self) -> usize {
        self.page_size + self.oob_size
    }

    pub fn feature(&self, addr: u8) -> u8 {
        self.features.get(&addr).copied().unwrap_or(0)
    }

    /// Data area of one page.
    pub fn page_data(&self, page: u32) -> Vec<u8> {
        let base = page as usize * self.stride();
        self.memory[base..base + self.page_size].to_vec()
    }

    /// Raw page + OOB.
    pub fn page_raw(&self, page: u32) -> Vec<u8> {
        let base = page as usize * self.stride();
        self.memory[base..base + self.stride()].to_vec()
    }

    pub fn cache_raw(&self) -> Vec<u8> {
        self.cache.clone()
    }

    pub fn set_page_data(&mut self, page: u32, data: &[u8]) {
        let base = page as usize * self.stride();
        self.memory[base..base + data.len()].copy_from_slice(data);
    }

    pub fn op_log(&self) -> &[u8] {
        &self.op_log
    }

    /// Die last selected with the 0xC2 command.
    pub fn selected_die(&self) -> u8 {
        self.die
    }

    pub fn fail_program_on(&mut self, page: u32) {
        self.fail_program.insert(page);
    }

    pub fn fail_erase_on(&mut self, block: u32) {
        self.fail_erase.insert(block);
    }

    pub fn fail_ecc_on(&mut self, page: u32, status_bits: u8) {
        self.ecc_fail.insert(page);
        self.ecc_fail_bits = status_bits;
    }

    fn load_cache(&mut self, row: usize) {
        let stride = self.stride();
        let base = row * stride;
        if base + stride <= self.memory.len() {
            self.cache.copy_from_slice(&self.memory[base..base + stride]);
        }
        let mut status = self.feature(0xC0) & !(0xF0 | OIP | P_FAIL | E_FAIL);
        if self.ecc_fail.contains(&(row as u32)) {
            status |= self.ecc_fail_bits;
        }
        self.features.insert(0xC0, status);
    }

    fn program_execute(&mut self, row: usize) {
        if !self.write_enabled {
            return;
        }
        let mut status = self.feature(0xC0) & !(OIP | P_FAIL);
        if self.fail_program.contains(&(row as u32)) {
            status |= P_FAIL;
        } else {
            let stride = self.stride();
            let base = row * stride;
            if base + stride <= self.memory.len() {
                for (m, c) in self.memory[base..base + stride]
                    .iter_mut()
                    .zip(self.cache.iter())
                {
                    *m &= c;
                }
            }
        }
        self.features.insert(0xC0, status);
        self.write_enabled = false;
    }

    fn block_erase(&mut self, row: usize) {
        if !self.write_enabled {
            return;
        }
        let block = row / self.pages_per_block;
        let mut status = self.feature(0xC0) & !(OIP | E_FAIL);
        if self.fail_erase.contains(&(block as u32)) {
            status |= E_FAIL;
        } else {
            let start = block * self.pages_per_block * self.stride();
            let end = start + self.pages_per_block * self.stride();
            if end <= self.memory.len() {
                self.memory[start..end].fill(0xFF);
            }
        }
        self.features.insert(0xC0, status);
        self.write_enabled = false;
    }
}

/// A programmer with one simulated SPI NAND behind it.
pub struct SimulatedNand {
    state: Rc<RefCell<NandState>>,
    command: Option<u8>,
    buf: Vec<u8>,
}

impl SimulatedNand {
    pub fn new(id: &[u8], pages: usize, page_size: usize, oob_size: usize, pages_per_block: usize) -> Self {
        let mut features = HashMap::new();
        // Fresh chip: all blocks protected, internal ECC enabled.
        features.insert(0xA0, 0x38);
        features.insert(0xB0, 0x10);
        features.insert(0xC0, 0x00);
        features.insert(0xD0, 0x00);
        features.insert(0x90, 0x00);

        // Dummy-address ID framing: one don't-care byte, then the ID.
        let mut id_stream = vec![0x00];
        id_stream.extend_from_slice(id);

        let stride = page_size + oob_size;
        let state = NandState {
            memory: vec![0xFF; pages * stride],
            cache: vec![0xFF; stride],
            features,
            id_stream,
            page_size,
            oob_size,
            pages_per_block,
            pages,
            write_enabled: false,
            column: 0,
            die: 0,
            fail_program: HashSet::new(),
            fail_erase: HashSet::new(),
            ecc_fail: HashSet::new(),
            ecc_fail_bits: 0,
            read_dummy: DummyByte::Append,
            op_log: Vec::new(),
        };
        Self {
            state: Rc::new(RefCell::new(state)),
            command: None,
            buf: Vec::new(),
        }
    }

    /// Chip that streams its ID immediately after the opcode (matched by the
    /// second probe variant).
    pub fn with_immediate_id(self) -> Self {
        {
            let mut s = self.state.borrow_mut();
            let id: Vec<u8> = s.id_stream[1..].to_vec();
            s.id_stream = id;
        }
        self
    }

    /// Handle to the chip state for inspection and fault injection.
    pub fn state(&self) -> Rc<RefCell<NandState>> {
        Rc::clone(&self.state)
    }

    fn clock_byte(&mut self, byte: u8) -> u8 {
        let Some(opcode) = self.command else {
            self.command = Some(byte);
            self.buf.clear();
            let mut s = self.state.borrow_mut();
            s.op_log.push(byte);
            match byte {
                0x06 => s.write_enabled = true,
                0x04 => s.write_enabled = false,
                _ => {}
            }
            return 0xFF;
        };

        self.buf.push(byte);
        let n = self.buf.len();
        let mut s = self.state.borrow_mut();

        match opcode {
            0x9F => s.id_stream.get(n - 1).copied().unwrap_or(0xFF),
            0x0F => {
                if n == 2 {
                    s.feature(self.buf[0])
                } else {
                    0xFF
                }
            }
            0x1F => {
                if n == 2 {
                    s.features.insert(self.buf[0], self.buf[1]);
                }
                0xFF
            }
            0xC2 => {
                s.die = byte;
                0xFF
            }
            0x13 => {
                if n == 3 {
                    let row = ((self.buf[0] as usize) << 16)
                        | ((self.buf[1] as usize) << 8)
                        | self.buf[2] as usize;
                    if row < s.pages {
                        s.load_cache(row);
                    }
                }
                0xFF
            }
            0x03 | 0x3B | 0x6B => {
                let header = match s.read_dummy {
                    DummyByte::None => 2,
                    _ => 3,
                };
                if n <= header {
                    if n == header {
                        let (hi, lo) = match s.read_dummy {
                            DummyByte::Prepend => (self.buf[1], self.buf[2]),
                            _ => (self.buf[0], self.buf[1]),
                        };
                        s.column = (((hi & !0x10) as usize) << 8) | lo as usize;
                    }
                    0xFF
                } else {
                    let col = s.column;
                    let out = s.cache.get(col).copied().unwrap_or(0xFF);
                    s.column += 1;
                    out
                }
            }
            0x02 | 0x32 => {
                if n <= 2 {
                    if n == 2 {
                        s.column = (((self.buf[0] & !0x10) as usize) << 8) | self.buf[1] as usize;
                        // Program-load resets the cache before filling it.
                        s.cache.fill(0xFF);
                    }
                } else {
                    let col = s.column;
                    if col < s.cache.len() {
                        s.cache[col] = byte;
                    }
                    s.column += 1;
                }
                0xFF
            }
            0x10 => {
                if n == 3 {
                    let row = ((self.buf[0] as usize) << 16)
                        | ((self.buf[1] as usize) << 8)
                        | self.buf[2] as usize;
                    s.program_execute(row);
                }
                0xFF
            }
            0xD8 => {
                if n == 3 {
                    let row = ((self.buf[0] as usize) << 16)
                        | ((self.buf[1] as usize) << 8)
                        | self.buf[2] as usize;
                    s.block_erase(row);
                }
                0xFF
            }
            _ => 0xFF,
        }
    }
}

impl Programmer for SimulatedNand {
    fn name(&self) -> &str {
        "Simulated SPI NAND"
    }

    fn chip_select(&mut self, assert: bool) -> Result<()> {
        if !assert {
            self.command = None;
            self.buf.clear();
        }
        Ok(())
    }

    fn transfer(&mut self, tx: &[u8], read_len: usize) -> Result<Vec<u8>> {
        for &b in tx {
            self.clock_byte(b);
        }
        Ok((0..read_len).map(|_| self.clock_byte(0xFF)).collect())
    }
}

/// Internal state of a simulated SPI NOR chip.
pub struct NorState {
    memory: Vec<u8>,
    /// The five bytes streamed after 0x9F.
    id: [u8; 5],
    status: u8,
    bank_reg: u8,
    four_byte: bool,
    sector_size: usize,
    addr: usize,
}

impl NorState {
    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn status(&self) -> u8 {
        self.status
    }

    pub fn four_byte_enabled(&self) -> bool {
        self.four_byte
    }

    fn addr_len(&self) -> usize {
        if self.four_byte {
            4
        } else {
            3
        }
    }

    fn collect_addr(&self, buf: &[u8]) -> usize {
        buf.iter().fold(0usize, |a, &b| (a << 8) | b as usize)
    }
}

/// A programmer with one simulated SPI NOR behind it.
pub struct SimulatedNor {
    state: Rc<RefCell<NorState>>,
    command: Option<u8>,
    buf: Vec<u8>,
}

impl SimulatedNor {
    pub fn new(id: [u8; 5], size: usize, sector_size: usize) -> Self {
        let state = NorState {
            memory: vec![0xFF; size],
            id,
            status: 0x00,
            bank_reg: 0x00,
            four_byte: false,
            sector_size,
            addr: 0,
        };
        Self {
            state: Rc::new(RefCell::new(state)),
            command: None,
            buf: Vec::new(),
        }
    }

    pub fn state(&self) -> Rc<RefCell<NorState>> {
        Rc::clone(&self.state)
    }

    fn clock_byte(&mut self, byte: u8) -> u8 {
        let Some(opcode) = self.command else {
            self.command = Some(byte);
            self.buf.clear();
            let mut s = self.state.borrow_mut();
            match byte {
                0x06 => s.status |= 0x02,
                0x04 => s.status &= !0x02,
                0xB7 => s.four_byte = true,
                0xE9 => s.four_byte = false,
                0xC7 | 0x60 => {
                    if s.status & 0x02 != 0 {
                        s.memory.fill(0xFF);
                        s.status &= !0x02;
                    }
                }
                _ => {}
            }
            return 0xFF;
        };

        self.buf.push(byte);
        let n = self.buf.len();
        let mut s = self.state.borrow_mut();

        match opcode {
            0x9F => s.id.get(n - 1).copied().unwrap_or(0xFF),
            0x05 => s.status,
            0x01 => {
                s.status = self.buf[0];
                0xFF
            }
            0x17 => {
                s.bank_reg = self.buf[0];
                s.four_byte = self.buf[0] & 0x80 != 0;
                0xFF
            }
            0x16 => s.bank_reg,
            0xC5 => 0xFF,
            0x03 => {
                let alen = s.addr_len();
                if n <= alen {
                    if n == alen {
                        s.addr = s.collect_addr(&self.buf[..alen]);
                    }
                    0xFF
                } else {
                    let a = s.addr;
                    let out = s.memory.get(a).copied().unwrap_or(0xFF);
                    s.addr += 1;
                    out
                }
            }
            0x02 => {
                let alen = s.addr_len();
                if n <= alen {
                    if n == alen {
                        s.addr = s.collect_addr(&self.buf[..alen]);
                    }
                } else if s.status & 0x02 != 0 {
                    let a = s.addr;
                    if a < s.memory.len() {
                        s.memory[a] &= byte;
                    }
                    s.addr += 1;
                }
                0xFF
            }
            0xD8 => {
                let alen = s.addr_len();
                if n == alen && s.status & 0x02 != 0 {
                    let addr = s.collect_addr(&self.buf[..alen]);
                    let sector = s.sector_size;
                    let start = addr / sector * sector;
                    let end = (start + sector).min(s.memory.len());
                    s.memory[start..end].fill(0xFF);
                    s.status &= !0x02;
                }
                0xFF
            }
            _ => 0xFF,
        }
    }
}

impl Programmer for SimulatedNor {
    fn name(&self) -> &str {
        "Simulated SPI NOR"
    }

    fn chip_select(&mut self, assert: bool) -> Result<()> {
        if !assert {
            // Write-type commands consume the write-enable latch when the
            // frame closes.
            if matches!(self.command, Some(0x02 | 0x01 | 0xC5)) {
                self.state.borrow_mut().status &= !0x02;
            }
            self.command = None;
            self.buf.clear();
        }
        Ok(())
    }

    fn transfer(&mut self, tx: &[u8], read_len: usize) -> Result<Vec<u8>> {
        for &b in tx {
            self.clock_byte(b);
        }
        Ok((0..read_len).map(|_| self.clock_byte(0xFF)).collect())
    }
}
