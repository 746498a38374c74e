//! SPI NAND command primitives.
//!
//! One function per command. Each brackets its burst with chip-select,
//! builds the operand frame and surfaces transport errors; policy (polling,
//! ECC, caching, die bookkeeping) lives in the engine above.

use crate::domain::{DummyByte, ReadMode, WriteMode};
use crate::error::Result;
use crate::programmer::Programmer;

pub mod op {
    pub const GET_FEATURE: u8 = 0x0F;
    pub const SET_FEATURE: u8 = 0x1F;
    pub const WRITE_ENABLE: u8 = 0x06;
    pub const WRITE_DISABLE: u8 = 0x04;
    pub const PAGE_READ: u8 = 0x13;
    pub const READ_CACHE: u8 = 0x03;
    pub const READ_CACHE_DUAL: u8 = 0x3B;
    pub const READ_CACHE_QUAD: u8 = 0x6B;
    pub const PROGRAM_LOAD: u8 = 0x02;
    pub const PROGRAM_LOAD_QUAD: u8 = 0x32;
    pub const PROGRAM_EXECUTE: u8 = 0x10;
    pub const BLOCK_ERASE: u8 = 0xD8;
    pub const READ_ID: u8 = 0x9F;
    pub const DIE_SELECT: u8 = 0xC2;
}

/// Feature register addresses.
pub mod reg {
    /// Dedicated ECC config register on a few vendors.
    pub const ECC: u8 = 0x90;
    pub const PROTECTION: u8 = 0xA0;
    pub const FEATURE: u8 = 0xB0;
    pub const STATUS: u8 = 0xC0;
    /// Die select / extended features (Micron).
    pub const FEATURE_4: u8 = 0xD0;
    pub const STATUS_5: u8 = 0xE0;
}

/// Status register 0xC0 bits.
pub mod stat {
    pub const OIP: u8 = 0x01;
    pub const WEL: u8 = 0x02;
    pub const E_FAIL: u8 = 0x04;
    pub const P_FAIL: u8 = 0x08;
}

/// ECC enable bit, shared by registers 0xB0 and 0x90.
pub const ECC_ENABLE: u8 = 0x10;

/// Micron die-select bit in feature register 0xD0.
pub const DIE_SELECT_BIT: u8 = 0x40;

/// Block index to row address: 64 pages per block.
pub const BLOCK_ROW_SHIFT: u32 = 6;

fn row_bytes(row: u32) -> [u8; 3] {
    [(row >> 16) as u8, (row >> 8) as u8, row as u8]
}

/// Column address high byte; carries the plane-select bit where the chip
/// has one (clear 0x10 for plane 0, set for plane 1).
fn column_high(column: u16, plane: Option<u8>) -> u8 {
    let hi = (column >> 8) as u8;
    match plane {
        Some(0) => hi & 0xEF,
        Some(_) => hi | 0x10,
        None => hi,
    }
}

pub fn get_feature<P: Programmer>(bus: &mut P, addr: u8) -> Result<u8> {
    bus.chip_select(true)?;
    let result = (|| {
        bus.write(&[op::GET_FEATURE, addr])?;
        bus.read(1)
    })();
    bus.chip_select(false)?;
    Ok(result?[0])
}

pub fn set_feature<P: Programmer>(bus: &mut P, addr: u8, value: u8) -> Result<()> {
    bus.chip_select(true)?;
    let result = bus.write(&[op::SET_FEATURE, addr, value]);
    bus.chip_select(false)?;
    result
}

pub fn write_enable<P: Programmer>(bus: &mut P) -> Result<()> {
    bus.chip_select(true)?;
    let result = bus.write_byte(op::WRITE_ENABLE);
    bus.chip_select(false)?;
    result
}

pub fn write_disable<P: Programmer>(bus: &mut P) -> Result<()> {
    bus.chip_select(true)?;
    let result = bus.write_byte(op::WRITE_DISABLE);
    bus.chip_select(false)?;
    result
}

/// Load a page from the array into the chip cache.
pub fn page_read<P: Programmer>(bus: &mut P, page: u32) -> Result<()> {
    let row = row_bytes(page);
    bus.chip_select(true)?;
    let result = bus.write(&[op::PAGE_READ, row[0], row[1], row[2]]);
    bus.chip_select(false)?;
    result
}

/// Stream bytes out of the chip cache. The opcode follows the speed mode;
/// the dummy byte sits before or after the column address per the chip's
/// framing, with one extra dummy for prepend-framed dual/quad reads.
pub fn read_from_cache<P: Programmer>(
    bus: &mut P,
    column: u16,
    len: usize,
    mode: ReadMode,
    dummy: DummyByte,
    plane: Option<u8>,
) -> Result<Vec<u8>> {
    let opcode = match mode {
        ReadMode::Single => op::READ_CACHE,
        ReadMode::Dual => op::READ_CACHE_DUAL,
        ReadMode::Quad => op::READ_CACHE_QUAD,
    };
    let mut frame = vec![opcode];
    if dummy == DummyByte::Prepend {
        frame.push(0xFF);
    }
    frame.push(column_high(column, plane));
    frame.push(column as u8);
    if dummy == DummyByte::Append {
        frame.push(0xFF);
    }
    if dummy == DummyByte::Prepend && mode != ReadMode::Single {
        frame.push(0xFF);
    }

    bus.chip_select(true)?;
    let result = (|| {
        bus.write(&frame)?;
        bus.read(len)
    })();
    bus.chip_select(false)?;
    result
}

/// Fill the chip cache ahead of a program-execute.
pub fn program_load<P: Programmer>(
    bus: &mut P,
    column: u16,
    data: &[u8],
    mode: WriteMode,
    plane: Option<u8>,
) -> Result<()> {
    let opcode = match mode {
        WriteMode::Single => op::PROGRAM_LOAD,
        WriteMode::Quad => op::PROGRAM_LOAD_QUAD,
    };
    let mut frame = Vec::with_capacity(3 + data.len());
    frame.push(opcode);
    frame.push(column_high(column, plane));
    frame.push(column as u8);
    frame.extend_from_slice(data);

    bus.chip_select(true)?;
    let result = bus.write(&frame);
    bus.chip_select(false)?;
    result
}

pub fn program_execute<P: Programmer>(bus: &mut P, page: u32) -> Result<()> {
    let row = row_bytes(page);
    bus.chip_select(true)?;
    let result = bus.write(&[op::PROGRAM_EXECUTE, row[0], row[1], row[2]]);
    bus.chip_select(false)?;
    result
}

pub fn block_erase<P: Programmer>(bus: &mut P, block: u32) -> Result<()> {
    let row = row_bytes(block << BLOCK_ROW_SHIFT);
    bus.chip_select(true)?;
    let result = bus.write(&[op::BLOCK_ERASE, row[0], row[1], row[2]]);
    bus.chip_select(false)?;
    result
}

/// ID read with a zero address byte ahead of the three ID bytes.
pub fn read_id<P: Programmer>(bus: &mut P) -> Result<(u8, u8, u8)> {
    bus.chip_select(true)?;
    let result = (|| {
        bus.write(&[op::READ_ID, 0x00])?;
        bus.read(3)
    })();
    bus.chip_select(false)?;
    let id = result?;
    Ok((id[0], id[1], id[2]))
}

/// ID read with the bytes streaming straight after the opcode.
pub fn read_id_2<P: Programmer>(bus: &mut P) -> Result<(u8, u8, u8)> {
    bus.chip_select(true)?;
    let result = (|| {
        bus.write_byte(op::READ_ID)?;
        bus.read(3)
    })();
    bus.chip_select(false)?;
    let id = result?;
    Ok((id[0], id[1], id[2]))
}

/// ID read with one dummy byte then two ID bytes (Toshiba/Kioxia style).
pub fn read_id_3<P: Programmer>(bus: &mut P) -> Result<(u8, u8, u8)> {
    bus.chip_select(true)?;
    let result = (|| {
        bus.write_byte(op::READ_ID)?;
        bus.read(1)?;
        bus.read(2)
    })();
    bus.chip_select(false)?;
    let id = result?;
    Ok((id[0], id[1], 0))
}

pub fn die_select_1<P: Programmer>(bus: &mut P, die: u8) -> Result<()> {
    bus.chip_select(true)?;
    let result = bus.write(&[op::DIE_SELECT, die]);
    bus.chip_select(false)?;
    result
}

/// Die select through feature register 0xD0 bit 0x40 (Micron).
pub fn die_select_2<P: Programmer>(bus: &mut P, die: u8) -> Result<()> {
    let mut feature = get_feature(bus, reg::FEATURE_4)?;
    if die == 0 {
        feature &= !DIE_SELECT_BIT;
    } else {
        feature |= DIE_SELECT_BIT;
    }
    set_feature(bus, reg::FEATURE_4, feature)
}
