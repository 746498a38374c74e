//! Chip descriptors for every device family the programmer speaks to.
//!
//! A descriptor is a static table row. For SPI NAND the row also carries the
//! per-vendor policies (block-unlock plan, ECC status scheme, program-load
//! ordering) so the engine can stay a single interpreter loop instead of a
//! cascade of manufacturer conditionals.

use super::ecc::EccScheme;

/// SPI NOR flash table entry.
#[derive(Debug, Clone, Copy)]
pub struct NorChip {
    pub name: &'static str,
    /// Manufacturer byte, first byte of the 0x9F reply.
    pub mfr_id: u8,
    /// Remaining four ID bytes, big-endian.
    pub jedec_id: u32,
    pub sector_size: u32,
    pub n_sectors: u32,
    /// Device needs 32-bit addresses for read/erase/program.
    pub addr4b: bool,
}

impl NorChip {
    pub const fn new(
        name: &'static str,
        mfr_id: u8,
        jedec_id: u32,
        sector_size: u32,
        n_sectors: u32,
        addr4b: bool,
    ) -> Self {
        Self {
            name,
            mfr_id,
            jedec_id,
            sector_size,
            n_sectors,
            addr4b,
        }
    }

    pub fn total_size(&self) -> u32 {
        self.sector_size * self.n_sectors
    }
}

/// Where the dummy byte sits in a read-from-cache sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DummyByte {
    /// Dummy byte before the column address.
    Prepend,
    /// Dummy byte after the column address.
    Append,
    /// No dummy byte at all.
    None,
}

/// Read-from-cache bus width. The opcode follows the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    Single,
    Dual,
    Quad,
}

/// Program-load bus width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Single,
    Quad,
}

/// How a multi-die package selects the active die.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DieSelect {
    /// Explicit die-select command 0xC2.
    Command,
    /// Bit 0x40 of feature register 0xD0 (Micron).
    Feature,
}

/// Structural capabilities of a NAND part.
#[derive(Debug, Clone, Copy, Default)]
pub struct NandFeatures {
    /// Column-address MSB carries a plane-select bit.
    pub plane_select: bool,
    pub die_select: Option<DieSelect>,
}

impl NandFeatures {
    pub const NONE: Self = Self {
        plane_select: false,
        die_select: None,
    };
    pub const PLANE: Self = Self {
        plane_select: true,
        die_select: None,
    };
    pub const DIE_CMD: Self = Self {
        plane_select: false,
        die_select: Some(DieSelect::Command),
    };
    pub const PLANE_DIE_FEATURE: Self = Self {
        plane_select: true,
        die_select: Some(DieSelect::Feature),
    };
}

/// One step of an unlock plan.
#[derive(Debug, Clone, Copy)]
pub enum RegOp {
    /// Read the register, AND with `and`, OR with `or`, write it back.
    Update { reg: u8, and: u8, or: u8 },
    /// Write an immediate value.
    Write { reg: u8, value: u8 },
}

/// The register program run after probe to clear block protection and set
/// the vendor's baseline feature bits.
#[derive(Debug, Clone, Copy)]
pub struct UnlockPlan {
    /// Run the program once per die instead of once per chip.
    pub per_die: bool,
    pub ops: &'static [RegOp],
}

/// Whether program-load precedes or follows write-enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramOrder {
    LoadThenEnable,
    EnableThenLoad,
}

/// SPI NAND flash table entry.
#[derive(Debug, Clone, Copy)]
pub struct NandChip {
    pub mfr_id: u8,
    pub dev_id: u8,
    /// Second device-ID byte for parts that report one; `None` matches any.
    pub dev_id_2: Option<u8>,
    pub name: &'static str,
    pub device_size: u32,
    pub page_size: u32,
    /// Block size.
    pub erase_size: u32,
    pub oob_size: u32,
    pub dummy: DummyByte,
    pub read_mode: ReadMode,
    pub write_mode: WriteMode,
    pub features: NandFeatures,
    pub unlock: UnlockPlan,
    pub ecc: EccScheme,
    /// Feature register holding the ECC-enable bit (0xB0, or 0x90 on the
    /// PN/FM/FORESEE/XTX-B families).
    pub ecc_ctrl_reg: u8,
    pub program_order: ProgramOrder,
}

impl NandChip {
    pub fn pages_per_block(&self) -> u32 {
        self.erase_size / self.page_size
    }
}

/// SPI EEPROM (25xxx) table entry.
#[derive(Debug, Clone, Copy)]
pub struct SpiEepromChip {
    pub name: &'static str,
    pub total_bytes: u32,
    /// Number of address bits; decides 1/2/3-byte addressing and the A8
    /// opcode bit on 9-bit parts.
    pub addr_bits: u8,
}

/// I2C EEPROM (24Cxx) table entry.
#[derive(Debug, Clone, Copy)]
pub struct I2cEepromChip {
    pub name: &'static str,
    pub size: u32,
    /// Data-address bytes following the device address.
    pub addr_bytes: u8,
    /// Mask for the bank bits folded into the device address.
    pub bank_mask: u8,
}

/// Microwire EEPROM (93Cxx) table entry.
#[derive(Debug, Clone, Copy)]
pub struct MwEepromChip {
    pub name: &'static str,
    pub size: u32,
}
