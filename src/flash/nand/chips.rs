//! SPI NAND chip table.
//!
//! Each row carries the device geometry plus the vendor policies the engine
//! interprets: the unlock register program, the ECC status scheme, the ECC
//! control register and the program-load ordering. Manufacturer IDs alias
//! across vendors (0xC8 covers GigaDevice, ESMT, Zentel and Mira; 0xA1
//! covers PN and FM), so rows are keyed by the {manufacturer, device} pair.

use crate::domain::{
    DummyByte, EccScheme, NandChip, NandFeatures, ProgramOrder, ReadMode, RegOp, UnlockPlan,
    WriteMode,
};
use crate::flash::nand::protocol::reg;

const SZ_512M: u32 = 0x0400_0000;
const SZ_1G: u32 = 0x0800_0000;
const SZ_2G: u32 = 0x1000_0000;
const SZ_4G: u32 = 0x2000_0000;
const P2K: u32 = 2048;
const P4K: u32 = 4096;
const B128K: u32 = 0x2_0000;
const B256K: u32 = 0x4_0000;
const O64: u32 = 64;
const O128: u32 = 128;
const O256: u32 = 256;

/// Clear the BP bits (mask 0xC1) and enable quad + internal features.
const UNLOCK_BP_C1_QUAD: UnlockPlan = UnlockPlan {
    per_die: false,
    ops: &[
        RegOp::Update {
            reg: reg::PROTECTION,
            and: 0xC1,
            or: 0,
        },
        RegOp::Update {
            reg: reg::FEATURE,
            and: 0xFF,
            or: 0x01,
        },
    ],
};

/// Clear the BP bits with the wider 0xC7 mask, no feature change.
const UNLOCK_BP_C7: UnlockPlan = UnlockPlan {
    per_die: false,
    ops: &[RegOp::Update {
        reg: reg::PROTECTION,
        and: 0xC7,
        or: 0,
    }],
};

/// 0xC7 BP clear plus quad enable.
const UNLOCK_BP_C7_QUAD: UnlockPlan = UnlockPlan {
    per_die: false,
    ops: &[
        RegOp::Update {
            reg: reg::PROTECTION,
            and: 0xC7,
            or: 0,
        },
        RegOp::Update {
            reg: reg::FEATURE,
            and: 0xFF,
            or: 0x01,
        },
    ],
};

/// FM S-series BP clear.
const UNLOCK_BP_87: UnlockPlan = UnlockPlan {
    per_die: false,
    ops: &[RegOp::Update {
        reg: reg::PROTECTION,
        and: 0x87,
        or: 0,
    }],
};

/// Winbond: open the SR-1 write window, unlock + quad, close the window.
/// Repeated per die on the stacked parts.
const UNLOCK_WINBOND: UnlockPlan = UnlockPlan {
    per_die: true,
    ops: &[
        RegOp::Write {
            reg: reg::FEATURE,
            value: 0x58,
        },
        RegOp::Write {
            reg: reg::PROTECTION,
            value: 0x81,
        },
        RegOp::Write {
            reg: reg::FEATURE,
            value: 0x18,
        },
    ],
};

/// ESMT LB-series: direct protection value, per die.
const UNLOCK_ESMT_LB: UnlockPlan = UnlockPlan {
    per_die: true,
    ops: &[RegOp::Write {
        reg: reg::PROTECTION,
        value: 0x83,
    }],
};

/// Micron: BP clear with the 0x83 mask on every die.
const UNLOCK_MICRON: UnlockPlan = UnlockPlan {
    per_die: true,
    ops: &[RegOp::Update {
        reg: reg::PROTECTION,
        and: 0x83,
        or: 0,
    }],
};

#[allow(clippy::too_many_arguments)]
const fn chip(
    mfr_id: u8,
    dev_id: u8,
    dev_id_2: Option<u8>,
    name: &'static str,
    device_size: u32,
    page_size: u32,
    erase_size: u32,
    oob_size: u32,
    features: NandFeatures,
    unlock: UnlockPlan,
    ecc: EccScheme,
) -> NandChip {
    NandChip {
        mfr_id,
        dev_id,
        dev_id_2,
        name,
        device_size,
        page_size,
        erase_size,
        oob_size,
        dummy: DummyByte::Append,
        read_mode: ReadMode::Single,
        write_mode: WriteMode::Single,
        features,
        unlock,
        ecc,
        ecc_ctrl_reg: reg::FEATURE,
        program_order: ProgramOrder::EnableThenLoad,
    }
}

impl NandChip {
    /// ECC enable lives in the dedicated 0x90 register on this part.
    const fn ecc_reg_90(mut self) -> Self {
        self.ecc_ctrl_reg = reg::ECC;
        self
    }

    /// Program flow loads the cache before write-enable on this part.
    const fn load_first(mut self) -> Self {
        self.program_order = ProgramOrder::LoadThenEnable;
        self
    }
}

use EccScheme as E;
use NandFeatures as F;

#[rustfmt::skip]
pub const CHIPS: &[NandChip] = &[
    // GigaDevice
    chip(0xC8, 0xF1, None, "GD5F1GQ4UAYIG", SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0xF2, None, "GD5F2GQ4UAYIG", SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0xD1, None, "GD5F1GQ4UBYIG", SZ_1G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0xC1, None, "GD5F1GQ4REYIG", SZ_1G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0xB1, None, "GD5F1GQ4UCYIG", SZ_1G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::WIDE_3BIT).load_first(),
    chip(0xC8, 0xD2, None, "GD5F2GQ4UBYIG", SZ_2G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0xD3, None, "GD5F1GQ4UEYIS", SZ_1G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0xD5, None, "GD5F2GQ4UE9IS", SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0xB2, None, "GD5F2GQ4UCYIG", SZ_2G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::WIDE_3BIT).load_first(),
    chip(0xC8, 0xD4, None, "GD5F4GQ4UBYIG", SZ_4G, P4K, B256K, O256, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0xB4, None, "GD5F4GQ4UCYIG", SZ_4G, P4K, B256K, O256, F::NONE, UNLOCK_BP_C1_QUAD, E::WIDE_3BIT).load_first(),
    chip(0xC8, 0x51, None, "GD5F1GQ5UEYIG", SZ_1G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0x41, None, "GD5F1GQ5REYIG", SZ_1G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0x52, None, "GD5F2GQ5UEYIG", SZ_2G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0x42, None, "GD5F2GQ5REYIG", SZ_2G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0x91, None, "GD5F1GM7UEYIG", SZ_1G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0x81, None, "GD5F1GM7REYIG", SZ_1G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0x92, None, "GD5F2GM7UEYIG", SZ_2G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0x82, None, "GD5F2GM7REYIG", SZ_2G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT).load_first(),

    // Mira (listed ahead of the aliasing 0xC8/0x21 parts)
    chip(0xC8, 0x21, None, "PSU1GS20BN",    SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7,      E::STANDARD_2BIT).load_first(),

    // ESMT
    chip(0xC8, 0x20, None, "F50L512M41A",   SZ_512M, P2K, B128K, O64, F::NONE, UNLOCK_BP_C7,     E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0x11, None, "F50D1G41LB",    SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_ESMT_LB,    E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0x01, None, "F50L1G41LB",    SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_ESMT_LB,    E::STANDARD_2BIT).load_first(),
    chip(0xC8, 0x0A, None, "F50L2G41LB",    SZ_2G, P2K, B128K, O64,  F::DIE_CMD, UNLOCK_ESMT_LB, E::STANDARD_2BIT).load_first(),

    // Zentel (aliases the ESMT id above; kept for the support list)
    chip(0xC8, 0x20, None, "A5U12A21ASC",   SZ_512M, P2K, B128K, O64, F::NONE, UNLOCK_BP_C7,     E::STANDARD_2BIT).load_first(),

    // Winbond
    chip(0xEF, 0xAE, Some(0x21), "W25N01KV", SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_WINBOND, E::STANDARD_2BIT),
    chip(0xEF, 0xAA, Some(0x21), "W25N01GV", SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_WINBOND, E::STANDARD_2BIT),
    chip(0xEF, 0xBA, Some(0x21), "W25N01GW", SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_WINBOND, E::STANDARD_2BIT),
    chip(0xEF, 0xAA, Some(0x22), "W25N02KV", SZ_2G, P2K, B128K, O128, F::NONE, UNLOCK_WINBOND, E::STANDARD_2BIT),
    chip(0xEF, 0xAA, Some(0x23), "W25N04KV", SZ_4G, P2K, B128K, O128, F::NONE, UNLOCK_WINBOND, E::STANDARD_2BIT),
    chip(0xEF, 0xBA, Some(0x23), "W25N04KW", SZ_4G, P2K, B128K, O128, F::NONE, UNLOCK_WINBOND, E::STANDARD_2BIT),
    chip(0xEF, 0xAB, Some(0x21), "W25M02GV", SZ_2G, P2K, B128K, O64,  F::DIE_CMD, UNLOCK_WINBOND, E::STANDARD_2BIT),

    // Macronix
    chip(0xC2, 0x12, None, "MX35LF1GE4AB",  SZ_1G, P2K, B128K, O64,  F::NONE,  UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xC2, 0x22, None, "MX35LF2GE4AB",  SZ_2G, P2K, B128K, O64,  F::PLANE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xC2, 0x20, None, "MX35LF2G14AC",  SZ_2G, P2K, B128K, O64,  F::PLANE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xC2, 0x26, Some(0x03), "MX35LF2GE4AD", SZ_2G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xC2, 0x14, Some(0x03), "MX35LF1G24AD", SZ_1G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xC2, 0x24, Some(0x03), "MX35LF2G24AD", SZ_2G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xC2, 0x35, Some(0x03), "MX35LF4G24AD", SZ_4G, P4K, B256K, O256, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xC2, 0x64, Some(0x03), "MX35LF2G24ADZ4I8", SZ_2G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xC2, 0x75, Some(0x03), "MX35LF4G24ADZ4I8", SZ_4G, P4K, B256K, O256, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xC2, 0x90, None, "MX35UF1G14AC",  SZ_1G, P2K, B128K, O64,  F::NONE,  UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xC2, 0xA0, None, "MX35UF2G14AC",  SZ_2G, P2K, B128K, O64,  F::PLANE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xC2, 0x96, Some(0x03), "MX35UF1GE4AD", SZ_1G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xC2, 0xA6, Some(0x03), "MX35UF2GE4AD", SZ_2G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xC2, 0xB7, Some(0x03), "MX35UF4GE4AD", SZ_4G, P4K, B256K, O256, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),

    // Etron
    chip(0xD5, 0x19, None, "EM73C044SNA",   SZ_512M, P2K, B128K, O64, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xD5, 0x11, None, "EM73C044SNB",   SZ_512M, P2K, B128K, O64, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xD5, 0x1D, None, "EM73C044SND",   SZ_512M, P2K, B128K, O64, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xD5, 0x09, None, "EM73C044SNF",   SZ_512M, P2K, B128K, O64, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xD5, 0x18, None, "EM73C044VCA",   SZ_512M, P2K, B128K, O64, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xD5, 0x1C, None, "EM73C044VCD",   SZ_512M, P2K, B128K, O64, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xD5, 0x12, None, "EM73D044SNA",   SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xD5, 0x0A, None, "EM73D044SNC",   SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xD5, 0x1E, None, "EM73D044SND",   SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xD5, 0x10, None, "EM73D044SNF",   SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xD5, 0x13, None, "EM73D044VCA",   SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xD5, 0x14, None, "EM73D044VCB",   SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xD5, 0x17, None, "EM73D044VCD",   SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xD5, 0x1F, None, "EM73D044VCG",   SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xD5, 0x1B, None, "EM73D044VCH",   SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
    chip(0xD5, 0x03, None, "EM73E044SNA",   SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),

    // Toshiba / Kioxia
    chip(0x98, 0xC2, None, "TC58CVG0S3H",   SZ_1G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C7, E::STANDARD_2BIT),
    chip(0x98, 0xCB, None, "TC58CVG1S3H",   SZ_2G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C7, E::STANDARD_2BIT),
    chip(0x98, 0xCD, None, "TC58CVG2S0H",   SZ_4G, P4K, B256K, O256, F::NONE, UNLOCK_BP_C7, E::STANDARD_2BIT),
    chip(0x98, 0xED, None, "TC58CVG2S0HRAIJ", SZ_4G, P4K, B256K, O256, F::NONE, UNLOCK_BP_C7, E::STANDARD_2BIT),

    // Micron
    chip(0x2C, 0x12, None, "MT29F1G01AA",   SZ_1G, P2K, B128K, O64,  F::NONE,  UNLOCK_MICRON, E::MICRON),
    chip(0x2C, 0x22, None, "MT29F2G01AA",   SZ_2G, P2K, B128K, O64,  F::PLANE, UNLOCK_MICRON, E::MICRON),
    chip(0x2C, 0x32, None, "MT29F4G01AA",   SZ_4G, P2K, B128K, O64,  F::PLANE, UNLOCK_MICRON, E::MICRON),
    chip(0x2C, 0x14, None, "MT29F1G01AB",   SZ_1G, P2K, B128K, O128, F::NONE,  UNLOCK_MICRON, E::MICRON),
    chip(0x2C, 0x24, None, "MT29F2G01ABA",  SZ_2G, P2K, B128K, O128, F::PLANE, UNLOCK_MICRON, E::MICRON),
    chip(0x2C, 0x25, None, "MT29F2G01ABB",  SZ_2G, P2K, B128K, O128, F::PLANE, UNLOCK_MICRON, E::MICRON),
    chip(0x2C, 0x34, None, "MT29F4G01ABA",  SZ_4G, P4K, B256K, O256, F::NONE,  UNLOCK_MICRON, E::MICRON),
    chip(0x2C, 0x35, None, "MT29F4G01ABB",  SZ_4G, P4K, B256K, O256, F::NONE,  UNLOCK_MICRON, E::MICRON),
    chip(0x2C, 0x36, None, "MT29F4G01AD",   SZ_4G, P2K, B128K, O128, F::PLANE_DIE_FEATURE, UNLOCK_MICRON, E::MICRON),

    // HeYang
    chip(0xC9, 0x51, None, "HYF1GQ4UAACAE", SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::STANDARD_2BIT),
    chip(0xC9, 0x52, None, "HYF2GQ4UAACAE", SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::STANDARD_2BIT),
    chip(0xC9, 0x5A, None, "HYF2GQ4UHCCAE", SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::STANDARD_2BIT),
    chip(0xC9, 0x21, None, "HYF1GQ4UDACAE", SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::STANDARD_2BIT),
    chip(0xC9, 0x22, None, "HYF2GQ4UDACAE", SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::STANDARD_2BIT),
    chip(0xC9, 0x15, None, "HYF1GQ4UTACAE", SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::STANDARD_2BIT),
    chip(0xC9, 0x25, None, "HYF2GQ4UTACAE", SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::STANDARD_2BIT),

    // Paragon
    chip(0xA1, 0xE1, None, "PN26G01AWSIUG", SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::STANDARD_2BIT).ecc_reg_90().load_first(),
    chip(0xA1, 0xE2, None, "PN26G02AWSIUG", SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::STANDARD_2BIT).ecc_reg_90().load_first(),
    chip(0xA1, 0xC1, None, "PN26Q01AWSIUG", SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::STANDARD_2BIT).ecc_reg_90().load_first(),

    // ATO
    chip(0x9B, 0x12, None, "ATO25D1GA",     SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7, E::STANDARD_2BIT),
    chip(0x9B, 0xF1, None, "ATO25D2GA",     SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7, E::STANDARD_2BIT).load_first(),
    chip(0xAD, 0xDA, None, "ATO25D2GB",     SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7, E::STANDARD_2BIT).load_first(),

    // FM
    chip(0xA1, 0xA1, None, "FM25S01",       SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_87, E::STANDARD_2BIT).ecc_reg_90().load_first(),
    chip(0xA1, 0xE4, None, "FM25S01A",      SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_87, E::STANDARD_2BIT).ecc_reg_90().load_first(),
    chip(0xA1, 0xE5, None, "FM25S02A",      SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_87, E::STANDARD_2BIT).ecc_reg_90().load_first(),
    chip(0xA1, 0xD1, None, "FM25G01B",      SZ_1G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C7_QUAD, E::WIDE_3BIT).ecc_reg_90().load_first(),
    chip(0xA1, 0xD2, None, "FM25G02B",      SZ_2G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C7_QUAD, E::WIDE_3BIT).ecc_reg_90().load_first(),
    chip(0xA1, 0xF2, None, "FM25G02",       SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT).ecc_reg_90().load_first(),
    chip(0xA1, 0x92, None, "FM25G02C",      SZ_2G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C7_QUAD, E::WIDE_3BIT).ecc_reg_90().load_first(),

    // XTX
    chip(0x0B, 0xE1, None, "XT26G01A",      SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C1_QUAD, E::XTX_A).load_first(),
    chip(0x0B, 0xE2, None, "XT26G02A",      SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::STANDARD_2BIT).load_first(),
    chip(0x0B, 0xF2, None, "XT26G02B",      SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::WIDE_3BIT).ecc_reg_90().load_first(),
    chip(0x0B, 0x11, None, "XT26G01C",      SZ_1G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C1_QUAD, E::XTX_C).load_first(),
    chip(0x0B, 0x12, None, "XT26G02C",      SZ_2G, P2K, B128K, O128, F::NONE, UNLOCK_BP_C7_QUAD, E::XTX_C).load_first(),

    // BIWIN
    chip(0xBC, 0xB1, None, "BWJX08U",       SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::STANDARD_2BIT),
    chip(0xBC, 0xB2, None, "BWET08U",       SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::STANDARD_2BIT),

    // FORESEE
    chip(0xCD, 0xA1, None, "FS35ND01GD1F1", SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::WIDE_3BIT).ecc_reg_90().load_first(),
    chip(0xCD, 0xB1, None, "FS35ND01GS1F1", SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::WIDE_3BIT).ecc_reg_90().load_first(),
    chip(0xCD, 0xA2, None, "FS35ND02GS2F1", SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::WIDE_3BIT).ecc_reg_90().load_first(),
    chip(0xCD, 0xB2, None, "FS35ND02GD1F1", SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::WIDE_3BIT).ecc_reg_90().load_first(),
    chip(0xCD, 0xEA, None, "FS35ND01GS1Y2", SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::WIDE_3BIT).ecc_reg_90().load_first(),
    chip(0xCD, 0xEB, None, "FS35ND02GS3Y2", SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::WIDE_3BIT).ecc_reg_90().load_first(),
    chip(0xCD, 0xEC, None, "FS35ND04GS2Y2", SZ_4G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::WIDE_3BIT).ecc_reg_90().load_first(),
    chip(0xCD, 0x60, None, "F35UQA512M",    SZ_512M, P2K, B128K, O64, F::NONE, UNLOCK_BP_C7_QUAD, E::WIDE_3BIT).ecc_reg_90().load_first(),
    chip(0xCD, 0x61, None, "F35UQA001G",    SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::WIDE_3BIT).ecc_reg_90().load_first(),
    chip(0xCD, 0x62, None, "F35UQA002G",    SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::WIDE_3BIT).ecc_reg_90().load_first(),
    chip(0xCD, 0x70, None, "F35SQA512M",    SZ_512M, P2K, B128K, O64, F::NONE, UNLOCK_BP_C7_QUAD, E::WIDE_3BIT).ecc_reg_90().load_first(),
    chip(0xCD, 0x71, None, "F35SQA001G",    SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::WIDE_3BIT).ecc_reg_90().load_first(),
    chip(0xCD, 0x72, None, "F35SQA002G",    SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7_QUAD, E::WIDE_3BIT).ecc_reg_90().load_first(),

    // Dosilicon
    chip(0xE5, 0x71, None, "DS35Q1GA",      SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7, E::STANDARD_2BIT),
    chip(0xE5, 0x21, None, "DS35M1GA",      SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7, E::STANDARD_2BIT),
    chip(0xE5, 0x72, None, "DS35Q2GA",      SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7, E::STANDARD_2BIT),
    chip(0xE5, 0x22, None, "DS35M2GA",      SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7, E::STANDARD_2BIT),
    chip(0xE5, 0xF2, None, "DS35Q2GB",      SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7, E::STANDARD_2BIT),
    chip(0xE5, 0xA2, None, "DS35M2GB",      SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7, E::STANDARD_2BIT),

    // Fison
    chip(0x6B, 0x00, None, "CS11G0T0A0AA",  SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7, E::WIDE_3BIT).load_first(),
    chip(0x6B, 0x01, None, "CS11G1T0A0AA",  SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7, E::WIDE_3BIT).load_first(),
    chip(0x6B, 0x10, None, "CS11G0G0A0AA",  SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7, E::WIDE_3BIT).load_first(),

    // TYM
    chip(0x19, 0x01, None, "TYM25D2GA01",   SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7, E::STANDARD_2BIT).load_first(),
    chip(0x19, 0x02, None, "TYM25D2GA02",   SZ_2G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7, E::STANDARD_2BIT).load_first(),
    chip(0x19, 0x03, None, "TYM25D1GA03",   SZ_1G, P2K, B128K, O64,  F::NONE, UNLOCK_BP_C7, E::STANDARD_2BIT).load_first(),

    // XinCun
    chip(0x9C, 0x01, Some(0x01), "XCSP1AAWHNT", SZ_1G, P2K, B128K, O64, F::NONE, UNLOCK_BP_C1_QUAD, E::STANDARD_2BIT),
];

/// Match by {manufacturer, device}, requiring the second device byte only
/// when the table row specifies one. First hit wins.
pub fn find(mfr: u8, dev: u8, dev2: u8) -> Option<&'static NandChip> {
    CHIPS.iter().find(|c| {
        c.mfr_id == mfr && c.dev_id == dev && c.dev_id_2.map_or(true, |d2| d2 == dev2)
    })
}

pub fn print_list() {
    println!("SPI NAND Flash Support List:");
    for (i, chip) in CHIPS.iter().enumerate() {
        println!("{:03}. {}", i + 1, chip.name);
    }
}
