//! SPI NOR chip table.
//!
//! {manufacturer byte, 32-bit JEDEC id, sector geometry, 4-byte addressing}.
//! Matching is exact on the full id or on its upper 16 bits, first hit wins.

use crate::domain::NorChip;

const K64: u32 = 64 * 1024;
const K256: u32 = 256 * 1024;

#[rustfmt::skip]
pub const CHIPS: &[NorChip] = &[
    NorChip::new("AT26DF161",    0x1F, 0x46000000, K64,  32,   false),
    NorChip::new("AT25DF321",    0x1F, 0x47000000, K64,  64,   false),

    NorChip::new("A25L10PU",     0x37, 0x20110000, K64,  2,    false),
    NorChip::new("A25L20PU",     0x37, 0x20120000, K64,  4,    false),
    NorChip::new("A25L040",      0x37, 0x30130000, K64,  8,    false),
    NorChip::new("A25LQ080",     0x37, 0x40140000, K64,  16,   false),
    NorChip::new("A25L080",      0x37, 0x30140000, K64,  16,   false),
    NorChip::new("A25LQ16",      0x37, 0x40150000, K64,  32,   false),
    NorChip::new("A25LQ32",      0x37, 0x40160000, K64,  64,   false),
    NorChip::new("A25L032",      0x37, 0x30160000, K64,  64,   false),
    NorChip::new("A25LQ64",      0x37, 0x40170000, K64,  128,  false),

    NorChip::new("ES25P10",      0x4A, 0x20110000, K64,  4,    false),
    NorChip::new("ES25P20",      0x4A, 0x20120000, K64,  8,    false),
    NorChip::new("ES25P40",      0x4A, 0x20130000, K64,  16,   false),
    NorChip::new("ES25P80",      0x4A, 0x20140000, K64,  32,   false),
    NorChip::new("ES25P16",      0x4A, 0x20150000, K64,  64,   false),
    NorChip::new("ES25P32",      0x4A, 0x20160000, K64,  128,  false),
    NorChip::new("ES25M40A",     0x4A, 0x32130000, K64,  16,   false),
    NorChip::new("ES25M80A",     0x4A, 0x32140000, K64,  32,   false),
    NorChip::new("ES25M16A",     0x4A, 0x32150000, K64,  64,   false),

    NorChip::new("DQ25Q64AS",    0x54, 0x40170000, K64,  128,  false),
    NorChip::new("DQ25Q128AL",   0x54, 0x60180000, K64,  256,  false),

    NorChip::new("F25L016",      0x8C, 0x21150000, K64,  32,   false),
    NorChip::new("F25L16QA",     0x8C, 0x41158C41, K64,  32,   false),
    NorChip::new("F25L032",      0x8C, 0x21160000, K64,  64,   false),
    NorChip::new("F25L32QA",     0x8C, 0x41168C41, K64,  64,   false),
    NorChip::new("F25L064",      0x8C, 0x21170000, K64,  128,  false),
    NorChip::new("F25L64QA",     0x8C, 0x41170000, K64,  128,  false),

    NorChip::new("GD25Q20C",     0xC8, 0x40120000, K64,  4,    false),
    NorChip::new("GD25Q40C",     0xC8, 0x40130000, K64,  8,    false),
    NorChip::new("GD25Q80C",     0xC8, 0x40140000, K64,  16,   false),
    NorChip::new("GD25LQ80C",    0xC8, 0x60140000, K64,  16,   false),
    NorChip::new("GD25WD80C",    0xC8, 0x64140000, K64,  16,   false),
    NorChip::new("GD25WQ80E",    0xC8, 0x65140000, K64,  16,   false),
    NorChip::new("GD25Q16",      0xC8, 0x40150000, K64,  32,   false),
    NorChip::new("GD25LQ16C",    0xC8, 0x60150000, K64,  32,   false),
    NorChip::new("GD25WQ16E",    0xC8, 0x65150000, K64,  32,   false),
    NorChip::new("GD25Q32",      0xC8, 0x40160000, K64,  64,   false),
    NorChip::new("GD25LQ32E",    0xC8, 0x60160000, K64,  64,   false),
    NorChip::new("GD25WQ32E",    0xC8, 0x65160000, K64,  64,   false),
    NorChip::new("GD25Q64CSIG",  0xC8, 0x4017C840, K64,  128,  false),
    NorChip::new("GD25LQ64E",    0xC8, 0x60170000, K64,  128,  false),
    NorChip::new("GD25Q128CSIG", 0xC8, 0x4018C840, K64,  256,  false),
    NorChip::new("GD25LQ128D",   0xC8, 0x60180000, K64,  256,  false),
    NorChip::new("GD25F256F",    0xC8, 0x43190000, K64,  512,  true),
    NorChip::new("GD25Q256CSIG", 0xC8, 0x4019C840, K64,  512,  true),

    NorChip::new("MX25L4005A",   0xC2, 0x2013C220, K64,  8,    false),
    NorChip::new("MX25L8005M",   0xC2, 0x2014C220, K64,  16,   false),
    NorChip::new("MX25L1605D",   0xC2, 0x2015C220, K64,  32,   false),
    NorChip::new("MX25U1635F",   0xC2, 0x2535C220, K64,  32,   false),
    NorChip::new("MX25L3205D",   0xC2, 0x2016C220, K64,  64,   false),
    NorChip::new("MX25U3235F",   0xC2, 0x2536C220, K64,  64,   false),
    NorChip::new("MX25L6405D",   0xC2, 0x2017C220, K64,  128,  false),
    NorChip::new("MX25U6435F",   0xC2, 0x2537C220, K64,  128,  false),
    NorChip::new("MX25L12805D",  0xC2, 0x2018C220, K64,  256,  false),
    NorChip::new("MX25U12835F",  0xC2, 0x2538C220, K64,  256,  false),
    NorChip::new("MX25L25635E",  0xC2, 0x2019C220, K64,  512,  true),
    NorChip::new("MX25U25643G",  0xC2, 0x2539C220, K64,  512,  true),
    NorChip::new("MX25L51245G",  0xC2, 0x201AC220, K64,  1024, true),
    NorChip::new("MX25U51245G",  0xC2, 0x253AC220, K64,  1024, true),

    NorChip::new("YC25Q128",     0xD8, 0x4018D840, K64,  256,  false),

    NorChip::new("FL016AIF",     0x01, 0x02140000, K64,  32,   false),
    NorChip::new("FL064AIF",     0x01, 0x02160000, K64,  128,  false),
    NorChip::new("S25FL016P",    0x01, 0x02144D00, K64,  32,   false),
    NorChip::new("S25FL032P",    0x01, 0x02154D00, K64,  64,   false),
    NorChip::new("S25FL064P",    0x01, 0x02164D00, K64,  128,  false),
    NorChip::new("S25FL128P",    0x01, 0x20180301, K64,  256,  false),
    NorChip::new("S25FL129P",    0x01, 0x20184D01, K64,  256,  false),
    NorChip::new("S25FL256S",    0x01, 0x02194D01, K64,  512,  true),
    NorChip::new("S25FL512S",    0x01, 0x02204D00, K256, 256,  true),
    NorChip::new("S25FL116K",    0x01, 0x40150140, K64,  32,   false),
    NorChip::new("S25FL132K",    0x01, 0x40160140, K64,  64,   false),
    NorChip::new("S25FL164K",    0x01, 0x40170140, K64,  128,  false),

    NorChip::new("EN25F16",      0x1C, 0x31151C31, K64,  32,   false),
    NorChip::new("EN25Q16",      0x1C, 0x30151C30, K64,  32,   false),
    NorChip::new("EN25QH16",     0x1C, 0x70151C70, K64,  32,   false),
    NorChip::new("EN25Q32B",     0x1C, 0x30161C30, K64,  64,   false),
    NorChip::new("EN25F32",      0x1C, 0x31161C31, K64,  64,   false),
    NorChip::new("EN25F64",      0x1C, 0x20171C20, K64,  128,  false),
    NorChip::new("EN25Q64",      0x1C, 0x30171C30, K64,  128,  false),
    NorChip::new("GM25Q64A",     0x1C, 0x40171C40, K64,  128,  false),
    NorChip::new("EN25QA64A",    0x1C, 0x60170000, K64,  128,  false),
    NorChip::new("EN25XQ128A",   0x1C, 0x71181C71, K64,  256,  false),
    NorChip::new("EN25QH64A",    0x1C, 0x70171C70, K64,  128,  false),
    NorChip::new("EN25Q128",     0x1C, 0x30181C30, K64,  256,  false),
    NorChip::new("EN25QA128A",   0x1C, 0x60180000, K64,  256,  false),
    NorChip::new("EN25QH128A",   0x1C, 0x70181C70, K64,  256,  false),
    NorChip::new("GM25Q128A",    0x1C, 0x40181C40, K64,  256,  false),
    NorChip::new("EN25Q256",     0x1C, 0x70191C70, K64,  512,  true),

    NorChip::new("W25X05",       0xEF, 0x30100000, K64,  1,    false),
    NorChip::new("W25X10",       0xEF, 0x30110000, K64,  2,    false),
    NorChip::new("W25X20",       0xEF, 0x30120000, K64,  4,    false),
    NorChip::new("W25X40",       0xEF, 0x30130000, K64,  8,    false),
    NorChip::new("W25X80",       0xEF, 0x30140000, K64,  16,   false),
    NorChip::new("W25X16",       0xEF, 0x30150000, K64,  32,   false),
    NorChip::new("W25X32VS",     0xEF, 0x30160000, K64,  64,   false),
    NorChip::new("W25X64",       0xEF, 0x30170000, K64,  128,  false),
    NorChip::new("W25Q20CL",     0xEF, 0x40120000, K64,  4,    false),
    NorChip::new("W25Q20BW",     0xEF, 0x50120000, K64,  4,    false),
    NorChip::new("W25Q20EW",     0xEF, 0x60120000, K64,  4,    false),
    NorChip::new("W25Q80",       0xEF, 0x50140000, K64,  16,   false),
    NorChip::new("W25Q80BL",     0xEF, 0x40140000, K64,  16,   false),
    NorChip::new("W25Q16JQ",     0xEF, 0x40150000, K64,  32,   false),
    NorChip::new("W25Q16JM",     0xEF, 0x70150000, K64,  32,   false),
    NorChip::new("W25Q32BV",     0xEF, 0x40160000, K64,  64,   false),
    NorChip::new("W25Q32DW",     0xEF, 0x60160000, K64,  64,   false),
    NorChip::new("W25Q32JWIM",   0xEF, 0x80160000, K64,  64,   false),
    NorChip::new("W25Q64BV",     0xEF, 0x40170000, K64,  128,  false),
    NorChip::new("W25Q64DW",     0xEF, 0x60170000, K64,  128,  false),
    NorChip::new("W25Q64JVIM",   0xEF, 0x70170000, K64,  128,  false),
    NorChip::new("W25Q64JWIM",   0xEF, 0x80170000, K64,  128,  false),
    NorChip::new("W25Q128BV",    0xEF, 0x40180000, K64,  256,  false),
    NorChip::new("W25Q128FW",    0xEF, 0x60180000, K64,  256,  false),
    NorChip::new("W25Q256FV",    0xEF, 0x40190000, K64,  512,  true),
    NorChip::new("W25Q256JW",    0xEF, 0x60190000, K64,  512,  true),
    NorChip::new("W25Q256JWIM",  0xEF, 0x80190000, K64,  512,  true),
    NorChip::new("W25Q512JV",    0xEF, 0x40200000, K64,  1024, true),
    NorChip::new("W25Q512JVIM",  0xEF, 0x70200000, K64,  1024, true),
    NorChip::new("W25Q512NW",    0xEF, 0x60200000, K64,  1024, true),
    NorChip::new("W25Q512NWIM",  0xEF, 0x80200000, K64,  1024, true),

    NorChip::new("M25P05",       0x20, 0x20100000, K64,  1,    false),
    NorChip::new("M25P10",       0x20, 0x20110000, K64,  2,    false),
    NorChip::new("M25P20",       0x20, 0x20120000, K64,  4,    false),
    NorChip::new("M25P40",       0x20, 0x20130000, K64,  8,    false),
    NorChip::new("M25P80",       0x20, 0x20140000, K64,  16,   false),
    NorChip::new("M25P16",       0x20, 0x20150000, K64,  32,   false),
    NorChip::new("M25P32",       0x20, 0x20160000, K64,  64,   false),
    NorChip::new("M25P64",       0x20, 0x20170000, K64,  128,  false),
    NorChip::new("M25P128",      0x20, 0x20180000, K64,  256,  false),
    NorChip::new("N25Q016A",     0x20, 0xBB151000, K64,  32,   false),
    NorChip::new("N25Q032A",     0x20, 0xBA161000, K64,  64,   false),
    NorChip::new("N25Q032A",     0x20, 0xBB161000, K64,  64,   false),
    NorChip::new("N25Q064A",     0x20, 0xBA171000, K64,  128,  false),
    NorChip::new("N25Q064A",     0x20, 0xBB171000, K64,  128,  false),
    NorChip::new("N25Q128A",     0x20, 0xBA181000, K64,  256,  false),
    NorChip::new("N25Q128A",     0x20, 0xBB181000, K64,  256,  false),
    NorChip::new("N25Q256A",     0x20, 0xBA191000, K64,  512,  true),
    NorChip::new("N25Q512A",     0x20, 0xBA201000, K64,  1024, true),
    NorChip::new("MT25QL64AB",   0x20, 0xBA171000, K64,  128,  false),
    NorChip::new("MT25QU64AB",   0x20, 0xBB171000, K64,  128,  false),
    NorChip::new("MT25QL128AB",  0x20, 0xBA181000, K64,  256,  false),
    NorChip::new("MT25QU128AB",  0x20, 0xBB181000, K64,  256,  false),
    NorChip::new("MT25QL256AB",  0x20, 0xBA191000, K64,  512,  true),
    NorChip::new("MT25QU256AB",  0x20, 0xBB191000, K64,  512,  true),
    NorChip::new("MT25QL512AB",  0x20, 0xBA201044, K64,  1024, true),
    NorChip::new("MT25QU512AB",  0x20, 0xBB201044, K64,  1024, true),
    NorChip::new("XM25QH10B",    0x20, 0x40110000, K64,  2,    false),
    NorChip::new("XM25QH20B",    0x20, 0x40120000, K64,  4,    false),
    NorChip::new("XM25QU41B",    0x20, 0x50130000, K64,  8,    false),
    NorChip::new("XM25QH40B",    0x20, 0x40130000, K64,  8,    false),
    NorChip::new("XM25QU80B",    0x20, 0x50140000, K64,  16,   false),
    NorChip::new("XM25QH80B",    0x20, 0x40140000, K64,  16,   false),
    NorChip::new("XM25QU16B",    0x20, 0x50150000, K64,  32,   false),
    NorChip::new("XM25QH16C",    0x20, 0x40150000, K64,  32,   false),
    NorChip::new("XM25QW16C",    0x20, 0x42150000, K64,  32,   false),
    NorChip::new("XM25QH32B",    0x20, 0x40160000, K64,  64,   false),
    NorChip::new("XM25QW32C",    0x20, 0x42160000, K64,  64,   false),
    NorChip::new("XM25LU32C",    0x20, 0x50160000, K64,  64,   false),
    NorChip::new("XM25QH32A",    0x20, 0x70160000, K64,  64,   false),
    NorChip::new("XM25QH64C",    0x20, 0x40170000, K64,  128,  false),
    NorChip::new("XM25LU64C",    0x20, 0x41170000, K64,  128,  false),
    NorChip::new("XM25QW64C",    0x20, 0x42170000, K64,  128,  false),
    NorChip::new("XM25QH64A",    0x20, 0x70170000, K64,  128,  false),
    NorChip::new("XM25QH128A",   0x20, 0x70182070, K64,  256,  false),
    NorChip::new("XM25QH128C",   0x20, 0x40182070, K64,  256,  false),
    NorChip::new("XM25LU128C",   0x20, 0x41180000, K64,  256,  false),
    NorChip::new("XM25QW128C",   0x20, 0x42180000, K64,  256,  false),
    NorChip::new("XM25QH256C",   0x20, 0x40190000, K64,  512,  true),
    NorChip::new("XM25QU256C",   0x20, 0x41190000, K64,  512,  true),
    NorChip::new("XM25QW256C",   0x20, 0x42190000, K64,  512,  true),
    NorChip::new("XM25QH512C",   0x20, 0x40200000, K64,  1024, true),
    NorChip::new("XM25QU512C",   0x20, 0x41200000, K64,  1024, true),
    NorChip::new("XM25QW512C",   0x20, 0x42200000, K64,  1024, true),

    NorChip::new("MD25D20",      0x51, 0x40120000, K64,  4,    false),
    NorChip::new("MD25D40",      0x51, 0x40130000, K64,  8,    false),

    NorChip::new("ZB25VQ16",     0x5E, 0x40150000, K64,  32,   false),
    NorChip::new("ZB25LQ16",     0x5E, 0x50150000, K64,  32,   false),
    NorChip::new("ZB25VQ32",     0x5E, 0x40160000, K64,  64,   false),
    NorChip::new("ZB25LQ32",     0x5E, 0x50160000, K64,  64,   false),
    NorChip::new("ZB25VQ64",     0x5E, 0x40170000, K64,  128,  false),
    NorChip::new("ZB25LQ64",     0x5E, 0x50170000, K64,  128,  false),
    NorChip::new("ZB25VQ128",    0x5E, 0x40180000, K64,  256,  false),
    NorChip::new("ZB25LQ128",    0x5E, 0x50180000, K64,  256,  false),

    NorChip::new("LE25U20AMB",   0x62, 0x06120000, K64,  4,    false),
    NorChip::new("LE25U40CMC",   0x62, 0x06130000, K64,  8,    false),

    NorChip::new("BY25D05AS",    0x68, 0x40100000, K64,  1,    false),
    NorChip::new("BY25D10AS",    0x68, 0x40110000, K64,  2,    false),
    NorChip::new("BY25D20AS",    0x68, 0x40120000, K64,  4,    false),
    NorChip::new("BY25D40AS",    0x68, 0x40130000, K64,  8,    false),
    NorChip::new("BY25Q40BL",    0x68, 0x10130000, K64,  8,    false),
    NorChip::new("BY25Q40BL",    0x68, 0x60130000, K64,  8,    false),
    NorChip::new("BY25Q80BS",    0x68, 0x40140000, K64,  16,   false),
    NorChip::new("BY25Q16BS",    0x68, 0x40150000, K64,  32,   false),
    NorChip::new("BY25Q16BL",    0x68, 0x10150000, K64,  32,   false),
    NorChip::new("BY25Q32BS",    0x68, 0x40160000, K64,  64,   false),
    NorChip::new("BY25Q32AL",    0x68, 0x60160000, K64,  64,   false),
    NorChip::new("BY25Q64AS",    0x68, 0x40170000, K64,  128,  false),
    NorChip::new("BY25Q64AL",    0x68, 0x60170000, K64,  128,  false),
    NorChip::new("BY25Q128AS",   0x68, 0x40180000, K64,  256,  false),
    NorChip::new("BY25Q128EL",   0x68, 0x60180000, K64,  256,  false),
    NorChip::new("BY25Q256ES",   0x68, 0x40190000, K64,  512,  true),

    NorChip::new("XT25F04D",     0x0B, 0x40130000, K64,  8,    false),
    NorChip::new("XT25F08B",     0x0B, 0x40140000, K64,  16,   false),
    NorChip::new("XT25F08D",     0x0B, 0x60140000, K64,  16,   false),
    NorChip::new("XT25F16B",     0x0B, 0x40150000, K64,  32,   false),
    NorChip::new("XT25Q16D",     0x0B, 0x60150000, K64,  32,   false),
    NorChip::new("XT25F32B",     0x0B, 0x40160000, K64,  64,   false),
    NorChip::new("XT25F64B",     0x0B, 0x40170000, K64,  128,  false),
    NorChip::new("XT25Q64D",     0x0B, 0x60170000, K64,  128,  false),
    NorChip::new("XT25F128B",    0x0B, 0x40180000, K64,  256,  false),
    NorChip::new("XT25F128D",    0x0B, 0x60180000, K64,  256,  false),

    NorChip::new("PM25LQ016",    0x7F, 0x9D450000, K64,  32,   false),
    NorChip::new("PM25LQ032",    0x7F, 0x9D460000, K64,  64,   false),
    NorChip::new("PM25LQ064",    0x7F, 0x9D470000, K64,  128,  false),
    NorChip::new("PM25LQ128",    0x7F, 0x9D480000, K64,  256,  false),

    NorChip::new("IS25LQ010",    0x9D, 0x40110000, K64,  2,    false),
    NorChip::new("IS25LQ020",    0x9D, 0x40120000, K64,  4,    false),
    NorChip::new("IS25WP040D",   0x9D, 0x70130000, K64,  8,    false),
    NorChip::new("IS25LP080D",   0x9D, 0x60140000, K64,  16,   false),
    NorChip::new("IS25WP080D",   0x9D, 0x70140000, K64,  16,   false),
    NorChip::new("IS25LP016D",   0x9D, 0x60150000, K64,  32,   false),
    NorChip::new("IS25WP016D",   0x9D, 0x70150000, K64,  32,   false),
    NorChip::new("IS25LP032D",   0x9D, 0x60160000, K64,  64,   false),
    NorChip::new("IS25WP032D",   0x9D, 0x70160000, K64,  64,   false),
    NorChip::new("IS25LP064D",   0x9D, 0x60170000, K64,  128,  false),
    NorChip::new("IS25WP064D",   0x9D, 0x70170000, K64,  128,  false),
    NorChip::new("IS25LP128F",   0x9D, 0x60180000, K64,  256,  false),
    NorChip::new("IS25WP128F",   0x9D, 0x70180000, K64,  256,  false),
    NorChip::new("IS25LP256D",   0x9D, 0x60190000, K64,  512,  true),
    NorChip::new("IS25WP256D",   0x9D, 0x70190000, K64,  512,  true),
    NorChip::new("IS25LP512D",   0x9D, 0x601A0000, K64,  1024, true),
    NorChip::new("IS25WP512D",   0x9D, 0x701A0000, K64,  1024, true),

    NorChip::new("FM25W04",      0xA1, 0x28130000, K64,  8,    false),
    NorChip::new("FM25Q04",      0xA1, 0x40130000, K64,  8,    false),
    NorChip::new("FM25Q08",      0xA1, 0x40140000, K64,  16,   false),
    NorChip::new("FM25W16",      0xA1, 0x28150000, K64,  32,   false),
    NorChip::new("FM25Q16",      0xA1, 0x40150000, K64,  32,   false),
    NorChip::new("FM25W32",      0xA1, 0x28160000, K64,  64,   false),
    NorChip::new("FS25Q32",      0xA1, 0x40160000, K64,  64,   false),
    NorChip::new("FM25W64",      0xA1, 0x28170000, K64,  128,  false),
    NorChip::new("FS25Q64",      0xA1, 0x40170000, K64,  128,  false),
    NorChip::new("FM25W128",     0xA1, 0x28180000, K64,  256,  false),
    NorChip::new("FS25Q128",     0xA1, 0x40180000, K64,  256,  false),

    NorChip::new("FM25Q04A",     0xF8, 0x32130000, K64,  8,    false),
    NorChip::new("FM25M04A",     0xF8, 0x42130000, K64,  8,    false),
    NorChip::new("FM25Q08A",     0xF8, 0x32140000, K64,  16,   false),
    NorChip::new("FM25M08A",     0xF8, 0x42140000, K64,  16,   false),
    NorChip::new("FM25Q16A",     0xF8, 0x32150000, K64,  32,   false),
    NorChip::new("FM25M16A",     0xF8, 0x42150000, K64,  32,   false),
    NorChip::new("FM25Q32A",     0xF8, 0x32160000, K64,  64,   false),
    NorChip::new("FM25M32B",     0xF8, 0x42160000, K64,  64,   false),
    NorChip::new("FM25Q64A",     0xF8, 0x32170000, K64,  128,  false),
    NorChip::new("FM25M64A",     0xF8, 0x42170000, K64,  128,  false),
    NorChip::new("FM25Q128A",    0xF8, 0x32180000, K64,  256,  false),

    NorChip::new("PN25F16",      0xE0, 0x40150000, K64,  32,   false),
    NorChip::new("PN25F32",      0xE0, 0x40160000, K64,  64,   false),
    NorChip::new("PN25F64",      0xE0, 0x40170000, K64,  128,  false),
    NorChip::new("PN25F128",     0xE0, 0x40180000, K64,  256,  false),

    NorChip::new("P25D05H",      0x85, 0x60100000, K64,  1,    false),
    NorChip::new("P25D10H",      0x85, 0x60110000, K64,  2,    false),
    NorChip::new("P25D20H",      0x85, 0x60120000, K64,  4,    false),
    NorChip::new("P25D40H",      0x85, 0x60130000, K64,  8,    false),
    NorChip::new("P25D80H",      0x85, 0x60140000, K64,  16,   false),
    NorChip::new("P25Q16H",      0x85, 0x60150000, K64,  32,   false),
    NorChip::new("P25Q32H",      0x85, 0x60160000, K64,  64,   false),
    NorChip::new("P25Q64H",      0x85, 0x60170000, K64,  128,  false),
    NorChip::new("PY25Q64HA",    0x85, 0x20170000, K64,  128,  false),
    NorChip::new("P25Q128H",     0x85, 0x60180000, K64,  256,  false),
    NorChip::new("PY25Q128HA",   0x85, 0x20180000, K64,  256,  false),

    NorChip::new("SK25P32",      0x25, 0x60162560, K64,  64,   false),
    NorChip::new("SK25P64",      0x25, 0x60172560, K64,  128,  false),
    NorChip::new("SK25P128",     0x25, 0x60182560, K64,  256,  false),

    NorChip::new("ZD25Q16A",     0xBA, 0x40150000, K64,  32,   false),
    NorChip::new("ZD25Q32A",     0xBA, 0x40160000, K64,  64,   false),
    NorChip::new("ZD25Q64A",     0xBA, 0x40170000, K64,  128,  false),
    NorChip::new("ZD25Q128A",    0xBA, 0x40180000, K64,  256,  false),
    NorChip::new("ZD25Q16B",     0xBA, 0x32150000, K64,  32,   false),
    NorChip::new("ZD25Q32B",     0xBA, 0x32160000, K64,  64,   false),
    NorChip::new("ZD25Q64B",     0xBA, 0x32170000, K64,  128,  false),
    NorChip::new("ZD25Q128B",    0xBA, 0x32180000, K64,  256,  false),

    NorChip::new("PCT25VF010A",  0xBF, 0x49000000, K64,  2,    false),
    NorChip::new("PCT25VF020B",  0xBF, 0x258C0000, K64,  4,    false),
    NorChip::new("PCT25VF040B",  0xBF, 0x258D0000, K64,  8,    false),
    NorChip::new("PCT25VF080B",  0xBF, 0x258E0000, K64,  16,   false),
    NorChip::new("PCT25VF016B",  0xBF, 0x25410000, K64,  32,   false),
    NorChip::new("PCT25VF032B",  0xBF, 0x254A0000, K64,  64,   false),
    NorChip::new("PCT25VF064C",  0xBF, 0x254B0000, K64,  128,  false),
    NorChip::new("PCT26VF016",   0xBF, 0x26010000, K64,  32,   false),
    NorChip::new("PCT26VF032",   0xBF, 0x26020000, K64,  64,   false),
];

/// Match on manufacturer byte plus the exact JEDEC id, falling back to the
/// upper 16 bits. First hit wins. (The original also computed a weighted
/// nearest match here, but never used the result; that dead path is gone.)
pub fn find(mfr: u8, jedec: u32) -> Option<&'static NorChip> {
    let strip = jedec & 0xFFFF_0000;
    CHIPS
        .iter()
        .find(|c| c.mfr_id == mfr && (c.jedec_id == jedec || (c.jedec_id & 0xFFFF_0000) == strip))
}

pub fn print_list() {
    println!("SPI NOR Flash Support List:");
    for (i, chip) in CHIPS.iter().enumerate() {
        println!("{:03}. {}", i + 1, chip.name);
    }
}
