//! SPI NAND engine tests: probe paths, ECC classification, geometry and the
//! alignment guard, against the mock and the byte-level simulator.

use super::{chips, identify, protocol, SpiNand};
use crate::domain::{EccStatus, NandOptions};
use crate::error::Error;
use crate::flash::FlashEngine;
use crate::programmer::mock::{BusOp, MockProgrammer};
use crate::programmer::simulator::SimulatedNand;

fn default_opts() -> NandOptions {
    NandOptions::default()
}

#[test]
fn ecc_decode_is_keyed_by_mfr_and_dev() {
    // 0xC8 aliases GigaDevice, ESMT, Zentel and Mira; the pair picks Mira
    let mira = chips::find(0xC8, 0x21, 0x00).unwrap();
    assert_eq!(mira.name, "PSU1GS20BN");
    // Status 0x20 decodes to 0x2 on the 0x30 mask: uncorrectable
    assert_eq!(mira.ecc.classify(0x20), EccStatus::Uncorrectable);
    assert_eq!(mira.ecc.classify(0x10), EccStatus::Corrected);
    assert_eq!(mira.ecc.classify(0x00), EccStatus::Clean);

    let gd = chips::find(0xC8, 0xB1, 0x00).unwrap();
    assert_eq!(gd.name, "GD5F1GQ4UCYIG");
    assert_eq!(gd.ecc.classify(0x70), EccStatus::Uncorrectable);
    assert_eq!(gd.ecc.classify(0x20), EccStatus::Corrected);
}

#[test]
fn second_device_byte_narrows_the_match() {
    let w25n01 = chips::find(0xEF, 0xAA, 0x21).unwrap();
    assert_eq!(w25n01.name, "W25N01GV");
    let w25n02 = chips::find(0xEF, 0xAA, 0x22).unwrap();
    assert_eq!(w25n02.name, "W25N02KV");
    assert!(chips::find(0xEF, 0xAA, 0x99).is_none());
}

#[test]
fn probe_tries_id_variants_in_order() {
    // First variant answers garbage, second answers a GigaDevice part
    let mut mock = MockProgrammer::new();
    mock.expect_reads([vec![0xFF, 0xFF, 0xFF], vec![0xC8, 0xD1, 0x48]]);
    let chip = identify(&mut mock).unwrap().expect("chip not matched");
    assert_eq!(chip.name, "GD5F1GQ4UBYIG");

    // Nothing answers on any variant
    let mut mock = MockProgrammer::new();
    mock.expect_reads([
        vec![0xFF, 0xFF, 0xFF],
        vec![0xFF, 0xFF, 0xFF],
        vec![0xFF],
        vec![0xFF, 0xFF],
    ]);
    assert!(identify(&mut mock).unwrap().is_none());
}

#[test]
fn misaligned_erase_fails_before_any_transfer() {
    let chip = chips::find(0xEF, 0xAA, 0x21).unwrap();
    let mut nand = SpiNand::new(MockProgrammer::new(), chip, default_opts()).unwrap();
    nand.bus_mut().clear();

    let err = nand.erase(100, chip.erase_size, &|_| {}).unwrap_err();
    assert!(matches!(err, Error::AlignedCheck { .. }));
    assert!(nand.bus_mut().ops().is_empty());

    let err = nand.erase(0, chip.erase_size + 1, &|_| {}).unwrap_err();
    assert!(matches!(err, Error::AlignedCheck { .. }));
    assert!(nand.bus_mut().ops().is_empty());
}

#[test]
fn ecc_disabled_geometry_exposes_the_oob() {
    let chip = chips::find(0xC8, 0xD1, 0x00).unwrap(); // 1 Gbit, 2048+128

    let with_ecc = SpiNand::new(MockProgrammer::new(), chip, default_opts()).unwrap();
    assert_eq!(with_ecc.total_size(), chip.device_size);
    assert_eq!(with_ecc.erase_granularity(), chip.erase_size);

    let raw = SpiNand::new(
        MockProgrammer::new(),
        chip,
        NandOptions {
            ecc_check: false,
            ..default_opts()
        },
    )
    .unwrap();
    let pages_per_block = chip.erase_size / chip.page_size;
    let block_oob = pages_per_block * chip.oob_size;
    assert_eq!(raw.erase_granularity(), chip.erase_size + block_oob);
    assert_eq!(
        raw.total_size(),
        chip.device_size + (chip.device_size / chip.erase_size) * block_oob
    );

    // Override shrinks the per-page window but not the device accounting
    let shrunk = SpiNand::new(
        MockProgrammer::new(),
        chip,
        NandOptions {
            ecc_check: false,
            oob_size: Some(64),
            ..default_opts()
        },
    )
    .unwrap();
    assert_eq!(shrunk.reported_oob(), 64);

    let too_big = SpiNand::new(
        MockProgrammer::new(),
        chip,
        NandOptions {
            ecc_check: false,
            oob_size: Some(256),
            ..default_opts()
        },
    );
    assert!(too_big.is_err());
}

#[test]
fn die_select_by_feature_register_toggles_bit_forty() {
    let mut mock = MockProgrammer::new();
    mock.expect_read(vec![0x00]);
    protocol::die_select_2(&mut mock, 1).unwrap();

    let writes: Vec<Vec<u8>> = mock
        .ops()
        .iter()
        .filter_map(|op| match op {
            BusOp::Transfer { tx, .. } if !tx.is_empty() => Some(tx.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(writes[0], vec![0x0F, 0xD0]);
    assert_eq!(writes[1], vec![0x1F, 0xD0, 0x40]);
}

#[test]
fn vendor_init_interprets_the_unlock_plan() {
    // GigaDevice: protection masked with 0xC1, feature OR'd with 0x01
    let chip = chips::find(0xC8, 0xD1, 0x00).unwrap();
    let sim = SimulatedNand::new(&[0xC8, 0xD1, 0x48], 128, 2048, 128, 64);
    let state = sim.state();

    assert_eq!(state.borrow().feature(0xA0), 0x38);
    let _nand = SpiNand::new(sim, chip, default_opts()).unwrap();

    let s = state.borrow();
    assert_eq!(s.feature(0xA0), 0x00, "BP bits must be cleared");
    assert_ne!(s.feature(0xB0) & 0x01, 0, "quad bit must be set");
    assert_ne!(s.feature(0xB0) & 0x10, 0, "on-die ECC must stay enabled");
}

#[test]
fn disabling_ecc_clears_the_enable_bit() {
    let chip = chips::find(0xC8, 0xD1, 0x00).unwrap();
    let sim = SimulatedNand::new(&[0xC8, 0xD1, 0x48], 128, 2048, 128, 64);
    let state = sim.state();

    let _nand = SpiNand::new(
        sim,
        chip,
        NandOptions {
            ecc_check: false,
            ..default_opts()
        },
    )
    .unwrap();
    assert_eq!(state.borrow().feature(0xB0) & 0x10, 0);
}

#[test]
fn all_ff_write_issues_no_program_commands() {
    let chip = chips::find(0xC8, 0xD1, 0x00).unwrap();
    let sim = SimulatedNand::new(&[0xC8, 0xD1, 0x48], 128, 2048, 128, 64);
    let state = sim.state();
    let mut nand = SpiNand::new(sim, chip, default_opts()).unwrap();

    let blank = vec![0xFF; 2 * 2048];
    let written = nand.write(0, &blank, &|_| {}).unwrap();
    assert_eq!(written, blank.len());

    let log = state.borrow().op_log().to_vec();
    assert!(!log.contains(&0x02), "program load was issued");
    assert!(!log.contains(&0x10), "program execute was issued");
    assert!(!log.contains(&0x13), "page read was issued");
}

#[test]
fn page_cache_serves_repeat_reads() {
    let chip = chips::find(0xC8, 0xD1, 0x00).unwrap();
    let sim = SimulatedNand::new(&[0xC8, 0xD1, 0x48], 128, 2048, 128, 64);
    let state = sim.state();
    state.borrow_mut().set_page_data(3, &[0x5A; 2048]);

    let mut nand = SpiNand::new(sim, chip, default_opts()).unwrap();
    let first = nand.read(3 * 2048, 2048, &|_| {}).unwrap();
    assert!(first.iter().all(|&b| b == 0x5A));

    let loads_after_first = state
        .borrow()
        .op_log()
        .iter()
        .filter(|&&op| op == 0x13)
        .count();

    // Sub-range of the same page comes out of the host cache, and matches
    // the chip's own cache byte for byte.
    let again = nand.read(3 * 2048 + 16, 64, &|_| {}).unwrap();
    assert_eq!(again, vec![0x5A; 64]);
    let s = state.borrow();
    let loads_after_second = s.op_log().iter().filter(|&&op| op == 0x13).count();
    assert_eq!(loads_after_first, loads_after_second);
    assert_eq!(s.cache_raw(), s.page_raw(3));
}
