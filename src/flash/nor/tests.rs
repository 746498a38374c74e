//! Wire-level tests for the SPI NOR engine, against the recording mock.

use super::{chips, identify, SpiNor};
use crate::error::Error;
use crate::flash::FlashEngine;
use crate::programmer::mock::MockProgrammer;

/// Frames that are not status polls (0x05) or bank reads (0x16).
fn command_frames(mock: &MockProgrammer) -> Vec<Vec<u8>> {
    mock.frames()
        .into_iter()
        .filter(|f| !matches!(f.first(), Some(&0x05) | Some(&0x16)))
        .collect()
}

#[test]
fn probe_matches_w25q128bv() {
    let mut mock = MockProgrammer::new();
    mock.expect_read(vec![0xEF, 0x40, 0x18, 0x00, 0x00]);

    let chip = identify(&mut mock).unwrap().expect("chip not matched");
    assert_eq!(chip.name, "W25Q128BV");
    assert_eq!(chip.total_size(), 16 * 1024 * 1024);
    assert!(!chip.addr4b);
}

#[test]
fn probe_is_deterministic() {
    let first = {
        let mut mock = MockProgrammer::new();
        mock.expect_read(vec![0xEF, 0x40, 0x18, 0x00, 0x00]);
        identify(&mut mock).unwrap().unwrap()
    };
    let second = {
        let mut mock = MockProgrammer::new();
        mock.expect_read(vec![0xEF, 0x40, 0x18, 0x00, 0x00]);
        identify(&mut mock).unwrap().unwrap()
    };
    assert!(std::ptr::eq(first, second));
}

#[test]
fn probe_falls_back_to_upper_sixteen_bits() {
    // Full id differs in the low half; the 4018 prefix still matches
    let chip = chips::find(0xEF, 0x4018_1234).expect("prefix not matched");
    assert_eq!(chip.name, "W25Q128BV");

    assert!(chips::find(0xEF, 0x7777_0000).is_none());
    assert!(chips::find(0x00, 0x4018_0000).is_none());
}

#[test]
fn four_byte_program_wire_sequence() {
    let chip = chips::find(0xEF, 0x4019_0000).unwrap();
    assert_eq!(chip.name, "W25Q256FV");
    assert!(chip.addr4b);

    let mut nor = SpiNor::new(MockProgrammer::new(), chip);
    let data: Vec<u8> = (0..=255).collect();

    // Status polls: pre-write, then per page a busy wait and the unlock
    // read. BP bits set on the first unlock so the clearing write shows up.
    nor.bus_mut().expect_reads([
        vec![0x00],
        vec![0x00],
        vec![0x1C],
        vec![0x00],
        vec![0x00],
    ]);

    nor.write(0x0102_0304, &data, &|_| {}).unwrap();

    let frames = command_frames(nor.bus_mut());
    assert_eq!(frames[0], vec![0x06]); // WREN
    assert_eq!(frames[1], vec![0x01, 0x00]); // unlock: clear BP bits
    assert_eq!(frames[2], vec![0xB7]); // enter 4-byte mode

    // Page program with the 32-bit address. 0x01020304 sits 4 bytes into a
    // 256-byte page, so the payload splits 252 + 4 at the page edge.
    assert_eq!(frames[3][..5], [0x02, 0x01, 0x02, 0x03, 0x04]);
    assert_eq!(frames[3][5..], data[..252]);

    assert_eq!(frames[4], vec![0xE9]); // exit 4-byte mode
    assert_eq!(frames[5], vec![0x06]); // Winbond: clear the extended
    assert_eq!(frames[6], vec![0xC5, 0x00]); // address register

    // Second page: same envelope around the 4-byte remainder
    assert_eq!(frames[7], vec![0x06]);
    assert_eq!(frames[8], vec![0xB7]);
    assert_eq!(frames[9][..5], [0x02, 0x01, 0x02, 0x04, 0x00]);
    assert_eq!(frames[9][5..], data[252..]);
    assert_eq!(frames[10], vec![0xE9]);
    assert_eq!(frames[11], vec![0x06]);
    assert_eq!(frames[12], vec![0xC5, 0x00]);

    assert_eq!(frames[13], vec![0x04]); // WRDI
}

#[test]
fn full_range_erase_uses_chip_erase() {
    let chip = chips::find(0xEF, 0x4018_0000).unwrap();
    let mut nor = SpiNor::new(MockProgrammer::new(), chip);
    nor.bus_mut()
        .expect_reads([vec![0x00], vec![0x00], vec![0x00]]);

    nor.erase(0, chip.total_size(), &|_| {}).unwrap();

    let frames = command_frames(nor.bus_mut());
    assert_eq!(frames, vec![vec![0x06], vec![0xC7], vec![0x04]]);
}

#[test]
fn sector_erase_addresses_each_sector() {
    let chip = chips::find(0xEF, 0x4018_0000).unwrap();
    let mut nor = SpiNor::new(MockProgrammer::new(), chip);
    // unprotect + two sectors, two polls each
    nor.bus_mut().expect_reads((0..5).map(|_| vec![0x00]));

    nor.erase(0x2_0000, 2 * chip.sector_size, &|_| {}).unwrap();

    let frames = command_frames(nor.bus_mut());
    assert_eq!(
        frames,
        vec![
            vec![0x06],
            vec![0xD8, 0x02, 0x00, 0x00],
            vec![0x06],
            vec![0xD8, 0x03, 0x00, 0x00],
        ]
    );
}

#[test]
fn zero_length_erase_is_rejected() {
    let chip = chips::find(0xEF, 0x4018_0000).unwrap();
    let mut nor = SpiNor::new(MockProgrammer::new(), chip);
    assert!(matches!(
        nor.erase(0, 0, &|_| {}),
        Err(Error::InvalidParameter(_))
    ));
}

#[test]
fn oversized_write_is_rejected() {
    let chip = chips::find(0xEF, 0x3010_0000).unwrap(); // W25X05, 64 KB
    let mut nor = SpiNor::new(MockProgrammer::new(), chip);
    let data = vec![0u8; 128];
    assert!(matches!(
        nor.write(chip.total_size() - 64, &data, &|_| {}),
        Err(Error::InvalidParameter(_))
    ));
}
