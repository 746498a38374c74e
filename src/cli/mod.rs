//! Command driver: validate the flag set, open the programmer, detect the
//! chip and run the requested operation.

pub mod args;

pub use args::Args;

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use log::info;

use crate::domain::{MicrowireOptions, NandOptions, ProbeOptions, Progress};
use crate::error::{Error, Result};
use crate::flash::{self, eeprom, FlashEngine};
use crate::programmer;
use crate::progress::OperationBar;

/// Largest page-write size accepted for SPI EEPROMs.
const MAX_SEEPROM_PAGE: u32 = 512;

enum Operation {
    Read(PathBuf),
    ReadCompare(PathBuf),
    Write { file: PathBuf, verify: bool },
    Erase,
    Id,
}

pub fn execute(args: Args) -> Result<()> {
    if args.list {
        flash::print_support_lists();
        return Ok(());
    }

    let op = operation(&args);
    let opts = build_options(&args)?;

    if matches!(op, Operation::Write { .. }) && args.ignore_ecc {
        return Err(Error::InvalidParameter(
            "ignoring ECC errors makes no sense for a write".into(),
        ));
    }
    if opts.eeprom.is_some() && matches!(op, Operation::Id) {
        return Err(Error::InvalidParameter(
            "EEPROM chips are selected by name, not probed; -i is unavailable".into(),
        ));
    }

    let bus = programmer::discover()?;
    let mut engine = flash::detect(Box::new(bus), &opts)?;
    let device_size = engine.total_size();

    if let Operation::Id = op {
        return Ok(());
    }

    // Default the length to the rest of the device.
    let mut len = match args.length {
        Some(l) => l,
        None => device_size - args.addr,
    };
    if args.addr >= device_size || args.addr + len > device_size {
        return Err(Error::InvalidParameter(format!(
            "range {:#x}+{:#x} exceeds the {} byte device",
            args.addr, len, device_size
        )));
    }

    match op {
        Operation::Erase => {
            let bsize = engine.erase_granularity();
            if bsize > 1 && !len.is_multiple_of(bsize) {
                return Err(Error::InvalidParameter(format!(
                    "length {len:#x} must be a multiple of the block size {bsize:#x}"
                )));
            }
            println!("Erase addr = 0x{:016X}, len = 0x{:016X}", args.addr, len);
            run_erase(engine.as_mut(), args.addr, len)?;
        }
        Operation::Read(file) => {
            println!("Read addr = 0x{:016X}, len = 0x{:016X}", args.addr, len);
            let data = run_read(engine.as_mut(), args.addr, len)?;
            fs::write(&file, &data).map_err(Error::Io)?;
        }
        Operation::ReadCompare(file) => {
            let expected = load_file(&file, len as usize)?;
            println!(
                "Verify addr = 0x{:016X}, len = 0x{:016X}",
                args.addr,
                expected.len()
            );
            let data = run_read(engine.as_mut(), args.addr, expected.len() as u32)?;
            compare(args.addr, &expected, &data)?;
        }
        Operation::Write { file, verify } => {
            let data = load_file(&file, len as usize)?;
            len = data.len() as u32;
            println!("Write addr = 0x{:016X}, len = 0x{:016X}", args.addr, len);
            let written = run_write(engine.as_mut(), args.addr, &data)?;
            info!("{written} of {len} bytes programmed");
            if verify {
                println!("VERIFY:");
                let back = run_read(engine.as_mut(), args.addr, len)?;
                compare(args.addr, &data, &back)?;
            }
        }
        Operation::Id => unreachable!(),
    }

    println!("Status: {}", "OK".green());
    Ok(())
}

fn operation(args: &Args) -> Operation {
    if let Some(f) = &args.read {
        Operation::Read(f.clone())
    } else if let Some(f) = &args.read_compare {
        Operation::ReadCompare(f.clone())
    } else if let Some(f) = &args.write {
        Operation::Write {
            file: f.clone(),
            verify: args.verify,
        }
    } else if let Some(f) = &args.write_verify {
        Operation::Write {
            file: f.clone(),
            verify: true,
        }
    } else if args.erase {
        Operation::Erase
    } else {
        Operation::Id
    }
}

fn build_options(args: &Args) -> Result<ProbeOptions> {
    let nand = NandOptions {
        ecc_check: !args.disable_ecc,
        ignore_ecc: args.ignore_ecc,
        skip_bad_page: args.skip_bad,
        oob_size: args.oob_size,
    };
    nand.validate()?;

    let is_microwire = args
        .eeprom
        .as_deref()
        .is_some_and(|n| eeprom::microwire_93cxx::find(n).is_some());
    let is_spi_eeprom = args
        .eeprom
        .as_deref()
        .is_some_and(|n| eeprom::spi_25xx::find(n).is_some());

    if (args.org_8bit || args.addr_len.is_some()) && !is_microwire {
        return Err(Error::InvalidParameter(
            "-8 and -f apply to Microwire EEPROM chips only".into(),
        ));
    }
    if let Some(bits) = args.addr_len {
        if bits > 32 {
            return Err(Error::InvalidParameter(format!(
                "address length of {bits} bits is too large"
            )));
        }
    }
    if let Some(page) = args.page_size {
        if !is_spi_eeprom {
            return Err(Error::InvalidParameter(
                "-s applies to SPI EEPROM chips only".into(),
            ));
        }
        if !page.is_multiple_of(8) || page > MAX_SEEPROM_PAGE {
            return Err(Error::InvalidParameter(format!(
                "invalid SPI EEPROM page size {page} B"
            )));
        }
    }

    Ok(ProbeOptions {
        eeprom: args.eeprom.clone(),
        nand,
        microwire: MicrowireOptions {
            org_8bit: args.org_8bit,
            fix_addr_len: args.addr_len.map(|b| b as u8),
        },
        spage_size: args.page_size,
    })
}

/// Read at most `max` bytes of the input file; shorter files clamp the
/// write length.
fn load_file(path: &Path, max: usize) -> Result<Vec<u8>> {
    let mut data = fs::read(path).map_err(Error::Io)?;
    data.truncate(max);
    Ok(data)
}

fn compare(base: u32, expected: &[u8], actual: &[u8]) -> Result<()> {
    let common = expected.len().min(actual.len());
    for i in 0..common {
        if expected[i] != actual[i] {
            return Err(Error::VerifyMismatch {
                address: base + i as u32,
                expected: expected[i],
                actual: actual[i],
            });
        }
    }
    if actual.len() < expected.len() {
        return Err(Error::VerifyMismatch {
            address: base + common as u32,
            expected: expected[common],
            actual: 0xFF,
        });
    }
    Ok(())
}

fn run_read(engine: &mut dyn FlashEngine, addr: u32, len: u32) -> Result<Vec<u8>> {
    let bar = OperationBar::new("Read", len as u64);
    let data = engine.read(addr, len, &|p: Progress| bar.update(p))?;
    bar.finish();
    Ok(data)
}

fn run_erase(engine: &mut dyn FlashEngine, addr: u32, len: u32) -> Result<()> {
    let bar = OperationBar::new("Erase", len as u64);
    engine.erase(addr, len, &|p: Progress| bar.update(p))?;
    bar.finish();
    Ok(())
}

fn run_write(engine: &mut dyn FlashEngine, addr: u32, data: &[u8]) -> Result<usize> {
    let bar = OperationBar::new("Write", data.len() as u64);
    let written = engine.write(addr, data, &|p: Progress| bar.update(p))?;
    bar.finish();
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn file_load_clamps_to_requested_length() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&[0xAB; 100]).unwrap();

        let data = load_file(f.path(), 64).unwrap();
        assert_eq!(data.len(), 64);

        // Shorter file than the requested window clamps the other way
        let data = load_file(f.path(), 4096).unwrap();
        assert_eq!(data.len(), 100);
    }

    #[test]
    fn compare_reports_first_mismatch() {
        assert!(compare(0, &[1, 2, 3], &[1, 2, 3]).is_ok());
        match compare(0x100, &[1, 2, 3], &[1, 9, 3]) {
            Err(Error::VerifyMismatch {
                address,
                expected,
                actual,
            }) => {
                assert_eq!(address, 0x101);
                assert_eq!(expected, 2);
                assert_eq!(actual, 9);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
