//! Command-line arguments.
//!
//! A flat flag set: one operation per invocation, addresses and lengths in
//! hex or decimal, family-specific options validated by the driver.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

/// memprog - SPI NAND/NOR flash and serial EEPROM programmer for the CH341A
#[derive(Parser, Debug)]
#[command(name = "memprog")]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .args(["read", "read_compare", "write", "write_verify", "erase", "id", "list"])
))]
pub struct Args {
    /// Read chip contents to a file
    #[arg(short = 'r', value_name = "FILE")]
    pub read: Option<PathBuf>,

    /// Read chip contents and compare them against a file
    #[arg(short = 'R', value_name = "FILE")]
    pub read_compare: Option<PathBuf>,

    /// Write a file to the chip
    #[arg(short = 'w', value_name = "FILE")]
    pub write: Option<PathBuf>,

    /// Write a file to the chip, then verify the contents back
    #[arg(short = 'W', value_name = "FILE")]
    pub write_verify: Option<PathBuf>,

    /// Erase the chip (whole device unless -a/-l narrow it)
    #[arg(short = 'e')]
    pub erase: bool,

    /// Verify after write (with -w)
    #[arg(short = 'v')]
    pub verify: bool,

    /// Probe and display the chip identity, nothing else
    #[arg(short = 'i')]
    pub id: bool,

    /// List supported chips
    #[arg(short = 'L')]
    pub list: bool,

    /// Start address (0x-prefixed hex or decimal)
    #[arg(short = 'a', value_name = "ADDR", default_value = "0", value_parser = parse_num)]
    pub addr: u32,

    /// Operation length in bytes (default: to the end of the device)
    #[arg(short = 'l', value_name = "LEN", value_parser = parse_num)]
    pub length: Option<u32>,

    /// Disable the on-die ECC and expose the OOB area (NAND)
    #[arg(short = 'd')]
    pub disable_ecc: bool,

    /// OOB size override in bytes, 64-256 (NAND, with -d)
    #[arg(short = 'o', value_name = "BYTES", value_parser = parse_num)]
    pub oob_size: Option<u32>,

    /// Ignore uncorrectable ECC errors while reading (NAND)
    #[arg(short = 'I')]
    pub ignore_ecc: bool,

    /// Skip bad pages instead of aborting (NAND)
    #[arg(short = 'k')]
    pub skip_bad: bool,

    /// EEPROM chip name (24Cxx / 93Cxx / 25xxx families)
    #[arg(short = 'E', value_name = "CHIP")]
    pub eeprom: Option<String>,

    /// 8-bit organisation instead of 16-bit (Microwire)
    #[arg(short = '8')]
    pub org_8bit: bool,

    /// Fixed address length in bits (Microwire)
    #[arg(short = 'f', value_name = "BITS", value_parser = parse_num)]
    pub addr_len: Option<u32>,

    /// Page size in bytes for paged writes (SPI EEPROM)
    #[arg(short = 's', value_name = "BYTES", value_parser = parse_num)]
    pub page_size: Option<u32>,
}

/// Accept `0x...` hex or plain decimal.
pub fn parse_num(s: &str) -> Result<u32, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| e.to_string())
    } else {
        s.parse::<u32>().map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_decimal() {
        assert_eq!(parse_num("0x1000").unwrap(), 0x1000);
        assert_eq!(parse_num("0X20000").unwrap(), 0x20000);
        assert_eq!(parse_num("4096").unwrap(), 4096);
        assert!(parse_num("0xZZ").is_err());
        assert!(parse_num("twelve").is_err());
    }

    #[test]
    fn requires_exactly_one_operation() {
        assert!(Args::try_parse_from(["memprog"]).is_err());
        assert!(Args::try_parse_from(["memprog", "-e", "-i"]).is_err());
        let args = Args::try_parse_from(["memprog", "-e", "-a", "0x20000", "-l", "0x40000"])
            .unwrap();
        assert!(args.erase);
        assert_eq!(args.addr, 0x20000);
        assert_eq!(args.length, Some(0x40000));
    }
}
