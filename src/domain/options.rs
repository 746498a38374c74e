//! Operation options built by the CLI and threaded into the engines.
//!
//! The original tool kept these as module globals; here they are plain
//! records owned by whoever runs the operation.

use crate::error::{Error, Result};

/// SPI NAND behaviour flags.
#[derive(Debug, Clone)]
pub struct NandOptions {
    /// Use the on-die ECC and check its verdict after every page load.
    pub ecc_check: bool,
    /// Treat uncorrectable pages as readable (recovery aid).
    pub ignore_ecc: bool,
    /// On an uncorrectable or failed page, move on instead of aborting.
    pub skip_bad_page: bool,
    /// Replace the table OOB size when ECC checking is off (64..=256).
    pub oob_size: Option<u32>,
}

impl Default for NandOptions {
    fn default() -> Self {
        Self {
            ecc_check: true,
            ignore_ecc: false,
            skip_bad_page: false,
            oob_size: None,
        }
    }
}

impl NandOptions {
    /// The flag combinations the original refuses up front.
    pub fn validate(&self) -> Result<()> {
        if self.ignore_ecc && !self.ecc_check {
            return Err(Error::InvalidParameter(
                "ignoring ECC errors requires ECC checking to stay enabled".into(),
            ));
        }
        if self.ignore_ecc && self.skip_bad_page {
            return Err(Error::InvalidParameter(
                "ignore-ECC and skip-bad-pages are mutually exclusive".into(),
            ));
        }
        if let Some(oob) = self.oob_size {
            if self.ecc_check {
                return Err(Error::InvalidParameter(
                    "OOB size override only applies with ECC disabled".into(),
                ));
            }
            if !(64..=256).contains(&oob) {
                return Err(Error::InvalidParameter(format!(
                    "OOB size {oob} out of range (64..=256)"
                )));
            }
        }
        Ok(())
    }
}

/// Microwire (93Cxx) options.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrowireOptions {
    /// 8-bit organisation instead of the default 16-bit.
    pub org_8bit: bool,
    /// Fixed address length in bits; `None` derives it from the chip size.
    pub fix_addr_len: Option<u8>,
}

/// Everything the dispatcher needs to decide which engine to build.
#[derive(Debug, Clone, Default)]
pub struct ProbeOptions {
    /// EEPROM chip name given with `-E`; empty means probe NOR then NAND.
    pub eeprom: Option<String>,
    pub nand: NandOptions,
    pub microwire: MicrowireOptions,
    /// SPI EEPROM page size for paged writes (`-s`).
    pub spage_size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicting_nand_flags_rejected() {
        let ok = NandOptions::default();
        assert!(ok.validate().is_ok());

        let bad = NandOptions {
            ignore_ecc: true,
            ecc_check: false,
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let bad = NandOptions {
            ignore_ecc: true,
            skip_bad_page: true,
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let bad = NandOptions {
            ecc_check: false,
            oob_size: Some(32),
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let ok = NandOptions {
            ecc_check: false,
            oob_size: Some(128),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }
}
