//! On-die ECC status interpretation.
//!
//! Every SPI NAND reports ECC outcome through status register 0xC0, but the
//! field position, width and the value meaning "uncorrectable" differ by
//! vendor family. A scheme is {mask, shift, uncorrectable value}; the table
//! attaches one to each chip so decoding is a single classify call.

/// How to extract and judge the ECC bits of status register 0xC0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EccScheme {
    pub mask: u8,
    pub shift: u8,
    pub uncorrectable: u8,
}

/// Outcome of a page load as reported by the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EccStatus {
    /// No bit errors detected.
    Clean,
    /// Errors were detected and corrected.
    Corrected,
    /// The chip could not recover the page.
    Uncorrectable,
}

impl EccScheme {
    /// Two-bit field in 0x30, value 0x2 is unrecoverable. GigaDevice type 1,
    /// MXIC, Winbond, ESMT, Zentel, Etron, Toshiba, Heyang, PN, ATO,
    /// FM S-series, Mira, Biwin, DS, TYM and most XTX parts.
    pub const STANDARD_2BIT: Self = Self {
        mask: 0x30,
        shift: 4,
        uncorrectable: 0x2,
    };

    /// Three-bit field in 0x70, value 0x7 is unrecoverable. GigaDevice
    /// type 2, FM G-series, FORESEE, Fison.
    pub const WIDE_3BIT: Self = Self {
        mask: 0x70,
        shift: 4,
        uncorrectable: 0x7,
    };

    /// Micron uses the three-bit field but flags unrecoverable as 0x2.
    pub const MICRON: Self = Self {
        mask: 0x70,
        shift: 4,
        uncorrectable: 0x2,
    };

    /// XTX A-series: four bits at 0x3C, value 0x8.
    pub const XTX_A: Self = Self {
        mask: 0x3C,
        shift: 2,
        uncorrectable: 0x8,
    };

    /// XTX C-series: full high nibble, value 0xF.
    pub const XTX_C: Self = Self {
        mask: 0xF0,
        shift: 4,
        uncorrectable: 0xF,
    };

    pub fn classify(&self, status: u8) -> EccStatus {
        let value = (status & self.mask) >> self.shift;
        if value == self.uncorrectable {
            EccStatus::Uncorrectable
        } else if value == 0 {
            EccStatus::Clean
        } else {
            EccStatus::Corrected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_two_bit_field() {
        assert_eq!(EccScheme::STANDARD_2BIT.classify(0x00), EccStatus::Clean);
        assert_eq!(
            EccScheme::STANDARD_2BIT.classify(0x10),
            EccStatus::Corrected
        );
        // 0x20 decodes to 0x2: unrecoverable on the 0x30-mask family
        assert_eq!(
            EccScheme::STANDARD_2BIT.classify(0x20),
            EccStatus::Uncorrectable
        );
        // Bits outside the mask are ignored
        assert_eq!(EccScheme::STANDARD_2BIT.classify(0x0F), EccStatus::Clean);
    }

    #[test]
    fn wide_field_families() {
        assert_eq!(EccScheme::WIDE_3BIT.classify(0x70), EccStatus::Uncorrectable);
        assert_eq!(EccScheme::WIDE_3BIT.classify(0x20), EccStatus::Corrected);
        // Micron flags 0x2 in the wide field
        assert_eq!(EccScheme::MICRON.classify(0x20), EccStatus::Uncorrectable);
        assert_eq!(EccScheme::MICRON.classify(0x70), EccStatus::Corrected);
    }

    #[test]
    fn xtx_fields() {
        assert_eq!(EccScheme::XTX_A.classify(0x8 << 2), EccStatus::Uncorrectable);
        assert_eq!(EccScheme::XTX_A.classify(0x1 << 2), EccStatus::Corrected);
        assert_eq!(EccScheme::XTX_C.classify(0xF0), EccStatus::Uncorrectable);
        assert_eq!(EccScheme::XTX_C.classify(0x30), EccStatus::Corrected);
    }
}
