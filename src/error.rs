//! Error types for memprog
//!
//! One error enum covers the whole library: probe failures, chip-reported
//! status bits, transport faults and user-facing parameter problems.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for memprog
#[derive(Error, Debug)]
pub enum Error {
    /// USB communication error
    #[error("USB error: {0}")]
    Usb(#[from] nusb::Error),

    /// Raw USB transfer error
    #[error("USB transfer error: {0}")]
    Transfer(#[from] nusb::transfer::TransferError),

    /// Programmer not found
    #[error("Programmer not found. Is the CH341A connected?")]
    ProgrammerNotFound,

    /// No chip recognised by any probe
    #[error("Flash chip not detected. Check connections and power.")]
    ProbeFailed,

    /// Erase geometry not aligned to the block size
    #[error("Erase range not block-aligned: addr 0x{address:08X}, len 0x{length:X}, block size 0x{block_size:X}")]
    AlignedCheck {
        address: u32,
        length: u32,
        block_size: u32,
    },

    /// Chip reported E_FAIL after a block erase
    #[error("Erase failed at block {block}")]
    EraseFailed { block: u32 },

    /// Chip reported P_FAIL after a page program
    #[error("Program failed at page 0x{page:X}")]
    ProgramFailed { page: u32 },

    /// Uncorrectable ECC error
    #[error("Uncorrectable ECC error at page 0x{page:X}")]
    BadBlock { page: u32 },

    /// SPI transport failed mid-transfer (after cancellation completed)
    #[error("SPI transport failure: {0}")]
    SpiTransport(String),

    /// Busy poll exceeded its budget
    #[error("Operation timed out")]
    Timeout,

    /// Verify found a mismatch
    #[error(
        "Verification failed at address 0x{address:08X}: expected {expected:02X}, got {actual:02X}"
    )]
    VerifyMismatch {
        address: u32,
        expected: u8,
        actual: u8,
    },

    /// Operation not supported by this chip or engine
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(std::io::Error),
}
