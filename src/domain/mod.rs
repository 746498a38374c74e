//! Domain model: chip descriptors and the policies attached to them.
//!
//! Everything in here is hardware-independent data. The protocol and engine
//! layers interpret these descriptors; nothing here touches the bus.

pub mod chip;
pub mod ecc;
pub mod options;
pub mod types;

pub use chip::{
    DieSelect, DummyByte, I2cEepromChip, MwEepromChip, NandChip, NandFeatures, NorChip,
    ProgramOrder, ReadMode, RegOp, SpiEepromChip, UnlockPlan, WriteMode,
};
pub use ecc::{EccScheme, EccStatus};
pub use options::{MicrowireOptions, NandOptions, ProbeOptions};
pub use types::Progress;
