//! CH341A session: USB setup, pin state machine and the SPI burst path.
//!
//! Lifecycle is closed -> open -> pins_enabled <-> pins_disabled. Opening
//! claims the interface, sets the stream clock to its top level and drives
//! the pins; chip-select toggling reuses the same pin sequence, mirroring
//! the UIO micro-protocol the bridge expects. Dropping the session releases
//! the pins to inputs.

pub mod protocol;
pub mod transport;

use log::{debug, info};

use crate::error::Result;
use crate::programmer::Programmer;
use protocol::{
    build_clock_cmd, build_pin_cmd, build_spi_packets, swap_byte, CH341A_PID, CH341A_VID,
    SPI_CLOCK_750K,
};
use transport::UsbTransport;

pub struct Ch341a {
    transport: UsbTransport,
    pins_enabled: bool,
}

impl Ch341a {
    /// Open the bridge, configure the clock and enable the output pins.
    pub fn open() -> Result<Self> {
        let transport = UsbTransport::open(CH341A_VID, CH341A_PID)?;
        info!("Found programmer device: WinChipHead (WCH) CH341A");

        let mut dev = Self {
            transport,
            pins_enabled: false,
        };
        dev.config_stream(SPI_CLOCK_750K)?;
        dev.enable_pins(true)?;
        Ok(dev)
    }

    fn config_stream(&mut self, speed: u8) -> Result<()> {
        debug!("configuring stream clock, level {speed}");
        self.transport.transfer(&build_clock_cmd(speed), 0)?;
        Ok(())
    }

    fn enable_pins(&mut self, enable: bool) -> Result<()> {
        self.transport.transfer(&build_pin_cmd(enable), 0)?;
        self.pins_enabled = enable;
        Ok(())
    }
}

impl Programmer for Ch341a {
    fn name(&self) -> &str {
        "CH341A USB Programmer"
    }

    fn chip_select(&mut self, assert: bool) -> Result<()> {
        // CS rides on the pin enable sequence: asserted drives CS0 low with
        // all pins as outputs, released returns everything to inputs.
        self.enable_pins(assert)
    }

    fn transfer(&mut self, tx: &[u8], read_len: usize) -> Result<Vec<u8>> {
        if tx.is_empty() && read_len == 0 {
            return Ok(Vec::new());
        }
        let out = build_spi_packets(tx, read_len)?;
        let echoed = self.transport.transfer(&out, tx.len() + read_len)?;
        Ok(echoed[tx.len()..].iter().map(|&b| swap_byte(b)).collect())
    }

    fn raw_stream(&mut self, cmd: &[u8], read_len: usize) -> Result<Vec<u8>> {
        self.transport.transfer(cmd, read_len)
    }
}

impl Drop for Ch341a {
    fn drop(&mut self) {
        if self.pins_enabled {
            let _ = self.enable_pins(false);
        }
    }
}
