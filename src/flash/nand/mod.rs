//! SPI NAND flash engine.
//!
//! Probe through the three ID read variants, interpret the per-vendor
//! unlock plan and ECC scheme from the chip table, keep a one-page cache in
//! lockstep with the chip's own cache, and run multi-page read/write/erase
//! with the bad-block policy the options ask for.

pub mod chips;
pub mod protocol;

#[cfg(test)]
mod tests;

use log::{debug, info, trace, warn};

use crate::domain::{DieSelect, EccStatus, NandChip, NandOptions, Progress, ProgramOrder, RegOp};
use crate::error::{Error, Result};
use crate::flash::FlashEngine;
use crate::programmer::Programmer;
use protocol::{reg, stat};

/// Status polls before a stuck OIP bit counts as a timeout.
const BUSY_POLL_LIMIT: u32 = 1_000_000;

/// Probe the bus with each ID read variant in turn.
pub fn identify<P: Programmer>(bus: &mut P) -> Result<Option<&'static NandChip>> {
    let readers: [fn(&mut P) -> Result<(u8, u8, u8)>; 3] = [
        protocol::read_id,
        protocol::read_id_2,
        protocol::read_id_3,
    ];
    for read in readers {
        let (mfr, dev, dev2) = read(bus)?;
        debug!("nand probe: mfr_id = {mfr:#04x}, dev_id = {dev:#04x}, dev_id_2 = {dev2:#04x}");
        if let Some(chip) = chips::find(mfr, dev, dev2) {
            return Ok(Some(chip));
        }
    }
    Ok(None)
}

/// Effective geometry after the ECC policy is applied. With checking off the
/// OOB is folded into the addressable space so callers see page + spare as
/// one contiguous run.
#[derive(Debug, Clone, Copy)]
struct Geometry {
    device_size: u32,
    page_size: u32,
    erase_size: u32,
    oob_size: u32,
}

impl Geometry {
    fn from_chip(chip: &NandChip, opts: &NandOptions) -> Geometry {
        let oob = opts.oob_size.unwrap_or(chip.oob_size);
        if opts.ecc_check {
            Geometry {
                device_size: chip.device_size,
                page_size: chip.page_size,
                erase_size: chip.erase_size,
                oob_size: oob,
            }
        } else {
            let block_oob = chip.pages_per_block() * chip.oob_size;
            let total_oob = (chip.device_size / chip.erase_size) * block_oob;
            Geometry {
                device_size: chip.device_size + total_oob,
                page_size: chip.page_size + oob,
                erase_size: chip.erase_size + block_oob,
                oob_size: 0,
            }
        }
    }

    fn cache_len(&self) -> usize {
        (self.page_size + self.oob_size) as usize
    }
}

/// Most-recently-read page, data and OOB in one buffer. `page` of `None`
/// forces the next access to reload from the chip.
struct PageCache {
    page: Option<u32>,
    buf: Vec<u8>,
}

impl PageCache {
    fn new(len: usize) -> Self {
        Self {
            page: None,
            buf: vec![0; len],
        }
    }

    fn invalidate(&mut self) {
        self.page = None;
    }
}

pub struct SpiNand<P: Programmer> {
    bus: P,
    chip: &'static NandChip,
    opts: NandOptions,
    geom: Geometry,
    cache: PageCache,
    plane_bit: u8,
    die_id: u8,
}

impl<P: Programmer> SpiNand<P> {
    /// Build the engine for an identified chip: snapshot the protection and
    /// feature registers, run the vendor unlock plan, then set on-die ECC
    /// to match the options.
    pub fn new(bus: P, chip: &'static NandChip, opts: NandOptions) -> Result<Self> {
        opts.validate()?;
        if let Some(oob) = opts.oob_size {
            if oob > chip.oob_size {
                return Err(Error::InvalidParameter(format!(
                    "OOB size {oob} B cannot be larger than the chip's {} B",
                    chip.oob_size
                )));
            }
        }

        let geom = Geometry::from_chip(chip, &opts);
        let mut nand = Self {
            bus,
            chip,
            opts,
            geom,
            cache: PageCache::new(geom.cache_len()),
            plane_bit: 0,
            die_id: 0,
        };

        let s1 = protocol::get_feature(&mut nand.bus, reg::PROTECTION)?;
        let s2 = protocol::get_feature(&mut nand.bus, reg::FEATURE)?;
        info!("Get Status Register 1: {s1:#04x}");
        info!("Get Status Register 2: {s2:#04x}");

        nand.vendor_init()?;
        nand.set_ondie_ecc()?;
        Ok(nand)
    }

    pub fn chip(&self) -> &'static NandChip {
        self.chip
    }

    #[cfg(test)]
    pub fn bus_mut(&mut self) -> &mut P {
        &mut self.bus
    }

    /// OOB size as reported to the user (override applied).
    pub fn reported_oob(&self) -> u32 {
        self.opts.oob_size.unwrap_or(self.chip.oob_size)
    }

    fn total_pages(&self) -> u32 {
        self.geom.device_size / self.geom.page_size
    }

    fn dies(&self) -> u32 {
        let shift = match self.chip.features.die_select {
            Some(DieSelect::Command) => 16,
            Some(DieSelect::Feature) => 17,
            None => return 1,
        };
        (self.total_pages() >> shift).max(1)
    }

    fn select_die_index(&mut self, die: u8) -> Result<()> {
        self.die_id = die;
        match self.chip.features.die_select {
            Some(DieSelect::Command) => protocol::die_select_1(&mut self.bus, die),
            Some(DieSelect::Feature) => protocol::die_select_2(&mut self.bus, die),
            None => Ok(()),
        }
    }

    /// Switch dies when the page's die differs from the current one.
    fn select_die(&mut self, page: u32) -> Result<()> {
        let die = match self.chip.features.die_select {
            Some(DieSelect::Command) => ((page >> 16) & 0xFF) as u8,
            Some(DieSelect::Feature) => ((page >> 17) & 0xFF) as u8,
            None => return Ok(()),
        };
        if die != self.die_id {
            trace!("die select {die}");
            self.select_die_index(die)?;
        }
        Ok(())
    }

    /// Run the chip's unlock plan, per die where the plan asks for it.
    fn vendor_init(&mut self) -> Result<()> {
        debug!("chip init: unlock all blocks, set vendor feature bits");
        let plan = self.chip.unlock;
        let dies = if plan.per_die { self.dies() } else { 1 };
        for die in 0..dies {
            if self.chip.features.die_select.is_some() && plan.per_die {
                self.select_die_index(die as u8)?;
            }
            for op in plan.ops {
                match *op {
                    RegOp::Update { reg, and, or } => {
                        let v = protocol::get_feature(&mut self.bus, reg)?;
                        protocol::set_feature(&mut self.bus, reg, (v & and) | or)?;
                    }
                    RegOp::Write { reg, value } => {
                        protocol::set_feature(&mut self.bus, reg, value)?;
                    }
                }
            }
            let back = protocol::get_feature(&mut self.bus, reg::PROTECTION)?;
            debug!("after unlock, die {die}: status register 1 = {back:#04x}");
        }
        if self.die_id != 0 {
            self.select_die_index(0)?;
        }
        Ok(())
    }

    /// Toggle the on-die ECC bit in the chip's ECC control register, on
    /// every die.
    fn set_ondie_ecc(&mut self) -> Result<()> {
        let reg = self.chip.ecc_ctrl_reg;
        let dies = self.dies();
        for die in 0..dies {
            if dies > 1 {
                self.select_die_index(die as u8)?;
            }
            let mut v = protocol::get_feature(&mut self.bus, reg)?;
            if self.opts.ecc_check {
                v |= protocol::ECC_ENABLE;
            } else {
                v &= !protocol::ECC_ENABLE;
            }
            protocol::set_feature(&mut self.bus, reg, v)?;
            let back = protocol::get_feature(&mut self.bus, reg)?;
            debug!("on-die ECC register {reg:#04x} = {back:#04x}");
        }
        if self.die_id != 0 {
            self.select_die_index(0)?;
        }
        Ok(())
    }

    fn wait_ready(&mut self) -> Result<u8> {
        for _ in 0..BUSY_POLL_LIMIT {
            let status = protocol::get_feature(&mut self.bus, reg::STATUS)?;
            if status & stat::OIP == 0 {
                return Ok(status);
            }
        }
        Err(Error::Timeout)
    }

    fn plane(&self) -> Option<u8> {
        self.chip.features.plane_select.then_some(self.plane_bit)
    }

    /// Load a page into both the chip cache and ours, classifying the ECC
    /// outcome. A cache hit returns immediately.
    fn load_page(&mut self, page: u32) -> Result<EccStatus> {
        if self.cache.page == Some(page) {
            return Ok(EccStatus::Clean);
        }

        self.select_die(page)?;
        protocol::page_read(&mut self.bus, page)?;
        let status = self.wait_ready()?;

        let ecc = if self.opts.ecc_check && !self.opts.ignore_ecc {
            let outcome = self.chip.ecc.classify(status);
            match outcome {
                EccStatus::Uncorrectable => {
                    warn!("ECC cannot recover page {page:#x}, status = {status:#04x}")
                }
                EccStatus::Corrected => trace!("corrected bit errors on page {page:#x}"),
                EccStatus::Clean => {}
            }
            outcome
        } else {
            EccStatus::Clean
        };

        if self.chip.features.plane_select {
            self.plane_bit = ((page >> 6) & 1) as u8;
        }

        // The cache is read back whatever the ECC verdict was; recovery
        // paths still want the raw bytes.
        let len = self.geom.cache_len();
        let plane = self.plane();
        let data = protocol::read_from_cache(
            &mut self.bus,
            0,
            len,
            self.chip.read_mode,
            self.chip.dummy,
            plane,
        )?;
        self.cache.buf[..len].copy_from_slice(&data);
        self.cache.page = Some(page);

        Ok(ecc)
    }

    fn cached_data(&self) -> &[u8] {
        &self.cache.buf[..self.geom.page_size as usize]
    }

    /// Program one page through the cache (read-modify-write). An all-0xFF
    /// payload is already the erased state and produces no wire traffic.
    fn write_page(&mut self, page: u32, offset: usize, data: &[u8]) -> Result<()> {
        if data.iter().all(|&b| b == 0xFF) {
            return Ok(());
        }

        let ecc = self.load_page(page)?;
        if self.opts.skip_bad_page && ecc == EccStatus::Uncorrectable {
            return Err(Error::BadBlock { page });
        }

        self.cache.buf[offset..offset + data.len()].copy_from_slice(data);

        if self.chip.features.plane_select {
            self.plane_bit = ((page >> 6) & 1) as u8;
        }
        self.select_die(page)?;

        let len = self.geom.cache_len();
        let plane = self.plane();
        match self.chip.program_order {
            ProgramOrder::LoadThenEnable => {
                protocol::program_load(
                    &mut self.bus,
                    0,
                    &self.cache.buf[..len],
                    self.chip.write_mode,
                    plane,
                )?;
                protocol::write_enable(&mut self.bus)?;
            }
            ProgramOrder::EnableThenLoad => {
                protocol::write_enable(&mut self.bus)?;
                protocol::program_load(
                    &mut self.bus,
                    0,
                    &self.cache.buf[..len],
                    self.chip.write_mode,
                    plane,
                )?;
            }
        }

        protocol::program_execute(&mut self.bus, page)?;
        let status = self.wait_ready()?;
        protocol::write_disable(&mut self.bus)?;

        let prot = protocol::get_feature(&mut self.bus, reg::PROTECTION)?;
        trace!("after program: status 1 = {prot:#04x}, status 3 = {status:#04x}");

        self.cache.invalidate();

        if status & stat::P_FAIL != 0 {
            warn!("program fail at page {page:#x}, status = {status:#04x}");
            return Err(Error::ProgramFailed { page });
        }
        Ok(())
    }

    fn erase_block(&mut self, block: u32) -> Result<()> {
        self.select_die(block << protocol::BLOCK_ROW_SHIFT)?;
        protocol::write_enable(&mut self.bus)?;
        protocol::block_erase(&mut self.bus, block)?;
        let status = self.wait_ready()?;
        protocol::write_disable(&mut self.bus)?;
        if status & stat::E_FAIL != 0 {
            warn!("erase fail at block {block:#x}, status = {status:#04x}");
            return Err(Error::EraseFailed { block });
        }
        Ok(())
    }
}

impl<P: Programmer> FlashEngine for SpiNand<P> {
    fn name(&self) -> &str {
        self.chip.name
    }

    fn total_size(&self) -> u32 {
        self.geom.device_size
    }

    fn erase_granularity(&self) -> u32 {
        self.geom.erase_size
    }

    fn read(&mut self, addr: u32, len: u32, progress: &dyn Fn(Progress)) -> Result<Vec<u8>> {
        let page_size = self.geom.page_size;
        let mut out = Vec::with_capacity(len as usize);
        let mut read_addr = addr;

        while (out.len() as u32) < len {
            let page = read_addr / page_size;
            let offset = (read_addr % page_size) as usize;
            if page >= self.total_pages() {
                break;
            }

            match self.load_page(page)? {
                EccStatus::Uncorrectable => {
                    if !self.opts.skip_bad_page {
                        return Err(Error::BadBlock { page });
                    }
                    // Skip the page; later data slides into its place. If the
                    // remainder would have fit in this page, give up.
                    let remaining = (len - out.len() as u32) as usize;
                    if offset + remaining < page_size as usize {
                        break;
                    }
                    read_addr += page_size - offset as u32;
                    continue;
                }
                EccStatus::Clean | EccStatus::Corrected => {}
            }

            let remaining = (len - out.len() as u32) as usize;
            let take = (page_size as usize - offset).min(remaining);
            let cached = self.cached_data();
            out.extend_from_slice(&cached[offset..offset + take]);
            read_addr += take as u32;
            progress(Progress::new(out.len() as u64, len as u64));
        }

        Ok(out)
    }

    fn erase(&mut self, addr: u32, len: u32, progress: &dyn Fn(Progress)) -> Result<()> {
        let block_size = self.geom.erase_size;
        if !addr.is_multiple_of(block_size) || !len.is_multiple_of(block_size) {
            return Err(Error::AlignedCheck {
                address: addr,
                length: len,
                block_size,
            });
        }

        self.cache.invalidate();

        let mut erased = 0u32;
        while erased < len {
            let block = (addr + erased) / block_size;
            trace!("erase block {block:#x}");
            self.erase_block(block)?;
            erased += block_size;
            progress(Progress::new(erased as u64, len as u64));
        }
        Ok(())
    }

    fn write(&mut self, addr: u32, data: &[u8], progress: &dyn Fn(Progress)) -> Result<usize> {
        let page_size = self.geom.page_size;
        self.cache.invalidate();

        let mut written = 0usize;
        let mut write_addr = addr;
        let mut offset = 0usize;

        while offset < data.len() {
            let page = write_addr / page_size;
            let in_page = (write_addr % page_size) as usize;
            if page >= self.total_pages() {
                break;
            }
            let chunk = (page_size as usize - in_page).min(data.len() - offset);

            match self.write_page(page, in_page, &data[offset..offset + chunk]) {
                Ok(()) => written += chunk,
                Err(e @ (Error::ProgramFailed { .. } | Error::BadBlock { .. }))
                    if self.opts.skip_bad_page =>
                {
                    // Drop this page's chunk and keep going; the byte count
                    // reports only what actually landed.
                    warn!("skipping page {page:#x}: {e}");
                }
                Err(e) => return Err(e),
            }

            offset += chunk;
            write_addr += chunk as u32;
            progress(Progress::new(offset as u64, data.len() as u64));
        }

        Ok(written)
    }
}
