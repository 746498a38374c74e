//! Mock programmer for wire-level unit tests.
//!
//! Records every bus operation and replays scripted read responses, so a
//! test can assert the exact opcode sequence an engine produces without any
//! hardware attached.

use std::collections::VecDeque;

use crate::error::Result;
use crate::programmer::Programmer;

/// One recorded bus operation.
#[derive(Debug, Clone)]
pub enum BusOp {
    ChipSelect(bool),
    Transfer { tx: Vec<u8>, read_len: usize },
    Raw { cmd: Vec<u8>, read_len: usize },
}

#[derive(Debug, Default)]
pub struct MockProgrammer {
    cs_active: bool,
    ops: Vec<BusOp>,
    responses: VecDeque<Vec<u8>>,
}

impl MockProgrammer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next read; responses are consumed FIFO.
    /// Unqueued reads come back as 0xFF, like a floating bus.
    pub fn expect_read(&mut self, data: Vec<u8>) {
        self.responses.push_back(data);
    }

    pub fn expect_reads(&mut self, responses: impl IntoIterator<Item = Vec<u8>>) {
        self.responses.extend(responses);
    }

    pub fn ops(&self) -> &[BusOp] {
        &self.ops
    }

    pub fn is_cs_active(&self) -> bool {
        self.cs_active
    }

    /// Bytes written per chip-select window, in order. Status polls and
    /// other frames are returned as-is; tests filter what they assert on.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        let mut frames = Vec::new();
        let mut current: Option<Vec<u8>> = None;
        for op in &self.ops {
            match op {
                BusOp::ChipSelect(true) => current = Some(Vec::new()),
                BusOp::ChipSelect(false) => {
                    if let Some(f) = current.take() {
                        frames.push(f);
                    }
                }
                BusOp::Transfer { tx, .. } => {
                    if let Some(f) = current.as_mut() {
                        f.extend_from_slice(tx);
                    }
                }
                BusOp::Raw { .. } => {}
            }
        }
        frames
    }

    pub fn clear(&mut self) {
        self.ops.clear();
        self.responses.clear();
    }
}

impl Programmer for MockProgrammer {
    fn name(&self) -> &str {
        "MockProgrammer"
    }

    fn chip_select(&mut self, assert: bool) -> Result<()> {
        self.cs_active = assert;
        self.ops.push(BusOp::ChipSelect(assert));
        Ok(())
    }

    fn transfer(&mut self, tx: &[u8], read_len: usize) -> Result<Vec<u8>> {
        self.ops.push(BusOp::Transfer {
            tx: tx.to_vec(),
            read_len,
        });
        if read_len == 0 {
            return Ok(Vec::new());
        }
        let mut data = self
            .responses
            .pop_front()
            .unwrap_or_else(|| vec![0xFF; read_len]);
        data.resize(read_len, 0xFF);
        Ok(data)
    }

    fn raw_stream(&mut self, cmd: &[u8], read_len: usize) -> Result<Vec<u8>> {
        self.ops.push(BusOp::Raw {
            cmd: cmd.to_vec(),
            read_len,
        });
        if read_len == 0 {
            return Ok(Vec::new());
        }
        let mut data = self
            .responses
            .pop_front()
            .unwrap_or_else(|| vec![0xFF; read_len]);
        data.resize(read_len, 0xFF);
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_frames_between_cs_edges() {
        let mut mock = MockProgrammer::new();
        mock.chip_select(true).unwrap();
        assert!(mock.is_cs_active());
        mock.write(&[0x9F]).unwrap();
        mock.write(&[0x00]).unwrap();
        mock.chip_select(false).unwrap();
        mock.chip_select(true).unwrap();
        mock.write(&[0x06]).unwrap();
        mock.chip_select(false).unwrap();
        assert!(!mock.is_cs_active());

        assert_eq!(mock.frames(), vec![vec![0x9F, 0x00], vec![0x06]]);
    }

    #[test]
    fn scripted_reads_in_order() {
        let mut mock = MockProgrammer::new();
        mock.expect_reads([vec![0x01], vec![0x02]]);
        assert_eq!(mock.read(1).unwrap(), vec![0x01]);
        assert_eq!(mock.read(1).unwrap(), vec![0x02]);
        // Exhausted queue floats high
        assert_eq!(mock.read(2).unwrap(), vec![0xFF, 0xFF]);
    }
}
