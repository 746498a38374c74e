//! Queued bulk-USB transport for the CH341A.
//!
//! The device answers each 32-byte OUT packet with at most 31 data bytes, so
//! throughput needs many IN requests in flight. The OUT side is a single
//! transfer; the IN side is a ring of up to 32 queued requests. On any
//! failure every in-flight transfer is cancelled and drained before the
//! call returns, so no completion can land after an error is reported.

use std::collections::VecDeque;
use std::time::Duration;

use async_io::Timer;
use futures_lite::future::{self, block_on};
use log::{trace, warn};
use nusb::transfer::{Queue, RequestBuffer};

use super::protocol::{EP_IN, EP_OUT, PACKET_LEN};
use crate::error::{Error, Result};

/// Bound on one event-pump iteration. There is no watchdog beyond this; a
/// silent device fails the transfer after a single quiet second.
const USB_TIMEOUT: Duration = Duration::from_secs(1);

/// Parallel IN requests. 32 gives the most stable throughput.
const USB_IN_TRANSFERS: usize = 32;

/// Largest useful IN request: the packet minus the echoed command byte.
const IN_CHUNK: usize = PACKET_LEN - 1;

enum Event {
    OutDone(Result<()>),
    InDone(Result<Vec<u8>>),
    TimedOut,
}

pub struct UsbTransport {
    _device: nusb::Device,
    _interface: nusb::Interface,
    out_queue: Queue<Vec<u8>>,
    in_queue: Queue<RequestBuffer>,
}

impl UsbTransport {
    /// Open the bridge by VID:PID and claim interface 0. Claiming detaches a
    /// bound kernel driver where the platform permits it.
    pub fn open(vid: u16, pid: u16) -> Result<Self> {
        let info = nusb::list_devices()?
            .find(|d| d.vendor_id() == vid && d.product_id() == pid)
            .ok_or(Error::ProgrammerNotFound)?;
        let device = info.open()?;
        let interface = device.claim_interface(0)?;
        let out_queue = interface.bulk_out_queue(EP_OUT);
        let in_queue = interface.bulk_in_queue(EP_IN);
        Ok(Self {
            _device: device,
            _interface: interface,
            out_queue,
            in_queue,
        })
    }

    /// One bulk transaction: submit the OUT buffer (if any), keep the IN
    /// ring topped up until `read_len` bytes have arrived, pump completions
    /// with a bounded wait per iteration.
    pub fn transfer(&mut self, out_bytes: &[u8], read_len: usize) -> Result<Vec<u8>> {
        let mut out_pending = false;
        if !out_bytes.is_empty() {
            trace!("USB OUT: {}", hex::encode(out_bytes));
            self.out_queue.submit(out_bytes.to_vec());
            out_pending = true;
        }

        let mut data = Vec::with_capacity(read_len);
        // Bytes covered by submitted IN requests, and the per-request sizes
        // in submission order (completions arrive in the same order).
        let mut requested = 0usize;
        let mut request_sizes: VecDeque<usize> = VecDeque::new();

        let outcome = loop {
            while requested < read_len && self.in_queue.pending() < USB_IN_TRANSFERS {
                let chunk = IN_CHUNK.min(read_len - requested);
                self.in_queue.submit(RequestBuffer::new(chunk));
                request_sizes.push_back(chunk);
                requested += chunk;
            }

            if !out_pending && data.len() >= read_len {
                break Ok(());
            }

            match self.pump(out_pending) {
                Event::OutDone(Ok(())) => out_pending = false,
                Event::OutDone(Err(e)) => {
                    warn!("bulk OUT failed: {e}");
                    break Err(e);
                }
                Event::InDone(Ok(bytes)) => {
                    let expected = request_sizes.pop_front().unwrap_or(bytes.len());
                    if bytes.len() < expected {
                        // Short reply: put the shortfall back on the books.
                        requested -= expected - bytes.len();
                    }
                    data.extend_from_slice(&bytes);
                }
                Event::InDone(Err(e)) => {
                    warn!("bulk IN failed: {e}");
                    break Err(e);
                }
                Event::TimedOut => break Err(Error::Timeout),
            }
        };

        match outcome {
            Ok(()) => {
                trace!("USB IN: {}", hex::encode(&data));
                Ok(data)
            }
            Err(e) => {
                self.abort();
                Err(e)
            }
        }
    }

    /// Wait for the next completion on either queue, bounded at one second.
    fn pump(&mut self, wait_out: bool) -> Event {
        let out_q = &mut self.out_queue;
        let in_q = &mut self.in_queue;
        let out_live = wait_out && out_q.pending() > 0;
        let in_live = in_q.pending() > 0;

        block_on(async {
            let timeout = async {
                Timer::after(USB_TIMEOUT).await;
                Event::TimedOut
            };
            let out_fut = async {
                if out_live {
                    let c = out_q.next_complete().await;
                    Event::OutDone(c.status.map_err(Error::from))
                } else {
                    future::pending().await
                }
            };
            let in_fut = async {
                if in_live {
                    let c = in_q.next_complete().await;
                    match c.status {
                        Ok(()) => Event::InDone(Ok(c.data)),
                        Err(e) => Event::InDone(Err(e.into())),
                    }
                } else {
                    future::pending().await
                }
            };
            future::or(future::or(out_fut, in_fut), timeout).await
        })
    }

    /// Cancel everything in flight and drain the completions. Nothing may
    /// fire after this returns.
    fn abort(&mut self) {
        self.out_queue.cancel_all();
        self.in_queue.cancel_all();
        while self.out_queue.pending() > 0 {
            let _ = block_on(self.out_queue.next_complete());
        }
        while self.in_queue.pending() > 0 {
            let _ = block_on(self.in_queue.next_complete());
        }
    }
}

impl Drop for UsbTransport {
    fn drop(&mut self) {
        self.abort();
    }
}
