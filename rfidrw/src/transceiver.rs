//! Frame transceiver
//!
//! One [`Transceiver::exchange`] is one half-duplex request/response round
//! trip: encode and send a frame, wait for the first reply byte, drain the
//! rest, validate it against the request.

use std::thread;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, trace};

use rfidrw_core::codec::bytes_to_hex;
use rfidrw_core::constants::{DRAIN_LIMIT, SETTLE_DELAY};
use rfidrw_core::{Frame, Opcode, Response};
use rfidrw_transport::{read_exact_or_timeout, TimeoutGuard, Transport};

use crate::error::{Error, Result};

/// Sends frames over a transport and validates the replies
pub struct Transceiver<T: Transport> {
    transport: T,
    settle_delay: Duration,
    drain_limit: usize,
}

impl<T: Transport> Transceiver<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            settle_delay: SETTLE_DELAY,
            drain_limit: DRAIN_LIMIT,
        }
    }

    /// Set the pause after sending and before draining
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set the maximum number of bytes collected after the first one
    pub fn with_drain_limit(mut self, limit: usize) -> Self {
        self.drain_limit = limit;
        self
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Run one request/response round trip
    ///
    /// Waits up to `response_timeout` for the reply to start. When
    /// `expected_status` is given, any other status fails with a device
    /// error.
    ///
    /// # Errors
    ///
    /// - `ProtocolViolation` if `payload` does not fit in a frame
    /// - [`Error::Timeout`] if no reply byte arrived in time
    /// - `MalformedResponse` / `ChecksumMismatch` if the reply is invalid
    /// - `DeviceError` if the status differs from `expected_status`
    pub fn exchange(
        &mut self,
        opcode: Opcode,
        payload: &[u8],
        response_timeout: Duration,
        expected_status: Option<u8>,
    ) -> Result<Response> {
        let frame = Frame::with_payload(opcode, Bytes::copy_from_slice(payload))?;
        let sent = frame.encode().freeze();

        trace!("send {}", bytes_to_hex(&sent));

        self.transport.write(&sent)?;
        thread::sleep(self.settle_delay);

        let mut received = read_exact_or_timeout(&mut self.transport, 1, response_timeout)?;
        if received.is_empty() {
            debug!("{} timed out after {:?}", opcode, response_timeout);
            return Err(Error::Timeout {
                sent,
                timeout: response_timeout,
            });
        }

        {
            let mut port = TimeoutGuard::new(&mut self.transport, Duration::ZERO)?;
            thread::sleep(self.settle_delay);
            let rest = port.read_available(self.drain_limit)?;
            received.extend_from_slice(&rest);
        }

        trace!("recv {}", bytes_to_hex(&received));

        let response = frame.parse_response(received.freeze())?;

        debug!(
            "{} -> status 0x{:02X}, {} bytes",
            opcode,
            response.status,
            response.payload.len()
        );

        match expected_status {
            Some(expected) => Ok(response.expect_status(expected)?),
            None => Ok(response),
        }
    }
}
