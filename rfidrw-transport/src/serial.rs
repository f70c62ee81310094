//! Serial transport for readers
//!
//! The readers expose a USB serial bridge running 8N1 at 38400 bauds.

use std::io::{self, Read, Write};
use std::time::Duration;

use bytes::BytesMut;
use rfidrw_core::constants::DEFAULT_BAUD_RATE;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, trace};

use crate::{error::*, Transport};

/// Serial port transport
pub struct SerialTransport {
    path: String,
    baud_rate: u32,
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Open `path` at the default 38400 bauds
    pub fn open(path: impl AsRef<str>) -> Result<Self> {
        Self::open_with_baud_rate(path, DEFAULT_BAUD_RATE)
    }

    /// Open `path` at `baud_rate`, 8 data bits, no parity
    ///
    /// A bare device name such as `ttyUSB0` is looked up under `/dev/`.
    /// The port starts with a zero read timeout.
    pub fn open_with_baud_rate(path: impl AsRef<str>, baud_rate: u32) -> Result<Self> {
        let path = normalize_device_path(path.as_ref())?;

        debug!("Opening {} at {} bauds...", path, baud_rate);

        let port = serialport::new(&path, baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(Duration::ZERO)
            .open()?;

        debug!("Opened {}", path);

        Ok(Self {
            path,
            baud_rate,
            port,
        })
    }

    /// Configured line speed
    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        trace!("Sending {} bytes to {}", data.len(), self.path);

        self.port.write_all(data)?;
        self.port.flush()?;

        Ok(())
    }

    fn read_available(&mut self, max: usize) -> Result<BytesMut> {
        let mut buf = BytesMut::zeroed(max);
        let mut filled = 0;

        while filled < max {
            let n = self.read_chunk(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;

            // keep going only while the driver already holds more data
            if self.port.bytes_to_read()? == 0 {
                break;
            }
        }

        buf.truncate(filled);

        trace!("Received {} bytes from {}", filled, self.path);

        Ok(buf)
    }

    fn timeout(&self) -> Duration {
        self.port.timeout()
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.port.set_timeout(timeout)?;
        Ok(())
    }

    fn endpoint(&self) -> String {
        self.path.clone()
    }
}

/// Resolve a device argument to a path
///
/// Names without a `/` are taken relative to `/dev/`.
pub fn normalize_device_path(path: &str) -> Result<String> {
    let path = path.trim();

    if path.is_empty() {
        return Err(Error::InvalidPath("empty device path".into()));
    }

    if path.contains('/') {
        Ok(path.to_string())
    } else {
        Ok(format!("/dev/{}", path))
    }
}
