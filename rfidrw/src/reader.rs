//! High-level reader interface

use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, info, warn};

use rfidrw_core::codec;
use rfidrw_core::constants::{lock, status, DEFAULT_BEEP_DURATION, DEFAULT_RESPONSE_TIMEOUT, TOKEN_WIDTH};
use rfidrw_core::{Opcode, Response};
use rfidrw_transport::{SerialTransport, Transport};
use rfidrw_types::{Indicator, ReaderInfo};

use crate::error::{Error, Result};
use crate::transceiver::Transceiver;
use crate::write::WriteState;

/// 125KHz RFID reader/writer
///
/// High-level interface to the reader's commands. Every call is a blocking
/// request/response exchange over the owned transport.
///
/// # Examples
///
/// ```no_run
/// use rfidrw::Reader;
///
/// fn main() -> rfidrw::Result<()> {
///     let mut reader = Reader::open("ttyUSB0")?;
///
///     println!("{}", reader.get_info()?);
///
///     match reader.read_token()? {
///         Some(token) => println!("Token: {}", token),
///         None => println!("No card present"),
///     }
///
///     Ok(())
/// }
/// ```
pub struct Reader<T: Transport> {
    transceiver: Transceiver<T>,
    response_timeout: Duration,
}

impl Reader<SerialTransport> {
    /// Open a reader on a serial device at the default speed
    pub fn open(path: impl AsRef<str>) -> Result<Self> {
        let transport = SerialTransport::open(path)?;
        info!("Reader opened on {}", transport.endpoint());
        Ok(Self::new(transport))
    }

    /// Open a reader on a serial device at `baud_rate`
    pub fn open_with_baud_rate(path: impl AsRef<str>, baud_rate: u32) -> Result<Self> {
        let transport = SerialTransport::open_with_baud_rate(path, baud_rate)?;
        info!("Reader opened on {} at {} bauds", transport.endpoint(), baud_rate);
        Ok(Self::new(transport))
    }
}

impl<T: Transport> Reader<T> {
    /// Wrap an already opened transport
    pub fn new(transport: T) -> Self {
        Self {
            transceiver: Transceiver::new(transport),
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
        }
    }

    /// Set how long each command waits for the reply to start
    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    /// Set the pause after sending and before draining a reply
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.transceiver = self.transceiver.with_settle_delay(delay);
        self
    }

    pub fn response_timeout(&self) -> Duration {
        self.response_timeout
    }

    pub fn transport(&self) -> &T {
        self.transceiver.transport()
    }

    pub fn into_inner(self) -> T {
        self.transceiver.into_inner()
    }

    /// Run a raw exchange with an explicit timeout
    pub fn exchange(
        &mut self,
        opcode: Opcode,
        payload: &[u8],
        response_timeout: Duration,
        expected_status: Option<u8>,
    ) -> Result<Response> {
        self.transceiver
            .exchange(opcode, payload, response_timeout, expected_status)
    }

    fn command(&mut self, opcode: Opcode, payload: &[u8]) -> Result<Response> {
        let timeout = self.response_timeout;
        self.exchange(opcode, payload, timeout, Some(status::OK))
    }

    /// Get the reader description
    pub fn get_info(&mut self) -> Result<ReaderInfo> {
        debug!("Getting reader info...");

        let response = self.command(Opcode::GetInfo, &[])?;
        let info = ReaderInfo::from_payload(response.payload);

        debug!("Reader info: {}", info);

        Ok(info)
    }

    /// Sound the buzzer for `duration` (reader units)
    ///
    /// A duration of 0 makes the reader beep until the next beep command.
    pub fn beep(&mut self, duration: u8) -> Result<()> {
        if duration == 0 {
            warn!("Beep duration 0 beeps forever");
        }

        self.command(Opcode::Beep, &[duration])?;
        Ok(())
    }

    /// Sound the buzzer for the default duration
    pub fn beep_default(&mut self) -> Result<()> {
        self.beep(DEFAULT_BEEP_DURATION)
    }

    /// Set the indicator LED
    pub fn set_indicator(&mut self, indicator: Indicator) -> Result<()> {
        debug!("Setting indicator to {}", indicator);

        let code: u8 = indicator.into();
        self.command(Opcode::SetLed, &[code])?;
        Ok(())
    }

    /// Read the raw token bytes of the card in the field
    ///
    /// Returns `None` when no card is present.
    pub fn read_token_raw(&mut self) -> Result<Option<Bytes>> {
        let timeout = self.response_timeout;
        let response = self.exchange(Opcode::ReadToken, &[], timeout, None)?;

        match response.status {
            status::OK => {
                debug!("Read token {}", codec::bytes_to_hex(&response.payload));
                Ok(Some(response.payload))
            }
            status::NO_CARD => {
                debug!("No card present");
                Ok(None)
            }
            _ => Err(response.into_device_error().into()),
        }
    }

    /// Read the token of the card in the field as a number
    pub fn read_token(&mut self) -> Result<Option<u64>> {
        Ok(self
            .read_token_raw()?
            .map(|raw| codec::bytes_to_token(&raw)))
    }

    /// Write raw token bytes to the card and verify them
    ///
    /// Falls back to the alternate write opcode once if the first write
    /// does not read back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteVerificationFailed`] if neither write reads back,
    /// or the first exchange error encountered.
    pub fn write_token_raw(&mut self, raw: &[u8; TOKEN_WIDTH], locked: bool) -> Result<()> {
        let mut payload = Vec::with_capacity(1 + TOKEN_WIDTH);
        payload.push(if locked { lock::LOCKED } else { lock::UNLOCKED });
        payload.extend_from_slice(raw);

        let mut state = WriteState::Attempt1;
        let mut read_back = None;

        while !state.is_terminal() {
            debug!("Writing token {}: {}", codec::bytes_to_hex(raw), state);

            state = match state {
                WriteState::Attempt1 => {
                    self.command(Opcode::WriteToken, &payload)?;
                    state.written()
                }
                WriteState::Attempt2 => {
                    self.command(Opcode::WriteTokenAlt, &payload)?;
                    state.written()
                }
                WriteState::Verify1 | WriteState::Verify2 => {
                    read_back = self.read_token_raw()?;
                    let matched = read_back.as_deref() == Some(&raw[..]);
                    if !matched {
                        warn!(
                            "Token read back as {} after {}",
                            read_back
                                .as_deref()
                                .map(codec::bytes_to_hex)
                                .unwrap_or_else(|| "nothing".into()),
                            state
                        );
                    }
                    state.verified(matched)
                }
                WriteState::Done | WriteState::Failed => state,
            };
        }

        if state == WriteState::Failed {
            return Err(Error::WriteVerificationFailed {
                expected: Bytes::copy_from_slice(raw),
                actual: read_back,
            });
        }

        info!("Token {} written", codec::bytes_to_hex(raw));
        Ok(())
    }

    /// Write a numeric token to the card, leaving it unlocked
    pub fn write_token(&mut self, value: u64) -> Result<()> {
        self.write_token_locked(value, false)
    }

    /// Write a numeric token to the card
    ///
    /// Values wider than 40 bits are truncated to the low 5 bytes.
    pub fn write_token_locked(&mut self, value: u64, locked: bool) -> Result<()> {
        self.write_token_raw(&codec::token_to_array(value), locked)
    }
}
