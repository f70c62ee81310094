//! Reader frame structure, encoding and response validation

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

use crate::{
    checksum,
    codec::bytes_to_hex,
    error::{Error, Result},
    opcode::Opcode,
    HEADER_SIZE, MAX_PAYLOAD_SIZE, PREAMBLE,
};

/// Request frame
///
/// # Frame Structure
///
/// ```text
/// ┌──────────┬────────┬─────────┬─────────────┬──────────┐
/// │ Preamble │ Length │ Opcode  │   Payload   │ Checksum │
/// │ AA DD 00 │ 1 byte │ 2 bytes │ 0-252 bytes │  1 byte  │
/// └──────────┴────────┴─────────┴─────────────┴──────────┘
/// ```
///
/// `Length` counts opcode, payload and checksum. `Checksum` is the XOR of
/// every byte from `Length` through the payload, so the range
/// `Length ..= Checksum` XORs to zero.
///
/// Responses share the layout; their first payload byte is a status code
/// and the opcode is echoed back.
///
/// # Examples
///
/// ```
/// use rfidrw_core::{Frame, Opcode};
///
/// let frame = Frame::new(Opcode::GetInfo);
/// assert_eq!(&frame.encode()[..], &[0xAA, 0xDD, 0x00, 0x03, 0x01, 0x02, 0x00]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    opcode: Opcode,
    payload: Bytes,
}

impl Frame {
    /// Smallest valid response: header, opcode, status and checksum
    pub const MIN_RESPONSE_SIZE: usize = HEADER_SIZE + Opcode::SIZE + 2;

    /// Create a frame with empty payload
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            payload: Bytes::new(),
        }
    }

    /// Create a frame with payload
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProtocolViolation`] if the payload is longer than
    /// [`MAX_PAYLOAD_SIZE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rfidrw_core::{Frame, Opcode};
    ///
    /// let frame = Frame::with_payload(Opcode::Beep, vec![10]).unwrap();
    /// assert_eq!(frame.size(), 8);
    ///
    /// assert!(Frame::with_payload(Opcode::Beep, vec![0; 253]).is_err());
    /// ```
    pub fn with_payload(opcode: Opcode, payload: impl Into<Bytes>) -> Result<Self> {
        let payload = payload.into();

        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(Error::ProtocolViolation(format!(
                "payload of {} bytes exceeds maximum of {} bytes",
                payload.len(),
                MAX_PAYLOAD_SIZE
            )));
        }

        Ok(Self { opcode, payload })
    }

    /// Operation selector
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Opcode-specific request data
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Value of the length byte: opcode + payload + checksum
    pub fn length_byte(&self) -> u8 {
        // fields are private and only `with_payload` sets a payload
        (Opcode::SIZE + self.payload.len() + 1) as u8
    }

    /// Checksum over length byte, opcode and payload
    pub fn checksum(&self) -> u8 {
        let [hi, lo] = self.opcode.to_bytes();
        self.length_byte() ^ hi ^ lo ^ checksum::calculate(&self.payload)
    }

    /// Encode frame to bytes
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(self.size());

        buf.put_slice(&PREAMBLE);
        buf.put_u8(self.length_byte());
        buf.put_u16(self.opcode.into());
        buf.put_slice(&self.payload);
        buf.put_u8(self.checksum());

        buf
    }

    /// Get total encoded size
    pub fn size(&self) -> usize {
        HEADER_SIZE + Opcode::SIZE + self.payload.len() + 1
    }

    /// Validate `received` as the reply to this frame
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedResponse`] if the length byte disagrees with the
    ///   received size, the preamble is wrong, the opcode is not echoed, or
    ///   there is no room for a status byte
    /// - [`Error::ChecksumMismatch`] if the length ..= checksum range does
    ///   not XOR to zero
    pub fn parse_response(&self, received: Bytes) -> Result<Response> {
        let sent = self.encode().freeze();
        let malformed = |reason: &'static str| Error::MalformedResponse {
            reason,
            sent: sent.clone(),
            received: received.clone(),
        };

        if received.len() < HEADER_SIZE || usize::from(received[3]) != received.len() - HEADER_SIZE {
            return Err(malformed("bad length"));
        }

        let opcode = self.opcode.to_bytes();
        if received[..3] != PREAMBLE || received.get(4..6) != Some(&opcode[..]) {
            return Err(malformed("bad format"));
        }

        let residue = checksum::calculate(&received[3..]);
        if residue != 0 {
            return Err(Error::ChecksumMismatch {
                residue,
                sent,
                received,
            });
        }

        if received.len() < Self::MIN_RESPONSE_SIZE {
            return Err(malformed("missing status"));
        }

        let status = received[6];
        let payload = received.slice(7..received.len() - 1);

        Ok(Response {
            opcode: self.opcode,
            status,
            payload,
            sent,
            received,
        })
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("opcode", &self.opcode)
            .field("length", &self.length_byte())
            .field("checksum", &format!("0x{:02X}", self.checksum()))
            .field("payload", &bytes_to_hex(&self.payload))
            .finish()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame[{}](len={})", self.opcode, self.payload.len())
    }
}

/// Validated reply to a [`Frame`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Echoed opcode
    pub opcode: Opcode,

    /// Status byte (`0x00` = success)
    pub status: u8,

    /// Response data following the status byte
    pub payload: Bytes,

    /// Request frame this answers
    pub sent: Bytes,

    /// Complete response frame as received
    pub received: Bytes,
}

impl Response {
    /// Require a specific status
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceError`] carrying the actual status otherwise.
    pub fn expect_status(self, expected: u8) -> Result<Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(self.into_device_error())
        }
    }

    /// Turn this response into a device error
    pub fn into_device_error(self) -> Error {
        Error::DeviceError {
            opcode: self.opcode,
            status: self.status,
            sent: self.sent,
            received: self.received,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::status;
    use pretty_assertions::assert_eq;

    fn reply(opcode: Opcode, status: u8, data: &[u8]) -> Bytes {
        let mut payload = vec![status];
        payload.extend_from_slice(data);
        Frame::with_payload(opcode, payload).unwrap().encode().freeze()
    }

    #[test]
    fn test_encode_get_info() {
        let frame = Frame::new(Opcode::GetInfo);
        assert_eq!(
            &frame.encode()[..],
            &[0xAA, 0xDD, 0x00, 0x03, 0x01, 0x02, 0x00]
        );
    }

    #[test]
    fn test_encode_beep() {
        let frame = Frame::with_payload(Opcode::Beep, vec![0x0A]).unwrap();
        // 04 ^ 01 ^ 03 ^ 0A
        assert_eq!(
            &frame.encode()[..],
            &[0xAA, 0xDD, 0x00, 0x04, 0x01, 0x03, 0x0A, 0x0C]
        );
    }

    #[test]
    fn test_encoded_frame_folds_to_zero() {
        let frame =
            Frame::with_payload(Opcode::WriteToken, vec![0x00, 0x00, 0x12, 0x34, 0x56, 0x78])
                .unwrap();
        let encoded = frame.encode();

        assert_eq!(encoded.len(), frame.size());
        assert_eq!(usize::from(encoded[3]), encoded.len() - HEADER_SIZE);
        assert!(checksum::verify(&encoded[3..]));
    }

    #[test]
    fn test_payload_limit() {
        assert!(Frame::with_payload(Opcode::Beep, vec![0; MAX_PAYLOAD_SIZE]).is_ok());
        assert!(matches!(
            Frame::with_payload(Opcode::Beep, vec![0; MAX_PAYLOAD_SIZE + 1]),
            Err(Error::ProtocolViolation(_))
        ));
    }

    #[test]
    fn test_oversized_payload_never_encodes() {
        let result = Frame::with_payload(Opcode::Beep, vec![0u8; 300]);
        assert!(matches!(result, Err(Error::ProtocolViolation(_))));

        let frame = Frame::with_payload(Opcode::Beep, vec![0u8; MAX_PAYLOAD_SIZE]).unwrap();
        let encoded = frame.encode();
        assert_eq!(frame.payload().len(), MAX_PAYLOAD_SIZE);
        assert_eq!(usize::from(encoded[3]), encoded.len() - HEADER_SIZE);
        assert_eq!(encoded[3], 0xFF);
        assert!(checksum::verify(&encoded[3..]));
    }

    #[test]
    fn test_accessors() {
        let frame = Frame::with_payload(Opcode::SetLed, vec![0x02]).unwrap();
        assert_eq!(frame.opcode(), Opcode::SetLed);
        assert_eq!(&frame.payload()[..], &[0x02]);
    }

    #[test]
    fn test_parse_response() {
        let frame = Frame::new(Opcode::GetInfo);
        let received = reply(Opcode::GetInfo, 0x00, b"ID card reader & writer");

        let response = frame.parse_response(received.clone()).unwrap();
        assert_eq!(response.opcode, Opcode::GetInfo);
        assert_eq!(response.status, 0x00);
        assert_eq!(response.status, status::OK);
        assert_eq!(&response.payload[..], b"ID card reader & writer");
        assert_eq!(response.received, received);
        assert_eq!(response.sent, frame.encode().freeze());
    }

    #[test]
    fn test_parse_response_empty_payload() {
        let frame = Frame::new(Opcode::Beep);
        let response = frame.parse_response(reply(Opcode::Beep, 0x00, &[])).unwrap();
        assert!(response.payload.is_empty());
    }

    #[test]
    fn test_parse_response_bad_length() {
        let frame = Frame::new(Opcode::ReadToken);
        let mut received = BytesMut::from(&reply(Opcode::ReadToken, 0x00, &[1, 2, 3, 4, 5])[..]);
        received[3] += 1;

        let result = frame.parse_response(received.freeze());
        assert!(matches!(
            result,
            Err(Error::MalformedResponse { reason: "bad length", .. })
        ));
    }

    #[test]
    fn test_parse_response_truncated() {
        let frame = Frame::new(Opcode::ReadToken);
        let full = reply(Opcode::ReadToken, 0x00, &[1, 2, 3, 4, 5]);

        let result = frame.parse_response(full.slice(..full.len() - 2));
        assert!(matches!(result, Err(Error::MalformedResponse { .. })));

        let result = frame.parse_response(Bytes::from_static(&[0xAA, 0xDD]));
        assert!(matches!(result, Err(Error::MalformedResponse { .. })));
    }

    #[test]
    fn test_parse_response_bad_preamble() {
        let frame = Frame::new(Opcode::GetInfo);
        let mut received = BytesMut::from(&reply(Opcode::GetInfo, 0x00, b"x")[..]);
        received[1] = 0xDE;

        let result = frame.parse_response(received.freeze());
        assert!(matches!(
            result,
            Err(Error::MalformedResponse { reason: "bad format", .. })
        ));
    }

    #[test]
    fn test_parse_response_opcode_mismatch() {
        let frame = Frame::new(Opcode::ReadToken);
        let received = reply(Opcode::GetInfo, 0x00, &[]);

        let result = frame.parse_response(received);
        assert!(matches!(
            result,
            Err(Error::MalformedResponse { reason: "bad format", .. })
        ));
    }

    #[test]
    fn test_parse_response_checksum_mismatch() {
        let frame = Frame::new(Opcode::ReadToken);
        let mut received = BytesMut::from(&reply(Opcode::ReadToken, 0x00, &[1, 2, 3, 4, 5])[..]);
        let last = received.len() - 1;
        received[last] ^= 0x40;

        match frame.parse_response(received.freeze()) {
            Err(Error::ChecksumMismatch { residue, .. }) => assert_eq!(residue, 0x40),
            other => panic!("Expected ChecksumMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_response_missing_status() {
        let frame = Frame::new(Opcode::Beep);
        // length 3: opcode + checksum only
        let received = Frame::new(Opcode::Beep).encode().freeze();

        let result = frame.parse_response(received);
        assert!(matches!(
            result,
            Err(Error::MalformedResponse { reason: "missing status", .. })
        ));
    }

    #[test]
    fn test_expect_status() {
        let frame = Frame::new(Opcode::SetLed);

        let ok = frame.parse_response(reply(Opcode::SetLed, 0x00, &[])).unwrap();
        assert!(ok.expect_status(0x00).is_ok());

        let failed = frame.parse_response(reply(Opcode::SetLed, 0x05, &[])).unwrap();
        let err = failed.expect_status(0x00).unwrap_err();
        assert_eq!(err.device_status(), Some(0x05));
        assert!(err.to_string().contains("aa dd 00"));
    }
}
