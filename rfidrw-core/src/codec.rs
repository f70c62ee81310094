//! Hex and token codecs
//!
//! Tokens travel as fixed-width big-endian integers; hex strings are the
//! human-facing form of raw bytes (`"00 12 34 56 78"`).

use byteorder::{BigEndian, ByteOrder};

use crate::constants::TOKEN_WIDTH;
use crate::error::{Error, Result};

pub use crate::checksum::calculate as checksum;

/// Format bytes as space separated lowercase hex pairs
///
/// # Examples
///
/// ```
/// use rfidrw_core::codec;
///
/// assert_eq!(codec::bytes_to_hex(&[0xAA, 0xDD, 0x00]), "aa dd 00");
/// ```
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes_to_hex_with(bytes, " ")
}

/// Format bytes as lowercase hex pairs joined by `separator`
pub fn bytes_to_hex_with(bytes: &[u8], separator: &str) -> String {
    let encoded = hex::encode(bytes);
    let mut out =
        String::with_capacity(encoded.len() + separator.len() * bytes.len().saturating_sub(1));

    // hex output is ASCII, two chars per byte
    for (i, pair) in encoded.as_bytes().chunks(2).enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        out.push(char::from(pair[0]));
        out.push(char::from(pair[1]));
    }

    out
}

/// Parse a hex string into bytes
///
/// Spaces are ignored anywhere in the input and digits are case-insensitive.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] on a non-hex character or when the
/// number of hex digits is odd.
///
/// # Examples
///
/// ```
/// use rfidrw_core::codec;
///
/// assert_eq!(codec::hex_to_bytes("00 12 34 56 7F").unwrap(), vec![0x00, 0x12, 0x34, 0x56, 0x7F]);
/// assert!(codec::hex_to_bytes("0").is_err());
/// ```
pub fn hex_to_bytes(input: &str) -> Result<Vec<u8>> {
    let digits: String = input.chars().filter(|c| *c != ' ').collect();

    hex::decode(&digits).map_err(|e| Error::InvalidEncoding {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Encode a token into `width` big-endian bytes
///
/// Bits that do not fit in `width` bytes are dropped.
pub fn token_to_bytes(value: u64, width: usize) -> Vec<u8> {
    let mut out = vec![0u8; width];

    let n = width.min(8);
    if n == 0 {
        return out;
    }

    let masked = if n == 8 {
        value
    } else {
        value & ((1u64 << (8 * n)) - 1)
    };
    BigEndian::write_uint(&mut out[width - n..], masked, n);

    out
}

/// Encode a token into the fixed 5-byte field used by the reader
pub fn token_to_array(value: u64) -> [u8; TOKEN_WIDTH] {
    let mut out = [0u8; TOKEN_WIDTH];
    out.copy_from_slice(&token_to_bytes(value, TOKEN_WIDTH));
    out
}

/// Decode a big-endian token of any length
///
/// Bytes beyond the low eight shift older bits out of the result.
pub fn bytes_to_token(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_bytes_to_hex() {
        assert_eq!(bytes_to_hex(&[]), "");
        assert_eq!(bytes_to_hex(&[0x0A]), "0a");
        assert_eq!(bytes_to_hex(&[0x00, 0x12, 0xFF]), "00 12 ff");
        assert_eq!(bytes_to_hex_with(&[0xAA, 0xDD], ""), "aadd");
        assert_eq!(bytes_to_hex_with(&[0xAA, 0xDD], ":"), "aa:dd");
        assert_eq!(bytes_to_hex_with(&[0x01, 0x02, 0x03], ", "), "01, 02, 03");
        assert_eq!(bytes_to_hex_with(&[0xFF], ":"), "ff");
    }

    #[test]
    fn test_hex_to_bytes() {
        assert_eq!(hex_to_bytes("").unwrap(), Vec::<u8>::new());
        assert_eq!(hex_to_bytes("aadd00").unwrap(), vec![0xAA, 0xDD, 0x00]);
        assert_eq!(hex_to_bytes("AA DD 0 0").unwrap(), vec![0xAA, 0xDD, 0x00]);
        assert_eq!(hex_to_bytes(" 1f ").unwrap(), vec![0x1F]);
    }

    #[test]
    fn test_hex_to_bytes_rejects_bad_digit() {
        assert!(matches!(
            hex_to_bytes("0G"),
            Err(Error::InvalidEncoding { .. })
        ));
        assert!(matches!(
            hex_to_bytes("12-34"),
            Err(Error::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn test_hex_to_bytes_rejects_odd_length() {
        assert!(matches!(hex_to_bytes("0"), Err(Error::InvalidEncoding { .. })));
        assert!(matches!(
            hex_to_bytes("12 3"),
            Err(Error::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn test_token_to_bytes() {
        assert_eq!(token_to_bytes(305_419_896, 5), vec![0x00, 0x12, 0x34, 0x56, 0x78]);
        assert_eq!(token_to_bytes(0, 5), vec![0; 5]);
        assert_eq!(token_to_bytes((1 << 40) - 1, 5), vec![0xFF; 5]);
    }

    #[test]
    fn test_token_to_bytes_truncates() {
        // 0x01_0000000001 does not fit in 5 bytes
        assert_eq!(token_to_bytes(0x0100_0000_0001, 5), vec![0, 0, 0, 0, 1]);
        assert_eq!(token_to_bytes(0x1234, 1), vec![0x34]);
        assert_eq!(token_to_bytes(0x1234, 0), Vec::<u8>::new());
    }

    #[test]
    fn test_token_to_bytes_wide() {
        assert_eq!(
            token_to_bytes(0x0102, 10),
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0x01, 0x02]
        );
    }

    #[test]
    fn test_bytes_to_token() {
        assert_eq!(bytes_to_token(&[]), 0);
        assert_eq!(bytes_to_token(&[0x00, 0x12, 0x34, 0x56, 0x78]), 305_419_896);
        assert_eq!(bytes_to_token(&[0x01, 0x02]), 0x0102);
    }

    #[test]
    fn test_token_to_array() {
        assert_eq!(token_to_array(0xAB), [0, 0, 0, 0, 0xAB]);
    }

    proptest! {
        #[test]
        fn prop_hex_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(hex_to_bytes(&bytes_to_hex(&data)).unwrap(), data);
        }

        #[test]
        fn prop_token_roundtrip(value in 0u64..(1u64 << 40)) {
            prop_assert_eq!(bytes_to_token(&token_to_bytes(value, TOKEN_WIDTH)), value);
        }
    }
}
