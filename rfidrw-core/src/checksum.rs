//! Frame checksum
//!
//! The checksum byte is the XOR of every byte from the length byte through
//! the end of the payload. A well-formed frame therefore XORs to zero over
//! the range length byte ..= checksum byte.

use tracing::trace;

/// Calculate the XOR checksum of `data`
///
/// # Examples
///
/// ```
/// use rfidrw_core::checksum;
///
/// assert_eq!(checksum::calculate(&[0x03, 0x01, 0x02]), 0x00);
/// assert_eq!(checksum::calculate(&[0x04, 0x01, 0x03]), 0x06);
/// ```
pub fn calculate(data: &[u8]) -> u8 {
    let checksum = data.iter().fold(0u8, |acc, b| acc ^ b);

    trace!(
        len = data.len(),
        checksum = format!("0x{:02X}", checksum),
        "Calculated checksum"
    );

    checksum
}

/// Verify a byte range that ends with its own checksum
pub fn verify(data_with_checksum: &[u8]) -> bool {
    calculate(data_with_checksum) == 0
}
