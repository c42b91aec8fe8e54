//! Helper for assembling bits into bytes.

use thiserror::Error;

/// An error assembling a byte from a bit group.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Expected a byte group of 8 bits, found {0}.")]
pub struct MalformedByteGroup(pub usize);

/// Assemble exactly eight bits into a byte, first bit most significant.
///
/// Returns the group's length as a [`MalformedByteGroup`] error when given
/// any other number of bits.
pub fn assemble_byte(bits: &[bool]) -> Result<u8, MalformedByteGroup> {
    let bits: &[bool; 8] = bits
        .try_into()
        .map_err(|_| MalformedByteGroup(bits.len()))?;

    Ok(bits.iter().fold(0, |acc, bit| (acc << 1) | u8::from(*bit)))
}
