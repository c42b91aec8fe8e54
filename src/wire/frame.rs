//! Frame packing and the type-byte decode table.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use thiserror::Error;
use zerocopy::FromBytes;

use super::bits::{MalformedByteGroup, assemble_byte};

/// The length of a well-formed frame, in bits.
pub const FRAME_BITS: usize = 40;

/// Name of the temperature reading, in degrees Celsius.
pub const TEMPERATURE_CELSIUS: &str = "TEMPERATURE_CELSIUS";
/// Name of the carbon dioxide concentration reading, in parts per million.
pub const CO2_CONCENTRATION_PPM: &str = "CO2_CONCENTRATION_PPM";
/// Name of the relative humidity reading, in percent.
pub const RELATIVE_HUMIDITY: &str = "RELATIVE_HUMIDITY";

/// An error packing a frame into bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// The frame does not hold a whole number of measurement bytes.
    #[error("Expected a frame of {expected} bits, found {found}.")]
    Length { expected: usize, found: usize },
    /// A bit group could not be assembled into a byte.
    #[error(transparent)]
    ByteGroup(#[from] MalformedByteGroup),
}

/// An ordered bit sequence collected between two frame boundaries.
///
/// Built incrementally by the segmenter and consumed once by
/// [`Frame::into_bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bits: Vec<bool>,
}

impl Frame {
    /// Wrap a bit sequence collected between two boundaries.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// The frame's bits, in arrival order.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Pack the frame's 40 bits into its five-byte wire layout.
    ///
    /// Each group of eight bits is assembled most significant bit first.
    pub fn into_bytes(self) -> Result<FrameBytes, FrameError> {
        if self.bits.len() != FRAME_BITS {
            return Err(FrameError::Length {
                expected: FRAME_BITS,
                found: self.bits.len(),
            });
        }

        let mut bytes = [0; FRAME_BITS / 8];
        for (byte, group) in bytes.iter_mut().zip(self.bits.chunks_exact(8)) {
            *byte = assemble_byte(group)?;
        }

        Ok(zerocopy::transmute!(bytes))
    }
}

/// The five bytes of a packed frame.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes)]
pub struct FrameBytes {
    /// The type byte, selecting a decode rule.
    pub kind: u8,
    /// The 16-bit measurement field, big-endian.
    pub field: [u8; 2],
    /// Trailing bytes, unused by the known frame types.
    ///
    /// Whether these carry a checksum or padding is undocumented; they are
    /// passed through to decode rules untouched.
    pub reserved: [u8; 2],
}

impl FrameBytes {
    /// The measurement field as an integer.
    pub fn field(&self) -> u16 {
        u16::from_be_bytes(self.field)
    }
}

/// A reading decoded from one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Name of the physical quantity.
    pub name: &'static str,
    /// Value of the physical quantity.
    pub value: f64,
}

/// A decode rule for one frame type.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Name of the quantity this frame type carries.
    pub name: &'static str,
    /// Conversion from the measurement field (and reserved bytes) to a
    /// physical value.
    pub convert: fn(field: u16, reserved: [u8; 2]) -> f64,
}

/// A mapping from type byte to decode rule.
///
/// Supporting a new frame type means inserting one rule; segmentation and
/// aggregation never change.
#[derive(Debug, Clone)]
pub struct DecodeTable {
    rules: BTreeMap<u8, Rule>,
}

impl Default for DecodeTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl DecodeTable {
    /// Create a table with no rules.
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Create a table holding the frame types the CO-50 is known to emit.
    pub fn standard() -> Self {
        let mut table = Self::empty();

        table.insert(
            0x42,
            Rule {
                name: TEMPERATURE_CELSIUS,
                convert: |field, _| kelvin_to_celsius(f64::from(field) / 16.0),
            },
        );
        table.insert(
            0x50,
            Rule {
                name: CO2_CONCENTRATION_PPM,
                convert: |field, _| f64::from(field),
            },
        );
        table.insert(
            0x41,
            Rule {
                name: RELATIVE_HUMIDITY,
                convert: |field, _| f64::from(field) / 100.0,
            },
        );

        table
    }

    /// Add a rule for a frame type, replacing any previous rule for it.
    pub fn insert(&mut self, kind: u8, rule: Rule) {
        self.rules.insert(kind, rule);
    }

    /// Decode a packed frame into a reading.
    ///
    /// Returns `None` for an unrecognized type byte; the device emits frame
    /// types this crate does not interpret, so this is a normal outcome
    /// rather than an error.
    pub fn decode(&self, frame: &FrameBytes) -> Option<Reading> {
        let kind = frame.kind;
        let rule = self.rules.get(&kind)?;

        Some(Reading {
            name: rule.name,
            value: (rule.convert)(frame.field(), frame.reserved),
        })
    }
}

/// Convert a temperature in Kelvin to degrees Celsius.
fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - 273.15
}
