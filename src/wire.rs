//! The CO-50 wire protocol.
//!
//! The device shares no clock with the host. Instead, each bit is sampled on
//! a falling clock edge, and the elapsed time between consecutive edges
//! carries the framing: consecutive bits of one frame arrive a few
//! milliseconds apart, while a pause longer than [`segment::DEFAULT_BOUNDARY`]
//! separates one frame from the next.
//!
//! Decoding proceeds in three stages:
//!
//! 1. [`segment`] cuts the sample sequence into candidate frames at timing
//!    gaps, keeping only those of the expected length.
//!
//! 2. [`bits`] packs each group of eight bits into a byte, most significant
//!    bit first.
//!
//! 3. [`frame`] views the five assembled bytes as a type byte, a 16-bit
//!    big-endian field, and two reserved bytes, and maps the type byte
//!    through a decode table to produce a [`frame::Reading`].
//!
//! Malformed input is never fatal at any stage; bad candidate frames are
//! dropped and decoding continues, so electrical noise costs at most the
//! frames it corrupts.

pub mod bits;
pub mod frame;
pub mod segment;

pub use frame::{DecodeTable, Frame, FrameBytes, Reading};
pub use segment::{RawSample, Segmenter};
