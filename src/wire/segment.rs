//! Timing-based frame segmentation.

use alloc::vec::Vec;
use core::mem;
use core::time::Duration;

use log::trace;

use super::frame::{FRAME_BITS, Frame};

/// The default boundary threshold between consecutive frames.
///
/// Bits within a frame arrive a few milliseconds apart; a gap of more than
/// 50 ms only ever occurs between frames.
pub const DEFAULT_BOUNDARY: Duration = Duration::from_millis(50);

/// A single bit read off the wire, with the time elapsed since the previous
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    /// The sampled data line level.
    pub bit: bool,
    /// Time since the preceding clock edge.
    pub elapsed: Duration,
}

/// Segmenter cutting a sample sequence into frames at timing gaps.
#[derive(Debug, Clone)]
pub struct Segmenter {
    boundary: Duration,
    frame_bits: usize,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            boundary: DEFAULT_BOUNDARY,
            frame_bits: FRAME_BITS,
        }
    }
}

impl Segmenter {
    /// Create a segmenter with a custom boundary threshold and frame length.
    ///
    /// Sensor wire speed varies between hardware revisions, so neither value
    /// is hardcoded; [`Segmenter::default`] uses [`DEFAULT_BOUNDARY`] and
    /// [`FRAME_BITS`].
    pub fn new(boundary: Duration, frame_bits: usize) -> Self {
        Self {
            boundary,
            frame_bits,
        }
    }

    /// Cut one session's samples into frames.
    ///
    /// A sample whose timespan exceeds the boundary threshold finalizes the
    /// in-progress buffer before its own bit is appended to a fresh one, so
    /// no emitted frame ever spans a gap. Candidate frames of the wrong
    /// length are dropped, and a partial buffer remaining at end of input is
    /// discarded: only boundary-triggered flushes become frames.
    pub fn segment(&self, samples: &[RawSample]) -> Vec<Frame> {
        let mut frames = Vec::new();
        let mut buffer = Vec::new();

        for sample in samples {
            if sample.elapsed > self.boundary {
                self.flush(&mut buffer, &mut frames);
            }

            buffer.push(sample.bit);
        }

        frames
    }

    /// Finalize the in-progress buffer, keeping it only if well-formed.
    fn flush(&self, buffer: &mut Vec<bool>, frames: &mut Vec<Frame>) {
        let bits = mem::take(buffer);

        if bits.len() == self.frame_bits {
            frames.push(Frame::from_bits(bits));
        } else if !bits.is_empty() {
            // Expected at session start and after line noise.
            trace!(
                "dropping a {}-bit candidate frame ({} expected)",
                bits.len(),
                self.frame_bits
            );
        }
    }
}
