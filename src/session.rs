//! Session aggregation and publication.
//!
//! _Requires Cargo feature `std`._
//!
//! One sampling session covers a bounded stretch of wire traffic and yields
//! one [`SessionResult`]. The caller records the raw samples (and decides
//! when sessions start and stop), [`decode`] folds them into a result, and
//! [`publish`] hands the result to a [`Sink`] while keeping the caller's
//! [`SessionCounters`] current.

use alloc::collections::BTreeMap;

use chrono::{DateTime, Utc};
use log::warn;

use crate::wire::{DecodeTable, RawSample, Segmenter};

/// The decoded outcome of one sampling session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    /// When the session's samples were decoded.
    ///
    /// Captured once per session, so every reading shares it.
    pub timestamp: DateTime<Utc>,
    /// The latest decoded value for each reading name.
    pub readings: BTreeMap<&'static str, f64>,
}

/// Decode one session's samples into a timestamped result.
///
/// Readings are folded last-wins: when a session carries several frames of
/// the same type, only the most recently decoded value is kept. A frame
/// that fails byte assembly is skipped and decoding continues.
pub fn decode(
    samples: &[RawSample],
    segmenter: &Segmenter,
    table: &DecodeTable,
) -> SessionResult {
    let mut readings = BTreeMap::new();

    for frame in segmenter.segment(samples) {
        let bytes = match frame.into_bytes() {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("skipping a frame that failed byte assembly: {err}");
                continue;
            }
        };

        if let Some(reading) = table.decode(&bytes) {
            readings.insert(reading.name, reading.value);
        }
    }

    SessionResult {
        timestamp: Utc::now(),
        readings,
    }
}

/// A destination for decoded session results.
pub trait Sink {
    /// Hand over one session's result, reporting whether delivery succeeded.
    fn publish(&mut self, result: &SessionResult) -> bool;
}

/// Per-run session counters, owned by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionCounters {
    /// Sessions published so far.
    pub sessions: u64,
    /// Publications the sink reported as failed.
    pub sink_failures: u64,
}

/// Publish a session result to a sink, updating the caller's counters.
///
/// A sink failure is counted and reported back, but the decoded result
/// remains valid; retrying or dropping it is the caller's decision.
pub fn publish(
    result: &SessionResult,
    sink: &mut impl Sink,
    counters: &mut SessionCounters,
) -> bool {
    let delivered = sink.publish(result);

    counters.sessions += 1;
    if !delivered {
        counters.sink_failures += 1;
    }

    delivered
}
