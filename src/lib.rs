#![no_std]

//! A decoder for the self-clocked serial bitstream of the CO-50 carbon
//! dioxide monitor.
//!
//! The CO-50 reports measurements as 40-bit frames on a two-wire serial
//! interface with no explicit delimiters: frame boundaries are inferred from
//! gaps between clock edges. This crate turns a recorded sequence of
//! (bit, inter-sample timespan) pairs into typed physical readings.
//!
//! The [`wire`] module holds the protocol core (byte assembly, timing-based
//! frame segmentation, and the type-byte decode table) and is usable
//! without `std`. The [`session`] module layers session aggregation,
//! timestamping, and sink publication on top.
//!
//! Sampling the device's pins and scheduling sessions are left to the
//! caller; the decoder consumes one session's sample buffer at a time and
//! never touches hardware.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable the timestamped session layer (default).

extern crate alloc;

#[cfg(feature = "std")]
pub mod session;
pub mod wire;
