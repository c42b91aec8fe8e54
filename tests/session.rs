use std::time::Duration;

use approx::assert_relative_eq;
use chrono::Utc;
use co50::session::{self, SessionCounters, SessionResult, Sink};
use co50::wire::frame::{CO2_CONCENTRATION_PPM, RELATIVE_HUMIDITY, TEMPERATURE_CELSIUS};
use co50::wire::{DecodeTable, RawSample, Segmenter};

#[test]
fn decode_a_session() {
    let samples = session_samples(&[
        [0x42, 0x46, 0x1A, 0x84, 0xE4],
        [0x50, 0x03, 0x18, 0x00, 0x00],
        [0x41, 0x1D, 0x4C, 0x00, 0x00],
    ]);

    let before = Utc::now();
    let result = session::decode(&samples, &Segmenter::default(), &DecodeTable::standard());
    let after = Utc::now();

    assert_eq!(result.readings.len(), 3);
    assert_relative_eq!(
        result.readings[TEMPERATURE_CELSIUS],
        17946.0 / 16.0 - 273.15
    );
    assert_relative_eq!(result.readings[CO2_CONCENTRATION_PPM], 792.0);
    assert_relative_eq!(result.readings[RELATIVE_HUMIDITY], 75.0);

    assert!(before <= result.timestamp && result.timestamp <= after);
}

#[test]
fn decode_skips_a_malformed_frame_between_valid_ones() {
    let mut samples = frame_samples([0x42, 0x46, 0x1A, 0x84, 0xE4]);
    samples.extend(
        frame_samples([0x41, 0x1D, 0x4C, 0x00, 0x00])
            .into_iter()
            .take(35),
    );
    samples.extend(frame_samples([0x50, 0x03, 0x18, 0x00, 0x00]));
    samples.push(RawSample {
        bit: false,
        elapsed: FRAME_GAP,
    });

    let result = session::decode(&samples, &Segmenter::default(), &DecodeTable::standard());

    // Only the two well-formed frames contribute readings.
    assert_eq!(result.readings.len(), 2);
    assert!(result.readings.contains_key(TEMPERATURE_CELSIUS));
    assert!(result.readings.contains_key(CO2_CONCENTRATION_PPM));
}

#[test]
fn decode_keeps_the_last_reading_of_a_type() {
    let samples = session_samples(&[
        [0x50, 0x03, 0x18, 0x00, 0x00], // 792 ppm
        [0x50, 0x03, 0x84, 0x00, 0x00], // 900 ppm
    ]);

    let result = session::decode(&samples, &Segmenter::default(), &DecodeTable::standard());

    assert_eq!(result.readings.len(), 1);
    assert_relative_eq!(result.readings[CO2_CONCENTRATION_PPM], 900.0);
}

#[test]
fn decode_is_idempotent_over_the_same_samples() {
    let samples = session_samples(&[
        [0x42, 0x46, 0x1A, 0x84, 0xE4],
        [0x50, 0x03, 0x18, 0x00, 0x00],
    ]);

    let segmenter = Segmenter::default();
    let table = DecodeTable::standard();

    let first = session::decode(&samples, &segmenter, &table);
    let second = session::decode(&samples, &segmenter, &table);

    assert_eq!(first.readings, second.readings);
}

#[test]
fn decode_unrecognized_frames_to_an_empty_result() {
    let samples = session_samples(&[[0x99, 0x12, 0x34, 0x56, 0x78]]);

    let result = session::decode(&samples, &Segmenter::default(), &DecodeTable::standard());

    assert!(result.readings.is_empty());
}

#[test]
fn decode_noise_to_an_empty_result() {
    // Arbitrary bits with gaps scattered mid-frame.
    let mut samples = session_samples(&[[0xFF, 0x00, 0xAA, 0x55, 0x0F]]);
    samples[7].elapsed = FRAME_GAP;
    samples[29].elapsed = FRAME_GAP;

    let result = session::decode(&samples, &Segmenter::default(), &DecodeTable::standard());

    assert!(result.readings.is_empty());

    let empty = session::decode(&[], &Segmenter::default(), &DecodeTable::standard());
    assert!(empty.readings.is_empty());
}

#[test]
fn publish_counts_sessions_and_failures() {
    let samples = session_samples(&[[0x50, 0x03, 0x18, 0x00, 0x00]]);
    let result = session::decode(&samples, &Segmenter::default(), &DecodeTable::standard());

    let mut sink = RecordingSink {
        received: Vec::new(),
        deliver: true,
    };
    let mut counters = SessionCounters::default();

    assert!(session::publish(&result, &mut sink, &mut counters));
    sink.deliver = false;
    assert!(!session::publish(&result, &mut sink, &mut counters));
    sink.deliver = true;
    assert!(session::publish(&result, &mut sink, &mut counters));

    assert_eq!(counters.sessions, 3);
    assert_eq!(counters.sink_failures, 1);

    // A failed delivery still hands the sink the full, valid result.
    assert_eq!(sink.received.len(), 3);
    assert_eq!(sink.received[1].readings, result.readings);
}

struct RecordingSink {
    received: Vec<SessionResult>,
    deliver: bool,
}

impl Sink for RecordingSink {
    fn publish(&mut self, result: &SessionResult) -> bool {
        self.received.push(result.clone());
        self.deliver
    }
}

const BIT_SPACING: Duration = Duration::from_millis(2);
const FRAME_GAP: Duration = Duration::from_millis(120);

/// A byte's bits, most significant first.
fn byte_bits(byte: u8) -> impl Iterator<Item = bool> {
    (0..8).map(move |i| byte & (0x80 >> i) != 0)
}

/// Samples for one frame, led by a frame-boundary gap.
fn frame_samples(bytes: [u8; 5]) -> Vec<RawSample> {
    let mut samples: Vec<RawSample> = bytes
        .into_iter()
        .flat_map(byte_bits)
        .map(|bit| RawSample {
            bit,
            elapsed: BIT_SPACING,
        })
        .collect();
    samples[0].elapsed = FRAME_GAP;
    samples
}

/// Samples for a whole session, with a trailing boundary to flush the last
/// frame.
fn session_samples(frames: &[[u8; 5]]) -> Vec<RawSample> {
    let mut samples: Vec<RawSample> = frames.iter().copied().flat_map(frame_samples).collect();
    samples.push(RawSample {
        bit: false,
        elapsed: FRAME_GAP,
    });
    samples
}
