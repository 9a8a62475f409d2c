use itertools::Itertools as _;

use pcd_core::scan::{AlignedLine, AlignedStream, DecodedStream, Scanner};

/// km/h to mm/s
pub const KMH_TO_MMPS: f64 = 1000.0 / 3.6;

/// Distance travelled during the pass, in millimeters.
pub fn travel_length_mm(speed_kmh: f64, pass_duration_s: f64) -> f64 {
    speed_kmh * KMH_TO_MMPS * pass_duration_s
}

/// `n` evenly spaced values from `start` to `end` inclusive.
/// A single value is `start`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        end
                    } else {
                        start + i as f64 * step
                    }
                })
                .collect()
        }
    }
}

fn with_positions(
    scanner: Scanner,
    stream: DecodedStream,
    length_mm: f64,
) -> impl Iterator<Item = AlignedLine> {
    let positions = linspace(0.0, length_mm, stream.len());
    stream
        .lines
        .into_iter()
        .zip(positions)
        .map(move |(line, position_mm)| AlignedLine {
            scanner,
            line,
            position_mm,
        })
}

/// Merges the streams of both scanners along the travel axis.
///
/// Each stream is spread evenly over the travel length on its own, so scanners with
/// different frame counts cover the same span. Lines are emitted A, B per index; once
/// the shorter stream runs out the rest of the longer one is appended in order.
/// This is not a time-synchronized resample.
pub fn align(
    stream_a: DecodedStream,
    stream_b: DecodedStream,
    pass_duration_s: f64,
    speed_kmh: f64,
) -> AlignedStream {
    let length_mm = travel_length_mm(speed_kmh, pass_duration_s);
    log::debug!(
        "aligning {} + {} scan lines over {:.1} mm",
        stream_a.len(),
        stream_b.len(),
        length_mm
    );

    let lines = with_positions(Scanner::A, stream_a, length_mm)
        .interleave(with_positions(Scanner::B, stream_b, length_mm))
        .collect();

    AlignedStream::new(lines)
}
