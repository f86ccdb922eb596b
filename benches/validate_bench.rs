//! Benchmarks for utf8stream.
//!
//! Only valid input is measured: invalid text fails the stream at once and is
//! never the expensive case.
//!
//! Run with:
//!     cargo bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use utf8stream::{Utf8State, Utf8Validator, validate};

/// Inclusive ranges of realistic valid sequences, by encoded width.
const RANGES: [(&str, &str, &str); 4] = [
    ("one_byte", " ", "~"),
    ("two_byte", "\u{a0}", "\u{24f}"),
    ("three_byte", "\u{3042}", "\u{9fc3}"),
    ("four_byte", "\u{2000b}", "\u{2a6b2}"),
];

const LENGTHS: [usize; 5] = [1, 32, 256, 32 * 1024, 1 << 20];

/// Returns the encoding of the next code point, assuming it keeps the same
/// width. Continuation bytes wrap from 0xBF to 0x80 and carry.
fn next_sequence(previous: &[u8]) -> Vec<u8> {
    let mut next = previous.to_vec();
    for i in (0..next.len()).rev() {
        if i > 0 && next[i] == 0xBF {
            next[i] = 0x80;
            continue;
        }
        next[i] += 1;
        break;
    }
    debug_assert!(validate(&next), "{:02x?} is not valid", next);
    next
}

/// Repeats `input` until the result is at least `length` bytes.
fn repeated(input: &str, length: usize) -> Vec<u8> {
    let mut output = input.as_bytes().to_vec();
    while output.len() < length {
        output.extend_from_slice(input.as_bytes());
    }
    output
}

/// Concatenates every sequence from `start` to `end` inclusive, stopping once
/// `length` bytes are reached, then repeats the result up to `length`.
fn ranged(start: &str, end: &str, length: usize) -> Vec<u8> {
    let mut output = start.as_bytes().to_vec();
    let mut current = start.as_bytes().to_vec();
    while output.len() < length && current != end.as_bytes() {
        current = next_sequence(&current);
        output.extend_from_slice(&current);
    }
    let mut full = output.clone();
    while full.len() < length {
        full.extend_from_slice(&output);
    }
    full
}

fn bench_shape(c: &mut Criterion, shape: &str, build: impl Fn(&str, &str, usize) -> Vec<u8>) {
    for (name, start, end) in RANGES {
        let mut group = c.benchmark_group(format!("{}_{}", name, shape));

        for length in LENGTHS {
            let data = build(start, end, length);
            group.throughput(Throughput::Bytes(data.len() as u64));

            group.bench_with_input(BenchmarkId::new("utf8stream", length), &data, |b, data| {
                b.iter(|| validate(black_box(data)))
            });
            group.bench_with_input(BenchmarkId::new("std", length), &data, |b, data| {
                b.iter(|| std::str::from_utf8(black_box(data)).is_ok())
            });
            if name == "one_byte" {
                group.bench_with_input(BenchmarkId::new("is_ascii", length), &data, |b, data| {
                    b.iter(|| black_box(data).is_ascii())
                });
            }
        }

        group.finish();
    }
}

fn bench_repeated(c: &mut Criterion) {
    bench_shape(c, "repeated", |start, _end, length| repeated(start, length));
}

fn bench_ranged(c: &mut Criterion) {
    bench_shape(c, "ranged", ranged);
}

fn bench_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming");
    let data = ranged("\u{3042}", "\u{9fc3}", 1 << 20);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for piece in [64, 4 * 1024, 64 * 1024] {
        group.bench_with_input(BenchmarkId::new("state", piece), &data, |b, data| {
            b.iter(|| {
                data.chunks(piece)
                    .fold(Utf8State::new(), |s, c| s.advance(black_box(c)))
                    .is_complete()
            })
        });

        group.bench_with_input(BenchmarkId::new("validator", piece), &data, |b, data| {
            b.iter(|| {
                let mut validator = Utf8Validator::default();
                for c in data.chunks(piece) {
                    validator.push(black_box(c)).unwrap();
                }
                validator.finish().unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_repeated, bench_ranged, bench_streaming);
criterion_main!(benches);
