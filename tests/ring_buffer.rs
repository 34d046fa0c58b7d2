//! Tests for the grain ring buffer

use grain_delay_dsp::grain::ring_buffer::RingBuffer;
use grain_delay_dsp::grain::INTERPOLATION_TAIL;

const SIZE: usize = 64;

fn filled(storage: &mut [f32]) -> RingBuffer<'_> {
    let mut buffer = RingBuffer::new(storage);
    for n in 0..SIZE {
        buffer.write(n as f32);
        buffer.advance();
    }
    buffer
}

#[test]
fn write_then_read_nearest() {
    let mut storage = [0.0; SIZE + INTERPOLATION_TAIL];
    let mut buffer = RingBuffer::new(&mut storage);
    assert_eq!(buffer.size(), SIZE);

    for n in 0..3 * SIZE {
        let sample = (n as f32) * 0.5 - 7.0;
        let raw_index = buffer.write_index() as isize;
        buffer.write(sample);

        assert_eq!(buffer.read_nearest(raw_index), sample);
        assert_eq!(buffer.read_nearest(raw_index + SIZE as isize), sample);
        assert_eq!(buffer.read_nearest(raw_index - SIZE as isize), sample);

        buffer.advance();
    }
}

#[test]
fn tail_mirrors_head() {
    let mut storage = [0.0; SIZE + INTERPOLATION_TAIL];
    let mut buffer = RingBuffer::new(&mut storage);

    for n in 0..SIZE + 5 {
        buffer.write(n as f32 + 1.0);
        if n % 3 == 0 {
            buffer.add(0.25);
        }
        buffer.advance();
    }

    let raw = buffer.as_slice();
    for i in 0..INTERPOLATION_TAIL {
        assert_eq!(raw[SIZE + i], raw[i]);
    }
}

#[test]
fn write_index_wraps() {
    let mut storage = [0.0; SIZE + INTERPOLATION_TAIL];
    let mut buffer = RingBuffer::new(&mut storage);

    for _ in 0..SIZE - 1 {
        buffer.advance();
    }
    assert_eq!(buffer.write_index(), SIZE - 1);

    buffer.advance();
    assert_eq!(buffer.write_index(), 0);
}

#[test]
fn linear_interpolation() {
    let mut storage = [0.0; SIZE + INTERPOLATION_TAIL];
    let buffer = filled(&mut storage);

    assert_eq!(buffer.read_linear(10.0), 10.0);
    assert_eq!(buffer.read_linear(10.25), 10.25);

    // Across the wrap point: between sample 63 and sample 0.
    assert_eq!(buffer.read_linear(63.5), 31.5);

    // Negative positions wrap to the end of the buffer.
    assert_eq!(buffer.read_linear(-1.0), 63.0);
    assert_eq!(buffer.read_linear(-0.5), 31.5);
}

#[test]
fn hermite_interpolation() {
    let mut storage = [0.0; SIZE + INTERPOLATION_TAIL];
    let buffer = filled(&mut storage);

    // Exact on sample positions.
    for n in 1..SIZE - 2 {
        assert_eq!(buffer.read_hermite(n as f32), n as f32);
    }

    // A ramp is reproduced between samples away from the wrap point.
    assert!((buffer.read_hermite(20.5) - 20.5).abs() < 1.0e-5);
}

#[test]
fn hermite_indices_stay_in_range() {
    let mut storage = [0.0; SIZE + INTERPOLATION_TAIL];
    let buffer = filled(&mut storage);
    let n = SIZE as f32;

    for t in [-1.0, 0.0, n - 1.0, n, 2.0 * n + 1.0, -3.0 * n - 0.5] {
        let value = buffer.read_hermite(t);
        assert!(value.is_finite());
    }

    // t = 0 looks back to the last sample instead of reading out of bounds.
    let with_lookback = buffer.read_hermite(0.5);
    assert!(with_lookback.is_finite());
    assert_eq!(buffer.read_hermite(-1.0), buffer.read_hermite(n - 1.0));
    assert_eq!(buffer.read_hermite(0.0), buffer.read_hermite(2.0 * n));
}

/// Catmull-Rom over `t-1..=t+2`, every index wrapped into the primary region.
fn hermite_reference(raw: &[f32], size: usize, position: f32) -> f32 {
    let t = position.floor() as isize;
    let f = position - position.floor();
    let at = |offset: isize| raw[(t + offset).rem_euclid(size as isize) as usize];
    let (xm1, x0, x1, x2) = (at(-1), at(0), at(1), at(2));

    0.5 * (2.0 * x0
        + (x1 - xm1) * f
        + (2.0 * xm1 - 5.0 * x0 + 4.0 * x1 - x2) * f * f
        + (3.0 * x0 - xm1 - 3.0 * x1 + x2) * f * f * f)
}

#[test]
fn hermite_matches_reference_across_wrap() {
    let mut storage = [0.0; SIZE + INTERPOLATION_TAIL];
    let mut buffer = RingBuffer::new(&mut storage);
    for n in 0..SIZE {
        buffer.write((n as f32 * 0.37).sin() + (n % 5) as f32);
        buffer.advance();
    }
    let n = SIZE as f32;

    for position in [
        0.5,
        -0.25,
        n - 0.5,
        n + 0.5,
        2.0 * n + 1.25,
        -n - 0.75,
        n - 1.5,
        1.5,
    ] {
        let expected = hermite_reference(buffer.as_slice(), SIZE, position);
        let value = buffer.read_hermite(position);
        assert!(
            (value - expected).abs() < 1.0e-4,
            "position {position}: {value} != {expected}"
        );
    }
}

#[test]
fn clear_resets() {
    let mut storage = [0.0; SIZE + INTERPOLATION_TAIL];
    let mut buffer = filled(&mut storage);
    buffer.clear();

    assert_eq!(buffer.write_index(), 0);
    assert!(buffer.as_slice().iter().all(|sample| *sample == 0.0));
}

#[test]
#[should_panic]
fn too_short_storage_panics() {
    let mut storage = [0.0; INTERPOLATION_TAIL];
    let _ = RingBuffer::new(&mut storage);
}
