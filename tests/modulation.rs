//! Modulation and test signal sources

#![allow(dead_code)]

/// Returns a triangle wave in range -1.0..1.0
pub fn triangle(block_no: usize, block_count: usize, periods: f32) -> f32 {
    let mut phase = block_no as f32 / block_count as f32 * periods;

    while phase > 1.0 {
        phase -= 1.0
    }

    if phase < 0.25 {
        phase * 4.0
    } else if phase < 0.5 {
        (0.5 - phase) * 4.0
    } else if phase < 0.75 {
        -(phase - 0.5) * 4.0
    } else {
        -(1.0 - phase) * 4.0
    }
}

/// Returns a ramp in range 0.0..1.0
pub fn ramp_up(block_no: usize, block_count: usize) -> f32 {
    block_no as f32 / block_count as f32
}

/// Returns a sine at `frequency` Hz for sample `n`.
pub fn sine(n: usize, frequency: f32, sample_rate: f32) -> f32 {
    (2.0 * std::f32::consts::PI * frequency * n as f32 / sample_rate).sin()
}
