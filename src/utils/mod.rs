//! Utility functions.
//!
//! Small numeric helpers shared by the grain voices, the effects and the control path.

pub mod delay_line;
pub mod filter;
pub mod random;

#[allow(unused_imports)]
use num_traits::float::Float;

/// Table lookup with linear interpolation, `index` in the range `0.0..=1.0`.
///
/// `table` must hold at least `size + 2` entries.
#[inline]
pub fn interpolate(table: &[f32], mut index: f32, size: f32) -> f32 {
    index = index.clamp(0.0, 1.0);
    index *= size;
    let index_integral = index as usize;
    let index_fractional = index - (index_integral as f32);
    let a = table[index_integral];
    let b = table[index_integral + 1];

    a + (b - a) * index_fractional
}

/// Floor modulo for buffer indices. The result is always in `0..size`,
/// also for negative `index` values.
#[inline]
pub fn wrap(index: isize, size: usize) -> usize {
    index.rem_euclid(size as isize) as usize
}

/// Floor modulo for fractional positions. The result is always in `0.0..size`.
#[inline]
pub fn wrap_f32(position: f32, size: usize) -> f32 {
    let size = size as f32;
    let wrapped = position - (position / size).floor() * size;

    // Rounding can land exactly on `size` for tiny negative positions.
    if wrapped >= size || wrapped < 0.0 {
        0.0
    } else {
        wrapped
    }
}

/// Maps `value` from `0.0..=1.0` linearly into `min..=max`.
#[inline]
pub fn fmap(value: f32, min: f32, max: f32) -> f32 {
    min + value * (max - min)
}

#[inline]
pub fn one_pole(out: &mut f32, in_: f32, coefficient: f32) {
    *out += (coefficient) * ((in_) - *out);
}
