//! Circular sample store of a grain voice.
//!
//! The backing slice is split into a primary region of `len - INTERPOLATION_TAIL`
//! samples and a tail that mirrors the first [`INTERPOLATION_TAIL`] samples, so the
//! interpolating readers can look a few samples past the wrap point without
//! another modulo.

#[allow(unused_imports)]
use num_traits::float::Float;

use super::INTERPOLATION_TAIL;
use crate::utils::wrap;

#[derive(Debug)]
pub struct RingBuffer<'a> {
    buffer: &'a mut [f32],
    size: usize,
    write_index: usize,
}

impl<'a> RingBuffer<'a> {
    /// Wraps `buffer` as ring buffer storage.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is not longer than [`INTERPOLATION_TAIL`].
    pub fn new(buffer: &'a mut [f32]) -> Self {
        assert!(
            buffer.len() > INTERPOLATION_TAIL,
            "ring buffer needs more than {INTERPOLATION_TAIL} samples"
        );
        let size = buffer.len() - INTERPOLATION_TAIL;

        Self {
            buffer,
            size,
            write_index: 0,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_index = 0;
    }

    /// Number of usable samples, excluding the interpolation tail.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Whole backing storage including the tail mirror.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.buffer[..]
    }

    /// Stores `sample` at the write cursor.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_index] = sample;
        self.mirror();
    }

    /// Adds `sample` to the value under the write cursor.
    #[inline]
    pub fn add(&mut self, sample: f32) {
        self.buffer[self.write_index] += sample;
        self.mirror();
    }

    #[inline]
    fn mirror(&mut self) {
        if self.write_index < INTERPOLATION_TAIL {
            self.buffer[self.size + self.write_index] = self.buffer[self.write_index];
        }
    }

    /// Moves the write cursor one sample forward.
    #[inline]
    pub fn advance(&mut self) {
        self.write_index += 1;
        if self.write_index >= self.size {
            self.write_index = 0;
        }
    }

    #[inline]
    pub fn read_nearest(&self, position: isize) -> f32 {
        self.buffer[wrap(position, self.size)]
    }

    #[inline]
    pub fn read_linear(&self, position: f32) -> f32 {
        let t = position.floor();
        let f = position - t;
        let index = wrap(t as isize, self.size);

        let a = self.buffer[index];
        let b = self.buffer[index + 1];

        a + (b - a) * f
    }

    #[inline]
    pub fn read_hermite(&self, position: f32) -> f32 {
        let t = position.floor();
        let f = position - t;
        let t = t as isize;
        let index = wrap(t, self.size);

        let xm1 = self.buffer[wrap(t - 1, self.size)];
        let x0 = self.buffer[index];
        let x1 = self.buffer[index + 1];
        let x2 = self.buffer[index + 2];

        let c = (x1 - xm1) * 0.5;
        let v = x0 - x1;
        let w = c + v;
        let a = w + v + (x2 - x0) * 0.5;
        let b_neg = w + a;

        (((a * f) - b_neg) * f + c) * f + x0
    }
}
