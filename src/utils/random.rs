//! Fast pseudo random number generator.

// Based on MIT-licensed code (c) 2012 by Olivier Gillet (ol.gillet@gmail.com)

/// Linear congruential generator. Every grain voice owns one, so voices
/// with different seeds make independent decisions.
#[derive(Debug, Clone)]
pub struct Random {
    state: u32,
}

impl Default for Random {
    fn default() -> Self {
        Self::new(0x21)
    }
}

impl Random {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    #[inline]
    pub fn seed(&mut self, seed: u32) {
        self.state = seed;
    }

    #[inline]
    pub fn get_word(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform value in `0.0..1.0`.
    #[inline]
    pub fn get_float(&mut self) -> f32 {
        // 24 bits keep the result strictly below 1.0 after the f32 conversion.
        (self.get_word() >> 8) as f32 / 16777216.0
    }
}
