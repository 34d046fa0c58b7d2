//! Delay line.

// Based on MIT-licensed code (c) 2014 by Olivier Gillet (ol.gillet@gmail.com)

#[derive(Debug, Clone)]
pub struct DelayLine<const MAX_DELAY: usize> {
    write_ptr: usize,
    line: [f32; MAX_DELAY],
}

impl<const MAX_DELAY: usize> Default for DelayLine<MAX_DELAY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MAX_DELAY: usize> DelayLine<MAX_DELAY> {
    pub fn new() -> Self {
        Self {
            write_ptr: 0,
            line: [0.0; MAX_DELAY],
        }
    }

    pub fn reset(&mut self) {
        self.line.fill(0.0);
        self.write_ptr = 0;
    }

    pub fn max_delay(&self) -> usize {
        MAX_DELAY
    }

    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.line[self.write_ptr] = sample;
        self.write_ptr = (self.write_ptr + MAX_DELAY - 1) % MAX_DELAY;
    }

    /// Schroeder allpass section using the full length of the line.
    #[inline]
    pub fn allpass(&mut self, sample: f32, coefficient: f32) -> f32 {
        let read = self.read_with_delay(MAX_DELAY - 1);
        let write = sample + coefficient * read;
        self.write(write);

        -write * coefficient + read
    }

    #[inline]
    pub fn read_with_delay(&self, delay: usize) -> f32 {
        self.line[(self.write_ptr + delay) % MAX_DELAY]
    }
}
