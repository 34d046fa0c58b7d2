//! Conditioning filter for the feedback path of a grain voice.

use crate::utils::filter::{FrequencyApproximation, Svf};
use crate::SAMPLE_RATE;

/// Filter applied to the delayed signal before it is fed back into the ring buffer.
pub trait FeedbackFilter {
    fn init(&mut self, sample_rate: f32);

    fn set_cutoff(&mut self, frequency_hz: f32);

    /// Returns the high-passed sample.
    fn process(&mut self, sample: f32) -> f32;
}

const RESONANCE: f32 = 0.5;

/// Non-resonant SVF high-pass keeping DC and rumble out of the feedback loop.
#[derive(Debug, Clone)]
pub struct FeedbackHighPass {
    svf: Svf,
    sample_rate: f32,
}

impl Default for FeedbackHighPass {
    fn default() -> Self {
        Self {
            svf: Svf::default(),
            sample_rate: SAMPLE_RATE,
        }
    }
}

impl FeedbackHighPass {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeedbackFilter for FeedbackHighPass {
    fn init(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.svf.init();
        self.set_cutoff(20.0);
    }

    #[inline]
    fn set_cutoff(&mut self, frequency_hz: f32) {
        let f = (frequency_hz / self.sample_rate).min(0.49);
        self.svf.set_f_q(f, RESONANCE, FrequencyApproximation::Dirty);
    }

    #[inline]
    fn process(&mut self, sample: f32) -> f32 {
        self.svf.high_pass(sample)
    }
}
