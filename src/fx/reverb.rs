//! Stereo reverb behind the voice bank.
//!
//! Four allpass diffusers on the summed input feed two cross-coupled tanks, each
//! made of a damping low-pass, an allpass and a long delay. Delay lengths are
//! tuned for 48kHz. The output is the wet signal only.

use crate::utils::delay_line::DelayLine;
use crate::utils::filter::{FrequencyApproximation, OnePole};

/// Reverb driven by the grain delay engine.
pub trait StereoReverb {
    fn init(&mut self, _sample_rate: f32) {}

    /// Decay amount in `0.0..1.0`.
    fn set_feedback(&mut self, _feedback: f32) {}

    /// Returns the wet `(left, right)` signal.
    fn process(&mut self, left: f32, right: f32) -> (f32, f32);
}

const INPUT_GAIN: f32 = 0.2;
const DIFFUSION: f32 = 0.625;
const TANK_DIFFUSION: f32 = 0.5;
/// Upper bound of the tank feedback.
pub const MAX_FEEDBACK: f32 = 0.98;
const DAMPING_FREQUENCY: f32 = 8000.0;

#[derive(Debug, Clone)]
pub struct Reverb {
    ap1: DelayLine<113>,
    ap2: DelayLine<162>,
    ap3: DelayLine<241>,
    ap4: DelayLine<399>,

    left_allpass: DelayLine<1653>,
    left_delay: DelayLine<2027>,
    left_damping: OnePole,

    right_allpass: DelayLine<1913>,
    right_delay: DelayLine<2312>,
    right_damping: OnePole,

    feedback: f32,
}

impl Default for Reverb {
    fn default() -> Self {
        Self::new()
    }
}

impl Reverb {
    pub fn new() -> Self {
        Self {
            ap1: DelayLine::new(),
            ap2: DelayLine::new(),
            ap3: DelayLine::new(),
            ap4: DelayLine::new(),
            left_allpass: DelayLine::new(),
            left_delay: DelayLine::new(),
            left_damping: OnePole::new(),
            right_allpass: DelayLine::new(),
            right_delay: DelayLine::new(),
            right_damping: OnePole::new(),
            feedback: 0.5,
        }
    }

    pub fn clear(&mut self) {
        self.ap1.reset();
        self.ap2.reset();
        self.ap3.reset();
        self.ap4.reset();
        self.left_allpass.reset();
        self.left_delay.reset();
        self.left_damping.reset();
        self.right_allpass.reset();
        self.right_delay.reset();
        self.right_damping.reset();
    }

    /// Cutoff of the damping low-pass inside the tanks, normalized to the sample rate.
    pub fn set_lp(&mut self, frequency: f32) {
        let f = frequency.clamp(0.0001, 0.49);
        self.left_damping.set_f(f, FrequencyApproximation::Fast);
        self.right_damping.set_f(f, FrequencyApproximation::Fast);
    }

    #[inline]
    pub fn feedback(&self) -> f32 {
        self.feedback
    }
}

impl StereoReverb for Reverb {
    fn init(&mut self, sample_rate: f32) {
        self.clear();
        self.set_lp(DAMPING_FREQUENCY / sample_rate);
    }

    fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, MAX_FEEDBACK);
    }

    #[inline]
    fn process(&mut self, left: f32, right: f32) -> (f32, f32) {
        let mut input = (left + right) * INPUT_GAIN;
        input = self.ap1.allpass(input, DIFFUSION);
        input = self.ap2.allpass(input, DIFFUSION);
        input = self.ap3.allpass(input, DIFFUSION);
        input = self.ap4.allpass(input, DIFFUSION);

        let left_tail = self.left_delay.read_with_delay(self.left_delay.max_delay() - 1);
        let right_tail = self
            .right_delay
            .read_with_delay(self.right_delay.max_delay() - 1);

        let mut l = input + right_tail * self.feedback;
        l = self.left_damping.low_pass(l);
        l = self.left_allpass.allpass(l, -TANK_DIFFUSION);
        self.left_delay.write(l);

        let mut r = input + left_tail * self.feedback;
        r = self.right_damping.low_pass(r);
        r = self.right_allpass.allpass(r, -TANK_DIFFUSION);
        self.right_delay.write(r);

        (left_tail, right_tail)
    }
}
