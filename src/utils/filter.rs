//! Zero-delay-feedback filters.
//!
//! Two topologies are used: a one-pole low-pass damping the reverb tanks and a
//! state variable filter running as high-pass in every grain feedback path.

// Based on MIT-licensed code (c) 2014 by Olivier Gillet (ol.gillet@gmail.com)

const M_PI_F: f32 = core::f32::consts::PI;
const M_PI_POW_3: f32 = M_PI_F * M_PI_F * M_PI_F;
const M_PI_POW_5: f32 = M_PI_POW_3 * M_PI_F * M_PI_F;

/// Polynomial approximation of `tan(pi * f)` used to prewarp the cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyApproximation {
    /// Fifth order, usable up to a few kHz below Nyquist.
    Fast,
    /// Third order, optimized for frequencies below 8kHz.
    Dirty,
}

impl FrequencyApproximation {
    /// Integrator gain for the normalized frequency `f` (cutoff / sample rate).
    #[inline]
    pub fn gain(self, f: f32) -> f32 {
        match self {
            FrequencyApproximation::Fast => {
                const A: f32 = 3.260e-01 * M_PI_POW_3;
                const B: f32 = 1.823e-01 * M_PI_POW_5;
                let f2 = f * f;
                f * (M_PI_F + f2 * (A + B * f2))
            }
            FrequencyApproximation::Dirty => {
                const A: f32 = 3.736e-01 * M_PI_POW_3;
                f * (M_PI_F + A * f * f)
            }
        }
    }
}

/// One-pole low-pass.
#[derive(Debug, Default, Clone)]
pub struct OnePole {
    g: f32,
    gi: f32,
    state: f32,
}

impl OnePole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    #[inline]
    pub fn set_f(&mut self, f: f32, approximation: FrequencyApproximation) {
        self.g = approximation.gain(f);
        self.gi = 1.0 / (1.0 + self.g);
    }

    #[inline]
    pub fn low_pass(&mut self, in_: f32) -> f32 {
        let lp = (self.g * in_ + self.state) * self.gi;
        self.state = self.g * (in_ - lp) + lp;
        lp
    }
}

/// State variable filter with a high-pass output.
#[derive(Debug, Default, Clone)]
pub struct Svf {
    g: f32,
    r: f32,
    h: f32,
    state_1: f32,
    state_2: f32,
}

impl Svf {
    pub fn init(&mut self) {
        self.set_f_q(0.01, 100.0, FrequencyApproximation::Dirty);
        self.reset();
    }

    pub fn reset(&mut self) {
        self.state_1 = 0.0;
        self.state_2 = 0.0;
    }

    /// Normalized frequency and resonance. A resonance of 0.5 gives a
    /// critically damped response.
    #[inline]
    pub fn set_f_q(&mut self, f: f32, resonance: f32, approximation: FrequencyApproximation) {
        self.g = approximation.gain(f);
        self.r = 1.0 / resonance;
        self.h = 1.0 / (1.0 + self.r * self.g + self.g * self.g);
    }

    #[inline]
    pub fn high_pass(&mut self, in_: f32) -> f32 {
        let hp = (in_ - self.r * self.state_1 - self.g * self.state_1 - self.state_2) * self.h;
        let bp = self.g * hp + self.state_1;
        self.state_1 = self.g * hp + bp;
        let lp = self.g * bp + self.state_2;
        self.state_2 = self.g * bp + lp;

        hp
    }
}
