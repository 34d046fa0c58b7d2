//! Control-rate parameters.
//!
//! Knobs are polled by a slow loop running beside the audio callback. The loop
//! stores raw readings into [`ControlParameters`], a set of lock-free cells that
//! the audio side may read at any time; each value is a single atomic word, so a
//! reader sees either the old or the new value of a parameter. The readings are
//! smoothed with [`ControlSmoother`] before they reach the engine.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::utils::one_pole;

/// One-pole coefficient used for knob smoothing.
pub const DEFAULT_SMOOTHING_COEFFICIENT: f32 = 0.05;

/// Snapshot of all user parameters, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    /// Balance between the input and the processed signal.
    pub dry_wet: f32,

    /// Balance between the voice mix and the reverb.
    pub reverb_dry_wet: f32,

    /// Probability that a grain is audible.
    pub grain_density: f32,

    /// Grain duration, mapped to 0.1s..10s.
    pub grain_duration: f32,

    /// Amount of the delayed signal fed back into the voice buffers.
    pub feedback: f32,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            dry_wet: 0.5,
            reverb_dry_wet: 0.3,
            grain_density: 0.5,
            grain_duration: 0.05,
            feedback: 0.0,
        }
    }
}

impl Controls {
    /// Returns a copy with every value clamped to `0.0..=1.0`.
    pub fn clamped(&self) -> Self {
        Self {
            dry_wet: self.dry_wet.clamp(0.0, 1.0),
            reverb_dry_wet: self.reverb_dry_wet.clamp(0.0, 1.0),
            grain_density: self.grain_density.clamp(0.0, 1.0),
            grain_duration: self.grain_duration.clamp(0.0, 1.0),
            feedback: self.feedback.clamp(0.0, 1.0),
        }
    }

    #[inline]
    pub fn get(&self, parameter: Parameter) -> f32 {
        match parameter {
            Parameter::DryWet => self.dry_wet,
            Parameter::ReverbDryWet => self.reverb_dry_wet,
            Parameter::GrainDensity => self.grain_density,
            Parameter::GrainDuration => self.grain_duration,
            Parameter::Feedback => self.feedback,
        }
    }

    #[inline]
    pub fn set(&mut self, parameter: Parameter, value: f32) {
        let target = match parameter {
            Parameter::DryWet => &mut self.dry_wet,
            Parameter::ReverbDryWet => &mut self.reverb_dry_wet,
            Parameter::GrainDensity => &mut self.grain_density,
            Parameter::GrainDuration => &mut self.grain_duration,
            Parameter::Feedback => &mut self.feedback,
        };
        *target = value;
    }
}

/// User parameters, in the order of the control inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    DryWet,
    GrainDensity,
    GrainDuration,
    ReverbDryWet,
    Feedback,
}

impl Parameter {
    pub const ALL: [Parameter; 5] = [
        Parameter::DryWet,
        Parameter::GrainDensity,
        Parameter::GrainDuration,
        Parameter::ReverbDryWet,
        Parameter::Feedback,
    ];
}

/// `f32` stored as its bit pattern in an [`AtomicU32`].
#[derive(Debug)]
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    #[inline]
    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Parameter cells shared between the control loop and the audio path.
///
/// Values are clamped on store, so a reader never sees an out-of-range value.
#[derive(Debug)]
pub struct ControlParameters {
    cells: [AtomicF32; 5],
}

impl Default for ControlParameters {
    fn default() -> Self {
        Self::new(&Controls::default())
    }
}

impl ControlParameters {
    pub fn new(initial: &Controls) -> Self {
        let initial = initial.clamped();
        Self {
            cells: Parameter::ALL.map(|parameter| AtomicF32::new(initial.get(parameter))),
        }
    }

    #[inline]
    pub fn set(&self, parameter: Parameter, value: f32) {
        self.cells[parameter as usize].store(value.clamp(0.0, 1.0));
    }

    #[inline]
    pub fn get(&self, parameter: Parameter) -> f32 {
        self.cells[parameter as usize].load()
    }

    pub fn store(&self, controls: &Controls) {
        for parameter in Parameter::ALL {
            self.set(parameter, controls.get(parameter));
        }
    }

    /// Reads all parameters. Each one is read atomically, the set as a whole is not.
    pub fn load(&self) -> Controls {
        let mut controls = Controls::default();
        for parameter in Parameter::ALL {
            controls.set(parameter, self.get(parameter));
        }
        controls
    }
}

/// One-pole smoothing of all parameters, run once per control poll.
#[derive(Debug, Clone)]
pub struct ControlSmoother {
    coefficient: f32,
    state: Controls,
}

impl Default for ControlSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_COEFFICIENT)
    }
}

impl ControlSmoother {
    pub fn new(coefficient: f32) -> Self {
        Self {
            coefficient: coefficient.clamp(0.0, 1.0),
            state: Controls {
                dry_wet: 0.0,
                reverb_dry_wet: 0.0,
                grain_density: 0.0,
                grain_duration: 0.0,
                feedback: 0.0,
            },
        }
    }

    /// Jumps straight to `controls`.
    pub fn reset(&mut self, controls: &Controls) {
        self.state = controls.clamped();
    }

    /// Moves the smoothed values towards `raw` and returns them.
    pub fn process(&mut self, raw: &Controls) -> Controls {
        let raw = raw.clamped();
        for parameter in Parameter::ALL {
            let mut value = self.state.get(parameter);
            one_pole(&mut value, raw.get(parameter), self.coefficient);
            self.state.set(parameter, value);
        }
        self.state
    }

    #[inline]
    pub fn value(&self) -> &Controls {
        &self.state
    }
}
