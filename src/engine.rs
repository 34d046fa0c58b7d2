//! Complete grain delay: voice bank, reverb and the two dry/wet stages.

use crate::control::{Controls, DEFAULT_SMOOTHING_COEFFICIENT};
use crate::fx::crossfade::{CrossFade, CrossFadeCurve};
use crate::fx::reverb::{Reverb, StereoReverb};
use crate::grain::bank::{
    VoiceBank, VoicePreset, DEFAULT_HEADROOM_COMPENSATION, DEFAULT_PRESETS,
};
use crate::grain::{GrainObserver, Interpolation, INTERPOLATION_TAIL};
use crate::SAMPLE_RATE;

/// Engine configuration. Fixed for the lifetime of a [`GrainDelay`].
#[derive(Debug, Clone)]
pub struct Config<const NUM_VOICES: usize> {
    /// Audio sample rate in Hz.
    pub sample_rate: f32,

    /// Length of each voice buffer in seconds.
    pub buffer_duration: f32,

    /// Speed and mix of each voice.
    pub presets: [VoicePreset; NUM_VOICES],

    /// Gain applied on top of the preset mix values.
    pub headroom_compensation: f32,

    /// Decay of the reverb in `0.0..1.0`.
    pub reverb_feedback: f32,

    /// One-pole coefficient for smoothing the control inputs.
    pub smoothing_coefficient: f32,

    /// Curve of both dry/wet stages.
    pub crossfade: CrossFadeCurve,

    /// Read interpolation of all voices.
    pub interpolation: Interpolation,

    /// Feedback set once on init. When present, the feedback control is ignored.
    pub fixed_feedback: Option<f32>,
}

impl Default for Config<5> {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            buffer_duration: 10.0,
            presets: DEFAULT_PRESETS,
            headroom_compensation: DEFAULT_HEADROOM_COMPENSATION,
            reverb_feedback: 0.9,
            smoothing_coefficient: DEFAULT_SMOOTHING_COEFFICIENT,
            crossfade: CrossFadeCurve::ConstantPower,
            interpolation: Interpolation::Linear,
            fixed_feedback: None,
        }
    }
}

impl<const NUM_VOICES: usize> Config<NUM_VOICES> {
    /// Samples needed by one voice, including the interpolation tail.
    pub fn voice_length(&self) -> usize {
        (self.buffer_duration * self.sample_rate) as usize + INTERPOLATION_TAIL
    }

    /// Samples of voice memory to hand to [`GrainDelay::new`].
    pub fn buffer_length(&self) -> usize {
        self.voice_length() * NUM_VOICES
    }
}

#[derive(Debug)]
pub struct GrainDelay<'a, const NUM_VOICES: usize = 5, R = Reverb> {
    config: Config<NUM_VOICES>,
    bank: VoiceBank<'a, NUM_VOICES>,
    reverb: R,
    reverb_mix: CrossFade,
    dry_wet: CrossFade,
}

impl<'a, const NUM_VOICES: usize, R> GrainDelay<'a, NUM_VOICES, R>
where
    R: StereoReverb + Default,
{
    /// Creates the engine on top of `buffer`, which is split evenly between the voices.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is too short to give every voice more than
    /// [`INTERPOLATION_TAIL`] samples.
    pub fn new(buffer: &'a mut [f32], config: Config<NUM_VOICES>) -> Self {
        Self::with_reverb(buffer, config, R::default())
    }
}

impl<'a, const NUM_VOICES: usize, R> GrainDelay<'a, NUM_VOICES, R>
where
    R: StereoReverb,
{
    /// Like [`GrainDelay::new`], with a custom reverb.
    pub fn with_reverb(buffer: &'a mut [f32], config: Config<NUM_VOICES>, reverb: R) -> Self {
        Self {
            bank: VoiceBank::new(buffer, config.presets, config.headroom_compensation),
            config,
            reverb,
            reverb_mix: CrossFade::new(),
            dry_wet: CrossFade::new(),
        }
    }

    pub fn init(&mut self) {
        let sample_rate = self.config.sample_rate;

        self.bank.init(sample_rate);
        self.bank.set_interpolation(self.config.interpolation);
        if let Some(feedback) = self.config.fixed_feedback {
            self.bank.set_feedback(feedback);
        }

        self.reverb.init(sample_rate);
        self.reverb.set_feedback(self.config.reverb_feedback);

        self.reverb_mix.init(self.config.crossfade);
        self.dry_wet.init(self.config.crossfade);

        log::debug!(
            "grain delay ready: {} voices, {} samples each, headroom {:.3}",
            NUM_VOICES,
            self.bank.voice(0).map_or(0, |voice| voice.buffer().size()),
            self.bank.headroom()
        );
    }

    #[inline]
    pub fn config(&self) -> &Config<NUM_VOICES> {
        &self.config
    }

    #[inline]
    pub fn bank(&self) -> &VoiceBank<'a, NUM_VOICES> {
        &self.bank
    }

    #[inline]
    pub fn bank_mut(&mut self) -> &mut VoiceBank<'a, NUM_VOICES> {
        &mut self.bank
    }

    #[inline]
    pub fn reverb_mut(&mut self) -> &mut R {
        &mut self.reverb
    }

    pub fn set_observer(&mut self, observer: Option<&'a dyn GrainObserver>) {
        self.bank.set_observer(observer);
    }

    /// Applies a set of smoothed control values. Called at control rate.
    pub fn set_controls(&mut self, controls: &Controls) {
        log::trace!("controls: {controls:?}");

        self.dry_wet.set_position(controls.dry_wet);
        self.reverb_mix.set_position(controls.reverb_dry_wet);

        self.bank.set_grain_density(controls.grain_density);
        self.bank.set_pending_duration(controls.grain_duration);
        if self.config.fixed_feedback.is_none() {
            self.bank.set_feedback(controls.feedback);
        }
    }

    /// Processes one input sample into a `(left, right)` pair.
    #[inline]
    pub fn process(&mut self, in_: f32) -> (f32, f32) {
        let (left, right) = self.bank.process(in_);
        let (reverb_left, reverb_right) = self.reverb.process(left, right);

        let wet_left = self.reverb_mix.process(left, reverb_left);
        let wet_right = self.reverb_mix.process(right, reverb_right);

        (
            self.dry_wet.process(in_, wet_left),
            self.dry_wet.process(in_, wet_right),
        )
    }

    /// Processes a block. Stops at the shortest of the three slices.
    #[inline]
    pub fn process_block(&mut self, in_: &[f32], out_left: &mut [f32], out_right: &mut [f32]) {
        for ((in_sample, left), right) in in_
            .iter()
            .zip(out_left.iter_mut())
            .zip(out_right.iter_mut())
        {
            (*left, *right) = self.process(*in_sample);
        }
    }
}
