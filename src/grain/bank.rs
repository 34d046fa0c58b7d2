//! Fixed set of grain voices mixed to stereo.

use super::feedback::{FeedbackFilter, FeedbackHighPass};
use super::voice::GrainVoice;
use super::{GrainObserver, Interpolation, INTERPOLATION_TAIL};
use crate::envelope::{AdEnvelope, GrainEnvelope};

/// Fixed settings of one voice slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoicePreset {
    /// Playback speed in samples per sample.
    pub speed: f32,

    /// Share of the voice in the mix, before headroom compensation.
    pub mix: f32,
}

impl VoicePreset {
    pub const fn new(speed: f32, mix: f32) -> Self {
        Self { speed, mix }
    }
}

/// Voice presets of the stock five-voice bank: half and quarter speed, a fifth
/// up, and two reverse voices. The mix values sum to 1.
pub const DEFAULT_PRESETS: [VoicePreset; 5] = [
    VoicePreset::new(0.5, 0.25),
    VoicePreset::new(0.25, 0.2),
    VoicePreset::new(1.4983, 0.1),
    VoicePreset::new(-1.0, 0.3),
    VoicePreset::new(-0.5, 0.15),
];

/// Gain applied on top of the preset mix values, making up for grains that
/// are not audible.
pub const DEFAULT_HEADROOM_COMPENSATION: f32 = 1.66;

/// Linear pan law. Returns the `(left, right)` weights for `pan` in `-1.0..=1.0`.
#[inline]
pub fn pan_weights(pan: f32) -> (f32, f32) {
    (pan * -0.5 + 0.5, pan * 0.5 + 0.5)
}

#[derive(Debug)]
pub struct VoiceBank<'a, const NUM_VOICES: usize, E = AdEnvelope, F = FeedbackHighPass> {
    voices: [GrainVoice<'a, E, F>; NUM_VOICES],
    presets: [VoicePreset; NUM_VOICES],
    headroom_compensation: f32,
}

impl<'a, const NUM_VOICES: usize, E, F> VoiceBank<'a, NUM_VOICES, E, F>
where
    E: GrainEnvelope + Default,
    F: FeedbackFilter + Default,
{
    /// Splits `buffer` into `NUM_VOICES` equally sized ring buffers.
    ///
    /// # Panics
    ///
    /// Panics if `NUM_VOICES` is zero or if a voice would get no more than
    /// [`INTERPOLATION_TAIL`] samples.
    pub fn new(
        buffer: &'a mut [f32],
        presets: [VoicePreset; NUM_VOICES],
        headroom_compensation: f32,
    ) -> Self {
        assert!(NUM_VOICES > 0, "voice bank needs at least one voice");
        let voice_length = buffer.len() / NUM_VOICES;
        assert!(
            voice_length > INTERPOLATION_TAIL,
            "{} samples are not enough for {NUM_VOICES} voices",
            buffer.len()
        );

        let mut chunks = buffer.chunks_exact_mut(voice_length);
        let voices =
            core::array::from_fn(|_| GrainVoice::new(chunks.next().unwrap_or_default()));

        Self {
            voices,
            presets,
            headroom_compensation,
        }
    }
}

impl<'a, const NUM_VOICES: usize, E, F> VoiceBank<'a, NUM_VOICES, E, F>
where
    E: GrainEnvelope,
    F: FeedbackFilter,
{
    pub fn init(&mut self, sample_rate: f32) {
        for (index, (voice, preset)) in self.voices.iter_mut().zip(self.presets.iter()).enumerate()
        {
            voice.init(sample_rate);
            voice.seed(0x21 + (index as u32).wrapping_mul(0x9e37_79b9));
            voice.set_amplitude(preset.mix * self.headroom_compensation);
            voice.set_speed(preset.speed);
        }
    }

    #[inline]
    pub fn voices(&self) -> &[GrainVoice<'a, E, F>; NUM_VOICES] {
        &self.voices
    }

    #[inline]
    pub fn voice(&self, index: usize) -> Option<&GrainVoice<'a, E, F>> {
        self.voices.get(index)
    }

    #[inline]
    pub fn voice_mut(&mut self, index: usize) -> Option<&mut GrainVoice<'a, E, F>> {
        self.voices.get_mut(index)
    }

    #[inline]
    pub fn presets(&self) -> &[VoicePreset; NUM_VOICES] {
        &self.presets
    }

    /// Sum of the static voice amplitudes, the peak gain for a full-scale input.
    pub fn headroom(&self) -> f32 {
        self.voices.iter().map(|voice| voice.amplitude()).sum()
    }

    pub fn set_grain_density(&mut self, grain_density: f32) {
        for voice in self.voices.iter_mut() {
            voice.set_grain_density(grain_density);
        }
    }

    pub fn set_pending_duration(&mut self, duration: f32) {
        for voice in self.voices.iter_mut() {
            voice.set_pending_duration(duration);
        }
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        for voice in self.voices.iter_mut() {
            voice.set_feedback(feedback);
        }
    }

    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        for voice in self.voices.iter_mut() {
            voice.set_interpolation(interpolation);
        }
    }

    pub fn set_observer(&mut self, observer: Option<&'a dyn GrainObserver>) {
        for voice in self.voices.iter_mut() {
            voice.set_observer(observer);
        }
    }

    /// Feeds `in_` to all voices and returns the panned `(left, right)` mix.
    #[inline]
    pub fn process(&mut self, in_: f32) -> (f32, f32) {
        let mut left = 0.0;
        let mut right = 0.0;

        for voice in self.voices.iter_mut() {
            let out = voice.process(in_);
            let (left_weight, right_weight) = pan_weights(voice.pan());
            left += out * left_weight;
            right += out * right_weight;
        }

        (left, right)
    }
}
