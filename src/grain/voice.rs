//! Single grain voice.
//!
//! A voice keeps writing its input into a ring buffer and replays it at a fixed
//! speed through a moving read head. Whenever the envelope of the current grain
//! has run out, a new grain is started with a random duration around the dialed
//! one, a random pan position and a random decision whether it is heard at all.
//! The delayed signal is high-passed and added back at the write head, scaled by
//! the envelope and the feedback amount.

use super::feedback::{FeedbackFilter, FeedbackHighPass};
use super::ring_buffer::RingBuffer;
use super::{
    GrainObserver, Interpolation, GRAIN_DURATION_JITTER, GRAIN_MAX_DURATION,
    GRAIN_MIN_DURATION, PAN_MAX_WIDTH,
};
use crate::envelope::{AdEnvelope, GrainEnvelope, Segment};
use crate::utils::random::Random;
use crate::utils::{fmap, wrap_f32};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrainState {
    /// The envelope has finished, a new grain starts on the next sample.
    Idle,
    /// A grain is playing.
    Active,
}

#[derive(Debug)]
pub struct GrainVoice<'a, E = AdEnvelope, F = FeedbackHighPass> {
    buffer: RingBuffer<'a>,
    read_position: f32,
    interpolation: Interpolation,

    speed: f32,
    amplitude: f32,
    grain_density: f32,
    feedback: f32,
    pending_duration: f32,

    duration: f32,
    pan: f32,
    audible: f32,
    level: f32,

    envelope: E,
    filter: F,
    random: Random,
    observer: Option<&'a dyn GrainObserver>,
}

impl<'a, E, F> GrainVoice<'a, E, F>
where
    E: GrainEnvelope + Default,
    F: FeedbackFilter + Default,
{
    /// Creates a voice recording into `buffer`.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is not longer than [`super::INTERPOLATION_TAIL`].
    pub fn new(buffer: &'a mut [f32]) -> Self {
        Self {
            buffer: RingBuffer::new(buffer),
            read_position: 0.0,
            interpolation: Interpolation::default(),
            speed: 1.0,
            amplitude: 0.0,
            grain_density: 0.0,
            feedback: 0.0,
            pending_duration: 0.0,
            duration: GRAIN_MIN_DURATION,
            pan: 0.0,
            audible: 0.0,
            level: 0.0,
            envelope: E::default(),
            filter: F::default(),
            random: Random::default(),
            observer: None,
        }
    }
}

impl<'a, E, F> GrainVoice<'a, E, F>
where
    E: GrainEnvelope,
    F: FeedbackFilter,
{
    pub fn init(&mut self, sample_rate: f32) {
        self.buffer.clear();
        self.read_position = 0.0;

        self.envelope.init(sample_rate);
        self.filter.init(sample_rate);

        self.speed = 1.0;
        self.amplitude = 0.0;
        self.grain_density = 0.0;
        self.pending_duration = 0.0;
        self.duration = GRAIN_MIN_DURATION;
        self.pan = 0.0;
        self.audible = 0.0;
        self.level = 0.0;
        self.set_feedback(0.0);
    }

    /// Seeds the random decisions of this voice.
    pub fn seed(&mut self, seed: u32) {
        self.random.seed(seed);
    }

    /// Playback speed in samples per sample. Negative values play backwards.
    #[inline]
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    #[inline]
    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.amplitude = amplitude.clamp(0.0, 1.0);
    }

    /// Sets the feedback amount and moves the high-pass of the feedback path up
    /// with it, from 20 Hz at no feedback to 120 Hz at full feedback.
    #[inline]
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 1.0);
        self.filter
            .set_cutoff(20.0 + 100.0 * self.feedback * self.feedback);
    }

    /// Probability that a new grain is audible.
    #[inline]
    pub fn set_grain_density(&mut self, grain_density: f32) {
        self.grain_density = grain_density.clamp(0.0, 1.0);
    }

    /// Duration control in `0.0..=1.0` for the next grain. The playing grain
    /// keeps its duration.
    #[inline]
    pub fn set_pending_duration(&mut self, duration: f32) {
        self.pending_duration = duration.clamp(0.0, 1.0);
    }

    /// Moves the read head, in samples relative to the start of the buffer.
    #[inline]
    pub fn set_read_position(&mut self, position: f32) {
        self.read_position = wrap_f32(position, self.buffer.size());
    }

    #[inline]
    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
    }

    pub fn set_observer(&mut self, observer: Option<&'a dyn GrainObserver>) {
        self.observer = observer;
    }

    #[inline]
    pub fn state(&self) -> GrainState {
        if self.envelope.is_running() {
            GrainState::Active
        } else {
            GrainState::Idle
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    #[inline]
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    #[inline]
    pub fn grain_density(&self) -> f32 {
        self.grain_density
    }

    #[inline]
    pub fn pending_duration(&self) -> f32 {
        self.pending_duration
    }

    /// Duration of the current grain in seconds.
    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Pan position of the current grain.
    #[inline]
    pub fn pan(&self) -> f32 {
        self.pan
    }

    #[inline]
    pub fn is_audible(&self) -> bool {
        self.audible > 0.0
    }

    /// Envelope level of the last processed sample.
    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    #[inline]
    pub fn read_position(&self) -> f32 {
        self.read_position
    }

    #[inline]
    pub fn buffer(&self) -> &RingBuffer<'a> {
        &self.buffer
    }

    #[inline]
    pub fn process(&mut self, in_: f32) -> f32 {
        self.buffer.write(in_);

        if !self.envelope.is_running() {
            self.start_grain();
        }

        let delayed = self.read();
        self.level = self.envelope.process();
        let out = delayed * self.level * self.amplitude * self.audible;

        let feedback = self.filter.process(delayed);
        self.buffer.add(feedback * self.level * self.feedback);
        self.buffer.advance();

        self.read_position = wrap_f32(self.read_position + self.speed, self.buffer.size());

        out
    }

    #[inline]
    fn read(&self) -> f32 {
        match self.interpolation {
            Interpolation::Nearest => self.buffer.read_nearest(self.read_position as isize),
            Interpolation::Linear => self.buffer.read_linear(self.read_position),
            Interpolation::Hermite => self.buffer.read_hermite(self.read_position),
        }
    }

    fn start_grain(&mut self) {
        self.audible = if self.random.get_float() >= self.grain_density {
            0.0
        } else {
            1.0
        };

        let dialed = fmap(self.pending_duration, GRAIN_MIN_DURATION, GRAIN_MAX_DURATION);
        let variation = fmap(self.random.get_float(), -dialed, dialed) * GRAIN_DURATION_JITTER;
        self.duration = (dialed + variation).clamp(GRAIN_MIN_DURATION, GRAIN_MAX_DURATION);

        // Symmetric triangle over the grain.
        self.envelope
            .set_segment_time(Segment::Attack, self.duration * 0.5);
        self.envelope
            .set_segment_time(Segment::Decay, self.duration * 0.5);

        self.pan = fmap(self.random.get_float(), -PAN_MAX_WIDTH, PAN_MAX_WIDTH);

        self.envelope.trigger();

        if let Some(observer) = self.observer {
            observer.grain_started(self.audible > 0.0);
        }
    }
}
