//! Attack-decay envelope gating the grains.

/// Envelope segment addressed by [`GrainEnvelope::set_segment_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Attack,
    Decay,
}

/// Amplitude contour driving the lifetime of a grain.
///
/// A grain voice re-triggers whenever [`is_running`](GrainEnvelope::is_running)
/// reports `false`, so an envelope must eventually stop after a trigger.
pub trait GrainEnvelope {
    fn init(&mut self, sample_rate: f32);

    fn is_running(&self) -> bool;

    fn trigger(&mut self);

    /// Sets the length of a segment in seconds. A running grain keeps its
    /// segment lengths, the new one applies from the next trigger.
    fn set_segment_time(&mut self, segment: Segment, seconds: f32);

    /// Advances the envelope by one sample and returns the level in `0.0..=1.0`.
    fn process(&mut self) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Stage {
    #[default]
    Idle,
    Attack,
    Decay,
}

/// Linear attack-decay envelope.
#[derive(Debug, Default, Clone)]
pub struct AdEnvelope {
    sample_rate: f32,
    attack_increment: f32,
    decay_increment: f32,
    next_attack_increment: f32,
    next_decay_increment: f32,
    value: f32,
    stage: Stage,
}

impl AdEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    fn increment(&self, seconds: f32) -> f32 {
        let samples = seconds * self.sample_rate;
        if samples <= 1.0 {
            1.0
        } else {
            1.0 / samples
        }
    }
}

impl GrainEnvelope for AdEnvelope {
    fn init(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.next_attack_increment = self.increment(0.05);
        self.next_decay_increment = self.increment(0.05);
        self.attack_increment = self.next_attack_increment;
        self.decay_increment = self.next_decay_increment;
        self.value = 0.0;
        self.stage = Stage::Idle;
    }

    #[inline]
    fn is_running(&self) -> bool {
        self.stage != Stage::Idle
    }

    #[inline]
    fn trigger(&mut self) {
        self.attack_increment = self.next_attack_increment;
        self.decay_increment = self.next_decay_increment;
        self.value = 0.0;
        self.stage = Stage::Attack;
    }

    fn set_segment_time(&mut self, segment: Segment, seconds: f32) {
        let increment = self.increment(seconds);
        match segment {
            Segment::Attack => self.next_attack_increment = increment,
            Segment::Decay => self.next_decay_increment = increment,
        }
    }

    #[inline]
    fn process(&mut self) -> f32 {
        match self.stage {
            Stage::Idle => {}
            Stage::Attack => {
                self.value += self.attack_increment;
                if self.value >= 1.0 {
                    self.value = 1.0;
                    self.stage = Stage::Decay;
                }
            }
            Stage::Decay => {
                self.value -= self.decay_increment;
                if self.value <= 0.0 {
                    self.value = 0.0;
                    self.stage = Stage::Idle;
                }
            }
        }

        self.value
    }
}
