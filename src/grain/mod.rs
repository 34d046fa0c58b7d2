//! Grain voices and the voice bank mixing them to stereo.

pub mod bank;
pub mod feedback;
pub mod ring_buffer;
pub mod voice;

/// Shortest grain in seconds.
pub const GRAIN_MIN_DURATION: f32 = 0.1;

/// Longest grain in seconds.
pub const GRAIN_MAX_DURATION: f32 = 10.0;

/// Relative random deviation applied to the dialed grain duration.
pub const GRAIN_DURATION_JITTER: f32 = 0.05;

/// Pan positions are drawn from `-PAN_MAX_WIDTH..PAN_MAX_WIDTH`.
pub const PAN_MAX_WIDTH: f32 = 1.0;

/// Samples mirrored behind the end of each ring buffer.
pub const INTERPOLATION_TAIL: usize = 8;

/// Read interpolation of the grain playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    Nearest,
    #[default]
    Linear,
    Hermite,
}

/// Receives a notification whenever a voice starts a new grain.
///
/// Called from the audio path, so implementations must neither block nor
/// allocate. Delivery is at most once per grain.
pub trait GrainObserver: core::fmt::Debug {
    fn grain_started(&self, audible: bool);
}
