#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

pub mod control;
pub mod engine;
pub mod envelope;
pub mod fx;
pub mod grain;
pub mod utils;

/// Default audio sample rate in Hz.
pub const SAMPLE_RATE: f32 = 48000.0;
