//! Effects following the voice bank.

pub mod crossfade;
pub mod reverb;
