//! Dry/wet crossfade.

#[allow(unused_imports)]
use num_traits::float::Float;
use spin::Once;

use crate::utils::interpolate;

const TABLE_SIZE: usize = 256;

/// First quadrant of a sine including both ends, plus one guard point for the
/// interpolation at the upper end.
static QUARTER_SINE: Once<[f32; TABLE_SIZE + 2]> = Once::new();

fn quarter_sine() -> &'static [f32; TABLE_SIZE + 2] {
    QUARTER_SINE.call_once(|| {
        let mut table = [0.0; TABLE_SIZE + 2];
        for (i, value) in table.iter_mut().enumerate() {
            let phase = i as f32 / TABLE_SIZE as f32;
            *value = (phase * core::f32::consts::FRAC_PI_2).sin();
        }
        table
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossFadeCurve {
    Linear,
    /// Keeps the summed power constant over the fade.
    #[default]
    ConstantPower,
}

#[derive(Debug, Clone)]
pub struct CrossFade {
    curve: CrossFadeCurve,
    position: f32,
    dry_gain: f32,
    wet_gain: f32,
}

impl Default for CrossFade {
    fn default() -> Self {
        Self {
            curve: CrossFadeCurve::default(),
            position: 0.0,
            dry_gain: 1.0,
            wet_gain: 0.0,
        }
    }
}

impl CrossFade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self, curve: CrossFadeCurve) {
        self.curve = curve;
        self.set_position(0.0);
    }

    /// Fade position from `0.0` (dry only) to `1.0` (wet only).
    pub fn set_position(&mut self, position: f32) {
        self.position = position.clamp(0.0, 1.0);

        match self.curve {
            CrossFadeCurve::Linear => {
                self.dry_gain = 1.0 - self.position;
                self.wet_gain = self.position;
            }
            CrossFadeCurve::ConstantPower => {
                let table = quarter_sine();
                self.dry_gain = interpolate(table, 1.0 - self.position, TABLE_SIZE as f32);
                self.wet_gain = interpolate(table, self.position, TABLE_SIZE as f32);
            }
        }
    }

    #[inline]
    pub fn position(&self) -> f32 {
        self.position
    }

    #[inline]
    pub fn process(&self, dry: f32, wet: f32) -> f32 {
        dry * self.dry_gain + wet * self.wet_gain
    }
}
