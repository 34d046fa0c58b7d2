//! Tests for the utility helpers

use grain_delay_dsp::utils::delay_line::DelayLine;
use grain_delay_dsp::utils::filter::{FrequencyApproximation, OnePole, Svf};
use grain_delay_dsp::utils::random::Random;
use grain_delay_dsp::utils::*;

#[test]
fn wrap_negative_indices() {
    assert_eq!(wrap(-1, 10), 9);
    assert_eq!(wrap(-10, 10), 0);
    assert_eq!(wrap(-11, 10), 9);
    assert_eq!(wrap(21, 10), 1);
}

#[test]
fn wrap_f32_stays_in_range() {
    assert_eq!(wrap_f32(-0.5, 10), 9.5);
    assert_eq!(wrap_f32(10.25, 10), 0.25);
    assert_eq!(wrap_f32(-25.0, 10), 5.0);

    let p = wrap_f32(-1.0e-9, 10);
    assert!((0.0..10.0).contains(&p));
}

#[test]
fn fmap_bounds() {
    assert_eq!(fmap(0.0, 0.1, 10.0), 0.1);
    assert_eq!(fmap(1.0, 0.1, 10.0), 10.0);
}

#[test]
fn one_pole_smoothing_converges() {
    let mut state = 0.0;
    for _ in 0..1000 {
        one_pole(&mut state, 1.0, 0.05);
    }
    assert!((state - 1.0).abs() < 1.0e-6);
}

#[test]
fn random_floats_in_unit_range() {
    let mut random = Random::new(1);
    for _ in 0..100_000 {
        let u = random.get_float();
        assert!((0.0..1.0).contains(&u));
    }
}

#[test]
fn random_seeds_are_reproducible() {
    let mut a = Random::new(7);
    let mut b = Random::default();
    b.seed(7);
    for _ in 0..16 {
        assert_eq!(a.get_word(), b.get_word());
    }
}

#[test]
fn svf_high_pass_removes_dc() {
    let mut svf = Svf::default();
    svf.init();
    svf.set_f_q(100.0 / 48000.0, 0.5, FrequencyApproximation::Dirty);

    let mut out = 1.0;
    for _ in 0..48000 {
        out = svf.high_pass(1.0);
    }
    assert!(out.abs() < 1.0e-3);
}

#[test]
fn one_pole_low_pass_passes_dc() {
    let mut filter = OnePole::new();
    filter.set_f(0.01, FrequencyApproximation::Fast);

    let mut out = 0.0;
    for _ in 0..10000 {
        out = filter.low_pass(1.0);
    }
    assert!((out - 1.0).abs() < 1.0e-3);
}

#[test]
fn delay_line_impulse_comes_back() {
    let mut line = DelayLine::<16>::new();
    line.write(1.0);
    for _ in 0..4 {
        line.write(0.0);
    }
    assert_eq!(line.read_with_delay(5), 1.0);
    assert_eq!(line.read_with_delay(4), 0.0);

    line.reset();
    assert_eq!(line.read_with_delay(5), 0.0);
}

#[test]
fn delay_line_allpass_keeps_energy() {
    let mut line = DelayLine::<8>::new();
    let mut energy = 0.0;
    for n in 0..4000 {
        let x = if n == 0 { 1.0 } else { 0.0 };
        let y = line.allpass(x, 0.5);
        energy += y * y;
    }
    assert!((energy - 1.0_f32).abs() < 1.0e-3);
}
