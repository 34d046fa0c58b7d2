//! Tests for the effects


use grain_delay_dsp::fx::crossfade::{CrossFade, CrossFadeCurve};
use grain_delay_dsp::fx::reverb::{Reverb, StereoReverb, MAX_FEEDBACK};
use grain_delay_dsp::SAMPLE_RATE;

#[test]
fn crossfade_ends_are_pure() {
    for curve in [CrossFadeCurve::Linear, CrossFadeCurve::ConstantPower] {
        let mut fade = CrossFade::new();
        fade.init(curve);
        assert_eq!(fade.process(1.0, 2.0), 1.0);

        fade.set_position(1.0);
        assert_eq!(fade.process(1.0, 2.0), 2.0);
    }
}

#[test]
fn crossfade_constant_power_at_center() {
    let mut fade = CrossFade::new();
    fade.init(CrossFadeCurve::ConstantPower);
    fade.set_position(0.5);

    let dry = fade.process(1.0, 0.0);
    let wet = fade.process(0.0, 1.0);
    assert!((dry * dry + wet * wet - 1.0).abs() < 1.0e-3);
}

#[test]
fn crossfade_position_is_clamped() {
    let mut fade = CrossFade::new();
    fade.init(CrossFadeCurve::Linear);
    fade.set_position(3.0);
    assert_eq!(fade.position(), 1.0);
}

#[test]
fn reverb_tail_decays() {
    let mut reverb = Reverb::new();
    reverb.init(SAMPLE_RATE);
    reverb.set_feedback(0.7);

    let mut energy_early = 0.0;
    let mut energy_late = 0.0;
    let mut wav_data_left = Vec::new();
    let mut wav_data_right = Vec::new();

    for n in 0..2 * SAMPLE_RATE as usize {
        let x = if n == 0 { 1.0 } else { 0.0 };
        let (l, r) = reverb.process(x, x);
        assert!(l.is_finite() && r.is_finite());
        if n < 24000 {
            energy_early += l * l + r * r;
        } else if n >= 72000 {
            energy_late += l * l + r * r;
        }
        wav_data_left.push(l);
        wav_data_right.push(r);
    }

    assert!(energy_early > 0.0);
    assert!(energy_late < energy_early);

    wav_writer::write_stereo("fx/reverb.wav", &wav_data_left, &wav_data_right).ok();
}

#[test]
fn reverb_feedback_is_limited() {
    let mut reverb = Reverb::new();
    reverb.set_feedback(2.0);
    assert_eq!(reverb.feedback(), MAX_FEEDBACK);
}
