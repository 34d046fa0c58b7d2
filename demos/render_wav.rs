//! Renders a plucked test signal through the grain delay into `out/render.wav`.
//!
//! The control loop is simulated: every 25ms of audio the "knobs" are read from a
//! slow sweep, stored into the shared parameter cells, smoothed and applied.
//! Every 500ms of audio the processing load per block is logged at debug level.

use std::time::{Duration, Instant};

use hound::{SampleFormat, WavSpec, WavWriter};
use simple_logger::SimpleLogger;

use grain_delay_dsp::control::{ControlParameters, ControlSmoother, Parameter};
use grain_delay_dsp::engine::{Config, GrainDelay};

const BLOCK_SIZE: usize = 256;
const DURATION: f32 = 20.0;
const CONTROL_INTERVAL: f32 = 0.025;
const LOAD_REPORT_INTERVAL: f32 = 0.5;

/// Block processing time relative to the real-time budget of a block.
#[derive(Debug)]
struct LoadMeter {
    budget: Duration,
    min: f32,
    max: f32,
    sum: f32,
    blocks: usize,
}

impl LoadMeter {
    fn new(sample_rate: f32) -> Self {
        Self {
            budget: Duration::from_secs_f32(BLOCK_SIZE as f32 / sample_rate),
            min: f32::MAX,
            max: 0.0,
            sum: 0.0,
            blocks: 0,
        }
    }

    fn reset(&mut self) {
        self.min = f32::MAX;
        self.max = 0.0;
        self.sum = 0.0;
        self.blocks = 0;
    }

    fn record(&mut self, elapsed: Duration) {
        let load = elapsed.as_secs_f32() / self.budget.as_secs_f32();
        self.min = self.min.min(load);
        self.max = self.max.max(load);
        self.sum += load;
        self.blocks += 1;
    }

    fn report(&mut self) {
        if self.blocks > 0 {
            log::debug!(
                "load min {:.2}% avg {:.2}% max {:.2}%",
                self.min * 100.0,
                self.sum / self.blocks as f32 * 100.0,
                self.max * 100.0
            );
        }
        self.reset();
    }
}

fn main() -> Result<(), hound::Error> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()
        .ok();

    let config: Config<5> = Config::default();
    let sample_rate = config.sample_rate;
    let mut smoother = ControlSmoother::new(config.smoothing_coefficient);
    let parameters = ControlParameters::default();

    let mut memory = vec![0.0; config.buffer_length()];
    let mut fx: GrainDelay = GrainDelay::new(&mut memory, config);
    fx.init();

    std::fs::create_dir_all("out").ok();
    let spec = WavSpec {
        channels: 2,
        sample_rate: sample_rate as u32,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create("out/render.wav", spec)?;

    let total = (DURATION * sample_rate) as usize;
    let control_interval = (CONTROL_INTERVAL * sample_rate) as usize;
    let mut next_control = 0;
    let load_interval = (LOAD_REPORT_INTERVAL * sample_rate) as usize;
    let mut next_load_report = load_interval;
    let mut load = LoadMeter::new(sample_rate);
    let mut input = [0.0; BLOCK_SIZE];
    let mut left = [0.0; BLOCK_SIZE];
    let mut right = [0.0; BLOCK_SIZE];
    let mut peak = 0.0_f32;

    for start in (0..total).step_by(BLOCK_SIZE) {
        if start >= next_control {
            let t = start as f32 / total as f32;
            parameters.set(Parameter::DryWet, 0.8);
            parameters.set(Parameter::ReverbDryWet, 0.35);
            parameters.set(Parameter::GrainDensity, 0.3 + 0.7 * t);
            parameters.set(Parameter::GrainDuration, 0.02 + 0.1 * t);
            parameters.set(Parameter::Feedback, 0.6 * (1.0 - t));
            fx.set_controls(&smoother.process(&parameters.load()));
            next_control += control_interval;
        }

        for (i, sample) in input.iter_mut().enumerate() {
            *sample = pluck(start + i, sample_rate);
        }
        let block_start = Instant::now();
        fx.process_block(&input, &mut left, &mut right);
        load.record(block_start.elapsed());

        if start >= next_load_report {
            load.report();
            next_load_report += load_interval;
        }

        for (l, r) in left.iter().zip(right.iter()) {
            peak = peak.max(l.abs()).max(r.abs());
            writer.write_sample(*l)?;
            writer.write_sample(*r)?;
        }
    }

    writer.finalize()?;
    log::info!("rendered {DURATION}s to out/render.wav, peak {peak:.3}");

    Ok(())
}

/// Decaying 220Hz tone retriggered every half second.
fn pluck(n: usize, sample_rate: f32) -> f32 {
    let period = (0.5 * sample_rate) as usize;
    let t = (n % period) as f32 / sample_rate;
    let phase = 2.0 * std::f32::consts::PI * 220.0 * n as f32 / sample_rate;

    0.5 * phase.sin() * (-t * 8.0).exp()
}
