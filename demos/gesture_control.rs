//! Offline demo: a scripted gesture phrase rendered to a WAV file.
//!
//! Sweeps a vowel in clean mode, hums a bilabial closure in ergonomic mode,
//! then breathes and pops a plosive in the full articulatory mode.

use simple_logger::SimpleLogger;

use chirovox_dsp::gesture::GestureFrame;
use chirovox_dsp::voice::{SynthMode, Voice};
use chirovox_dsp::SAMPLE_RATE;

const BLOCK_SIZE: usize = 32;
const TICKS_PER_SECOND: f32 = 60.0;

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let mut voice = Voice::new(BLOCK_SIZE).expect("block size");
    let mut samples = Vec::new();

    log::info!("clean mode: vowel sweep");
    voice.select_mode(SynthMode::Clean);
    run(&mut voice, &mut samples, 2.0, |t| {
        let mut frame = GestureFrame::default();
        frame.palm[1] = 0.4;
        // Curl the pointing pair to sweep backness front to back.
        let curl = t;
        frame.finger_extension = [1.0, 1.0 - curl, 1.0 - curl, 0.8, 0.8];
        frame
    });
    log::info!("vowel now reads as /{}/", voice.nearest_vowel_label());

    log::info!("ergonomic mode: hum into a bilabial closure");
    voice.select_mode(SynthMode::Ergonomic);
    run(&mut voice, &mut samples, 2.0, |t| {
        let mut frame = GestureFrame::default();
        frame.tilt = -0.4;
        frame.roll = 0.4 + 0.2 * t;
        frame.pinch_distance = (0.15 - 0.14 * t).max(0.01);
        frame
    });

    log::info!("articulatory mode: breath swell and a release burst");
    voice.select_mode(SynthMode::Articulatory);
    run(&mut voice, &mut samples, 2.0, |t| {
        let mut frame = GestureFrame::default();
        frame.tilt = if t < 0.1 { 0.0 } else { -0.4 };
        if t < 0.5 {
            frame.pinch_distance = 0.02;
            frame.pinch_velocity = 0.0;
        } else if t < 0.55 {
            frame.pinch_distance = 0.15;
            frame.pinch_velocity = -4.0;
        } else {
            frame.pinch_distance = 0.15;
            frame.pinch_velocity = 0.0;
        }
        frame
    });

    write_wav("out/demo/gesture_control.wav", &samples);
    log::info!("wrote {} samples", samples.len());
}

/// Render `seconds` of audio, calling `script` with normalized time to
/// produce each control tick's gesture frame.
fn run(
    voice: &mut Voice,
    samples: &mut Vec<f32>,
    seconds: f32,
    script: impl Fn(f32) -> GestureFrame,
) {
    let mut out = [0.0; BLOCK_SIZE];
    let blocks = (seconds * SAMPLE_RATE / BLOCK_SIZE as f32) as usize;
    let blocks_per_tick = (SAMPLE_RATE / (TICKS_PER_SECOND * BLOCK_SIZE as f32)) as usize;

    for n in 0..blocks {
        if n % blocks_per_tick.max(1) == 0 {
            let t = n as f32 / blocks as f32;
            let frame = script(t);
            voice.update_from_gesture(Some(&frame));
        }
        voice.render(&mut out);
        samples.extend_from_slice(&out);
    }
}

fn write_wav(path: &str, samples: &[f32]) {
    let path = std::path::Path::new(path);
    std::fs::create_dir_all(path.parent().unwrap()).ok();

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE as u32,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for sample in samples {
        writer.write_sample(*sample).unwrap();
    }
    writer.finalize().unwrap();
}
