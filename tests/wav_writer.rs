//! Writer for WAV files rendered by the tests.

use std::path::Path;

use hound::*;

use chirovox_dsp::SAMPLE_RATE;

/// Writes sample data as a mono WAV file in 32-bit float format.
#[allow(dead_code)]
pub fn write(
    filename: impl AsRef<std::path::Path> + core::fmt::Display,
    samples: &[f32],
) -> std::io::Result<()> {
    let path = format!("out/{filename}");
    let path = Path::new(path.as_str());

    // Create parent directories to the path if they don't exist.
    let parent = path.parent().unwrap();
    std::fs::create_dir_all(parent).ok();

    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE as u32,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();

    for sample in samples {
        writer.write_sample(*sample).unwrap();
    }

    Ok(())
}

#[allow(dead_code)]
pub fn rms(samples: &[f32]) -> f32 {
    let sum: f32 = samples.iter().map(|sample| sample * sample).sum();
    (sum / samples.len() as f32).sqrt()
}
