//! Tests for the resonance network.

mod wav_writer;

use chirovox_dsp::excitation::ExcitationSource;
use chirovox_dsp::resonance::ResonanceNetwork;
use chirovox_dsp::SAMPLE_RATE;

const BLOCK_SIZE: usize = 24;

#[test]
fn oral_path_passes_tone() {
    let mut network = ResonanceNetwork::new(BLOCK_SIZE);
    let mut source = ExcitationSource::new();
    source.set_voicing_amount(1.0);
    source.set_pitch(120.0);

    network.snap_gains(1.0, 0.0, 0.0);
    network.set_formants(500.0, 1500.0, 2500.0);

    let mut tone = [0.0; BLOCK_SIZE];
    let mut noise = [0.0; BLOCK_SIZE];
    let mut out = [0.0; BLOCK_SIZE];
    let silence = [0.0; BLOCK_SIZE];
    let mut wav_data = Vec::new();

    let blocks = (SAMPLE_RATE / BLOCK_SIZE as f32) as usize;
    for _ in 0..blocks {
        source.render(&mut tone, &mut noise);
        network.render(&tone, &silence, &silence, &mut out);
        wav_data.extend_from_slice(&out);
    }

    let rms = wav_writer::rms(&wav_data[wav_data.len() / 2..]);
    assert!(rms > 1.0e-3, "oral branch should pass the tone, rms {rms}");

    wav_writer::write("resonance/oral_tone.wav", &wav_data).ok();
}

#[test]
fn zero_gain_branches_are_silent() {
    let mut network = ResonanceNetwork::new(BLOCK_SIZE);
    let mut source = ExcitationSource::new();
    source.set_voicing_amount(1.0);

    network.snap_gains(0.0, 0.0, 0.0);

    let mut tone = [0.0; BLOCK_SIZE];
    let mut noise = [0.0; BLOCK_SIZE];
    let mut out = [0.0; BLOCK_SIZE];
    let mut wav_data = Vec::new();

    for _ in 0..2000 {
        source.render(&mut tone, &mut noise);
        network.render(&tone, &tone, &tone, &mut out);
        wav_data.extend_from_slice(&out);
    }

    let rms = wav_writer::rms(&wav_data);
    assert!(rms < 1.0e-6, "all-zero gains must sum to silence, rms {rms}");
}

#[test]
fn silent_input_with_reset_state_is_exactly_zero() {
    let mut network = ResonanceNetwork::new(BLOCK_SIZE);
    network.snap_gains(1.0, 1.0, 1.0);
    network.reset();

    let silence = [0.0; BLOCK_SIZE];
    let mut out = [0.0; BLOCK_SIZE];

    for _ in 0..100 {
        network.render(&silence, &silence, &silence, &mut out);
        for sample in out.iter() {
            assert_eq!(*sample, 0.0, "a detached branch must contribute nothing");
        }
    }
}

#[test]
fn fricative_band_follows_the_requested_center() {
    let mut network = ResonanceNetwork::new(BLOCK_SIZE);
    let mut source = ExcitationSource::new();
    source.set_voicing_amount(0.0);
    source.set_breathiness(1.0);

    network.snap_gains(0.0, 0.0, 1.0);
    network.set_fricative_band(6000.0, 2500.0);

    let mut tone = [0.0; BLOCK_SIZE];
    let mut noise = [0.0; BLOCK_SIZE];
    let mut out = [0.0; BLOCK_SIZE];
    let silence = [0.0; BLOCK_SIZE];
    let mut wav_data = Vec::new();

    let blocks = (SAMPLE_RATE / BLOCK_SIZE as f32) as usize;
    for _ in 0..blocks {
        source.render(&mut tone, &mut noise);
        network.render(&silence, &silence, &noise, &mut out);
        wav_data.extend_from_slice(&out);
    }

    let rms = wav_writer::rms(&wav_data[wav_data.len() / 2..]);
    assert!(rms > 1.0e-3, "fricative branch should hiss, rms {rms}");

    wav_writer::write("resonance/fricative.wav", &wav_data).ok();
}
