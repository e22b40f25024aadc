//! Tests for the top-level voice: mode control, routing and error policy.

mod wav_writer;

use chirovox_dsp::error::Error;
use chirovox_dsp::gesture::GestureFrame;
use chirovox_dsp::voice::{SynthMode, Voice, MAX_BLOCK_SIZE};
use chirovox_dsp::SAMPLE_RATE;

const BLOCK_SIZE: usize = 24;

/// Control ticks arrive roughly every 16 ms, a ~60 Hz detection rate.
const BLOCKS_PER_TICK: usize = 32;

fn render_seconds(voice: &mut Voice, seconds: f32, frame: Option<&GestureFrame>) -> Vec<f32> {
    let mut out = [0.0; BLOCK_SIZE];
    let mut data = Vec::new();
    let blocks = (seconds * SAMPLE_RATE / BLOCK_SIZE as f32) as usize;
    for n in 0..blocks {
        if n % BLOCKS_PER_TICK == 0 {
            voice.update_from_gesture(frame);
        }
        voice.render(&mut out);
        data.extend_from_slice(&out);
    }
    data
}

fn voiced_frame() -> GestureFrame {
    GestureFrame {
        tilt: -0.4,
        ..GestureFrame::default()
    }
}

#[test]
fn block_size_is_validated() {
    assert_eq!(Voice::new(0).err(), Some(Error::InvalidBlockSize(0)));
    assert_eq!(
        Voice::new(MAX_BLOCK_SIZE + 1).err(),
        Some(Error::InvalidBlockSize(MAX_BLOCK_SIZE + 1))
    );
    assert!(Voice::new(BLOCK_SIZE).is_ok());
}

#[test]
fn named_resource_errors_exist() {
    // Session-start failures surface as distinct named errors for the host.
    assert_ne!(Error::AudioSinkUnavailable, Error::PoseSourceUnavailable);
}

#[test]
fn out_of_zone_palm_forces_silence() {
    let mut voice = Voice::new(BLOCK_SIZE).unwrap();

    // Loud and in-zone first.
    let data = render_seconds(&mut voice, 0.3, Some(&GestureFrame::default()));
    assert!(
        wav_writer::rms(&data[data.len() / 2..]) > 1.0e-3,
        "in-zone voice should be audible"
    );

    // Same hand, palm outside the x bound: volume forced to zero no matter
    // what the other features say.
    let mut outside = GestureFrame::default();
    outside.palm = [0.05, 0.5, 0.5];
    outside.openness = 1.0;

    let data = render_seconds(&mut voice, 0.5, Some(&outside));
    let tail = &data[data.len() - 4800..];
    assert!(
        wav_writer::rms(tail) < 1.0e-3,
        "out-of-zone tail rms {}",
        wav_writer::rms(tail)
    );
}

#[test]
fn missing_frame_holds_previous_state() {
    let mut voice = Voice::new(BLOCK_SIZE).unwrap();

    let mut frame = GestureFrame::default();
    frame.finger_extension = [0.3; 5];
    frame.finger_extended = [false; 5];
    voice.update_from_gesture(Some(&frame));
    let formants = voice.formants();
    let pitch = voice.articulation().pitch_hz;

    // Detection misses: nothing snaps, nothing silences.
    let data = render_seconds(&mut voice, 0.3, None);
    assert_eq!(voice.formants(), formants);
    assert_eq!(voice.articulation().pitch_hz, pitch);
    assert!(
        wav_writer::rms(&data[data.len() / 2..]) > 1.0e-3,
        "audio must keep running through detection misses"
    );
}

#[test]
fn stale_mode_update_is_a_no_op() {
    let mut voice = Voice::new(BLOCK_SIZE).unwrap();
    assert_eq!(voice.mode(), SynthMode::Clean);

    voice.update_from_gesture(Some(&GestureFrame::default()));
    let f1 = voice.articulation().f1;

    let mut frame = GestureFrame::default();
    frame.finger_extension = [0.0; 5];
    voice.update_if_mode(SynthMode::BioMechanical, Some(&frame));
    assert_eq!(voice.articulation().f1, f1, "stale-mode update must not apply");

    voice.update_if_mode(SynthMode::Clean, Some(&frame));
    assert_ne!(voice.articulation().f1, f1, "matching mode must apply");
}

#[test]
fn mode_switch_detaches_previous_paths() {
    let mut voice = Voice::new(BLOCK_SIZE).unwrap();

    // Clean mode singing loudly.
    let data = render_seconds(&mut voice, 0.3, Some(&GestureFrame::default()));
    assert!(wav_writer::rms(&data[data.len() / 2..]) > 1.0e-3);

    // Switch to ergonomic with no breath: the previous mode's oral path
    // must not keep ringing into the sum.
    voice.select_mode(SynthMode::Ergonomic);
    let mut still = GestureFrame::default();
    still.tilt = 0.0;

    let data = render_seconds(&mut voice, 0.5, Some(&still));
    let tail = &data[data.len() - 4800..];
    assert!(
        wav_writer::rms(tail) < 1.0e-3,
        "previous mode leaked, tail rms {}",
        wav_writer::rms(tail)
    );
}

#[test]
fn master_volume_zero_silences() {
    let mut voice = Voice::new(BLOCK_SIZE).unwrap();
    voice.set_master_volume(0.0);
    let data = render_seconds(&mut voice, 0.3, Some(&GestureFrame::default()));
    let tail = &data[data.len() - 2400..];
    assert!(wav_writer::rms(tail) < 1.0e-3);
}

#[test]
fn voice_size_scale_is_clamped() {
    let mut voice = Voice::new(BLOCK_SIZE).unwrap();
    voice.update_from_gesture(Some(&GestureFrame::default()));
    let state_f1 = voice.articulation().f1;

    voice.set_voice_size_scale(2.0);
    let (f1, _, _) = voice.formants();
    assert!((f1 - state_f1 * 1.2).abs() < 1.0e-3, "scale must clamp to 1.2");

    voice.set_voice_size_scale(0.1);
    let (f1, _, _) = voice.formants();
    assert!((f1 - state_f1 * 0.8).abs() < 1.0e-3, "scale must clamp to 0.8");
}

#[test]
fn diagnostics_track_the_active_state() {
    let mut voice = Voice::new(BLOCK_SIZE).unwrap();
    voice.select_mode(SynthMode::Articulatory);

    voice.update_from_gesture(Some(&voiced_frame()));
    assert!(voice.breath_level() > 0.9);
    assert!(voice.voicing_level() > 0.0);
    assert!(!voice.nearest_vowel_label().is_empty());
}

#[test]
fn all_modes_render_bounded_audio() {
    let modes = [
        SynthMode::RawTone,
        SynthMode::Clean,
        SynthMode::Fm,
        SynthMode::BioMechanical,
        SynthMode::Articulatory,
        SynthMode::Ergonomic,
        SynthMode::ThumbDistance,
    ];

    let mut voice = Voice::new(BLOCK_SIZE).unwrap();
    let mut out = [0.0; BLOCK_SIZE];
    let mut wav_data = Vec::new();

    for mode in modes {
        voice.select_mode(mode);

        let blocks = (SAMPLE_RATE / BLOCK_SIZE as f32) as usize;
        for n in 0..blocks {
            if n % BLOCKS_PER_TICK == 0 {
                let t = n as f32 / blocks as f32;
                let mut frame = voiced_frame();
                frame.palm[1] = 0.3 + 0.4 * t;
                frame.pinch_distance = 0.15 - 0.1 * t;
                frame.roll = 0.3 + 0.4 * t;
                voice.update_from_gesture(Some(&frame));
            }
            voice.render(&mut out);
            for sample in out.iter() {
                assert!(sample.is_finite());
                assert!(sample.abs() <= 1.0, "soft clip must bound the output");
            }
            wav_data.extend_from_slice(&out);
        }
    }

    wav_writer::write("voice/all_modes.wav", &wav_data).ok();
}

#[test]
fn render_tolerates_chunks_larger_than_block_size() {
    let mut voice = Voice::new(BLOCK_SIZE).unwrap();
    voice.update_from_gesture(Some(&GestureFrame::default()));

    let mut out = vec![0.0; BLOCK_SIZE * 5 + 7];
    voice.render(&mut out);
    for sample in out.iter() {
        assert!(sample.is_finite());
    }
}
