//! Tests for the energy envelope state machine.

use chirovox_dsp::envelope::{EnergyEnvelope, BREATH_SWELL, LEVEL_FLOOR, PLOSIVE_BURST};
use chirovox_dsp::SAMPLE_RATE;

fn advance(envelope: &mut EnergyEnvelope, seconds: f32) {
    envelope.skip((seconds * SAMPLE_RATE) as usize);
}

#[test]
fn attack_reaches_velocity() {
    let mut envelope = EnergyEnvelope::new();
    envelope.set_profile(&PLOSIVE_BURST);
    envelope.trigger(1.0);

    advance(&mut envelope, PLOSIVE_BURST.attack_s);
    assert!(
        (envelope.value() - 1.0).abs() < 0.05,
        "level {} should be near 1.0 right after the attack",
        envelope.value()
    );
}

#[test]
fn decay_settles_near_floor_never_negative() {
    let mut envelope = EnergyEnvelope::new();
    envelope.set_profile(&PLOSIVE_BURST);
    envelope.trigger(1.0);

    // Sample the whole trajectory: never below zero.
    for _ in 0..(SAMPLE_RATE as usize) {
        envelope.skip(1);
        assert!(envelope.value() >= 0.0);
    }
    assert!(
        envelope.value() <= LEVEL_FLOOR * 10.0,
        "level {} should settle near the floor",
        envelope.value()
    );
}

#[test]
fn retrigger_restarts_from_current_level() {
    let mut envelope = EnergyEnvelope::new();
    envelope.set_profile(&BREATH_SWELL);
    envelope.trigger(1.0);

    // Partway into the attack.
    advance(&mut envelope, BREATH_SWELL.attack_s * 0.5);
    let mid_level = envelope.value();
    assert!(mid_level > 0.1 && mid_level < 1.0);

    // Retrigger must not dip back toward zero.
    envelope.trigger(1.0);
    envelope.skip(1);
    assert!(
        envelope.value() >= mid_level - 1.0e-3,
        "retrigger dipped from {} to {}",
        mid_level,
        envelope.value()
    );
}

#[test]
fn profile_swap_selects_timing() {
    let mut envelope = EnergyEnvelope::new();
    envelope.set_profile(&BREATH_SWELL);
    envelope.trigger(1.0);

    // A plosive attack would be done by now; the swell is not.
    advance(&mut envelope, PLOSIVE_BURST.attack_s * 2.0);
    assert!(envelope.value() < 0.5);

    advance(&mut envelope, BREATH_SWELL.attack_s);
    assert!((envelope.value() - 1.0).abs() < 0.05);
}

#[test]
fn release_ramps_down_and_is_idempotent() {
    let mut envelope = EnergyEnvelope::new();
    envelope.set_profile(&BREATH_SWELL);
    envelope.set_sustain(0.8);
    envelope.set_release(0.050);
    envelope.trigger(1.0);

    advance(&mut envelope, 0.5);
    assert!(envelope.value() > 0.5, "sustain should hold the level up");

    envelope.release();
    advance(&mut envelope, 0.5);
    assert!(envelope.value() <= LEVEL_FLOOR * 2.0);
    assert!(!envelope.is_active());

    // Releasing again changes nothing.
    envelope.release();
    let settled = envelope.value();
    advance(&mut envelope, 0.1);
    assert_eq!(envelope.value(), settled);
}

#[test]
fn release_before_trigger_is_a_no_op() {
    let mut envelope = EnergyEnvelope::new();
    envelope.release();
    advance(&mut envelope, 0.1);
    assert_eq!(envelope.value(), 0.0);
    assert!(!envelope.is_active());
}
