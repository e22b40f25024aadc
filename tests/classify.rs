//! Tests for gesture classification and the phoneme bank.

use chirovox_dsp::classify::{classify, default_phoneme, PINCH_CONTACT};
use chirovox_dsp::gesture::{GestureFrame, INDEX, MIDDLE, PINKY, RING, THUMB};
use chirovox_dsp::phoneme::{bank, phoneme, Manner, Place};

fn frame() -> GestureFrame {
    GestureFrame {
        openness: 0.5,
        finger_extended: [false; 5],
        finger_extension: [0.2; 5],
        ..GestureFrame::default()
    }
}

#[test]
fn pinch_classifies_bilabial() {
    let mut gesture_frame = frame();
    gesture_frame.pinch_distance = 0.02;

    let consonant = classify(&gesture_frame).expect("pinch must classify");
    assert_eq!(consonant.place, Place::Bilabial);
    assert!(consonant.closure > 0.5);
    assert!(consonant.phoneme.is_none());

    let symbol = default_phoneme(consonant.place, consonant.manner, true);
    assert_eq!(symbol, "m");
}

#[test]
fn pinch_wins_over_other_rules() {
    // Pinching while the rest of the hand is spread: first rule wins.
    let mut gesture_frame = GestureFrame::default();
    gesture_frame.pinch_distance = PINCH_CONTACT * 0.5;

    let consonant = classify(&gesture_frame).expect("must classify");
    assert_eq!(consonant.place, Place::Bilabial);
}

#[test]
fn finger_pairs_give_approximants() {
    let mut lateral = frame();
    lateral.finger_extended[INDEX] = true;
    lateral.finger_extended[MIDDLE] = true;
    lateral.finger_extension[INDEX] = 1.0;
    lateral.finger_extension[MIDDLE] = 1.0;
    let consonant = classify(&lateral).expect("must classify");
    assert_eq!(consonant.phoneme, Some("l"));
    assert_eq!(consonant.manner, Manner::Approximant);

    let mut rhotic = frame();
    rhotic.finger_extended[INDEX] = true;
    rhotic.finger_extended[PINKY] = true;
    let consonant = classify(&rhotic).expect("must classify");
    assert_eq!(consonant.phoneme, Some("r"));

    let mut glide = frame();
    glide.finger_extended[THUMB] = true;
    glide.finger_extended[PINKY] = true;
    let consonant = classify(&glide).expect("must classify");
    assert_eq!(consonant.phoneme, Some("w"));
}

#[test]
fn single_fingers_pick_places() {
    let mut alveolar = frame();
    alveolar.finger_extended[INDEX] = true;
    alveolar.finger_extension[INDEX] = 1.0;
    let consonant = classify(&alveolar).expect("must classify");
    assert_eq!(consonant.place, Place::Alveolar);
    assert_eq!(default_phoneme(consonant.place, consonant.manner, false), "t");
    assert_eq!(default_phoneme(consonant.place, consonant.manner, true), "d");

    let mut velar = frame();
    velar.finger_extended[MIDDLE] = true;
    let consonant = classify(&velar).expect("must classify");
    assert_eq!(consonant.place, Place::Velar);
}

#[test]
fn open_hand_is_glottal() {
    let mut open = GestureFrame::default();
    open.openness = 1.0;
    let consonant = classify(&open).expect("must classify");
    assert_eq!(consonant.place, Place::Glottal);
    assert_eq!(default_phoneme(consonant.place, consonant.manner, false), "h");
}

#[test]
fn neutral_hand_is_no_consonant() {
    let mut neutral = frame();
    neutral.finger_extended[RING] = true;
    neutral.finger_extended[PINKY] = true;
    assert!(classify(&neutral).is_none());
}

#[test]
fn approximants_always_carry_formant_targets() {
    for entry in bank().entries() {
        if entry.manner == Manner::Approximant {
            assert!(
                entry.target_formants.is_some(),
                "approximant {} missing formant targets",
                entry.symbol
            );
        } else {
            assert!(entry.target_formants.is_none());
        }
    }
}

#[test]
fn default_policy_resolves_to_known_phonemes() {
    let places = [
        Place::Bilabial,
        Place::Labiodental,
        Place::Dental,
        Place::Alveolar,
        Place::Postalveolar,
        Place::Velar,
        Place::Glottal,
    ];
    let manners = [Manner::Stop, Manner::Fricative, Manner::Nasal];

    for place in places {
        for manner in manners {
            for voiced in [false, true] {
                let symbol = default_phoneme(place, manner, voiced);
                assert!(
                    phoneme(symbol).is_some(),
                    "default {symbol} not in the bank"
                );
            }
        }
    }
}
