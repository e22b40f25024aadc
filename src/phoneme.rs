//! Consonant articulation targets, keyed by phoneme symbol.
//!
//! The bank is immutable static data: built once on first access and shared
//! by reference across every session.

use spin::Once;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Manner {
    Stop,
    Fricative,
    Nasal,
    Approximant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Place {
    Bilabial,
    Labiodental,
    Dental,
    Alveolar,
    Postalveolar,
    Velar,
    Glottal,
}

/// Articulation target for one consonant.
///
/// `target_formants` is set for every approximant (they are rendered as
/// formant targets rather than noise) and unset for everything else.
#[derive(Debug, Clone, Copy)]
pub struct PhonemeEntry {
    pub symbol: &'static str,
    pub manner: Manner,
    pub place: Place,
    pub voiced: bool,
    pub noise_center_hz: f32,
    pub noise_bandwidth_hz: f32,
    pub oral_gain: f32,
    pub nasal_gain: f32,
    pub damping: f32,
    pub target_formants: Option<(f32, f32, f32)>,
}

#[allow(clippy::too_many_arguments)]
const fn obstruent(
    symbol: &'static str,
    manner: Manner,
    place: Place,
    voiced: bool,
    noise_center_hz: f32,
    noise_bandwidth_hz: f32,
    oral_gain: f32,
    nasal_gain: f32,
    damping: f32,
) -> PhonemeEntry {
    PhonemeEntry {
        symbol,
        manner,
        place,
        voiced,
        noise_center_hz,
        noise_bandwidth_hz,
        oral_gain,
        nasal_gain,
        damping,
        target_formants: None,
    }
}

const fn approximant(
    symbol: &'static str,
    place: Place,
    f1: f32,
    f2: f32,
    f3: f32,
    damping: f32,
) -> PhonemeEntry {
    PhonemeEntry {
        symbol,
        manner: Manner::Approximant,
        place,
        voiced: true,
        noise_center_hz: 0.0,
        noise_bandwidth_hz: 0.0,
        oral_gain: 1.0,
        nasal_gain: 0.0,
        damping,
        target_formants: Some((f1, f2, f3)),
    }
}

const ENTRIES: [PhonemeEntry; 21] = [
    // Stops. Burst spectra get darker toward the back of the mouth.
    obstruent("p", Manner::Stop, Place::Bilabial, false, 900.0, 700.0, 0.05, 0.0, 0.9),
    obstruent("b", Manner::Stop, Place::Bilabial, true, 700.0, 600.0, 0.10, 0.0, 0.85),
    obstruent("t", Manner::Stop, Place::Alveolar, false, 4200.0, 2200.0, 0.05, 0.0, 0.9),
    obstruent("d", Manner::Stop, Place::Alveolar, true, 3600.0, 2000.0, 0.10, 0.0, 0.85),
    obstruent("k", Manner::Stop, Place::Velar, false, 2100.0, 1300.0, 0.05, 0.0, 0.9),
    obstruent("g", Manner::Stop, Place::Velar, true, 1800.0, 1100.0, 0.10, 0.0, 0.85),
    // Nasals: oral path shut, velum open.
    obstruent("m", Manner::Nasal, Place::Bilabial, true, 0.0, 0.0, 0.05, 0.95, 0.6),
    obstruent("n", Manner::Nasal, Place::Alveolar, true, 0.0, 0.0, 0.05, 0.9, 0.6),
    obstruent("ng", Manner::Nasal, Place::Velar, true, 0.0, 0.0, 0.05, 0.85, 0.65),
    // Fricatives.
    obstruent("f", Manner::Fricative, Place::Labiodental, false, 5500.0, 4000.0, 0.25, 0.0, 0.7),
    obstruent("v", Manner::Fricative, Place::Labiodental, true, 5000.0, 3600.0, 0.35, 0.0, 0.6),
    obstruent("th", Manner::Fricative, Place::Dental, false, 5800.0, 4200.0, 0.25, 0.0, 0.7),
    obstruent("dh", Manner::Fricative, Place::Dental, true, 5200.0, 3800.0, 0.35, 0.0, 0.6),
    obstruent("s", Manner::Fricative, Place::Alveolar, false, 6500.0, 3000.0, 0.2, 0.0, 0.75),
    obstruent("z", Manner::Fricative, Place::Alveolar, true, 6000.0, 2800.0, 0.3, 0.0, 0.65),
    obstruent("sh", Manner::Fricative, Place::Postalveolar, false, 3500.0, 2400.0, 0.2, 0.0, 0.75),
    obstruent("h", Manner::Fricative, Place::Glottal, false, 1500.0, 2000.0, 0.8, 0.0, 0.2),
    // Approximants carry explicit formant targets.
    approximant("l", Place::Alveolar, 360.0, 1300.0, 2700.0, 0.3),
    approximant("r", Place::Alveolar, 310.0, 1060.0, 1380.0, 0.35),
    approximant("w", Place::Bilabial, 290.0, 610.0, 2150.0, 0.3),
    approximant("y", Place::Alveolar, 280.0, 2100.0, 2750.0, 0.3),
];

#[derive(Debug)]
pub struct PhonemeBank {
    entries: &'static [PhonemeEntry],
}

impl PhonemeBank {
    pub fn get(&self, symbol: &str) -> Option<&'static PhonemeEntry> {
        self.entries.iter().find(|entry| entry.symbol == symbol)
    }

    pub fn entries(&self) -> &'static [PhonemeEntry] {
        self.entries
    }
}

static BANK: Once<PhonemeBank> = Once::new();

/// Shared phoneme bank, built on first access.
pub fn bank() -> &'static PhonemeBank {
    BANK.call_once(|| {
        for entry in ENTRIES.iter() {
            debug_assert!(
                entry.manner != Manner::Approximant || entry.target_formants.is_some(),
                "approximant without formant targets"
            );
        }
        PhonemeBank { entries: &ENTRIES }
    })
}

/// Look up a phoneme by symbol.
pub fn phoneme(symbol: &str) -> Option<&'static PhonemeEntry> {
    bank().get(symbol)
}
