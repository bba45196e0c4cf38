//! Maps brush colors onto canonical hues and musical notes.
//!
//! Any color resolves to one of eight reference hues, each bound to a fixed
//! note of a descending scale, so a listener can tell roughly where on the
//! wheel the brush sits without seeing it.

use crate::color;

/// Duration token understood by tone engines. Only eighth notes are used by
/// the drawing surface, at a fixed 120 BPM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteLength {
    Eighth,
}

impl NoteLength {
    pub fn seconds(self) -> f32 {
        match self {
            NoteLength::Eighth => 0.25,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Note {
    B4,
    A4,
    G4,
    Fs4,
    F4,
    E4,
    D4,
    C4,
}

impl Note {
    pub fn frequency_hz(self) -> f32 {
        match self {
            Note::B4 => 493.88,
            Note::A4 => 440.0,
            Note::G4 => 392.0,
            Note::Fs4 => 369.99,
            Note::F4 => 349.23,
            Note::E4 => 329.63,
            Note::D4 => 293.66,
            Note::C4 => 261.63,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Note::B4 => "B4",
            Note::A4 => "A4",
            Note::G4 => "G4",
            Note::Fs4 => "F#4",
            Note::F4 => "F4",
            Note::E4 => "E4",
            Note::D4 => "D4",
            Note::C4 => "C4",
        }
    }
}

#[derive(Debug)]
pub struct CanonicalColor {
    pub name: &'static str,
    pub hue: f32,
    pub note: Note,
}

/// The eight reference hues in enumeration order. Ties in nearest-hue
/// resolution go to the earlier entry, so this order is part of the contract.
pub static CANONICAL_COLORS: [CanonicalColor; 8] = [
    CanonicalColor { name: "red", hue: 0.0, note: Note::B4 },
    CanonicalColor { name: "orange", hue: 45.0, note: Note::A4 },
    CanonicalColor { name: "yellow", hue: 75.0, note: Note::G4 },
    CanonicalColor { name: "green", hue: 120.0, note: Note::Fs4 },
    CanonicalColor { name: "cyan", hue: 180.0, note: Note::F4 },
    CanonicalColor { name: "blue", hue: 210.0, note: Note::E4 },
    CanonicalColor { name: "purple", hue: 270.0, note: Note::D4 },
    CanonicalColor { name: "magenta", hue: 330.0, note: Note::C4 },
];

/// Angular distance on the wheel, taking the shorter arc.
pub fn circular_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).abs();
    if d > 180.0 { 360.0 - d } else { d }
}

pub fn nearest_canonical(hue: f32) -> &'static CanonicalColor {
    let mut best = &CANONICAL_COLORS[0];
    let mut best_distance = circular_distance(hue, best.hue);
    for candidate in &CANONICAL_COLORS[1..] {
        let d = circular_distance(hue, candidate.hue);
        if d < best_distance {
            best = candidate;
            best_distance = d;
        }
    }
    best
}

/// One-shot tone triggering, one dedicated voice per canonical color.
/// `start` brings the audio backend up; it is called at most once per mapper
/// lifetime and reports whether the backend is usable.
pub trait ToneEngine {
    fn start(&mut self) -> bool;
    fn play_note(&mut self, note: Note, length: NoteLength);
}

/// Engine used when audio is disabled: activation succeeds, tones go nowhere.
pub struct NullToneEngine;

impl ToneEngine for NullToneEngine {
    fn start(&mut self) -> bool {
        true
    }

    fn play_note(&mut self, _note: Note, _length: NoteLength) {}
}

/// Audio activation lifecycle. `Failed` is sticky so a broken output device
/// is reported once instead of once per pointer sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Stopped,
    Running,
    Failed,
}

pub struct ToneMapper {
    engine: Box<dyn ToneEngine>,
    state: EngineState,
}

impl ToneMapper {
    pub fn new(engine: Box<dyn ToneEngine>) -> Self {
        Self {
            engine,
            state: EngineState::Stopped,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Trigger an eighth-note tone for the canonical color nearest the given
    /// brush color. Activates the engine first if needed; repeated calls
    /// while drawing never start the backend twice.
    pub fn play(&mut self, hex: &str) {
        let Some((hue, _, _)) = color::hex_to_hsl(hex) else {
            log::debug!("unplayable color {hex:?}");
            return;
        };
        if !self.ensure_running() {
            return;
        }
        let canonical = nearest_canonical(hue);
        log::trace!("{} for {} ({hex})", canonical.note.name(), canonical.name);
        self.engine.play_note(canonical.note, NoteLength::Eighth);
    }

    fn ensure_running(&mut self) -> bool {
        match self.state {
            EngineState::Running => true,
            EngineState::Failed => false,
            EngineState::Stopped => {
                if self.engine.start() {
                    log::info!("tone engine started");
                    self.state = EngineState::Running;
                    true
                } else {
                    log::warn!("tone engine failed to start; tones disabled");
                    self.state = EngineState::Failed;
                    false
                }
            }
        }
    }
}
