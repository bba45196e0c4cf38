//! cpal-backed tone engine: one output stream mixing eight fixed sine voices,
//! one per canonical color. Retriggering a voice restarts its envelope, so
//! rapid pointer samples on the same color never stack oscillators.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::tone::{CANONICAL_COLORS, Note, NoteLength, ToneEngine};

const ATTACK_SECS: f32 = 0.005;
const RELEASE_SECS: f32 = 0.04;
const MASTER_GAIN: f32 = 0.2;

struct Voice {
    frequency_hz: f32,
    phase: f32,
    elapsed: f32,
    length: f32,
}

impl Voice {
    fn new(frequency_hz: f32) -> Self {
        Self {
            frequency_hz,
            phase: 0.0,
            elapsed: 0.0,
            length: 0.0,
        }
    }

    fn trigger(&mut self, length: f32) {
        // Phase is left running so a retrigger doesn't click.
        self.elapsed = 0.0;
        self.length = length;
    }

    fn is_sounding(&self) -> bool {
        self.length > 0.0 && self.elapsed < self.length
    }

    fn next_sample(&mut self, dt: f32) -> f32 {
        if !self.is_sounding() {
            return 0.0;
        }
        let envelope = if self.elapsed < ATTACK_SECS {
            self.elapsed / ATTACK_SECS
        } else {
            let remaining = self.length - self.elapsed;
            if remaining < RELEASE_SECS {
                remaining / RELEASE_SECS
            } else {
                1.0
            }
        };
        let sample = (self.phase * std::f32::consts::TAU).sin() * envelope;
        self.phase += self.frequency_hz * dt;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        self.elapsed += dt;
        sample
    }
}

pub struct CpalToneEngine {
    voices: Arc<Mutex<Vec<Voice>>>,
    // Kept alive for the lifetime of the engine; dropping it stops playback.
    stream: Option<cpal::Stream>,
}

impl CpalToneEngine {
    pub fn new() -> Self {
        let voices = CANONICAL_COLORS
            .iter()
            .map(|c| Voice::new(c.note.frequency_hz()))
            .collect();
        Self {
            voices: Arc::new(Mutex::new(voices)),
            stream: None,
        }
    }

    fn voice_index(note: Note) -> Option<usize> {
        CANONICAL_COLORS.iter().position(|c| c.note == note)
    }

    fn try_start(&mut self) -> Result<(), String> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("no audio output device found")?;
        let config = device
            .default_output_config()
            .map_err(|e| format!("failed to get audio config: {e}"))?;
        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        log::info!(
            "audio: {} @ {}Hz",
            device.name().unwrap_or_else(|_| "unknown".to_string()),
            sample_rate
        );

        let voices = Arc::clone(&self.voices);
        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut voices = voices.lock().unwrap();
                    let dt = 1.0 / sample_rate;
                    for frame in data.chunks_mut(channels) {
                        let mixed: f32 = voices.iter_mut().map(|v| v.next_sample(dt)).sum();
                        let sample = (mixed * MASTER_GAIN).clamp(-0.5, 0.5);
                        for out in frame {
                            *out = sample;
                        }
                    }
                },
                |err| log::warn!("audio stream error: {err}"),
                None,
            )
            .map_err(|e| format!("failed to build audio stream: {e}"))?;
        stream
            .play()
            .map_err(|e| format!("failed to start audio stream: {e}"))?;
        self.stream = Some(stream);
        Ok(())
    }
}

impl ToneEngine for CpalToneEngine {
    fn start(&mut self) -> bool {
        if self.stream.is_some() {
            return true;
        }
        match self.try_start() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("audio output unavailable: {e}");
                false
            }
        }
    }

    fn play_note(&mut self, note: Note, length: NoteLength) {
        let Some(index) = Self::voice_index(note) else {
            return;
        };
        if let Ok(mut voices) = self.voices.lock() {
            if let Some(voice) = voices.get_mut(index) {
                voice.trigger(length.seconds());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 48_000.0;

    #[test]
    fn untriggered_voice_is_silent() {
        let mut voice = Voice::new(440.0);
        for _ in 0..128 {
            assert_eq!(voice.next_sample(DT), 0.0);
        }
    }

    #[test]
    fn triggered_voice_sounds_then_decays_to_silence() {
        let mut voice = Voice::new(440.0);
        voice.trigger(NoteLength::Eighth.seconds());
        assert!(voice.is_sounding());

        // A few samples past the nominal length to absorb f32 accumulation.
        let samples = (0.25 / DT) as usize + 64;
        let mut peak = 0.0f32;
        for _ in 0..samples {
            peak = peak.max(voice.next_sample(DT).abs());
        }
        assert!(peak > 0.5, "voice never reached audible level, peak {peak}");
        assert!(!voice.is_sounding());
        assert_eq!(voice.next_sample(DT), 0.0);
    }

    #[test]
    fn retrigger_restarts_the_envelope() {
        let mut voice = Voice::new(440.0);
        voice.trigger(0.25);
        for _ in 0..1000 {
            voice.next_sample(DT);
        }
        let before = voice.elapsed;
        voice.trigger(0.25);
        assert!(voice.elapsed < before);
        assert!(voice.is_sounding());
    }

    #[test]
    fn every_note_has_a_dedicated_voice() {
        for canonical in &CANONICAL_COLORS {
            assert!(CpalToneEngine::voice_index(canonical.note).is_some());
        }
        let indices: Vec<usize> = CANONICAL_COLORS
            .iter()
            .filter_map(|c| CpalToneEngine::voice_index(c.note))
            .collect();
        let mut deduped = indices.clone();
        deduped.dedup();
        assert_eq!(indices, deduped);
    }
}
