//! Rendering environment — tempo, gain, and note/rest sample blocks.

use super::generator::{PulseWave, SignalGenerator};

const DEFAULT_TEMPO: f64 = 120.0;
const DEFAULT_GAIN: f64 = 0.25;

/// Convert a MIDI-style note number to frequency in Hz.
///
/// 12-tone equal temperament, A4 (note 69) = 440 Hz.
pub fn note_frequency(note_number: i32) -> f64 {
    440.0 * 2.0_f64.powf((note_number as f64 - 69.0) / 12.0)
}

/// Owns the synthesis state for one rendering session: sample rate
/// (fixed at construction), tempo, output gain, and the signal
/// generator whose frequency is overwritten before every note.
pub struct RenderEnvironment {
    sample_rate: u32,
    tempo: f64,
    gain: f64,
    generator: Box<dyn SignalGenerator>,
}

impl RenderEnvironment {
    pub fn new(sample_rate: u32, generator: Box<dyn SignalGenerator>) -> Self {
        Self {
            sample_rate,
            tempo: DEFAULT_TEMPO,
            gain: DEFAULT_GAIN,
            generator,
        }
    }

    /// Environment with the stock pulse-wave generator.
    pub fn with_pulse(sample_rate: u32, duty: f64) -> Self {
        Self::new(
            sample_rate,
            Box::new(PulseWave::new(sample_rate, 440.0, duty)),
        )
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Replace the tempo. The parser guarantees `bpm > 0`.
    pub fn set_tempo(&mut self, bpm: f64) {
        self.tempo = bpm;
    }

    /// Set the output gain, clamped to [0.0, 1.0].
    pub fn set_gain(&mut self, gain: f64) {
        self.gain = gain.clamp(0.0, 1.0);
    }

    /// Render one note: retune the generator and produce the block of
    /// gain-scaled samples for the given divisor/duration.
    pub fn note(&mut self, note_number: i32, divisor: u32, duration: u32) -> Vec<f32> {
        self.generator.set_frequency(note_frequency(note_number));

        let count = self.num_samples(divisor, duration);
        (0..count)
            .map(|_| (self.generator.next_sample() * self.gain) as f32)
            .collect()
    }

    /// Render one rest: the same sample count as a note, all zeros. The
    /// generator is left untouched.
    pub fn rest(&mut self, divisor: u32, duration: u32) -> Vec<f32> {
        vec![0.0; self.num_samples(divisor, duration)]
    }

    /// Number of samples for `duration` units of a `1/divisor` note.
    ///
    /// A divisor of 4 (a quarter note) with duration 1 is one beat:
    /// sample_rate * 60/bpm. The floor is taken before the final x4
    /// scale; the truncation order is observable in output length and
    /// must not be reordered.
    fn num_samples(&self, divisor: u32, duration: u32) -> usize {
        let beats = self.sample_rate as f64 * (60.0 / self.tempo);
        (beats * (duration as f64 / divisor as f64)).floor() as usize * 4
    }
}
