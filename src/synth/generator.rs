//! Signal generators — per-sample waveform synthesis.
//!
//! A generator owns an absolute elapsed-sample counter that runs across
//! the whole rendering session. Changing frequency mid-session does not
//! realign phase to zero; phase is continuous in absolute time, which
//! can produce audible discontinuities at note boundaries. Only
//! [`SignalGenerator::set_sample_rate`] resets the counter.

/// One amplitude sample at a time, polymorphic over waveform shape.
pub trait SignalGenerator {
    /// Produce the next amplitude value in [-1.0, 1.0] and advance the
    /// elapsed-sample counter.
    fn next_sample(&mut self) -> f64;

    /// Change pitch. Does not reset phase or the elapsed-sample counter.
    fn set_frequency(&mut self, freq: f64);

    /// Change the sample rate and reset the elapsed-sample counter.
    fn set_sample_rate(&mut self, sample_rate: u32);
}

/// Pulse wave with a fixed duty cycle.
///
/// Amplitude is +1 while the wave position is below the duty fraction,
/// -1 for the rest of the cycle.
pub struct PulseWave {
    sample_rate: u32,
    freq: f64,
    duty: f64,
    samples_elapsed: u64,
}

impl PulseWave {
    /// `duty` is the fraction of each cycle spent at +1, in (0, 1).
    pub fn new(sample_rate: u32, freq: f64, duty: f64) -> Self {
        Self {
            sample_rate,
            freq,
            duty,
            samples_elapsed: 0,
        }
    }

    /// Fractional position within the current cycle, in [0, 1).
    fn wave_position(&self) -> f64 {
        let time = self.samples_elapsed as f64 / self.sample_rate as f64;
        (time * self.freq).fract()
    }
}

impl SignalGenerator for PulseWave {
    fn next_sample(&mut self) -> f64 {
        let sample = if self.wave_position() < self.duty {
            1.0
        } else {
            -1.0
        };
        self.samples_elapsed += 1;
        sample
    }

    fn set_frequency(&mut self, freq: f64) {
        self.freq = freq;
    }

    fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
        self.samples_elapsed = 0;
    }
}
