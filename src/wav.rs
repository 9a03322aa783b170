//! WAV encoding — writes the rendered sample sequence as a mono PCM file.

use std::io::{Seek, Write};
use std::path::Path;

/// Output sample format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    Int8,
    Int16,
}

impl BitDepth {
    fn bits(self) -> u16 {
        match self {
            BitDepth::Int8 => 8,
            BitDepth::Int16 => 16,
        }
    }
}

fn spec(sample_rate: u32, depth: BitDepth) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: depth.bits(),
        sample_format: hound::SampleFormat::Int,
    }
}

/// Encode `samples` (floats in [-1, 1], clamped if outside) as a mono
/// integer-PCM WAV stream.
pub fn write_wav<W: Write + Seek>(
    writer: W,
    sample_rate: u32,
    depth: BitDepth,
    samples: &[f32],
) -> Result<(), hound::Error> {
    let mut wav = hound::WavWriter::new(writer, spec(sample_rate, depth))?;
    for &s in samples {
        let s = s.clamp(-1.0, 1.0);
        match depth {
            BitDepth::Int8 => wav.write_sample((s * i8::MAX as f32) as i8)?,
            BitDepth::Int16 => wav.write_sample((s * i16::MAX as f32) as i16)?,
        }
    }
    wav.finalize()
}

/// Encode `samples` into a WAV file at `path`.
pub fn write_wav_file(
    path: impl AsRef<Path>,
    sample_rate: u32,
    depth: BitDepth,
    samples: &[f32],
) -> Result<(), hound::Error> {
    let file = std::fs::File::create(path)?;
    write_wav(std::io::BufWriter::new(file), sample_rate, depth, samples)
}
