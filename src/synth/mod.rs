//! Synthesis — signal generators and the rendering environment.

pub mod env;
pub mod generator;

pub use env::{note_frequency, RenderEnvironment};
pub use generator::{PulseWave, SignalGenerator};
