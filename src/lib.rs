//! Tonescript — a text-file music notation compiler and monophonic synthesizer.
//!
//! A script like `a8 b8 c+16 _16 > a4` is lexed and parsed into calls on a
//! rendering environment, which synthesizes a pulse wave into a flat
//! sequence of f32 samples ready for WAV encoding.

pub mod script;
pub mod synth;
pub mod wav;
