//! Script compiler — notation text → tokens → rendered samples.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::{ErrorKind, ScriptError};
pub use token::{Token, TokenKind};

use crate::synth::RenderEnvironment;
use lexer::Lexer;
use parser::Parser;

/// The script renderer.
///
/// Runs source text through lexer → parser, driving the given
/// environment to produce the sample sequence.
pub struct Renderer;

impl Renderer {
    /// Lex script source into a token sequence.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, ScriptError> {
        Lexer::new(source).tokenize()
    }

    /// Lex and parse script source, rendering samples through `env`.
    pub fn render(source: &str, env: &mut RenderEnvironment) -> Result<Vec<f32>, ScriptError> {
        let tokens = Self::tokenize(source)?;
        Parser::new(tokens).parse(env)
    }
}
