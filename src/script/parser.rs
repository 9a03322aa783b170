//! Parser for tonescript.
//!
//! Single forward pass over the token stream with one-token lookahead.
//! The parser holds the musical state (current octave) and drives a
//! [`RenderEnvironment`] to produce the sample sequence. Parsing is
//! fail-fast: on the first error the accumulated samples are discarded.

use super::error::ScriptError;
use super::token::{Token, TokenKind};
use crate::synth::RenderEnvironment;

const MIN_OCTAVE: u8 = 0;
const MAX_OCTAVE: u8 = 9;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    octave: u8,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            octave: 5,
        }
    }

    pub fn parse(&mut self, env: &mut RenderEnvironment) -> Result<Vec<f32>, ScriptError> {
        let mut samples = Vec::new();

        while !self.is_at_end() {
            let token = self.advance().clone();

            match token.kind {
                TokenKind::NoteLetter(_) => {
                    samples.extend(self.parse_note(&token, env)?);
                }
                TokenKind::Rest => {
                    samples.extend(self.parse_rest(&token, env)?);
                }
                TokenKind::OctaveUp => {
                    if self.octave < MAX_OCTAVE {
                        self.octave += 1;
                    }
                }
                TokenKind::OctaveDown => {
                    if self.octave > MIN_OCTAVE {
                        self.octave -= 1;
                    }
                }
                TokenKind::TempoChange => {
                    self.parse_tempo(&token, env)?;
                }
                _ => {
                    return Err(ScriptError::parse(
                        format!(
                            "unexpected token: {} (expected note, rest, octave shift, or tempo change)",
                            token.kind.name()
                        ),
                        token.line,
                        token.col,
                    ));
                }
            }
        }

        Ok(samples)
    }

    /// Note construct: letter, optional accidental, required divisor,
    /// optional length extension.
    fn parse_note(
        &mut self,
        token: &Token,
        env: &mut RenderEnvironment,
    ) -> Result<Vec<f32>, ScriptError> {
        let TokenKind::NoteLetter(letter) = token.kind else {
            unreachable!("dispatched on NoteLetter");
        };

        // Unreachable given the lexer's character set, checked anyway.
        let offset = note_offset(letter).ok_or_else(|| {
            ScriptError::parse(
                format!("unrecognized note letter: '{letter}'"),
                token.line,
                token.col,
            )
        })?;

        let mut note_number = self.octave as i32 * 12 + offset;

        // At most one accidental; first match wins.
        match self.peek_kind() {
            Some(TokenKind::Sharp) => {
                self.advance();
                note_number += 1;
            }
            Some(TokenKind::Flat) => {
                self.advance();
                note_number -= 1;
            }
            _ => {}
        }

        let divisor = self.expect_divisor(token)?;
        let duration = self.optional_duration();

        Ok(env.note(note_number, divisor, duration))
    }

    /// Rest construct: required divisor, optional length extension.
    fn parse_rest(
        &mut self,
        token: &Token,
        env: &mut RenderEnvironment,
    ) -> Result<Vec<f32>, ScriptError> {
        let divisor = self.expect_divisor(token)?;
        let duration = self.optional_duration();

        Ok(env.rest(divisor, duration))
    }

    /// Tempo construct: `@` followed by a positive number. Produces no
    /// samples; applies to subsequent notes only.
    fn parse_tempo(
        &mut self,
        token: &Token,
        env: &mut RenderEnvironment,
    ) -> Result<(), ScriptError> {
        match self.peek_kind() {
            Some(TokenKind::Number(value)) => {
                let number = self.advance().clone();
                if value == 0 {
                    return Err(ScriptError::parse(
                        "tempo must be greater than 0",
                        number.line,
                        number.col,
                    ));
                }
                env.set_tempo(value as f64);
                Ok(())
            }
            other => Err(self.missing_token_error(token, other, "tempo number")),
        }
    }

    /// Consume the required measure-divisor number following a note or
    /// rest token; it must be greater than zero.
    fn expect_divisor(&mut self, after: &Token) -> Result<u32, ScriptError> {
        match self.peek_kind() {
            Some(TokenKind::Number(value)) => {
                let number = self.advance().clone();
                if value == 0 {
                    return Err(ScriptError::parse(
                        "measure divisor must be greater than 0",
                        number.line,
                        number.col,
                    ));
                }
                Ok(value)
            }
            other => Err(self.missing_token_error(after, other, "measure divisor number")),
        }
    }

    /// Consume an optional length-extension token; `duration` is one
    /// divisor-length unit plus one per tilde.
    fn optional_duration(&mut self) -> u32 {
        if let Some(TokenKind::LengthExtension(count)) = self.peek_kind() {
            self.advance();
            1 + count
        } else {
            1
        }
    }

    fn missing_token_error(
        &self,
        after: &Token,
        got: Option<TokenKind>,
        expected: &str,
    ) -> ScriptError {
        let got_name = got.map_or("end of script", |k| k.name());
        ScriptError::parse(
            format!(
                "expected {expected} after {} at {}:{}, got {got_name}",
                after.kind.name(),
                after.line,
                after.col
            ),
            after.line,
            after.col,
        )
    }

    // --- Utility methods ---

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn advance(&mut self) -> &Token {
        let t = &self.tokens[self.pos];
        self.pos += 1;
        t
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }
}

/// Semitone offset of a note letter from C within an octave.
fn note_offset(letter: char) -> Option<i32> {
    match letter {
        'c' => Some(0),
        'd' => Some(2),
        'e' => Some(4),
        'f' => Some(5),
        'g' => Some(7),
        'a' => Some(9),
        'b' => Some(11),
        _ => None,
    }
}
