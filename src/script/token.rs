//! Token types for the tonescript lexer.

/// A token produced by the lexer.
///
/// `text` is the verbatim source substring the token was scanned from.
/// `line`/`col` are 1-based and point at the token's first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub col: usize,
}

/// The kind of token, with its typed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// One of `a`..=`g`.
    NoteLetter(char),
    /// `_`
    Rest,
    /// A run of decimal digits.
    Number(u32),
    /// A run of `~` characters; the payload is the run length.
    LengthExtension(u32),
    /// `+`
    Sharp,
    /// `-`
    Flat,
    /// `>`
    OctaveUp,
    /// `<`
    OctaveDown,
    /// `@`
    TempoChange,
}

impl TokenKind {
    /// Short human-readable name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::NoteLetter(_) => "note letter",
            TokenKind::Rest => "rest",
            TokenKind::Number(_) => "number",
            TokenKind::LengthExtension(_) => "length extension",
            TokenKind::Sharp => "sharp",
            TokenKind::Flat => "flat",
            TokenKind::OctaveUp => "octave up",
            TokenKind::OctaveDown => "octave down",
            TokenKind::TempoChange => "tempo change",
        }
    }
}
