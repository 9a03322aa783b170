//! Lexer for tonescript.
//!
//! Converts source text into a stream of [`Token`]s in a single pass,
//! tracking 1-based line/column positions for diagnostics. Lexing stops
//! at the first unrecognized character.

use super::error::ScriptError;
use super::token::{Token, TokenKind};

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, ScriptError> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            let ch = self.peek();

            match ch {
                ' ' | '\t' => {
                    self.advance();
                }
                '\r' | '\n' => {
                    self.line_break();
                }
                '#' => {
                    self.skip_comment();
                }
                '~' => tokens.push(self.lex_tildes()),
                '_' => tokens.push(self.single_char(TokenKind::Rest)),
                '+' => tokens.push(self.single_char(TokenKind::Sharp)),
                '-' => tokens.push(self.single_char(TokenKind::Flat)),
                '>' => tokens.push(self.single_char(TokenKind::OctaveUp)),
                '<' => tokens.push(self.single_char(TokenKind::OctaveDown)),
                '@' => tokens.push(self.single_char(TokenKind::TempoChange)),
                '0'..='9' => tokens.push(self.lex_number()?),
                'a'..='g' => tokens.push(self.single_char(TokenKind::NoteLetter(ch))),
                _ => {
                    return Err(ScriptError::lex(
                        format!("unrecognized character: '{ch}'"),
                        self.line,
                        self.col,
                    ));
                }
            }
        }

        Ok(tokens)
    }

    fn peek(&self) -> char {
        self.chars[self.pos]
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.pos];
        self.pos += 1;
        self.col += 1;
        ch
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Consume one line break. A `\r` swallows an immediately following
    /// `\n` so that CRLF counts as a single break.
    fn line_break(&mut self) {
        let ch = self.chars[self.pos];
        self.pos += 1;
        if ch == '\r' && !self.is_at_end() && self.peek() == '\n' {
            self.pos += 1;
        }
        self.line += 1;
        self.col = 1;
    }

    /// Discard everything up to and including the next line break.
    fn skip_comment(&mut self) {
        self.advance(); // consume '#'
        while !self.is_at_end() {
            let ch = self.peek();
            if ch == '\r' || ch == '\n' {
                self.line_break();
                return;
            }
            self.advance();
        }
    }

    fn single_char(&mut self, kind: TokenKind) -> Token {
        let line = self.line;
        let col = self.col;
        let ch = self.advance();
        Token {
            kind,
            text: ch.to_string(),
            line,
            col,
        }
    }

    /// Lex a maximal run of `~` into one `LengthExtension` token whose
    /// payload is the run length.
    fn lex_tildes(&mut self) -> Token {
        let line = self.line;
        let col = self.col;
        let start = self.pos;

        while !self.is_at_end() && self.peek() == '~' {
            self.advance();
        }

        let text: String = self.chars[start..self.pos].iter().collect();
        let count = (self.pos - start) as u32;
        Token {
            kind: TokenKind::LengthExtension(count),
            text,
            line,
            col,
        }
    }

    /// Lex a maximal run of decimal digits into one `Number` token.
    fn lex_number(&mut self) -> Result<Token, ScriptError> {
        let line = self.line;
        let col = self.col;
        let start = self.pos;

        while !self.is_at_end() && self.peek().is_ascii_digit() {
            self.advance();
        }

        let text: String = self.chars[start..self.pos].iter().collect();
        let value: u32 = text
            .parse()
            .map_err(|_| ScriptError::lex(format!("number out of range: {text}"), line, col))?;
        Ok(Token {
            kind: TokenKind::Number(value),
            text,
            line,
            col,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::error::ErrorKind;

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize().unwrap()
    }

    #[test]
    fn lex_note_letter() {
        let tokens = lex("a");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::NoteLetter('a'));
        assert_eq!(tokens[0].text, "a");
    }

    #[test]
    fn lex_all_note_letters() {
        let tokens = lex("a b c d e f g");
        let letters: Vec<char> = tokens
            .iter()
            .map(|t| match t.kind {
                TokenKind::NoteLetter(c) => c,
                ref other => panic!("expected note letter, got {other:?}"),
            })
            .collect();
        assert_eq!(letters, vec!['a', 'b', 'c', 'd', 'e', 'f', 'g']);
    }

    #[test]
    fn lex_number_run() {
        let tokens = lex("128");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Number(128));
        assert_eq!(tokens[0].text, "128");
    }

    #[test]
    fn lex_tilde_run() {
        let tokens = lex("~~~");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::LengthExtension(3));
        assert_eq!(tokens[0].text, "~~~");
    }

    #[test]
    fn lex_single_char_tokens() {
        let tokens = lex("_ + - > < @");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Rest,
                TokenKind::Sharp,
                TokenKind::Flat,
                TokenKind::OctaveUp,
                TokenKind::OctaveDown,
                TokenKind::TempoChange,
            ]
        );
    }

    #[test]
    fn lex_note_phrase() {
        let tokens = lex("a8 b8 c+16 _16");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::NoteLetter('a'),
                TokenKind::Number(8),
                TokenKind::NoteLetter('b'),
                TokenKind::Number(8),
                TokenKind::NoteLetter('c'),
                TokenKind::Sharp,
                TokenKind::Number(16),
                TokenKind::Rest,
                TokenKind::Number(16),
            ]
        );
    }

    #[test]
    fn lex_column_tracking() {
        let tokens = lex("a8 ~~b");
        assert_eq!((tokens[0].line, tokens[0].col), (1, 1)); // a
        assert_eq!((tokens[1].line, tokens[1].col), (1, 2)); // 8
        assert_eq!((tokens[2].line, tokens[2].col), (1, 4)); // ~~
        assert_eq!((tokens[3].line, tokens[3].col), (1, 6)); // b
    }

    #[test]
    fn lex_line_tracking() {
        let tokens = lex("a4\nb4\r\nc4");
        assert_eq!((tokens[0].line, tokens[0].col), (1, 1));
        assert_eq!((tokens[2].line, tokens[2].col), (2, 1));
        assert_eq!((tokens[4].line, tokens[4].col), (3, 1));
    }

    #[test]
    fn lex_crlf_is_one_break() {
        let tokens = lex("a4\r\nb4");
        assert_eq!(tokens[2].line, 2);
    }

    #[test]
    fn lex_comment_discarded() {
        let tokens = lex("a4 # this is ignored\nb4");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::NoteLetter('a'),
                TokenKind::Number(4),
                TokenKind::NoteLetter('b'),
                TokenKind::Number(4),
            ]
        );
        assert_eq!(tokens[2].line, 2);
    }

    #[test]
    fn lex_comment_at_end_of_input() {
        let tokens = lex("a4 # trailing");
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn lex_comment_with_crlf() {
        let tokens = lex("# heading\r\na4");
        assert_eq!(tokens.len(), 2);
        assert_eq!((tokens[0].line, tokens[0].col), (2, 1));
    }

    #[test]
    fn lex_error_on_unrecognized_char() {
        let err = Lexer::new("a8 z4").tokenize().unwrap_err();
        assert_eq!(err.kind, ErrorKind::LexError);
        assert!(err.message.contains('z'));
        assert_eq!((err.line, err.col), (1, 4));
    }

    #[test]
    fn lex_error_position_on_later_line() {
        let err = Lexer::new("a8\nb8 ?").tokenize().unwrap_err();
        assert_eq!((err.line, err.col), (2, 4));
    }

    #[test]
    fn lex_error_on_number_overflow() {
        let err = Lexer::new("a99999999999999999999").tokenize().unwrap_err();
        assert_eq!(err.kind, ErrorKind::LexError);
        assert_eq!((err.line, err.col), (1, 2));
    }

    #[test]
    fn lex_empty_input() {
        assert!(lex("").is_empty());
    }

    #[test]
    fn lex_whitespace_only() {
        assert!(lex("  \t \n \r\n ").is_empty());
    }

    #[test]
    fn lex_is_idempotent() {
        let source = "# intro\na8 b8 c+16 _16 d16 ~~ > e8 f-8 @90 g4\n<< a1~~~";
        let first = lex(source);
        let second = lex(source);
        assert_eq!(first, second);
    }
}
