//! Lexer (tokenizer) for impedance expressions.

use crate::error::{FastzError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in an impedance expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An identifier (element designator or subscript)
    Identifier,
    /// A plain decimal or scientific number
    Number,
    /// Series operator '+'
    Plus,
    /// Parallel operator '||' or '‖'
    Parallel,
    /// Open parenthesis '('
    OpenParen,
    /// Close parenthesis ')'
    CloseParen,
    /// Open bracket '['
    OpenBracket,
    /// Close bracket ']'
    CloseBracket,
    /// Colon ':' between a composite label and its body
    Colon,
    /// End of input
    Eof,
}

/// Lexer for tokenizing impedance expressions.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let start_line = self.line;
        let start_column = self.column;
        let token = |kind: TokenKind, text: String| Token {
            kind,
            text,
            line: start_line,
            column: start_column,
        };

        let ch = match self.chars.peek().copied() {
            Some(ch) => ch,
            None => return Ok(token(TokenKind::Eof, String::new())),
        };

        let punctuation = match ch {
            '+' => Some(TokenKind::Plus),
            '‖' => Some(TokenKind::Parallel),
            '(' => Some(TokenKind::OpenParen),
            ')' => Some(TokenKind::CloseParen),
            '[' => Some(TokenKind::OpenBracket),
            ']' => Some(TokenKind::CloseBracket),
            ':' => Some(TokenKind::Colon),
            _ => None,
        };
        if let Some(kind) = punctuation {
            self.advance();
            return Ok(token(kind, ch.to_string()));
        }

        match ch {
            '|' => {
                self.advance();
                if self.chars.peek() == Some(&'|') {
                    self.advance();
                    Ok(token(TokenKind::Parallel, "||".to_string()))
                } else {
                    Err(FastzError::lexer(
                        start_line,
                        start_column,
                        "expected '||' for a parallel connection",
                    ))
                }
            }
            '-' | '.' | '0'..='9' => {
                let text = self.read_number();
                if text.parse::<f64>().is_err() {
                    return Err(FastzError::lexer(
                        start_line,
                        start_column,
                        format!("invalid number '{}'", text),
                    ));
                }
                Ok(token(TokenKind::Number, text))
            }
            _ if ch.is_alphabetic() || ch == '_' => Ok(token(TokenKind::Identifier, self.read_identifier())),
            _ => Err(FastzError::lexer(
                start_line,
                start_column,
                format!("unexpected character '{}'", ch),
            )),
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == '#' {
                // Skip comment until end of line
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        // negative integer subscript directly after a bare prefix: R-1, Z-2
        if matches!(text.as_str(), "R" | "L" | "C" | "Z") && self.negative_digits_ahead() {
            text.push('-');
            self.advance();
            self.read_digits(&mut text);
        }
        text
    }

    fn negative_digits_ahead(&self) -> bool {
        let mut ahead = self.chars.clone();
        ahead.next() == Some('-') && ahead.next().is_some_and(|c| c.is_ascii_digit())
    }

    fn read_digits(&mut self, text: &mut String) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> String {
        let mut text = String::new();

        // Optional sign
        if self.chars.peek() == Some(&'-') {
            text.push('-');
            self.advance();
        }

        // Integer part
        self.read_digits(&mut text);

        // Decimal part
        if self.chars.peek() == Some(&'.') {
            text.push('.');
            self.advance();
            self.read_digits(&mut text);
        }

        // Exponent part
        if let Some(&ch) = self.chars.peek() {
            if ch == 'e' || ch == 'E' {
                text.push(ch);
                self.advance();
                if let Some(&sign) = self.chars.peek() {
                    if sign == '-' || sign == '+' {
                        text.push(sign);
                        self.advance();
                    }
                }
                self.read_digits(&mut text);
            }
        }

        text
    }
}
