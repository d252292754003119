//! On-demand tokenizer for Atomese s-expressions
//!
//! Tokens are produced one at a time so that a parse failure leaves the rest
//! of the input unread. String literals keep every character verbatim except
//! the two escapes `\"` and `\\`.

use crate::error::{ParseError, Result};
use crate::span::{ByteOffset, Span};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    /// Bare word: a type name, a command name or a number
    Symbol(String),
    /// Quoted string with escapes resolved
    Str(String),
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LeftParen => write!(f, "`(`"),
            TokenKind::RightParen => write!(f, "`)`"),
            TokenKind::Symbol(symbol) => write!(f, "`{}`", symbol),
            TokenKind::Str(_) => write!(f, "string"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

pub struct Lexer<'a> {
    source: &'a str,
    position: usize,
    allow_comments: bool,
    peeked: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, allow_comments: bool) -> Self {
        Lexer {
            source,
            position: 0,
            allow_comments,
            peeked: None,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Offset of the next unread byte
    pub fn offset(&self) -> ByteOffset {
        match &self.peeked {
            Some(token) => token.span.start,
            None => ByteOffset(self.position),
        }
    }

    pub fn end_offset(&self) -> ByteOffset {
        ByteOffset(self.source.len())
    }

    pub fn peek(&mut self) -> Result<&Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.scan()?,
        };
        Ok(self.peeked.insert(token))
    }

    pub fn next_token(&mut self) -> Result<Token> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.scan(),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == ';' && self.allow_comments {
                while let Some(ch) = self.current_char() {
                    self.advance();
                    if ch == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn scan(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();
        let start = self.position;

        let kind = match self.current_char() {
            None => TokenKind::Eof,
            Some('(') => {
                self.advance();
                TokenKind::LeftParen
            }
            Some(')') => {
                self.advance();
                TokenKind::RightParen
            }
            Some('"') => TokenKind::Str(self.read_string()?),
            Some(';') => {
                return Err(ParseError::UnexpectedChar {
                    found: ';',
                    offset: ByteOffset(start),
                })
            }
            Some(_) => TokenKind::Symbol(self.read_symbol()),
        };

        Ok(Token {
            kind,
            span: Span::new(ByteOffset(start), ByteOffset(self.position)),
        })
    }

    fn read_string(&mut self) -> Result<String> {
        let start = ByteOffset(self.position);
        self.advance(); // Skip opening quote
        let mut value = String::new();

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(value);
                }
                '\\' => {
                    let escape_offset = ByteOffset(self.position);
                    self.advance();
                    match self.current_char() {
                        Some(escaped @ ('"' | '\\')) => {
                            value.push(escaped);
                            self.advance();
                        }
                        Some(found) => {
                            return Err(ParseError::InvalidEscape {
                                found,
                                offset: escape_offset,
                            })
                        }
                        None => break,
                    }
                }
                _ => {
                    value.push(ch);
                    self.advance();
                }
            }
        }

        Err(ParseError::UnterminatedString {
            start,
            offset: self.end_offset(),
        })
    }

    fn read_symbol(&mut self) -> String {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() || matches!(ch, '(' | ')' | '"' | ';') {
                break;
            }
            self.advance();
        }
        self.source[start..self.position].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source, true);
        let mut kinds = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            if token.kind == TokenKind::Eof {
                return kinds;
            }
            kinds.push(token.kind);
        }
    }

    #[test]
    fn test_tokens() {
        assert_eq!(
            kinds("(ListLink(ConceptNode \"a\"))"),
            vec![
                TokenKind::LeftParen,
                TokenKind::Symbol("ListLink".to_string()),
                TokenKind::LeftParen,
                TokenKind::Symbol("ConceptNode".to_string()),
                TokenKind::Str("a".to_string()),
                TokenKind::RightParen,
                TokenKind::RightParen,
            ]
        );
    }

    #[test]
    fn test_escapes_and_raw_characters() {
        assert_eq!(
            kinds(r#""vfjv\"jnvfé" "back\\slash""#),
            vec![
                TokenKind::Str("vfjv\"jnvfé".to_string()),
                TokenKind::Str("back\\slash".to_string()),
            ]
        );
        assert_eq!(
            kinds("\"two\nlines\ttab\""),
            vec![TokenKind::Str("two\nlines\ttab".to_string())]
        );
    }

    #[test]
    fn test_lone_backslash_rejected() {
        let mut lexer = Lexer::new(r#""a\nb""#, true);
        assert_eq!(
            lexer.next_token(),
            Err(ParseError::InvalidEscape {
                found: 'n',
                offset: ByteOffset(2)
            })
        );
    }

    #[test]
    fn test_unterminated_string_points_at_end() {
        let source = "(ConceptNode \"unterminated";
        let mut lexer = Lexer::new(source, true);
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        assert_eq!(
            lexer.next_token(),
            Err(ParseError::UnterminatedString {
                start: ByteOffset(13),
                offset: ByteOffset(source.len()),
            })
        );

        let mut lexer = Lexer::new("\"trailing\\", true);
        assert!(matches!(
            lexer.next_token(),
            Err(ParseError::UnterminatedString { .. })
        ));
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            kinds("; header\n(Concept \"a\") ; trailing\n;last"),
            vec![
                TokenKind::LeftParen,
                TokenKind::Symbol("Concept".to_string()),
                TokenKind::Str("a".to_string()),
                TokenKind::RightParen,
            ]
        );

        let mut lexer = Lexer::new("; nope", false);
        assert_eq!(
            lexer.next_token(),
            Err(ParseError::UnexpectedChar {
                found: ';',
                offset: ByteOffset(0)
            })
        );
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = Lexer::new("  (x", true);
        assert_eq!(lexer.peek().unwrap().kind, TokenKind::LeftParen);
        assert_eq!(lexer.offset(), ByteOffset(2));
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::LeftParen);
        assert_eq!(
            lexer.next_token().unwrap(),
            Token {
                kind: TokenKind::Symbol("x".to_string()),
                span: Span::new(ByteOffset(3), ByteOffset(4)),
            }
        );
    }
}
