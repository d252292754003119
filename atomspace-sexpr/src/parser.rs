//! Recursive-descent parser for Atomese
//!
//! Each top-level expression is parsed and validated in full before anything
//! touches a store: the result is a [`PendingAtom`] tree that is committed
//! bottom-up afterwards. A malformed expression therefore never leaves part
//! of itself behind.

use crate::config::LoaderConfig;
use crate::error::{ParseError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::span::{ByteOffset, Span};
use atomspace::{is_type_name, Atom, AtomKind, AtomSpace, AtomSpaceError, AtomType, Handle, TypeRegistry};

/// A validated atom expression that has not been added to a store yet
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAtom {
    Node {
        atom_type: AtomType,
        name: String,
        span: Span,
    },
    Link {
        atom_type: AtomType,
        outgoing: Vec<PendingAtom>,
        span: Span,
    },
}

impl PendingAtom {
    pub fn atom_type(&self) -> &AtomType {
        match self {
            PendingAtom::Node { atom_type, .. } | PendingAtom::Link { atom_type, .. } => atom_type,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            PendingAtom::Node { span, .. } | PendingAtom::Link { span, .. } => *span,
        }
    }

    /// Number of atom expressions in the tree
    pub fn size(&self) -> usize {
        match self {
            PendingAtom::Node { .. } => 1,
            PendingAtom::Link { outgoing, .. } => {
                1 + outgoing.iter().map(PendingAtom::size).sum::<usize>()
            }
        }
    }

    /// Intern the tree into `space`, children before their parents
    pub fn commit(&self, space: &AtomSpace) -> atomspace::Result<Handle> {
        match self {
            PendingAtom::Node {
                atom_type, name, ..
            } => Ok(space.intern(Atom::node(atom_type.clone(), name.as_str())?)),
            PendingAtom::Link {
                atom_type,
                outgoing,
                ..
            } => {
                let children = outgoing
                    .iter()
                    .map(|child| child.commit(space))
                    .collect::<atomspace::Result<Vec<_>>>()?;
                Ok(space.intern(Atom::link(atom_type.clone(), children)?))
            }
        }
    }

    /// Canonical instance in `space`, without inserting anything
    pub fn find(&self, space: &AtomSpace) -> Option<Handle> {
        let probe = match self {
            PendingAtom::Node {
                atom_type, name, ..
            } => Atom::node(atom_type.clone(), name.as_str()).ok()?,
            PendingAtom::Link {
                atom_type,
                outgoing,
                ..
            } => {
                let children = outgoing
                    .iter()
                    .map(|child| child.find(space))
                    .collect::<Option<Vec<_>>>()?;
                Atom::link(atom_type.clone(), children).ok()?
            }
        };
        space.get_atom(&probe)
    }
}

pub struct SexprParser<'a> {
    lexer: Lexer<'a>,
    types: &'a TypeRegistry,
    config: LoaderConfig,
    failed: bool,
}

impl<'a> SexprParser<'a> {
    pub fn new(source: &'a str, types: &'a TypeRegistry) -> Self {
        Self::with_config(source, types, LoaderConfig::default())
    }

    pub fn with_config(source: &'a str, types: &'a TypeRegistry, config: LoaderConfig) -> Self {
        SexprParser {
            lexer: Lexer::new(source, config.allow_comments),
            types,
            config,
            failed: false,
        }
    }

    /// Offset of the next unread token
    pub fn offset(&self) -> ByteOffset {
        self.lexer.offset()
    }

    pub(crate) fn peek(&mut self) -> Result<&Token> {
        self.lexer.peek()
    }

    pub(crate) fn next_token(&mut self) -> Result<Token> {
        self.lexer.next_token()
    }

    /// Parse the next top-level expression. `Ok(None)` at end of input.
    pub fn next_expr(&mut self) -> Result<Option<PendingAtom>> {
        let token = self.lexer.peek()?.clone();
        match token.kind {
            TokenKind::Eof => Ok(None),
            TokenKind::LeftParen => self.parse_expr().map(Some),
            TokenKind::RightParen => Err(ParseError::UnmatchedClose {
                offset: token.span.start,
            }),
            other => Err(ParseError::unexpected_token(
                "`(`",
                other.to_string(),
                token.span.start,
            )),
        }
    }

    /// Parse one parenthesized atom expression
    pub fn parse_expr(&mut self) -> Result<PendingAtom> {
        self.parse_nested(1)
    }

    fn parse_nested(&mut self, depth: usize) -> Result<PendingAtom> {
        if depth > self.config.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.config.max_depth,
                offset: self.lexer.peek()?.span.start,
            });
        }
        let open = self.expect_open()?;
        let (type_name, type_span) = self.parse_type()?;
        let known = self
            .types
            .resolve(&type_name)
            .map(|info| info.atom_type().clone());
        if known.is_none() && self.config.strict_types {
            return Err(ParseError::unknown_type(type_name, type_span.start));
        }

        let body = self.lexer.peek()?.clone();
        match body.kind {
            TokenKind::Str(name) => {
                self.lexer.next_token()?;
                let atom_type = self.node_type(known, &type_name, body.span.start)?;
                let close = self.expect_close()?;
                Ok(PendingAtom::Node {
                    atom_type,
                    name,
                    span: open.merge(close),
                })
            }
            TokenKind::Symbol(symbol) => {
                let is_number_type = known.is_some() && self.types.is_a(&type_name, "NumberNode");
                if !is_number_type || !is_number_literal(&symbol) {
                    return Err(ParseError::unexpected_token(
                        "quoted name or `(`",
                        format!("`{}`", symbol),
                        body.span.start,
                    ));
                }
                self.lexer.next_token()?;
                let atom_type = self.node_type(known, &type_name, body.span.start)?;
                let close = self.expect_close()?;
                Ok(PendingAtom::Node {
                    atom_type,
                    name: symbol,
                    span: open.merge(close),
                })
            }
            _ => {
                let mut outgoing = Vec::new();
                while self.lexer.peek()?.kind == TokenKind::LeftParen {
                    outgoing.push(self.parse_nested(depth + 1)?);
                }
                let close = self.expect_close()?;
                let atom_type = match known {
                    Some(atom_type) if atom_type.is_link() => atom_type,
                    Some(atom_type) if outgoing.is_empty() => {
                        return Err(ParseError::unexpected_token(
                            format!("name for `{}`", atom_type.name()),
                            TokenKind::RightParen.to_string(),
                            close.start,
                        ))
                    }
                    Some(atom_type) => {
                        return Err(ParseError::atom(
                            AtomSpaceError::kind_mismatch(
                                atom_type.name(),
                                AtomKind::Node,
                                AtomKind::Link,
                            ),
                            type_span.start,
                        ))
                    }
                    None => AtomType::link(&type_name),
                };
                Ok(PendingAtom::Link {
                    atom_type,
                    outgoing,
                    span: open.merge(close),
                })
            }
        }
    }

    fn node_type(
        &self,
        known: Option<AtomType>,
        type_name: &str,
        offset: ByteOffset,
    ) -> Result<AtomType> {
        match known {
            Some(atom_type) if atom_type.is_node() => Ok(atom_type),
            Some(atom_type) => Err(ParseError::atom(
                AtomSpaceError::kind_mismatch(atom_type.name(), AtomKind::Link, AtomKind::Node),
                offset,
            )),
            None => Ok(AtomType::node(type_name)),
        }
    }

    fn parse_type(&mut self) -> Result<(String, Span)> {
        let token = self.lexer.next_token()?;
        match token.kind {
            TokenKind::Symbol(name) if is_type_name(&name) => Ok((name, token.span)),
            TokenKind::Symbol(name) => Err(ParseError::invalid_type(name, token.span.start)),
            TokenKind::RightParen => Err(ParseError::EmptyType {
                offset: token.span.start,
            }),
            TokenKind::Eof => Err(ParseError::unexpected_eof("atom type", token.span.start)),
            other => Err(ParseError::unexpected_token(
                "atom type",
                other.to_string(),
                token.span.start,
            )),
        }
    }

    fn expect_open(&mut self) -> Result<Span> {
        let token = self.lexer.next_token()?;
        match token.kind {
            TokenKind::LeftParen => Ok(token.span),
            TokenKind::Eof => Err(ParseError::unexpected_eof("`(`", token.span.start)),
            other => Err(ParseError::unexpected_token(
                "`(`",
                other.to_string(),
                token.span.start,
            )),
        }
    }

    pub(crate) fn expect_close(&mut self) -> Result<Span> {
        let token = self.lexer.next_token()?;
        match token.kind {
            TokenKind::RightParen => Ok(token.span),
            TokenKind::Eof => Err(ParseError::unexpected_eof("`)`", token.span.start)),
            other => Err(ParseError::unexpected_token(
                "`)`",
                other.to_string(),
                token.span.start,
            )),
        }
    }
}

impl Iterator for SexprParser<'_> {
    type Item = Result<PendingAtom>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_expr() {
            Ok(expr) => expr.map(Ok),
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

/// Decimal literal such as `3`, `-0.5` or `1e-9`. Spellings like `inf` or
/// `NaN` that `f64` would also accept are rejected.
fn is_number_literal(symbol: &str) -> bool {
    symbol.bytes().any(|b| b.is_ascii_digit())
        && symbol
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        && symbol.parse::<f64>().is_ok()
}

/// Parse exactly one expression from `text` and intern it into `space`
pub fn parse_atom(text: &str, space: &AtomSpace) -> Result<Handle> {
    let mut parser = SexprParser::new(text, space.types());
    let expr = parser
        .next_expr()?
        .ok_or_else(|| ParseError::unexpected_eof("expression", ByteOffset(text.len())))?;
    if parser.peek()?.kind != TokenKind::Eof {
        return Err(ParseError::TrailingInput {
            offset: parser.offset(),
        });
    }
    expr.commit(space)
        .map_err(|error| ParseError::atom(error, expr.span().start))
}
