//! Interpreter for the small fixed set of `cog-*` commands
//!
//! Commands arrive as text, e.g. `(cog-node 'ConceptNode "cat")`, and the
//! reply is text as well: atoms in their canonical s-expression form, `()`
//! for "nothing", and `#t`/`#f` for booleans. Atom arguments use the same
//! grammar as the loader.

use crate::config::LoaderConfig;
use crate::error::ParseError;
use crate::lexer::TokenKind;
use crate::parser::SexprParser;
use crate::span::ByteOffset;
use atomspace::{serialize_atom, AtomSpace, AtomSpaceError, Handle};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Atom(#[from] AtomSpaceError),

    #[error("Unsupported command: {command}")]
    Unsupported { command: String },

    #[error("Syntax error at byte {offset}: {message}")]
    Syntax { message: String, offset: ByteOffset },
}

impl CommandError {
    pub fn syntax(message: impl Into<String>, offset: ByteOffset) -> Self {
        Self::Syntax {
            message: message.into(),
            offset,
        }
    }
}

pub type Result<T> = std::result::Result<T, CommandError>;

#[derive(Debug, Clone, Default)]
pub struct Commands {
    config: LoaderConfig,
}

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        Commands { config }
    }

    /// Evaluate one command against `space` and return the textual reply
    pub fn interpret(&self, space: &AtomSpace, text: &str) -> Result<String> {
        let config = LoaderConfig {
            allow_comments: true,
            ..self.config
        };
        let mut parser = SexprParser::with_config(text, space.types(), config);

        let open = parser.next_token()?;
        match open.kind {
            TokenKind::Eof => return Ok(String::new()),
            TokenKind::LeftParen => {}
            other => {
                return Err(CommandError::syntax(
                    format!("expected `(`, found {}", other),
                    open.span.start,
                ))
            }
        }

        let name = parser.next_token()?;
        let command = match name.kind {
            TokenKind::Symbol(command) => command,
            other => {
                return Err(CommandError::syntax(
                    format!("expected command name, found {}", other),
                    name.span.start,
                ))
            }
        };
        debug!(command = %command, "Interpreting command");

        let reply = match command.as_str() {
            "cog-node" => {
                let type_name = expect_type(&mut parser)?;
                let node_name = expect_name(&mut parser)?;
                space.types().get(&type_name)?;
                space
                    .get_node(&type_name, &node_name)
                    .map_or_else(|| "()".to_string(), |atom| serialize_atom(&atom))
            }
            "cog-link" => {
                let type_name = expect_type(&mut parser)?;
                space.types().get(&type_name)?;
                let mut outgoing = Vec::new();
                let mut missing = false;
                while parser.peek()?.kind == TokenKind::LeftParen {
                    match parser.parse_expr()?.find(space) {
                        Some(child) => outgoing.push(child),
                        None => missing = true,
                    }
                }
                if missing {
                    "()".to_string()
                } else {
                    space
                        .get_link(&type_name, outgoing)
                        .map_or_else(|| "()".to_string(), |atom| serialize_atom(&atom))
                }
            }
            "cog-get-atoms" => {
                let type_name = expect_type(&mut parser)?;
                let include_subtypes = match parser.peek()?.kind.clone() {
                    TokenKind::Symbol(flag) if flag == "#t" => {
                        parser.next_token()?;
                        true
                    }
                    TokenKind::Symbol(flag) if flag == "#f" => {
                        parser.next_token()?;
                        false
                    }
                    _ => false,
                };
                atom_list(&space.atoms_by_type(&type_name, include_subtypes)?)
            }
            "cog-incoming-set" => {
                let atom = commit_argument(&mut parser, space)?;
                atom_list(&space.incoming_set(&atom))
            }
            "cog-incoming-by-type" => {
                let expr = parser.parse_expr()?;
                let type_name = expect_type(&mut parser)?;
                space.types().get(&type_name)?;
                let atom = expr.commit(space)?;
                atom_list(&space.incoming_by_type(&atom, &type_name)?)
            }
            "cog-extract!" | "cog-extract-recursive!" => {
                let expr = parser.parse_expr()?;
                let recursive = command == "cog-extract-recursive!";
                let removed = match expr.find(space) {
                    Some(atom) => space.extract(&atom, recursive),
                    None => true,
                };
                boolean(removed)
            }
            "cog-atomspace-clear" => {
                space.clear();
                boolean(true)
            }
            "ping" => "()".to_string(),
            _ => return Err(CommandError::Unsupported { command }),
        };

        parser.expect_close()?;
        Ok(reply)
    }
}

fn expect_type(parser: &mut SexprParser<'_>) -> Result<String> {
    let token = parser.next_token()?;
    match token.kind {
        TokenKind::Symbol(symbol) => match symbol.strip_prefix('\'') {
            Some(type_name) if !type_name.is_empty() => Ok(type_name.to_string()),
            _ => Err(CommandError::syntax(
                format!("expected quoted type name, found `{}`", symbol),
                token.span.start,
            )),
        },
        other => Err(CommandError::syntax(
            format!("expected quoted type name, found {}", other),
            token.span.start,
        )),
    }
}

fn expect_name(parser: &mut SexprParser<'_>) -> Result<String> {
    let token = parser.next_token()?;
    match token.kind {
        TokenKind::Str(name) => Ok(name),
        other => Err(CommandError::syntax(
            format!("expected node name, found {}", other),
            token.span.start,
        )),
    }
}

fn commit_argument(parser: &mut SexprParser<'_>, space: &AtomSpace) -> Result<Handle> {
    let expr = parser.parse_expr()?;
    Ok(expr.commit(space)?)
}

fn atom_list(atoms: &[Handle]) -> String {
    let mut reply = String::from("(");
    for atom in atoms {
        reply.push_str(&serialize_atom(atom));
    }
    reply.push(')');
    reply
}

fn boolean(value: bool) -> String {
    let reply = if value { "#t" } else { "#f" };
    reply.to_string()
}
