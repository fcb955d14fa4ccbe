//! nom-based parser for Minnow source text.

mod declarations;
mod expressions;
mod helpers;
mod statements;

use crate::syntax::ast::Program;
use crate::syntax::errors::ParseError;

/// The front end: turns source text into a [`Program`].
#[derive(Debug, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Parser
    }

    pub fn parse(&self, source: &str) -> Result<Program, ParseError> {
        match declarations::parse_program(source) {
            Ok((_, program)) => Ok(program),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                Err(ParseError::at(source, e.input))
            }
            Err(nom::Err::Incomplete(_)) => Err(ParseError::at(source, "")),
        }
    }
}
