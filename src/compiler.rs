use crate::analysis::{printer, ClassTable, TypeChecker, TypeError};
use crate::codegen::CodeGenerator;
use crate::syntax::{ParseError, Parser};
use log::{debug, info};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompilerError {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Type(#[from] TypeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CompilerError {
    /// Errors covered by the diagnostic contract: print the message verbatim
    /// on stderr and exit with status 1, emitting no assembly.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, CompilerError::Parse(_) | CompilerError::Type(_))
    }
}

/// Parse → type check → generate pipeline.
pub struct Compiler {
    parser: Parser,
}

impl Compiler {
    pub fn new() -> Self {
        Self { parser: Parser::new() }
    }

    pub fn compile_file(&self, path: &Path) -> Result<String, CompilerError> {
        let source = fs::read_to_string(path)?;
        info!("compiling {}", path.display());
        self.compile_source(&source)
    }

    /// Compile source text to an assembly listing.
    pub fn compile_source(&self, source: &str) -> Result<String, CompilerError> {
        let mut program = self.parser.parse(source)?;
        debug!("parsed {} classes", program.classes.len());

        let table = TypeChecker::check(&mut program)?;
        info!("type check passed");

        let assembly = CodeGenerator::new(&table).generate(&program);
        info!("generated {} lines of assembly", assembly.lines().count());
        Ok(assembly)
    }

    /// Parse and type check only; returns the populated symbol table.
    pub fn check_source(&self, source: &str) -> Result<ClassTable, CompilerError> {
        let mut program = self.parser.parse(source)?;
        let table = TypeChecker::check(&mut program)?;
        Ok(table)
    }

    /// Render the symbol table of a checked program, for debugging.
    pub fn table_listing(&self, source: &str) -> Result<String, CompilerError> {
        let table = self.check_source(source)?;
        Ok(printer::print_class_table(&table))
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}
