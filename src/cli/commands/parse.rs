use super::exit_on_diagnostic;
use crate::compiler::CompilerError;
use crate::syntax::Parser;
use anyhow::Result;
use std::fs;
use std::path::PathBuf;

pub fn execute(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let source = fs::read_to_string(&input)?;
    let program = Parser::new()
        .parse(&source)
        .map_err(|e| exit_on_diagnostic(CompilerError::Parse(e)))?;

    let json = serde_json::to_string_pretty(&program)?;
    match output {
        Some(path) => fs::write(&path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
