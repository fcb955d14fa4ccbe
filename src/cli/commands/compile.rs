use super::exit_on_diagnostic;
use crate::compiler::Compiler;
use anyhow::Result;
use std::fs;
use std::path::PathBuf;

pub fn execute(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let compiler = Compiler::new();
    let assembly = compiler
        .compile_file(&input)
        .map_err(exit_on_diagnostic)?;

    match output {
        Some(path) => fs::write(&path, assembly)?,
        None => print!("{assembly}"),
    }
    Ok(())
}
