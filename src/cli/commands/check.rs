use super::exit_on_diagnostic;
use crate::analysis::printer;
use crate::compiler::Compiler;
use anyhow::Result;
use std::fs;
use std::path::PathBuf;

pub fn execute(input: PathBuf, table: bool) -> Result<()> {
    let source = fs::read_to_string(&input)?;
    let compiler = Compiler::new();
    let class_table = compiler
        .check_source(&source)
        .map_err(exit_on_diagnostic)?;

    if table {
        print!("{}", printer::print_class_table(&class_table));
    }
    Ok(())
}
