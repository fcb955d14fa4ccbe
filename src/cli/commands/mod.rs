pub mod check;
pub mod compile;
pub mod parse;

use crate::compiler::CompilerError;
use std::process;

/// Apply the diagnostic contract: semantic and syntax errors print their
/// fixed message to stderr and terminate the process with status 1.
pub(crate) fn exit_on_diagnostic(err: CompilerError) -> anyhow::Error {
    if err.is_diagnostic() {
        eprintln!("{err}");
        process::exit(1);
    }
    err.into()
}
