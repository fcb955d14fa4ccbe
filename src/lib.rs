//! Minnow compiler library: syntax, semantic analysis and x86 code
//! generation for the Minnow object language.

pub mod analysis;
pub mod cli;
pub mod codegen;
pub mod compiler;
pub mod syntax;
