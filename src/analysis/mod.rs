//! Semantic analysis: symbol tables, the type checker and its diagnostics,
//! and the symbol-table pretty-printer.

pub mod errors;
pub mod printer;
pub mod symbols;
pub mod typecheck;

pub use errors::TypeError;
pub use symbols::{ClassInfo, ClassTable, MethodInfo, VariableInfo};
pub use typecheck::TypeChecker;
