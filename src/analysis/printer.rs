//! Debug pretty-printer for the populated symbol table. Output is sorted by
//! name so it is stable across runs.

use crate::analysis::symbols::{ClassTable, MethodInfo, VariableInfo};
use std::collections::HashMap;
use std::fmt::Write;

pub fn print_class_table(table: &ClassTable) -> String {
    let mut out = String::new();
    out.push_str("ClassTable {\n");
    let mut names: Vec<&String> = table.class_names().collect();
    names.sort();
    for (index, name) in names.iter().enumerate() {
        let info = table.get(name).unwrap();
        let _ = writeln!(out, "  {name} -> {{");
        if let Some(superclass) = &info.superclass {
            let _ = writeln!(out, "    {superclass},");
        }
        print_variable_table(&mut out, &info.members, 4);
        out.push_str(",\n");
        print_method_table(&mut out, &info.methods, 4);
        out.push('\n');
        out.push_str("  }");
        if index + 1 < names.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

fn print_variable_table(out: &mut String, table: &HashMap<String, VariableInfo>, indent: usize) {
    let pad = " ".repeat(indent);
    if table.is_empty() {
        let _ = write!(out, "{pad}VariableTable {{}}");
        return;
    }
    let _ = writeln!(out, "{pad}VariableTable {{");
    let mut names: Vec<&String> = table.keys().collect();
    names.sort();
    for (index, name) in names.iter().enumerate() {
        let var = &table[name.as_str()];
        let _ = write!(out, "{pad}  {name} -> {{{}, {}, {}}}", var.ty, var.offset, var.size);
        if index + 1 < names.len() {
            out.push(',');
        }
        out.push('\n');
    }
    let _ = write!(out, "{pad}}}");
}

fn print_method_table(out: &mut String, table: &HashMap<String, MethodInfo>, indent: usize) {
    let pad = " ".repeat(indent);
    if table.is_empty() {
        let _ = write!(out, "{pad}MethodTable {{}}");
        return;
    }
    let _ = writeln!(out, "{pad}MethodTable {{");
    let mut names: Vec<&String> = table.keys().collect();
    names.sort();
    for (index, name) in names.iter().enumerate() {
        let method = &table[name.as_str()];
        let _ = writeln!(out, "{pad}  {name} -> {{");
        let _ = writeln!(out, "{pad}    {},", method.return_type);
        let _ = writeln!(out, "{pad}    {},", method.locals_size);
        print_variable_table(out, &method.variables, indent + 4);
        out.push('\n');
        let _ = write!(out, "{pad}  }}");
        if index + 1 < names.len() {
            out.push(',');
        }
        out.push('\n');
    }
    let _ = write!(out, "{pad}}}");
}
