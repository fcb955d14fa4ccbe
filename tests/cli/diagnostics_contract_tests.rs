#![cfg(test)]

//! Process-level checks of the failure contract: a rejected program prints a
//! single fixed diagnostic line on stderr, exits with status 1 and emits no
//! assembly.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn temp_source(name: &str, source: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("minnow-diag-{}-{name}.mn", std::process::id()));
    fs::write(&path, source).expect("write temp source");
    path
}

fn run_compile(source_path: &PathBuf) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_minnow"))
        .arg("compile")
        .arg(source_path)
        .output()
        .expect("run compiler binary")
}

#[test]
fn missing_main_class_reports_and_exits_nonzero() {
    let path = temp_source("missing-main", "class Foo { };");
    let output = run_compile(&path);
    fs::remove_file(&path).ok();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "The \"Main\" class was not found.\n"
    );
    assert!(output.stdout.is_empty(), "no assembly may be emitted");
}

#[test]
fn type_errors_use_their_fixed_message() {
    let path = temp_source(
        "bad-predicate",
        "class Main { none main() { while (1) { } } };",
    );
    let output = run_compile(&path);
    fs::remove_file(&path).ok();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "Predicate of while loop is not boolean.\n"
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn accepted_programs_exit_zero_and_print_assembly() {
    let path = temp_source("accepted", "class Main { none main() { print(7); } };");
    let output = run_compile(&path);
    fs::remove_file(&path).ok();

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stderr.is_empty());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(".data\n"));
    assert!(stdout.contains("push $7"));
}
