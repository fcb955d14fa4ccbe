#![cfg(test)]

use minnow::analysis::{printer, TypeChecker};
use minnow::syntax::Parser;

fn listing(source: &str) -> String {
    let mut program = Parser::new().parse(source).expect("program should parse");
    let table = TypeChecker::check(&mut program).expect("program should type check");
    printer::print_class_table(&table)
}

#[test]
fn trivial_main_table_renders_exactly() {
    let rendered = listing("class Main { none main() { } };");
    let expected = "\
ClassTable {
  Main -> {
    VariableTable {},
    MethodTable {
      main -> {
        None,
        0,
        VariableTable {}
      }
    }
  }
}
";
    assert_eq!(rendered, expected);
}

#[test]
fn members_methods_and_superclasses_are_listed() {
    let rendered = listing(
        r#"
        class B { integer x; };
        class C extends B {
            boolean flag;
            none poke(integer amount) { integer t; t = amount; }
        };
        class Main { none main() { } };
        "#,
    );
    // Superclass line under the class header.
    assert!(rendered.contains("  C -> {\n    B,\n"));
    // Member entries show type, offset and size.
    assert!(rendered.contains("x -> {Integer, 0, 4}"));
    assert!(rendered.contains("flag -> {Boolean, 0, 4}"));
    assert!(rendered.contains("x -> {Integer, 4, 4}"));
    // Method entries show return type and locals size.
    assert!(rendered.contains("poke -> {"));
    assert!(rendered.contains("amount -> {Integer, 12, 4}"));
    assert!(rendered.contains("t -> {Integer, -4, 4}"));
    // Classes are sorted by name.
    let b = rendered.find("  B -> {").unwrap();
    let c = rendered.find("  C -> {").unwrap();
    let main = rendered.find("  Main -> {").unwrap();
    assert!(b < c && c < main);
}

#[test]
fn rendering_is_stable() {
    let source = "class A { integer z; integer a; }; class Main { none main() { } };";
    assert_eq!(listing(source), listing(source));
}
