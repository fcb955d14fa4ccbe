#![cfg(test)]

use minnow::compiler::Compiler;

fn compile(source: &str) -> String {
    Compiler::new()
        .compile_source(source)
        .expect("program should compile")
}

const FULL_PROGRAM: &str = r#"
    class Counter {
        integer count;
        none Counter(integer start) { count = start; }
        none bump() { count = count + 1; }
        integer value() { return count; }
    };
    class Main {
        none main() {
            Counter c;
            integer i;
            c = new Counter(3);
            i = 0;
            while (5 > i) {
                c.bump();
                i = i + 1;
            }
            if (c.value() >= 8) { print(1); } else { print(0); }
            do { i = i - 1; } while (i > 0);
            print(c.value());
        }
    };
"#;

#[test]
fn trivial_main_produces_a_callable_entry_point() {
    let asm = compile("class Main { none main() { } };");
    assert!(asm.contains(".globl Main_main"));
    assert!(asm.contains("Main_main:"));
    assert!(asm.contains("ret"));
}

#[test]
fn class_with_field_and_constructor_end_to_end() {
    let asm = compile(
        r#"
        class A {
            integer x;
            none A() { x = 42; }
            none get() { print(x); }
        };
        class Main { none main() { A a; a = new A(); a.get(); } };
        "#,
    );
    // A's record holds one word; `new A()` allocates it and runs A_A.
    assert!(asm.contains("push $4\ncall malloc\nadd $4, %esp\npush %eax\ncall A_A\n"));
    // `a` is the first local of Main_main.
    assert!(asm.contains("mov %eax, -4(%ebp)"));
    assert!(asm.contains("call A_get"));
}

#[test]
fn generated_assembly_is_deterministic() {
    let first = compile(FULL_PROGRAM);
    let second = compile(FULL_PROGRAM);
    assert_eq!(first, second);
}

#[test]
fn generated_labels_are_unique() {
    let asm = compile(FULL_PROGRAM);
    let mut labels: Vec<&str> = asm
        .lines()
        .filter(|line| line.ends_with(':'))
        .collect();
    let total = labels.len();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), total, "duplicate label in listing");
}

#[test]
fn straight_line_code_keeps_the_stack_balanced() {
    let asm = compile(
        "class Main { none main() { integer i; i = 2 + 3; print(i * 4); print(-i); } };",
    );
    // The statement region sits between the prologue's last save and the
    // epilogue's first restore; its net stack effect must cancel out.
    let body: Vec<&str> = asm
        .lines()
        .skip_while(|line| *line != "push %edi")
        .skip(1)
        .take_while(|line| *line != "pop %edi")
        .collect();
    let mut depth: i64 = 0;
    for line in &body {
        if line.starts_with("push ") {
            depth += 4;
        } else if line.starts_with("pop ") {
            depth -= 4;
        } else if let Some(rest) = line.strip_prefix("add $") {
            if let Some(n) = rest.strip_suffix(", %esp") {
                depth -= n.parse::<i64>().unwrap();
            }
        } else if let Some(rest) = line.strip_prefix("sub $") {
            if let Some(n) = rest.strip_suffix(", %esp") {
                depth += n.parse::<i64>().unwrap();
            }
        }
    }
    assert_eq!(depth, 0, "unbalanced stack in:\n{}", body.join("\n"));
}

#[test]
fn every_method_of_every_class_is_emitted() {
    let asm = compile(FULL_PROGRAM);
    for label in ["Counter_Counter:", "Counter_bump:", "Counter_value:", "Main_main:"] {
        assert!(asm.contains(label), "missing {label}");
    }
}

#[test]
fn nested_calls_compile() {
    let asm = compile(
        r#"
        class A {
            integer twice(integer x) { return x + x; }
        };
        class Main {
            none main() {
                A a;
                a = new A();
                print(a.twice(a.twice(5)));
            }
        };
        "#,
    );
    // Two dispatches to the same target, nested argument evaluation inside.
    assert_eq!(asm.matches("call A_twice").count(), 2);
}
