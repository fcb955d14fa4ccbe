//! x86 code generation (32-bit, AT&T syntax, cdecl).
//!
//! Walks the type-checked AST with the populated symbol table and emits a
//! text listing. Every expression leaves exactly one word on the hardware
//! stack; statements are stack-neutral. Dispatch is static: calls resolve to
//! `DefiningClass_Method` labels.

use crate::analysis::symbols::{ClassTable, MethodInfo, VariableInfo, RECEIVER_OFFSET, WORD_SIZE};
use crate::syntax::ast::{
    BinaryOperator, ClassDeclaration, Expression, ExpressionKind, MethodCall, MethodDeclaration,
    Program, Statement, UnaryOperator,
};
use log::debug;

/// Where a named variable lives at run time.
enum Slot<'a> {
    /// A parameter or local, at `offset(%ebp)`.
    Frame(&'a VariableInfo),
    /// A member of the receiver, at `offset` inside the object record.
    Member(&'a VariableInfo),
}

pub struct CodeGenerator<'a> {
    table: &'a ClassTable,
    class_name: &'a str,
    method: Option<&'a MethodInfo>,
    next_label: u32,
    output: String,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(table: &'a ClassTable) -> Self {
        CodeGenerator {
            table,
            class_name: "",
            method: None,
            next_label: 0,
            output: String::new(),
        }
    }

    /// Emit the whole listing and return it.
    pub fn generate(mut self, program: &'a Program) -> String {
        self.emit(".data");
        self.emit("printstr: .asciz \"%d\\n\"");
        self.emit(".text");
        self.emit(".globl Main_main");
        for class in &program.classes {
            self.gen_class(class);
        }
        self.output
    }

    fn emit(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }

    fn fresh_label(&mut self) -> u32 {
        let label = self.next_label;
        self.next_label += 1;
        label
    }

    fn gen_class(&mut self, class: &'a ClassDeclaration) {
        self.class_name = &class.name.name;
        for method in &class.methods {
            self.gen_method(method);
        }
    }

    fn gen_method(&mut self, method: &'a MethodDeclaration) {
        debug!("generating {}_{}", self.class_name, method.name.name);
        let info = &self.table.get(self.class_name).unwrap().methods[&method.name.name];
        self.method = Some(info);

        self.emit(&format!("{}_{}:", self.class_name, method.name.name));
        self.emit("push %ebp");
        self.emit("mov %esp, %ebp");
        self.emit(&format!("sub ${}, %esp", info.locals_size));
        self.emit("push %ebx");
        self.emit("push %esi");
        self.emit("push %edi");

        for stmt in &method.body.statements {
            self.gen_statement(stmt);
        }
        if let Some(ret) = &method.body.ret {
            self.gen_expression(&ret.expression);
            self.emit("pop %eax");
        }
        // A constructor hands the receiver pointer back to `new`.
        if method.name.name == self.class_name {
            self.emit(&format!("mov {RECEIVER_OFFSET}(%ebp), %eax"));
        }

        self.emit("pop %edi");
        self.emit("pop %esi");
        self.emit("pop %ebx");
        self.emit("mov %ebp, %esp");
        self.emit("pop %ebp");
        self.emit("ret");
    }

    /// Resolve a name against the current method's variables, then the
    /// current class's (flattened) member table. Cannot fail after a
    /// successful type check.
    fn locate(&self, name: &str) -> Slot<'a> {
        let method = self.method.expect("codegen outside a method");
        if let Some(var) = method.variables.get(name) {
            Slot::Frame(var)
        } else {
            Slot::Member(self.table.lookup_member(self.class_name, name).unwrap())
        }
    }

    fn gen_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Assignment { target, member, value } => {
                self.gen_expression(value);
                match member {
                    None => match self.locate(&target.name) {
                        Slot::Frame(var) => {
                            let offset = var.offset;
                            self.emit("pop %eax");
                            self.emit(&format!("mov %eax, {offset}(%ebp)"));
                        }
                        Slot::Member(var) => {
                            let offset = var.offset;
                            self.emit("pop %eax");
                            self.emit(&format!("mov {RECEIVER_OFFSET}(%ebp), %ebx"));
                            self.emit(&format!("mov %eax, {offset}(%ebx)"));
                        }
                    },
                    Some(member) => {
                        // Object pointer into %ebx, value into %eax.
                        let member_offset = match self.locate(&target.name) {
                            Slot::Frame(var) => {
                                let offset = var.offset;
                                let class = var.ty.class_name.as_str();
                                self.emit(&format!("mov {offset}(%ebp), %ebx"));
                                self.table.lookup_member(class, &member.name).unwrap().offset
                            }
                            Slot::Member(var) => {
                                let offset = var.offset;
                                let class = var.ty.class_name.as_str();
                                self.emit(&format!("mov {RECEIVER_OFFSET}(%ebp), %eax"));
                                self.emit(&format!("mov {offset}(%eax), %ebx"));
                                self.table.lookup_member(class, &member.name).unwrap().offset
                            }
                        };
                        self.emit("pop %eax");
                        self.emit(&format!("mov %eax, {member_offset}(%ebx)"));
                    }
                }
            }
            Statement::Call(call) => {
                self.gen_call(call);
                // Discard the value so the statement is stack-neutral.
                self.emit(&format!("add ${WORD_SIZE}, %esp"));
            }
            Statement::IfElse { condition, then_branch, else_branch } => {
                self.gen_expression(condition);
                let label = self.fresh_label();
                self.emit("pop %eax");
                self.emit("cmp $0, %eax");
                self.emit(&format!("je else_{label}"));
                for stmt in then_branch {
                    self.gen_statement(stmt);
                }
                self.emit(&format!("jmp end_{label}"));
                self.emit(&format!("else_{label}:"));
                for stmt in else_branch {
                    self.gen_statement(stmt);
                }
                self.emit(&format!("end_{label}:"));
            }
            Statement::While { condition, body } => {
                let label = self.fresh_label();
                self.emit(&format!("loopstart_{label}:"));
                self.gen_expression(condition);
                self.emit("pop %eax");
                self.emit("cmp $0, %eax");
                self.emit(&format!("je loopend_{label}"));
                for stmt in body {
                    self.gen_statement(stmt);
                }
                self.emit(&format!("jmp loopstart_{label}"));
                self.emit(&format!("loopend_{label}:"));
            }
            Statement::DoWhile { body, condition } => {
                let label = self.fresh_label();
                self.emit(&format!("loopstart_{label}:"));
                for stmt in body {
                    self.gen_statement(stmt);
                }
                self.gen_expression(condition);
                self.emit("pop %eax");
                self.emit("cmp $1, %eax");
                self.emit(&format!("je loopstart_{label}"));
            }
            Statement::Print { argument } => {
                self.gen_expression(argument);
                self.emit("push $printstr");
                self.emit("call printf");
                self.emit("add $8, %esp");
            }
        }
    }

    fn gen_expression(&mut self, expr: &Expression) {
        match &expr.kind {
            ExpressionKind::IntegerLiteral(value) => {
                self.emit(&format!("push ${value}"));
            }
            ExpressionKind::BooleanLiteral(value) => {
                self.emit(&format!("push ${}", u32::from(*value)));
            }
            ExpressionKind::Variable(id) => match self.locate(&id.name) {
                Slot::Frame(var) => {
                    let offset = var.offset;
                    self.emit(&format!("push {offset}(%ebp)"));
                }
                Slot::Member(var) => {
                    let offset = var.offset;
                    self.emit(&format!("mov {RECEIVER_OFFSET}(%ebp), %eax"));
                    self.emit(&format!("push {offset}(%eax)"));
                }
            },
            ExpressionKind::MemberAccess { object, member } => {
                // Receiver pointer into %eax, then push the member slot.
                let member_offset = match self.locate(&object.name) {
                    Slot::Frame(var) => {
                        let offset = var.offset;
                        let class = var.ty.class_name.as_str();
                        self.emit(&format!("mov {offset}(%ebp), %eax"));
                        self.table.lookup_member(class, &member.name).unwrap().offset
                    }
                    Slot::Member(var) => {
                        let offset = var.offset;
                        let class = var.ty.class_name.as_str();
                        self.emit(&format!("mov {RECEIVER_OFFSET}(%ebp), %eax"));
                        self.emit(&format!("mov {offset}(%eax), %eax"));
                        self.table.lookup_member(class, &member.name).unwrap().offset
                    }
                };
                self.emit(&format!("push {member_offset}(%eax)"));
            }
            ExpressionKind::Unary { op, operand } => {
                self.gen_expression(operand);
                self.emit("pop %eax");
                match op {
                    UnaryOperator::Not => self.emit("xor $1, %eax"),
                    UnaryOperator::Negate => self.emit("neg %eax"),
                }
                self.emit("push %eax");
            }
            ExpressionKind::Binary { op, left, right } => {
                self.gen_expression(left);
                self.gen_expression(right);
                self.gen_binary_op(*op);
            }
            ExpressionKind::Call(call) => self.gen_call(call),
            ExpressionKind::New { class, arguments } => self.gen_new(&class.name, arguments),
        }
    }

    /// Operands are on the stack, left below right. Commutative operators pop
    /// in either order; the others pop the right operand into `%ebx` first.
    fn gen_binary_op(&mut self, op: BinaryOperator) {
        match op {
            BinaryOperator::Plus => {
                self.emit("pop %eax");
                self.emit("pop %ebx");
                self.emit("add %ebx, %eax");
                self.emit("push %eax");
            }
            BinaryOperator::Times => {
                self.emit("pop %eax");
                self.emit("pop %ebx");
                self.emit("imul %ebx, %eax");
                self.emit("push %eax");
            }
            BinaryOperator::And => {
                self.emit("pop %eax");
                self.emit("pop %ebx");
                self.emit("and %ebx, %eax");
                self.emit("push %eax");
            }
            BinaryOperator::Or => {
                self.emit("pop %eax");
                self.emit("pop %ebx");
                self.emit("or %ebx, %eax");
                self.emit("push %eax");
            }
            BinaryOperator::Minus => {
                self.emit("pop %ebx");
                self.emit("pop %eax");
                self.emit("sub %ebx, %eax");
                self.emit("push %eax");
            }
            BinaryOperator::Divide => {
                self.emit("pop %ebx");
                self.emit("pop %eax");
                self.emit("cdq");
                self.emit("idiv %ebx");
                self.emit("push %eax");
            }
            BinaryOperator::Greater => self.gen_comparison("jg", "greater"),
            BinaryOperator::GreaterEqual => self.gen_comparison("jge", "greaterequal"),
            BinaryOperator::Equal => self.gen_comparison("je", "equal"),
        }
    }

    fn gen_comparison(&mut self, jump: &str, stem: &str) {
        let label = self.fresh_label();
        self.emit("pop %ebx");
        self.emit("pop %eax");
        self.emit("cmp %ebx, %eax");
        self.emit(&format!("{jump} {stem}_{label}"));
        self.emit("mov $0, %eax");
        self.emit(&format!("jmp done_{label}"));
        self.emit(&format!("{stem}_{label}:"));
        self.emit("mov $1, %eax");
        self.emit(&format!("done_{label}:"));
        self.emit("push %eax");
    }

    /// cdecl call: caller-saved registers preserved around the call,
    /// arguments pushed right-to-left, receiver last, caller cleans up.
    fn gen_call(&mut self, call: &MethodCall) {
        self.emit("push %eax");
        self.emit("push %ecx");
        self.emit("push %edx");
        for arg in call.arguments.iter().rev() {
            self.gen_expression(arg);
        }
        let receiver_class = match &call.receiver {
            None => {
                self.emit(&format!("push {RECEIVER_OFFSET}(%ebp)"));
                self.class_name
            }
            Some(recv) => match self.locate(&recv.name) {
                Slot::Frame(var) => {
                    let offset = var.offset;
                    self.emit(&format!("push {offset}(%ebp)"));
                    var.ty.class_name.as_str()
                }
                Slot::Member(var) => {
                    let offset = var.offset;
                    self.emit(&format!("mov {RECEIVER_OFFSET}(%ebp), %eax"));
                    self.emit(&format!("push {offset}(%eax)"));
                    var.ty.class_name.as_str()
                }
            },
        };
        // Static dispatch to the class that defines the method.
        let (defining_class, _) = self
            .table
            .lookup_method(receiver_class, &call.method.name)
            .unwrap();
        self.emit(&format!("call {}_{}", defining_class, call.method.name));
        self.emit(&format!("add ${}, %esp", WORD_SIZE * (call.arguments.len() as i32 + 1)));
        self.emit("mov %eax, %edi");
        self.emit("pop %edx");
        self.emit("pop %ecx");
        self.emit("pop %eax");
        self.emit("push %edi");
    }

    /// `new C(args)`: arguments are evaluated before `malloc` so nothing is
    /// live in a register across argument evaluation; a constructor returns
    /// the receiver pointer in `%eax`, which becomes the expression value.
    fn gen_new(&mut self, class_name: &str, arguments: &[Expression]) {
        let class = self.table.get(class_name).unwrap();
        let members_size = class.members_size;
        let has_constructor = class.methods.contains_key(class_name);

        if has_constructor {
            for arg in arguments.iter().rev() {
                self.gen_expression(arg);
            }
        }
        self.emit(&format!("push ${members_size}"));
        self.emit("call malloc");
        self.emit(&format!("add ${WORD_SIZE}, %esp"));
        self.emit("push %eax");
        if has_constructor {
            self.emit(&format!("call {class_name}_{class_name}"));
            self.emit(&format!(
                "add ${}, %esp",
                WORD_SIZE * (arguments.len() as i32 + 1)
            ));
            self.emit("push %eax");
        }
    }
}
