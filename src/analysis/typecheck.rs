//! The semantic pass: builds the symbol table, assigns offsets, decorates
//! every expression with its type and enforces the typing rules. The first
//! violation aborts the traversal.

use crate::analysis::errors::TypeError;
use crate::analysis::symbols::{ClassInfo, ClassTable, MethodInfo, VariableInfo, WORD_SIZE};
use crate::syntax::ast::{
    BaseType, BinaryOperator, ClassDeclaration, CompoundType, Expression, ExpressionKind,
    MethodCall, MethodDeclaration, Program, Statement, UnaryOperator,
};
use log::debug;
use std::collections::HashMap;

pub const MAIN_CLASS: &str = "Main";
pub const MAIN_METHOD: &str = "main";

/// Builds the class table while walking the program in declaration order.
#[derive(Debug, Default)]
pub struct TypeChecker {
    classes: ClassTable,
}

impl TypeChecker {
    /// Run the full semantic pass. On success every expression in `program`
    /// carries its inferred type and the returned table is ready for code
    /// generation.
    pub fn check(program: &mut Program) -> Result<ClassTable, TypeError> {
        let mut checker = TypeChecker { classes: ClassTable::new() };
        for class in &mut program.classes {
            checker.check_class(class)?;
        }
        if !checker.classes.contains(MAIN_CLASS) {
            return Err(TypeError::NoMainClass);
        }
        Ok(checker.classes)
    }

    fn check_class(&mut self, class: &mut ClassDeclaration) -> Result<(), TypeError> {
        let name = class.name.name.clone();
        debug!("checking class {name}");

        // A superclass must be declared earlier in the program, which also
        // rules out inheritance cycles.
        let superclass = match &class.superclass {
            Some(id) => {
                if !self.classes.contains(&id.name) {
                    return Err(TypeError::UndefinedClass);
                }
                Some(id.name.clone())
            }
            None => None,
        };

        if name == MAIN_CLASS && !class.members.is_empty() {
            return Err(TypeError::MainClassMembersPresent);
        }

        // Insert the shell before populating it; method bodies may already
        // refer to this class by name.
        self.classes.insert(name.clone(), ClassInfo::new(superclass.clone()));

        // Own members first, at offsets 0, 4, 8, ...
        let mut offset = 0;
        for decl in &class.members {
            let ty = CompoundType::from(&decl.ty);
            for ident in &decl.names {
                let info = self.classes.get_mut(&name).unwrap();
                info.define_member(ident.name.clone(), ty.clone(), offset);
                offset += WORD_SIZE;
            }
        }

        // Then every ancestor's own members, nearest ancestor first, each in
        // its declaration order. A shadowed name keeps the subclass entry but
        // still takes a slot in the record.
        let mut ancestor = superclass;
        while let Some(super_name) = ancestor {
            let inherited: Vec<(String, CompoundType)> = {
                let info = self.classes.get(&super_name).unwrap();
                info.member_order
                    .iter()
                    .map(|n| (n.clone(), info.members[n].ty.clone()))
                    .collect()
            };
            for (member_name, ty) in inherited {
                let info = self.classes.get_mut(&name).unwrap();
                info.inherit_member(member_name, ty, offset);
                offset += WORD_SIZE;
            }
            ancestor = self.classes.get(&super_name).unwrap().superclass.clone();
        }
        self.classes.get_mut(&name).unwrap().members_size = offset as u32;

        for method in &mut class.methods {
            self.check_method(&name, method)?;
        }

        if name == MAIN_CLASS {
            match self.classes.get(MAIN_CLASS).unwrap().methods.get(MAIN_METHOD) {
                None => return Err(TypeError::NoMainMethod),
                Some(main) if !main.parameters.is_empty() => {
                    return Err(TypeError::MainMethodIncorrectSignature)
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn check_method(
        &mut self,
        class_name: &str,
        method: &mut MethodDeclaration,
    ) -> Result<(), TypeError> {
        debug!("checking method {class_name}.{}", method.name.name);
        let return_type = CompoundType::from(&method.return_type);

        let mut variables = HashMap::new();
        let mut parameters = Vec::new();

        // Receiver at +8, first parameter at +12.
        let mut parameter_offset = 12;
        for param in &method.parameters {
            let ty = CompoundType::from(&param.ty);
            parameters.push(ty.clone());
            variables
                .entry(param.name.name.clone())
                .or_insert(VariableInfo { ty, offset: parameter_offset, size: WORD_SIZE as u32 });
            parameter_offset += WORD_SIZE;
        }

        // First local at -4, growing downward.
        let mut local_offset = -WORD_SIZE;
        for decl in &method.body.declarations {
            let ty = CompoundType::from(&decl.ty);
            for ident in &decl.names {
                variables.entry(ident.name.clone()).or_insert(VariableInfo {
                    ty: ty.clone(),
                    offset: local_offset,
                    size: WORD_SIZE as u32,
                });
                local_offset -= WORD_SIZE;
            }
        }
        let locals_size = (-(local_offset + WORD_SIZE)) as u32;

        {
            let scope = MethodScope {
                classes: &self.classes,
                class_name,
                variables: &variables,
            };
            for stmt in &mut method.body.statements {
                scope.check_statement(stmt)?;
            }
            match &mut method.body.ret {
                Some(ret) => {
                    let ty = scope.check_expression(&mut ret.expression)?;
                    if ty != return_type {
                        return Err(TypeError::ReturnTypeMismatch);
                    }
                }
                None => {
                    if return_type.base != BaseType::None {
                        return Err(TypeError::ReturnTypeMismatch);
                    }
                }
            }
        }

        // A method named after its class is a constructor and must not
        // declare a value-returning type.
        if method.name.name == class_name && return_type.base != BaseType::None {
            return Err(TypeError::ConstructorReturnsType);
        }

        // Inserted only now: a method is callable from bodies checked later,
        // never from its own (no recursion, no forward references).
        let info = MethodInfo { return_type, parameters, variables, locals_size };
        self.classes
            .get_mut(class_name)
            .unwrap()
            .methods
            .insert(method.name.name.clone(), info);
        Ok(())
    }
}

/// Read-only view of the tables visible while checking one method body.
struct MethodScope<'a> {
    classes: &'a ClassTable,
    class_name: &'a str,
    variables: &'a HashMap<String, VariableInfo>,
}

impl MethodScope<'_> {
    /// Method locals and parameters shadow members; member tables are
    /// flattened, so the current class probe covers the inherited names.
    fn resolve_variable(&self, name: &str) -> Option<&VariableInfo> {
        self.variables
            .get(name)
            .or_else(|| self.classes.lookup_member(self.class_name, name))
    }

    /// Resolve a variable that is dereferenced with `.`; it must hold an
    /// object of a declared class.
    fn resolve_object(&self, name: &str) -> Result<&str, TypeError> {
        let var = self.resolve_variable(name).ok_or(TypeError::UndefinedVariable)?;
        if var.ty.base != BaseType::Object || !self.classes.contains(&var.ty.class_name) {
            return Err(TypeError::NotObject);
        }
        Ok(&var.ty.class_name)
    }

    fn check_statement(&self, stmt: &mut Statement) -> Result<(), TypeError> {
        match stmt {
            Statement::Assignment { target, member, value } => {
                let value_ty = self.check_expression(value)?;
                let lhs_ty = match member {
                    None => self
                        .resolve_variable(&target.name)
                        .ok_or(TypeError::UndefinedVariable)?
                        .ty
                        .clone(),
                    Some(member) => {
                        let class = self.resolve_object(&target.name)?;
                        self.classes
                            .lookup_member(class, &member.name)
                            .ok_or(TypeError::UndefinedMember)?
                            .ty
                            .clone()
                    }
                };
                if lhs_ty != value_ty {
                    return Err(TypeError::AssignmentTypeMismatch);
                }
                Ok(())
            }
            Statement::Call(call) => {
                self.check_call(call)?;
                Ok(())
            }
            Statement::IfElse { condition, then_branch, else_branch } => {
                let cond_ty = self.check_expression(condition)?;
                for stmt in then_branch.iter_mut().chain(else_branch.iter_mut()) {
                    self.check_statement(stmt)?;
                }
                if cond_ty.base != BaseType::Boolean {
                    return Err(TypeError::IfPredicateTypeMismatch);
                }
                Ok(())
            }
            Statement::While { condition, body } => {
                let cond_ty = self.check_expression(condition)?;
                for stmt in body {
                    self.check_statement(stmt)?;
                }
                if cond_ty.base != BaseType::Boolean {
                    return Err(TypeError::WhilePredicateTypeMismatch);
                }
                Ok(())
            }
            Statement::DoWhile { body, condition } => {
                for stmt in body.iter_mut() {
                    self.check_statement(stmt)?;
                }
                let cond_ty = self.check_expression(condition)?;
                if cond_ty.base != BaseType::Boolean {
                    return Err(TypeError::DoWhilePredicateTypeMismatch);
                }
                Ok(())
            }
            Statement::Print { argument } => {
                let ty = self.check_expression(argument)?;
                if ty.base != BaseType::Integer {
                    return Err(TypeError::ExpressionTypeMismatch);
                }
                Ok(())
            }
        }
    }

    fn check_expression(&self, expr: &mut Expression) -> Result<CompoundType, TypeError> {
        let ty = match &mut expr.kind {
            ExpressionKind::Binary { op, left, right } => {
                let left_ty = self.check_expression(left)?;
                let right_ty = self.check_expression(right)?;
                self.binary_result(*op, &left_ty, &right_ty)?
            }
            ExpressionKind::Unary { op, operand } => {
                let operand_ty = self.check_expression(operand)?;
                match op {
                    UnaryOperator::Not if operand_ty.base == BaseType::Boolean => {
                        CompoundType::boolean()
                    }
                    UnaryOperator::Negate if operand_ty.base == BaseType::Integer => {
                        CompoundType::integer()
                    }
                    _ => return Err(TypeError::ExpressionTypeMismatch),
                }
            }
            ExpressionKind::IntegerLiteral(_) => CompoundType::integer(),
            ExpressionKind::BooleanLiteral(_) => CompoundType::boolean(),
            ExpressionKind::Variable(id) => self
                .resolve_variable(&id.name)
                .ok_or(TypeError::UndefinedVariable)?
                .ty
                .clone(),
            ExpressionKind::MemberAccess { object, member } => {
                let class = self.resolve_object(&object.name)?;
                self.classes
                    .lookup_member(class, &member.name)
                    .ok_or(TypeError::UndefinedMember)?
                    .ty
                    .clone()
            }
            ExpressionKind::Call(call) => self.check_call(call)?,
            ExpressionKind::New { class, arguments } => {
                if !self.classes.contains(&class.name) {
                    return Err(TypeError::UndefinedClass);
                }
                let mut argument_types = Vec::with_capacity(arguments.len());
                for arg in arguments.iter_mut() {
                    argument_types.push(self.check_expression(arg)?);
                }
                // Only an own method named after the class is a constructor.
                match self.classes.get(&class.name).unwrap().methods.get(&class.name) {
                    Some(ctor) => check_arguments(ctor, &argument_types)?,
                    None => {
                        if !argument_types.is_empty() {
                            return Err(TypeError::ArgumentNumberMismatch);
                        }
                    }
                }
                CompoundType::object(class.name.clone())
            }
        };
        expr.ty = Some(ty.clone());
        Ok(ty)
    }

    fn check_call(&self, call: &mut MethodCall) -> Result<CompoundType, TypeError> {
        let mut argument_types = Vec::with_capacity(call.arguments.len());
        for arg in call.arguments.iter_mut() {
            argument_types.push(self.check_expression(arg)?);
        }
        let receiver_class = match &call.receiver {
            None => self.class_name,
            Some(recv) => self.resolve_object(&recv.name)?,
        };
        let (_, info) = self
            .classes
            .lookup_method(receiver_class, &call.method.name)
            .ok_or(TypeError::UndefinedMethod)?;
        check_arguments(info, &argument_types)?;
        Ok(info.return_type.clone())
    }

    fn binary_result(
        &self,
        op: BinaryOperator,
        left: &CompoundType,
        right: &CompoundType,
    ) -> Result<CompoundType, TypeError> {
        let both_integer = left.base == BaseType::Integer && right.base == BaseType::Integer;
        let both_boolean = left.base == BaseType::Boolean && right.base == BaseType::Boolean;
        match op {
            BinaryOperator::Plus
            | BinaryOperator::Minus
            | BinaryOperator::Times
            | BinaryOperator::Divide => {
                if both_integer {
                    Ok(CompoundType::integer())
                } else {
                    Err(TypeError::ExpressionTypeMismatch)
                }
            }
            BinaryOperator::Greater | BinaryOperator::GreaterEqual => {
                if both_integer {
                    Ok(CompoundType::boolean())
                } else {
                    Err(TypeError::ExpressionTypeMismatch)
                }
            }
            // Equality is defined on integers and booleans only; objects and
            // `none` values are rejected.
            BinaryOperator::Equal => {
                if both_integer || both_boolean {
                    Ok(CompoundType::boolean())
                } else {
                    Err(TypeError::ExpressionTypeMismatch)
                }
            }
            BinaryOperator::And | BinaryOperator::Or => {
                if both_boolean {
                    Ok(CompoundType::boolean())
                } else {
                    Err(TypeError::ExpressionTypeMismatch)
                }
            }
        }
    }
}

/// Shared argument validation for calls and constructed `new` expressions:
/// the count must match, then each argument's type must equal the declared
/// parameter type exactly.
fn check_arguments(
    method: &MethodInfo,
    argument_types: &[CompoundType],
) -> Result<(), TypeError> {
    if argument_types.len() != method.parameters.len() {
        return Err(TypeError::ArgumentNumberMismatch);
    }
    for (given, expected) in argument_types.iter().zip(&method.parameters) {
        if given != expected {
            return Err(TypeError::ArgumentTypeMismatch);
        }
    }
    Ok(())
}
