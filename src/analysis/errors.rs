use thiserror::Error;

/// Semantic diagnostics. The checker stops at the first violation; the CLI
/// prints the message verbatim on stderr and exits with status 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("Undefined variable.")]
    UndefinedVariable,
    #[error("Method does not exist.")]
    UndefinedMethod,
    #[error("Class does not exist.")]
    UndefinedClass,
    #[error("Class member does not exist.")]
    UndefinedMember,
    #[error("Variable is not an object.")]
    NotObject,
    #[error("Expression types do not match.")]
    ExpressionTypeMismatch,
    #[error("Method called with incorrect number of arguments.")]
    ArgumentNumberMismatch,
    #[error("Method called with argument of incorrect type.")]
    ArgumentTypeMismatch,
    #[error("Predicate of while loop is not boolean.")]
    WhilePredicateTypeMismatch,
    #[error("Predicate of do while loop is not boolean.")]
    DoWhilePredicateTypeMismatch,
    #[error("Predicate of if statement is not boolean.")]
    IfPredicateTypeMismatch,
    #[error("Left and right hand sides of assignment types mismatch.")]
    AssignmentTypeMismatch,
    #[error("Return statement type does not match declared return type.")]
    ReturnTypeMismatch,
    #[error("Class constructor returns a value.")]
    ConstructorReturnsType,
    #[error("The \"Main\" class was not found.")]
    NoMainClass,
    #[error("The \"Main\" class has members.")]
    MainClassMembersPresent,
    #[error("The \"Main\" class does not have a \"main\" method.")]
    NoMainMethod,
    #[error("The \"main\" method of the \"Main\" class has an incorrect signature.")]
    MainMethodIncorrectSignature,
}
