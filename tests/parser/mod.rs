// Parser tests
pub mod expression_tests;
