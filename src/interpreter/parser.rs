/// Core parser state and program-level entry points.
///
/// Contains the `Parser` struct, the declaration loop, panic-mode
/// synchronization and the expression/assignment entry of the precedence
/// ladder.
pub mod core;

/// Binary operator parsing.
///
/// Implements the left-associative levels of the precedence ladder: logical
/// or/and, equality, comparison, term and factor.
pub mod binary;

/// Unary, call and primary parsing.
///
/// Handles prefix operators, call postfixes with their argument lists, and
/// the atomic expressions at the bottom of the ladder.
pub mod unary;

/// Statement parsing.
///
/// Implements declarations and statements, including the desugaring of `for`
/// loops into `while` loops.
pub mod statement;
