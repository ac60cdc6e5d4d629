/// Syntax errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include unknown characters, unterminated strings,
/// unexpected tokens and malformed constructs detected before evaluation.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: undefined
/// variables, operand type mismatches, bad calls and arity mismatches.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
