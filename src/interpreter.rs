/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST, evaluates expressions and statements,
/// maintains the chain of lexical scopes, invokes callables and produces
/// program output. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Manages the environment chain, closures and non-local returns.
/// - Reports runtime errors with the offending source line.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a meaningful language element such as a number, string,
/// identifier, operator, delimiter or keyword. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind, lexeme and
///   source line.
/// - Materializes numeric, string and boolean literals.
/// - Reports lexical errors for invalid or malformed input while continuing
///   to scan.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST representing the syntactic structure of declarations, statements
/// and expressions.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Validates grammar and syntax, reporting errors with location info.
/// - Recovers from errors at statement boundaries so one mistake does not
///   hide the rest of the diagnostics.
pub mod parser;
/// The printer module renders an AST back to source text.
///
/// Printing produces valid source: reparsing a printed program yields a
/// structurally identical tree, which the test suite leans on.
pub mod printer;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the `Value` sum type used during execution, the
/// callable representations behind it, and their equality, truthiness and
/// display rules.
pub mod value;
