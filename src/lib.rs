//! # quill
//!
//! quill is a small, dynamically-typed scripting language written in Rust,
//! with lexical scoping, first-class functions (closures), control flow and
//! line-attributed error reporting.
//!
//! Execution is a straight pipeline: source text is scanned into tokens,
//! parsed into an AST and walked directly by the evaluator. A [`Session`]
//! owns the persistent runtime state, so feeding it one source string after
//! another accumulates definitions the way an interactive prompt expects.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use log::debug;

use crate::{
    error::{ParseError, RuntimeError},
    interpreter::{evaluator::core::Context, lexer::scan, parser::core::Parser},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Stmt` enums and related types that
/// represent the syntactic structure of source code as a tree. The AST is
/// built by the parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing
/// or evaluating code. It standardizes error reporting and carries the
/// source line of every failure.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Renders the diagnostic formats the driver writes to stderr.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representation and the pretty-printer to provide a complete runtime for
/// source code.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator and values.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The interactive prompt.
///
/// Reads one line at a time over injected streams and runs each against a
/// persistent [`Session`].
pub mod repl;

/// Errors a [`Session`] run can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptError {
    /// One or more errors from lexing or parsing. Execution never started.
    Syntax(Vec<ParseError>),
    /// Evaluation failed. Side effects up to the failure point have
    /// happened.
    Runtime(RuntimeError),
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(errors) => {
                for (index, error) in errors.iter().enumerate() {
                    if index > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{error}")?;
                }
                Ok(())
            },
            Self::Runtime(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax(errors) => errors.first().map(|e| e as &(dyn std::error::Error + 'static)),
            Self::Runtime(error) => Some(error),
        }
    }
}

impl From<RuntimeError> for ScriptError {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}

/// A persistent interpreter session.
///
/// Each [`Session::run`] call takes a source string through the full
/// pipeline. Definitions live in the session's globals, so later runs see
/// what earlier runs created; this is the state an interactive prompt keeps
/// between lines.
///
/// # Example
///
/// Define a function in one run and call it in the next:
///
/// ```
/// use quill::Session;
///
/// let mut output: Vec<u8> = Vec::new();
/// let mut session = Session::new(&mut output);
///
/// session.run("fun max(x, y) { if (x > y) return x; return y; }")?;
/// session.run("print max(10, 20);")?;
/// session.run("print max(5, 4);")?;
///
/// assert_eq!(output, b"20\n5\n");
/// # Ok::<(), quill::ScriptError>(())
/// ```
pub struct Session<'out, W: Write> {
    context: Context<'out, W>,
}

impl<'out, W: Write> Session<'out, W> {
    /// Creates a session writing program output to `output`.
    pub fn new(output: &'out mut W) -> Self {
        Self { context: Context::new(output), }
    }

    /// Runs one source string through scan → parse → interpret.
    ///
    /// The pipeline advances to the next stage only when the prior stage
    /// reported no errors; the parser itself always runs to the end of its
    /// input so a single run surfaces as many syntax errors as possible.
    pub fn run(&mut self, source: &str) -> Result<(), ScriptError> {
        let (tokens, scan_errors) = scan(source);
        debug!("scanned {} tokens, {} scan errors", tokens.len(), scan_errors.len());
        if !scan_errors.is_empty() {
            return Err(ScriptError::Syntax(scan_errors));
        }

        let (program, parse_errors) = Parser::new(&tokens).parse_program();
        debug!("parsed {} statements, {} parse errors", program.len(), parse_errors.len());
        if !parse_errors.is_empty() {
            return Err(ScriptError::Syntax(parse_errors));
        }

        self.context.interpret(&program).map_err(ScriptError::Runtime)
    }

    /// The sink program output is written to.
    ///
    /// The prompt loop uses this to share the stream between program output
    /// and its own prompt.
    pub fn output(&mut self) -> &mut W {
        self.context.output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_once(source: &str) -> Result<String, ScriptError> {
        let mut output: Vec<u8> = Vec::new();
        let mut session = Session::new(&mut output);
        session.run(source)?;
        Ok(String::from_utf8(output).expect("output is valid utf-8"))
    }

    #[test]
    fn print_expression() {
        assert_eq!(run_once("print 3 * 2;").unwrap(), "6\n");
    }

    #[test]
    fn scan_errors_block_execution() {
        let err = run_once("print 1; @").unwrap_err();
        let ScriptError::Syntax(errors) = err else {
            panic!("expected a syntax error");
        };
        assert_eq!(errors, vec![ParseError::UnexpectedCharacter { character: '@',
                                                                  line:      1, }]);
    }

    #[test]
    fn parse_errors_block_execution() {
        // Nothing may print even though the first statement is fine.
        let mut output: Vec<u8> = Vec::new();
        let mut session = Session::new(&mut output);
        let result = session.run("print 1; print ;");

        assert!(matches!(result, Err(ScriptError::Syntax(_))));
        drop(session);
        assert!(output.is_empty());
    }

    #[test]
    fn runtime_errors_keep_prior_side_effects() {
        let mut output: Vec<u8> = Vec::new();
        let mut session = Session::new(&mut output);
        let result = session.run("print 1; print missing;");

        assert!(matches!(result, Err(ScriptError::Runtime(_))));
        drop(session);
        assert_eq!(output, b"1\n");
    }

    #[test]
    fn definitions_persist_across_runs() {
        let mut output: Vec<u8> = Vec::new();
        let mut session = Session::new(&mut output);

        session.run("var counter = 0;").unwrap();
        session.run("counter = counter + 1;").unwrap();
        session.run("print counter;").unwrap();

        drop(session);
        assert_eq!(output, b"1\n");
    }

    #[test]
    fn a_failed_run_does_not_poison_the_session() {
        let mut output: Vec<u8> = Vec::new();
        let mut session = Session::new(&mut output);

        assert!(session.run("print missing;").is_err());
        session.run("print \"still alive\";").unwrap();

        drop(session);
        assert_eq!(output, b"still alive\n");
    }

    #[test]
    fn syntax_errors_render_one_per_line() {
        let err = run_once("var = 1;\nvar x 3;").unwrap_err();
        let rendered = err.to_string();

        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.lines().all(|l| l.starts_with("[Line: ")));
    }
}
