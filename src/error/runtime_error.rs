#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can be raised during evaluation.
///
/// Every variant carries the 1-based line of the offending token. The
/// `Display` implementation renders the diagnostic format the driver writes
/// to stderr: the message followed by `[line <n>]`.
pub enum RuntimeError {
    /// Tried to read or assign a variable that was never declared.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The operand of unary `-` was not a number.
    OperandMustBeNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Both operands of an arithmetic or comparison operator must be numbers.
    OperandsMustBeNumbers {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `+` was applied to operands that are neither two numbers nor two
    /// strings.
    OperandsMustBeAddable {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The callee of a call expression is not callable.
    NotCallable {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call supplied the wrong number of arguments.
    ArityMismatch {
        /// The number of parameters the callee declares.
        expected: usize,
        /// The number of arguments actually supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A `return` statement executed outside any function body.
    ReturnOutsideFunction {
        /// The line of the `return` keyword.
        line: usize,
    },
    /// Writing program output failed.
    Io {
        /// Description of the underlying I/O failure.
        message: String,
        /// The source line of the statement that was writing.
        line:    usize,
    },
}

impl RuntimeError {
    /// The 1-based source line this error is attributed to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndefinedVariable { line, .. }
            | Self::OperandMustBeNumber { line }
            | Self::OperandsMustBeNumbers { line }
            | Self::OperandsMustBeAddable { line }
            | Self::NotCallable { line }
            | Self::ArityMismatch { line, .. }
            | Self::ReturnOutsideFunction { line }
            | Self::Io { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, line } => {
                write!(f, "Undefined variable '{name}'.\n[line {line}]")
            },
            Self::OperandMustBeNumber { line } => {
                write!(f, "Operand must be a Number.\n[line {line}]")
            },
            Self::OperandsMustBeNumbers { line } => {
                write!(f, "Operands must be two Number.\n[line {line}]")
            },
            Self::OperandsMustBeAddable { line } => {
                write!(f, "Operands must be two Number or two String.\n[line {line}]")
            },
            Self::NotCallable { line } => {
                write!(f, "Can only call functions.\n[line {line}]")
            },
            Self::ArityMismatch { expected,
                                  found,
                                  line, } => {
                write!(f, "Expected {expected} arguments but got {found}.\n[line {line}]")
            },
            Self::ReturnOutsideFunction { line } => {
                write!(f, "Cannot return from top-level code.\n[line {line}]")
            },
            Self::Io { message, line } => {
                write!(f, "I/O error: {message}\n[line {line}]")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
