#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Every variant carries the 1-based source line the error was detected on.
/// The `Display` implementation renders the diagnostic format the driver
/// writes to stderr: `[Line: <n>] Error: <message>`.
pub enum ParseError {
    /// The lexer encountered a byte that starts no token.
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A string literal was still open when the input ended.
    UnterminatedString {
        /// The line the string started on.
        line: usize,
    },
    /// A numeric literal could not be converted to a number.
    InvalidNumber {
        /// The offending lexeme.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The offending lexeme, or a description of the expectation.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A specific token was required but something else was found.
    Expected {
        /// Description of what was required, e.g. `';' after value`.
        what:  String,
        /// The lexeme actually found.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The left-hand side of `=` is not a variable.
    InvalidAssignmentTarget {
        /// The line of the `=` token.
        line: usize,
    },
    /// A call or declaration exceeded the 255-argument limit.
    TooManyArguments {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl ParseError {
    /// The 1-based source line this error is attributed to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. }
            | Self::UnterminatedString { line }
            | Self::InvalidNumber { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::Expected { line, .. }
            | Self::InvalidAssignmentTarget { line }
            | Self::TooManyArguments { line } => *line,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { character, line } => {
                write!(f, "[Line: {line}] Error: Unexpected character '{character}'.")
            },
            Self::UnterminatedString { line } => {
                write!(f, "[Line: {line}] Error: Unterminated string.")
            },
            Self::InvalidNumber { literal, line } => {
                write!(f, "[Line: {line}] Error: Invalid number literal '{literal}'.")
            },
            Self::UnexpectedToken { token, line } => {
                write!(f, "[Line: {line}] Error: Unexpected token '{token}'.")
            },
            Self::Expected { what, found, line } => {
                write!(f, "[Line: {line}] Error: Expect {what}, found '{found}'.")
            },
            Self::InvalidAssignmentTarget { line } => {
                write!(f, "[Line: {line}] Error: Invalid assignment target.")
            },
            Self::TooManyArguments { line } => {
                write!(f, "[Line: {line}] Error: Can't have more than 255 arguments.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
