use crate::{
    ast::{Expr, Stmt},
    error::ParseError,
    interpreter::lexer::{Token, TokenKind},
};

/// Result type used by the parser.
///
/// Parsing functions return either a parsed node or a `ParseError` describing
/// the first failure inside the current declaration. Errors that must not
/// abort the declaration are routed through [`Parser::report`] instead.
pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum number of arguments (and parameters) a call may carry.
pub(in crate::interpreter::parser) const MAX_ARGUMENTS: usize = 255;

/// Recursive-descent parser with single-token lookahead.
///
/// The parser consumes the token sequence produced by
/// [`scan`](crate::interpreter::lexer::scan) and builds a statement list. It
/// never gives up on the first error: a failed declaration triggers
/// panic-mode recovery, discarding tokens up to the next statement boundary,
/// and parsing continues so a single pass surfaces as many diagnostics as
/// possible.
///
/// # Example
/// ```
/// use quill::interpreter::{lexer::scan, parser::core::Parser};
///
/// let (tokens, _) = scan("print 1 + 2;");
/// let (program, errors) = Parser::new(&tokens).parse_program();
///
/// assert!(errors.is_empty());
/// assert_eq!(program.len(), 1);
/// ```
pub struct Parser<'t> {
    tokens:  &'t [Token],
    current: usize,
    errors:  Vec<ParseError>,
}

impl<'t> Parser<'t> {
    /// Creates a parser over a scanned token sequence.
    ///
    /// The sequence must be terminated by an `Eof` token, which
    /// [`scan`](crate::interpreter::lexer::scan) guarantees.
    #[must_use]
    pub fn new(tokens: &'t [Token]) -> Self {
        debug_assert!(matches!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof)));
        Self { tokens,
               current: 0,
               errors: Vec::new() }
    }

    /// Parses the whole program.
    ///
    /// Runs to `Eof` unconditionally and returns the statements that parsed
    /// cleanly together with every error collected along the way. Callers
    /// must refuse to execute the statements when the error list is
    /// non-empty.
    #[must_use]
    pub fn parse_program(mut self) -> (Vec<Stmt>, Vec<ParseError>) {
        let mut statements = Vec::new();

        while !self.at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }

        (statements, self.errors)
    }

    /// Parses a single declaration, recovering on error.
    ///
    /// A declaration is a function declaration, a variable declaration or a
    /// statement. On a parse error the offending tokens are skipped via
    /// [`Self::synchronize`] and `None` is returned; the error itself lands
    /// in the sink.
    pub(in crate::interpreter::parser) fn declaration(&mut self) -> Option<Stmt> {
        let result = if self.matches(&[TokenKind::Fun]) {
            self.function_declaration()
        } else if self.matches(&[TokenKind::Var]) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(statement) => Some(statement),
            Err(e) => {
                self.errors.push(e);
                self.synchronize();
                None
            },
        }
    }

    /// Parses a full expression.
    ///
    /// Entry point of the precedence ladder.
    ///
    /// Grammar: `expression := assignment`
    pub(in crate::interpreter::parser) fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    /// Parses an assignment expression.
    ///
    /// The left-hand side is parsed as a general expression first; only when
    /// an `=` follows is it required to be a plain variable. Any other target
    /// reports `InvalidAssignmentTarget` at the `=` token and discards the
    /// right-hand side, without aborting the surrounding declaration.
    ///
    /// Assignment is right-associative: `a = b = 1` assigns `1` to both.
    ///
    /// Grammar: `assignment := IDENT "=" assignment | logic_or`
    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.logic_or()?;

        if self.matches(&[TokenKind::Equal]) {
            let equals_line = self.previous().line;
            let value = self.assignment()?;

            return match expr {
                Expr::Variable { name, .. } => Ok(Expr::Assign { name,
                                                                 value: Box::new(value),
                                                                 line:  equals_line, }),
                other => {
                    self.report(ParseError::InvalidAssignmentTarget { line: equals_line });
                    Ok(other)
                },
            };
        }

        Ok(expr)
    }

    /// Discards tokens until the next likely statement boundary.
    ///
    /// The boundary is either just after a `;` or just before a keyword that
    /// starts a declaration or statement. Called after a parse error so that
    /// one mistake does not cascade into a wall of follow-up diagnostics.
    fn synchronize(&mut self) {
        self.advance();

        while !self.at_end() {
            if self.previous().kind == TokenKind::SemiColon {
                return;
            }

            match self.peek().kind {
                TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return => return,
                _ => {},
            }

            self.advance();
        }
    }

    /// Records an error without aborting the current declaration.
    pub(in crate::interpreter::parser) fn report(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Returns the token under the cursor without consuming it.
    pub(in crate::interpreter::parser) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Returns the most recently consumed token.
    pub(in crate::interpreter::parser) fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    /// True when the cursor sits on `Eof`.
    pub(in crate::interpreter::parser) fn at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Consumes and returns the current token. At `Eof` the cursor stays put.
    pub(in crate::interpreter::parser) fn advance(&mut self) -> &Token {
        if !self.at_end() {
            self.current += 1;
        }
        self.previous()
    }

    /// True when the current token has the given kind. Never matches `Eof`.
    pub(in crate::interpreter::parser) fn check(&self, kind: TokenKind) -> bool {
        !self.at_end() && self.peek().kind == kind
    }

    /// Consumes the current token when its kind is one of `kinds`.
    pub(in crate::interpreter::parser) fn matches(&mut self, kinds: &[TokenKind]) -> bool {
        for kind in kinds {
            if self.check(*kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    /// Requires the current token to have the given kind and consumes it.
    ///
    /// `what` describes the expectation for the diagnostic, e.g.
    /// `"';' after value"`.
    pub(in crate::interpreter::parser) fn consume(&mut self,
                                                  kind: TokenKind,
                                                  what: &str)
                                                  -> ParseResult<&Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }

        Err(self.expectation(what))
    }

    /// Builds an `Expected` error describing the token under the cursor.
    pub(in crate::interpreter::parser) fn expectation(&self, what: &str) -> ParseError {
        let token = self.peek();
        let found = if token.kind == TokenKind::Eof {
            "end of input".to_string()
        } else {
            token.lexeme.clone()
        };

        ParseError::Expected { what: what.to_string(),
                               found,
                               line: token.line }
    }
}
