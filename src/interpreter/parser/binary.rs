use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

/// Maps a token kind to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the kind represents a binary operator
/// (arithmetic, comparison or equality) and `None` for all other kinds. The
/// logical keywords `and`/`or` are deliberately not covered here; they parse
/// into [`Expr::Logical`] because they short-circuit.
///
/// # Example
/// ```
/// use quill::{ast::BinaryOperator,
///             interpreter::{lexer::TokenKind, parser::binary::token_to_binary_operator}};
///
/// assert_eq!(token_to_binary_operator(TokenKind::Plus),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(TokenKind::And), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        _ => None,
    }
}

impl Parser<'_> {
    /// Parses logical OR expressions.
    ///
    /// Left-associative; lowest precedence above assignment.
    ///
    /// Grammar: `logic_or := logic_and ("or" logic_and)*`
    pub(in crate::interpreter::parser) fn logic_or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.logic_and()?;

        while self.check(TokenKind::Or) {
            let line = self.peek().line;
            self.advance();

            let right = self.logic_and()?;
            expr = Expr::Logical { left:  Box::new(expr),
                                   op:    LogicalOperator::Or,
                                   right: Box::new(right),
                                   line };
        }

        Ok(expr)
    }

    /// Parses logical AND expressions.
    ///
    /// Left-associative; binds tighter than `or`, looser than equality.
    ///
    /// Grammar: `logic_and := equality ("and" equality)*`
    pub(in crate::interpreter::parser) fn logic_and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;

        while self.check(TokenKind::And) {
            let line = self.peek().line;
            self.advance();

            let right = self.equality()?;
            expr = Expr::Logical { left:  Box::new(expr),
                                   op:    LogicalOperator::And,
                                   right: Box::new(right),
                                   line };
        }

        Ok(expr)
    }

    /// Parses equality expressions.
    ///
    /// The operators here are `==` and `!=`; a single `=` belongs to
    /// assignment and never reaches this level.
    ///
    /// Grammar: `equality := comparison (("!=" | "==") comparison)*`
    pub(in crate::interpreter::parser) fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;

        loop {
            let Some(op) = token_to_binary_operator(self.peek().kind) else {
                break;
            };
            if !matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual) {
                break;
            }

            let line = self.peek().line;
            self.advance();

            let right = self.comparison()?;
            expr = Expr::Binary { left: Box::new(expr),
                                  op,
                                  right: Box::new(right),
                                  line };
        }

        Ok(expr)
    }

    /// Parses comparison expressions.
    ///
    /// Grammar: `comparison := term ((">" | ">=" | "<" | "<=") term)*`
    pub(in crate::interpreter::parser) fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;

        loop {
            let Some(op) = token_to_binary_operator(self.peek().kind) else {
                break;
            };
            if !matches!(op,
                         BinaryOperator::Less
                         | BinaryOperator::LessEqual
                         | BinaryOperator::Greater
                         | BinaryOperator::GreaterEqual)
            {
                break;
            }

            let line = self.peek().line;
            self.advance();

            let right = self.term()?;
            expr = Expr::Binary { left: Box::new(expr),
                                  op,
                                  right: Box::new(right),
                                  line };
        }

        Ok(expr)
    }

    /// Parses addition and subtraction expressions.
    ///
    /// Grammar: `term := factor (("-" | "+") factor)*`
    pub(in crate::interpreter::parser) fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;

        loop {
            let Some(op) = token_to_binary_operator(self.peek().kind) else {
                break;
            };
            if !matches!(op, BinaryOperator::Add | BinaryOperator::Sub) {
                break;
            }

            let line = self.peek().line;
            self.advance();

            let right = self.factor()?;
            expr = Expr::Binary { left: Box::new(expr),
                                  op,
                                  right: Box::new(right),
                                  line };
        }

        Ok(expr)
    }

    /// Parses multiplication and division expressions.
    ///
    /// Grammar: `factor := unary (("/" | "*") unary)*`
    pub(in crate::interpreter::parser) fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;

        loop {
            let Some(op) = token_to_binary_operator(self.peek().kind) else {
                break;
            };
            if !matches!(op, BinaryOperator::Mul | BinaryOperator::Div) {
                break;
            }

            let line = self.peek().line;
            self.advance();

            let right = self.unary()?;
            expr = Expr::Binary { left: Box::new(expr),
                                  op,
                                  right: Box::new(right),
                                  line };
        }

        Ok(expr)
    }
}
