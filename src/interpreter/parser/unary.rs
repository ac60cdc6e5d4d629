use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{MAX_ARGUMENTS, ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a unary expression.
    ///
    /// Supports the prefix operators `!` (logical not) and `-` (numeric
    /// negation). Unary operators are right-associative, so `!-x` parses as
    /// `!(-x)`.
    ///
    /// Grammar: `unary := ("!" | "-") unary | call`
    pub(in crate::interpreter::parser) fn unary(&mut self) -> ParseResult<Expr> {
        let op = match self.peek().kind {
            TokenKind::Bang => Some(UnaryOperator::Not),
            TokenKind::Minus => Some(UnaryOperator::Negate),
            _ => None,
        };

        if let Some(op) = op {
            let line = self.peek().line;
            self.advance();

            let expr = self.unary()?;
            return Ok(Expr::Unary { op,
                                    expr: Box::new(expr),
                                    line });
        }

        self.call()
    }

    /// Parses a call expression.
    ///
    /// A primary expression may be followed by any number of call postfixes,
    /// so `f(1)(2)` calls the result of `f(1)`.
    ///
    /// Grammar: `call := primary ("(" arguments? ")")*`
    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        while self.matches(&[TokenKind::LeftParen]) {
            expr = self.finish_call(expr)?;
        }

        Ok(expr)
    }

    /// Parses the argument list and closing parenthesis of a call.
    ///
    /// Arguments beyond [`MAX_ARGUMENTS`] report an error through the sink
    /// but the node is still built, so the rest of the program keeps
    /// producing diagnostics.
    ///
    /// Grammar: `arguments := expression ("," expression)*`
    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = Vec::new();

        if !self.check(TokenKind::RightParen) {
            loop {
                if arguments.len() == MAX_ARGUMENTS {
                    let line = self.peek().line;
                    self.report(ParseError::TooManyArguments { line });
                }

                arguments.push(self.expression()?);

                if !self.matches(&[TokenKind::Comma]) {
                    break;
                }
            }
        }

        let paren = self.consume(TokenKind::RightParen, "')' after arguments")?;
        Ok(Expr::Call { callee: Box::new(callee),
                        arguments,
                        line: paren.line })
    }

    /// Parses a primary (atomic) expression.
    ///
    /// Primary expressions form the base of the expression grammar:
    /// number/string literals, `true`, `false`, `nil`, variable references
    /// and parenthesized expressions.
    ///
    /// Grammar:
    /// ```text
    ///     primary := NUMBER | STRING | "true" | "false" | "nil"
    ///              | IDENT | "(" expression ")"
    /// ```
    pub(in crate::interpreter::parser) fn primary(&mut self) -> ParseResult<Expr> {
        match self.peek().kind {
            TokenKind::Number | TokenKind::String => {
                self.advance();
                let token = self.previous();
                let Some(value) = token.literal.clone() else {
                    unreachable!()
                };
                Ok(Expr::Literal { value,
                                   line: token.line })
            },
            TokenKind::True => {
                let line = self.advance().line;
                Ok(Expr::Literal { value: true.into(),
                                   line })
            },
            TokenKind::False => {
                let line = self.advance().line;
                Ok(Expr::Literal { value: false.into(),
                                   line })
            },
            TokenKind::Nil => {
                let line = self.advance().line;
                Ok(Expr::Literal { value: crate::ast::LiteralValue::Nil,
                                   line })
            },
            TokenKind::Identifier => {
                let token = self.advance();
                Ok(Expr::Variable { name: token.lexeme.clone(),
                                    line: token.line })
            },
            TokenKind::LeftParen => {
                let line = self.advance().line;
                let expr = self.expression()?;
                self.consume(TokenKind::RightParen, "')' after expression")?;
                Ok(Expr::Grouping { expr: Box::new(expr),
                                    line })
            },
            _ => Err(self.expectation("expression")),
        }
    }
}
