use crate::{
    ast::{Expr, FunctionDef, LiteralValue, Stmt},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{MAX_ARGUMENTS, ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a single statement.
    ///
    /// A statement may be one of:
    /// - a `print` statement,
    /// - a block,
    /// - an `if` statement,
    /// - a `while` loop,
    /// - a `for` loop (desugared into `while`),
    /// - a `return` statement,
    /// - an expression used as a statement.
    pub(in crate::interpreter::parser) fn statement(&mut self) -> ParseResult<Stmt> {
        if self.matches(&[TokenKind::Print]) {
            return self.print_statement();
        }
        if self.matches(&[TokenKind::LeftBrace]) {
            let line = self.previous().line;
            let statements = self.block_statements()?;
            return Ok(Stmt::Block { statements, line });
        }
        if self.matches(&[TokenKind::If]) {
            return self.if_statement();
        }
        if self.matches(&[TokenKind::While]) {
            return self.while_statement();
        }
        if self.matches(&[TokenKind::For]) {
            return self.for_statement();
        }
        if self.matches(&[TokenKind::Return]) {
            return self.return_statement();
        }

        self.expression_statement()
    }

    /// Parses a variable declaration after the `var` keyword was consumed.
    ///
    /// Grammar: `varDecl := "var" IDENT ("=" expression)? ";"`
    pub(in crate::interpreter::parser) fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let line = self.previous().line;
        let name = self.consume(TokenKind::Identifier, "variable name")?
                       .lexeme
                       .clone();

        let initializer = if self.matches(&[TokenKind::Equal]) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenKind::SemiColon, "';' after variable declaration")?;
        Ok(Stmt::VarDecl { name,
                           initializer,
                           line })
    }

    /// Parses a function declaration after the `fun` keyword was consumed.
    ///
    /// The parameter list shares the 255-entry cap with call arguments;
    /// exceeding it reports an error without aborting the declaration.
    ///
    /// Grammar: `funcDecl := "fun" IDENT "(" params? ")" block`
    pub(in crate::interpreter::parser) fn function_declaration(&mut self) -> ParseResult<Stmt> {
        let line = self.previous().line;
        let name = self.consume(TokenKind::Identifier, "function name")?
                       .lexeme
                       .clone();

        self.consume(TokenKind::LeftParen, "'(' after function name")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if params.len() == MAX_ARGUMENTS {
                    let param_line = self.peek().line;
                    self.report(ParseError::TooManyArguments { line: param_line });
                }

                params.push(self.consume(TokenKind::Identifier, "parameter name")?
                                .lexeme
                                .clone());

                if !self.matches(&[TokenKind::Comma]) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RightParen, "')' after parameters")?;
        self.consume(TokenKind::LeftBrace, "'{' before function body")?;

        let body = self.block_statements()?;
        Ok(Stmt::Function(FunctionDef { name,
                                        params,
                                        body,
                                        line }))
    }

    /// Parses the statements of a block after its `{` was consumed, up to and
    /// including the closing `}`.
    ///
    /// Declarations inside the block recover independently, so one bad
    /// statement does not take the rest of the block down with it.
    fn block_statements(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }

        self.consume(TokenKind::RightBrace, "'}' after block")?;
        Ok(statements)
    }

    /// Parses an `if` statement after the `if` keyword was consumed.
    ///
    /// A dangling `else` binds to the nearest preceding `if`, which falls out
    /// of parsing the `else` branch greedily.
    ///
    /// Grammar: `ifStmt := "if" "(" expression ")" statement ("else" statement)?`
    fn if_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.previous().line;

        self.consume(TokenKind::LeftParen, "'(' after 'if'")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "')' after if condition")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.matches(&[TokenKind::Else]) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If { condition,
                      then_branch,
                      else_branch,
                      line })
    }

    /// Parses a `while` loop after the `while` keyword was consumed.
    ///
    /// Grammar: `whileStmt := "while" "(" expression ")" statement`
    fn while_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.previous().line;

        self.consume(TokenKind::LeftParen, "'(' after 'while'")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "')' after while condition")?;

        let body = Box::new(self.statement()?);
        Ok(Stmt::While { condition, body, line })
    }

    /// Parses a `for` loop and desugars it into `while`.
    ///
    /// `for (init; cond; inc) body` produces
    ///
    /// ```text
    ///     Block[ init,
    ///            While(cond or true,
    ///                  Block[ body, ExprStmt(inc) ]) ]
    /// ```
    ///
    /// with absent pieces simply omitted; a missing condition defaults to
    /// literal `true`.
    ///
    /// Grammar: `forStmt := "for" "(" (varDecl | exprStmt | ";") expression? ";"
    /// expression? ")" statement`
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.previous().line;

        self.consume(TokenKind::LeftParen, "'(' after 'for'")?;

        let initializer = if self.matches(&[TokenKind::SemiColon]) {
            None
        } else if self.matches(&[TokenKind::Var]) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if self.check(TokenKind::SemiColon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::SemiColon, "';' after loop condition")?;

        let increment = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::RightParen, "')' after for clauses")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            let increment_line = increment.line_number();
            body = Stmt::Block { statements: vec![body,
                                                  Stmt::Expression { expr: increment,
                                                                     line: increment_line, }],
                                 line };
        }

        let condition = condition.unwrap_or(Expr::Literal { value: LiteralValue::Bool(true),
                                                            line });
        let mut desugared = Stmt::While { condition,
                                          body: Box::new(body),
                                          line };

        if let Some(initializer) = initializer {
            desugared = Stmt::Block { statements: vec![initializer, desugared],
                                      line };
        }

        Ok(desugared)
    }

    /// Parses a `return` statement after the `return` keyword was consumed.
    ///
    /// Grammar: `returnStmt := "return" expression? ";"`
    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.previous().line;

        let value = if self.check(TokenKind::SemiColon) {
            None
        } else {
            Some(self.expression()?)
        };

        self.consume(TokenKind::SemiColon, "';' after return value")?;
        Ok(Stmt::Return { value, line })
    }

    /// Parses a `print` statement after the `print` keyword was consumed.
    ///
    /// Grammar: `printStmt := "print" expression ";"`
    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.previous().line;
        let expr = self.expression()?;

        self.consume(TokenKind::SemiColon, "';' after value")?;
        Ok(Stmt::Print { expr, line })
    }

    /// Parses an expression statement.
    ///
    /// Grammar: `exprStmt := expression ";"`
    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.peek().line;
        let expr = self.expression()?;

        self.consume(TokenKind::SemiColon, "';' after expression")?;
        Ok(Stmt::Expression { expr, line })
    }
}
