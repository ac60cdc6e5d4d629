//! Renders the AST back to source text.
//!
//! The printed form is valid source, not a debug notation: reparsing a
//! printed program yields a structurally identical tree. Parenthesization
//! survives because groupings are their own nodes, and precedence survives
//! because the printer emits each node's children exactly where the grammar
//! would put them.

use std::fmt;

use crate::ast::{Expr, LiteralValue, Stmt};

impl fmt::Display for LiteralValue {
    /// Prints the literal in source form; unlike runtime printing, strings
    /// keep their quotes here so the output reparses.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Nil => write!(f, "nil"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::Variable { name, .. } => write!(f, "{name}"),
            Self::Grouping { expr, .. } => write!(f, "({expr})"),
            Self::Unary { op, expr, .. } => write!(f, "{op}{expr}"),
            Self::Binary { left, op, right, .. } => write!(f, "{left} {op} {right}"),
            Self::Logical { left, op, right, .. } => write!(f, "{left} {op} {right}"),
            Self::Assign { name, value, .. } => write!(f, "{name} = {value}"),
            Self::Call { callee, arguments, .. } => {
                write!(f, "{callee}(")?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            },
        }
    }
}

/// Writes a brace-delimited statement list: `{}` when empty, otherwise each
/// statement separated by single spaces.
fn write_block(f: &mut fmt::Formatter<'_>, statements: &[Stmt]) -> fmt::Result {
    if statements.is_empty() {
        return write!(f, "{{}}");
    }

    write!(f, "{{")?;
    for statement in statements {
        write!(f, " {statement}")?;
    }
    write!(f, " }}")
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression { expr, .. } => write!(f, "{expr};"),
            Self::Print { expr, .. } => write!(f, "print {expr};"),
            Self::VarDecl { name, initializer, .. } => match initializer {
                Some(init) => write!(f, "var {name} = {init};"),
                None => write!(f, "var {name};"),
            },
            Self::Block { statements, .. } => write_block(f, statements),
            Self::If { condition,
                       then_branch,
                       else_branch,
                       .. } => {
                write!(f, "if ({condition}) {then_branch}")?;
                if let Some(else_branch) = else_branch {
                    write!(f, " else {else_branch}")?;
                }
                Ok(())
            },
            Self::While { condition, body, .. } => write!(f, "while ({condition}) {body}"),
            Self::Function(def) => {
                write!(f, "fun {}(", def.name)?;
                for (index, param) in def.params.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ") ")?;
                write_block(f, &def.body)
            },
            Self::Return { value, .. } => match value {
                Some(value) => write!(f, "return {value};"),
                None => write!(f, "return;"),
            },
        }
    }
}

/// Renders a whole program, one statement per line.
#[must_use]
pub fn pretty(program: &[Stmt]) -> String {
    let mut rendered = String::new();
    for statement in program {
        rendered.push_str(&statement.to_string());
        rendered.push('\n');
    }
    rendered
}
