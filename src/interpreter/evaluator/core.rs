use std::{cell::RefCell, io::Write, rc::Rc};

use crate::{
    ast::{Expr, LogicalOperator, Stmt},
    error::RuntimeError,
    interpreter::{
        evaluator::{environment::Environment, function::install_natives},
        value::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// [`Unwind`] describing why execution left the normal path.
pub type EvalResult<T> = Result<T, Unwind>;

/// Why evaluation left the normal path.
///
/// `return` is not an error: it travels on its own variant so that runtime
/// error handling can never intercept it, and so that a call frame can catch
/// it without accidentally swallowing real failures. Both variants propagate
/// through blocks and loops; only a call frame stops a `Return`.
#[derive(Debug, Clone, PartialEq)]
pub enum Unwind {
    /// A runtime error. Propagates to the top-level interpret loop.
    Error(RuntimeError),
    /// A `return` statement fired. Caught by the innermost call frame.
    Return {
        /// The returned value, `nil` for a bare `return;`.
        value: Value,
        /// The line of the `return` keyword, for the diagnostic when no call
        /// frame is active.
        line:  usize,
    },
}

impl From<RuntimeError> for Unwind {
    fn from(e: RuntimeError) -> Self {
        Self::Error(e)
    }
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the globals environment with the
/// native built-ins, the current environment pointer that moves as blocks
/// and calls are entered and left, and the sink program output is written
/// to.
///
/// ## Usage
///
/// A `Context` is created once and reused across runs, which is what lets an
/// interactive session accumulate definitions.
pub struct Context<'out, W: Write> {
    globals:     Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    output:      &'out mut W,
}

impl<'out, W: Write> Context<'out, W> {
    /// Creates a new evaluation context writing program output to `output`.
    ///
    /// The globals environment is populated with the native built-ins before
    /// anything executes.
    pub fn new(output: &'out mut W) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new()));
        install_natives(&globals);

        Self { environment: Rc::clone(&globals),
               globals,
               output }
    }

    /// The globals environment holding the built-ins.
    #[must_use]
    pub fn globals(&self) -> Rc<RefCell<Environment>> {
        Rc::clone(&self.globals)
    }

    /// The sink program output is written to.
    pub fn output(&mut self) -> &mut W {
        self.output
    }

    /// The environment currently in effect.
    pub(in crate::interpreter::evaluator) fn current_environment(&self) -> Rc<RefCell<Environment>> {
        Rc::clone(&self.environment)
    }

    /// Executes a whole program.
    ///
    /// Statements run in order until the first runtime error, which is
    /// returned after the evaluator has unwound. A `return` that reaches the
    /// top level is reported as a runtime error at the `return` keyword.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {},
                Err(Unwind::Error(e)) => return Err(e),
                Err(Unwind::Return { line, .. }) => {
                    return Err(RuntimeError::ReturnOutsideFunction { line });
                },
            }
        }
        Ok(())
    }

    /// Executes a single statement.
    pub(in crate::interpreter::evaluator) fn execute(&mut self, statement: &Stmt) -> EvalResult<()> {
        match statement {
            Stmt::Expression { expr, .. } => {
                self.eval(expr)?;
                Ok(())
            },
            Stmt::Print { expr, line } => {
                let value = self.eval(expr)?;
                writeln!(self.output, "{value}").map_err(|e| {
                                                    RuntimeError::Io { message: e.to_string(),
                                                                       line:    *line, }
                                                })?;
                Ok(())
            },
            Stmt::VarDecl { name, initializer, .. } => {
                let value = match initializer {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                self.environment.borrow_mut().define(name, value);
                Ok(())
            },
            Stmt::Block { statements, .. } => {
                let block_env = Environment::with_enclosing(Rc::clone(&self.environment));
                self.execute_block(statements, Rc::new(RefCell::new(block_env)))
            },
            Stmt::If { condition,
                       then_branch,
                       else_branch,
                       .. } => {
                if self.eval(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            },
            Stmt::While { condition, body, .. } => {
                while self.eval(condition)?.is_truthy() {
                    self.execute(body)?;
                }
                Ok(())
            },
            Stmt::Function(def) => {
                let function = self.make_function(def);
                self.environment.borrow_mut().define(&def.name, function);
                Ok(())
            },
            Stmt::Return { value, line } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                Err(Unwind::Return { value, line: *line })
            },
        }
    }

    /// Executes statements inside the given environment.
    ///
    /// The current-environment pointer is swapped in for the duration and
    /// restored on every exit path: normal completion, runtime error and
    /// non-local return all pass the restore before propagating.
    pub(in crate::interpreter::evaluator) fn execute_block(&mut self,
                                                           statements: &[Stmt],
                                                           environment: Rc<RefCell<Environment>>)
                                                           -> EvalResult<()> {
        let previous = Rc::clone(&self.environment);
        self.environment = environment;

        let result = self.execute_all(statements);

        self.environment = previous;
        result
    }

    fn execute_all(&mut self, statements: &[Stmt]) -> EvalResult<()> {
        for statement in statements {
            self.execute(statement)?;
        }
        Ok(())
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant; operands are always evaluated
    /// left to right.
    pub(in crate::interpreter::evaluator) fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Variable { name, line } => self.eval_variable(name, *line),
            Expr::Grouping { expr, .. } => self.eval(expr),
            Expr::Unary { op, expr, line } => self.eval_unary_op(*op, expr, *line),
            Expr::Binary { left,
                           op,
                           right,
                           line, } => self.eval_binary_op(left, *op, right, *line),
            Expr::Logical { left, op, right, .. } => self.eval_logical_op(left, *op, right),
            Expr::Assign { name, value, line } => self.eval_assign(name, value, *line),
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, *line),
        }
    }

    /// Looks up a variable in the current environment chain.
    fn eval_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        let value = self.environment
                        .borrow()
                        .get(name)
                        .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                                         line })?;
        Ok(value)
    }

    /// Evaluates the right-hand side, then updates the nearest binding.
    ///
    /// The assignment expression yields the assigned value, so chained
    /// assignments work.
    fn eval_assign(&mut self, name: &str, value: &Expr, line: usize) -> EvalResult<Value> {
        let value = self.eval(value)?;

        if self.environment.borrow_mut().assign(name, value.clone()) {
            Ok(value)
        } else {
            Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                                  line }.into())
        }
    }

    /// Evaluates a short-circuit logical operation.
    ///
    /// The result is the truthiness projection of the deciding operand, so
    /// `a and b` evaluates to `true` or `false` rather than to `a` or `b`.
    /// The right operand is not evaluated when the left already decides.
    fn eval_logical_op(&mut self,
                       left: &Expr,
                       op: LogicalOperator,
                       right: &Expr)
                       -> EvalResult<Value> {
        let left = self.eval(left)?.is_truthy();

        match op {
            LogicalOperator::Or if left => Ok(Value::Bool(true)),
            LogicalOperator::And if !left => Ok(Value::Bool(false)),
            _ => Ok(Value::Bool(self.eval(right)?.is_truthy())),
        }
    }
}
