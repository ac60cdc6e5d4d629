use std::{
    cell::RefCell,
    rc::Rc,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{
    ast::{Expr, FunctionDef},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Unwind},
            environment::Environment,
        },
        value::{Callable, Function, NativeDef, Value},
    },
};

/// The native built-ins installed into the globals before execution.
///
/// Each entry carries the name the global is defined under, its exact arity
/// and the handler. `Callable::Native` values reference entries of this
/// table directly, which doubles as their identity for equality.
static NATIVE_TABLE: &[NativeDef] = &[NativeDef { name:  "clock",
                                                  arity: 0,
                                                  func:  clock, }];

/// Returns the host wall-clock time in seconds since the Unix epoch.
fn clock(_args: &[Value], _line: usize) -> EvalResult<Value> {
    // A host clock before the epoch reads as zero rather than failing.
    let seconds = SystemTime::now().duration_since(UNIX_EPOCH)
                                   .unwrap_or_default()
                                   .as_secs_f64();
    Ok(Value::Number(seconds))
}

/// Populates a globals environment with every entry of the native table.
pub(in crate::interpreter::evaluator) fn install_natives(globals: &Rc<RefCell<Environment>>) {
    let mut globals = globals.borrow_mut();
    for def in NATIVE_TABLE {
        globals.define(def.name, Value::Callable(Callable::Native(def)));
    }
}

impl<W: std::io::Write> Context<'_, W> {
    /// Builds the function value for a declaration.
    ///
    /// The environment current at this moment is captured as the closure;
    /// that capture, not the caller's environment, becomes the parent of
    /// every future call frame.
    pub(in crate::interpreter::evaluator) fn make_function(&self, def: &FunctionDef) -> Value {
        Value::Callable(Callable::Function(Rc::new(Function { def:     Rc::new(def.clone()),
                                                              closure: self.current_environment(), })))
    }

    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then the arguments left to right. The
    /// callee must be a callable and the argument count must match its
    /// arity.
    pub(in crate::interpreter::evaluator) fn eval_call(&mut self,
                                                       callee: &Expr,
                                                       arguments: &[Expr],
                                                       line: usize)
                                                       -> EvalResult<Value> {
        let callee = self.eval(callee)?;

        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(self.eval(argument)?);
        }

        let Value::Callable(callable) = callee else {
            return Err(RuntimeError::NotCallable { line }.into());
        };

        if args.len() != callable.arity() {
            return Err(RuntimeError::ArityMismatch { expected: callable.arity(),
                                                     found: args.len(),
                                                     line }.into());
        }

        match callable {
            Callable::Native(def) => (def.func)(&args, line),
            Callable::Function(function) => self.call_function(&function, args),
        }
    }

    /// Invokes a user-defined function.
    ///
    /// A fresh frame environment is created whose parent is the function's
    /// captured closure, the parameters are bound in it, and the body runs
    /// inside. A `Return` unwind from the body becomes the call's result; a
    /// body that falls off the end yields `nil`. Errors keep propagating.
    fn call_function(&mut self, function: &Function, args: Vec<Value>) -> EvalResult<Value> {
        let mut frame = Environment::with_enclosing(Rc::clone(&function.closure));
        for (param, value) in function.def.params.iter().zip(args) {
            frame.define(param, value);
        }

        match self.execute_block(&function.def.body, Rc::new(RefCell::new(frame))) {
            Ok(()) => Ok(Value::Nil),
            Err(Unwind::Return { value, .. }) => Ok(value),
            Err(e) => Err(e),
        }
    }
}
