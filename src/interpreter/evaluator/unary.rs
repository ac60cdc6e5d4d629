use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
};

impl<W: std::io::Write> Context<'_, W> {
    /// Evaluates a unary operation.
    ///
    /// `-` requires its operand to be a number; `!` accepts any value and
    /// negates its truthiness.
    pub(in crate::interpreter::evaluator) fn eval_unary_op(&mut self,
                                                           op: UnaryOperator,
                                                           expr: &Expr,
                                                           line: usize)
                                                           -> EvalResult<Value> {
        let value = self.eval(expr)?;

        match op {
            UnaryOperator::Negate => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::OperandMustBeNumber { line }.into()),
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
        }
    }
}
