use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
};

impl<W: std::io::Write> Context<'_, W> {
    /// Evaluates a binary operation.
    ///
    /// Both operands are evaluated first, left before right; the operator is
    /// then applied to the values.
    pub(in crate::interpreter::evaluator) fn eval_binary_op(&mut self,
                                                            left: &Expr,
                                                            op: BinaryOperator,
                                                            right: &Expr,
                                                            line: usize)
                                                            -> EvalResult<Value> {
        let lval = self.eval(left)?;
        let rval = self.eval(right)?;

        Ok(eval_binary(op, &lval, &rval, line)?)
    }
}

/// Applies a binary operator to two values.
///
/// Operand rules:
/// - `+` accepts two numbers (sum) or two strings (concatenation); any other
///   combination is an error.
/// - `-`, `*`, `/` and the orderings require two numbers. Division by zero
///   follows IEEE-754 and yields an infinity or NaN rather than an error.
/// - `==` and `!=` accept any operands and never coerce across variants.
///
/// # Example
/// ```
/// use quill::{ast::BinaryOperator,
///             interpreter::{evaluator::binary::eval_binary, value::Value}};
///
/// let sum = eval_binary(BinaryOperator::Add, &Value::Number(2.0), &Value::Number(3.0), 1);
/// assert_eq!(sum.unwrap(), Value::Number(5.0));
/// ```
pub fn eval_binary(op: BinaryOperator,
                   left: &Value,
                   right: &Value,
                   line: usize)
                   -> Result<Value, RuntimeError> {
    match op {
        BinaryOperator::Add => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
            _ => Err(RuntimeError::OperandsMustBeAddable { line }),
        },
        BinaryOperator::Sub => {
            let (a, b) = number_operands(left, right, line)?;
            Ok(Value::Number(a - b))
        },
        BinaryOperator::Mul => {
            let (a, b) = number_operands(left, right, line)?;
            Ok(Value::Number(a * b))
        },
        BinaryOperator::Div => {
            let (a, b) = number_operands(left, right, line)?;
            Ok(Value::Number(a / b))
        },
        BinaryOperator::Less => {
            let (a, b) = number_operands(left, right, line)?;
            Ok(Value::Bool(a < b))
        },
        BinaryOperator::LessEqual => {
            let (a, b) = number_operands(left, right, line)?;
            Ok(Value::Bool(a <= b))
        },
        BinaryOperator::Greater => {
            let (a, b) = number_operands(left, right, line)?;
            Ok(Value::Bool(a > b))
        },
        BinaryOperator::GreaterEqual => {
            let (a, b) = number_operands(left, right, line)?;
            Ok(Value::Bool(a >= b))
        },
        BinaryOperator::Equal => Ok(Value::Bool(left == right)),
        BinaryOperator::NotEqual => Ok(Value::Bool(left != right)),
    }
}

/// Requires both operands to be numbers.
fn number_operands(left: &Value,
                   right: &Value,
                   line: usize)
                   -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::OperandsMustBeNumbers { line }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_concatenates_strings() {
        let result = eval_binary(BinaryOperator::Add,
                                 &Value::Str("foo".to_string()),
                                 &Value::Str("bar".to_string()),
                                 1);
        assert_eq!(result.unwrap(), Value::Str("foobar".to_string()));
    }

    #[test]
    fn mixed_addition_is_an_error() {
        let result = eval_binary(BinaryOperator::Add,
                                 &Value::Str("foo".to_string()),
                                 &Value::Number(1.0),
                                 3);
        assert_eq!(result.unwrap_err(), RuntimeError::OperandsMustBeAddable { line: 3 });
    }

    #[test]
    fn division_by_zero_follows_ieee() {
        let inf = eval_binary(BinaryOperator::Div, &Value::Number(1.0), &Value::Number(0.0), 1);
        assert_eq!(inf.unwrap(), Value::Number(f64::INFINITY));

        let nan = eval_binary(BinaryOperator::Div, &Value::Number(0.0), &Value::Number(0.0), 1);
        let Ok(Value::Number(n)) = nan else {
            panic!("0/0 must produce a number");
        };
        assert!(n.is_nan());
    }

    #[test]
    fn comparisons_require_numbers() {
        let result = eval_binary(BinaryOperator::Less,
                                 &Value::Str("a".to_string()),
                                 &Value::Str("b".to_string()),
                                 7);
        assert_eq!(result.unwrap_err(), RuntimeError::OperandsMustBeNumbers { line: 7 });
    }

    #[test]
    fn equality_does_not_coerce() {
        let result = eval_binary(BinaryOperator::Equal,
                                 &Value::Number(0.0),
                                 &Value::Bool(false),
                                 1);
        assert_eq!(result.unwrap(), Value::Bool(false));

        let result = eval_binary(BinaryOperator::NotEqual, &Value::Nil, &Value::Nil, 1);
        assert_eq!(result.unwrap(), Value::Bool(false));
    }
}
