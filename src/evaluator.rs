use crate::ast::Expr;
use crate::error::EvalError;
use crate::tokenizer::Operation;

/// Evaluates `expr` bottom-up.
///
/// A divisor of exactly zero is [`EvalError::DivisionByZero`]; any node whose
/// value is NaN or infinite fails with [`EvalError::NonFiniteResult`].
pub fn evaluate(expr: &Expr) -> Result<f64, EvalError> {
    let value = match expr {
        Expr::Literal(v) => *v,
        Expr::Constant(c) => c.value(),
        Expr::Neg(operand) => -evaluate(operand)?,
        Expr::Call { func, arg } => func.apply(evaluate(arg)?),
        Expr::Binary { op, lhs, rhs } => {
            let l = evaluate(lhs)?;
            let r = evaluate(rhs)?;
            match op {
                Operation::Add => l + r,
                Operation::Sub => l - r,
                Operation::Mul => l * r,
                Operation::Div if r == 0.0 => return Err(EvalError::DivisionByZero),
                Operation::Div => l / r,
            }
        }
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFiniteResult)
    }
}
