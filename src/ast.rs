use crate::tokenizer::Operation;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "π" | "pi" => Some(Constant::Pi),
            "e" => Some(Constant::E),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "π",
            Constant::E => "e",
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

/// Unary functions callable as `name(expr)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    /// Base 10.
    Log,
    /// Natural logarithm.
    Ln,
    Exp,
    Sqrt,
}

impl Function {
    pub fn from_name(name: &str) -> Option<Self> {
        use Function::*;

        match name {
            "sin" => Some(Sin),
            "cos" => Some(Cos),
            "tan" => Some(Tan),
            "log" => Some(Log),
            "ln" => Some(Ln),
            "exp" => Some(Exp),
            "√" | "sqrt" => Some(Sqrt),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        use Function::*;

        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Log => "log",
            Ln => "ln",
            Exp => "exp",
            Sqrt => "√",
        }
    }

    /// Trigonometric functions take radians. Out-of-domain arguments yield NaN.
    pub fn apply(self, x: f64) -> f64 {
        use Function::*;

        match self {
            Sin => x.sin(),
            Cos => x.cos(),
            Tan => x.tan(),
            Log => x.log10(),
            Ln => x.ln(),
            Exp => x.exp(),
            Sqrt => x.sqrt(),
        }
    }
}

/// Expression tree produced by the parser. Every node is evaluable: names are
/// resolved to [`Constant`] and [`Function`] while parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(f64),
    Constant(Constant),
    Binary {
        op: Operation,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Neg(Box<Expr>),
    Call {
        func: Function,
        arg: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: Operation, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn neg(operand: Expr) -> Self {
        Expr::Neg(Box::new(operand))
    }

    pub fn call(func: Function, arg: Expr) -> Self {
        Expr::Call {
            func,
            arg: Box::new(arg),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(v) => write!(f, "{v}"),
            Expr::Constant(c) => f.write_str(c.name()),
            Expr::Binary { op, lhs, rhs } => write!(f, "({lhs} {} {rhs})", op.symbol()),
            Expr::Neg(operand) => write!(f, "(-{operand})"),
            Expr::Call { func, arg } => write!(f, "{}({arg})", func.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_resolve() {
        assert_eq!(Function::from_name("sqrt"), Some(Function::Sqrt));
        assert_eq!(Function::from_name("√"), Some(Function::Sqrt));
        assert_eq!(Function::from_name("exp"), Some(Function::Exp));
        assert_eq!(Function::from_name("e"), None);
        assert_eq!(Constant::from_name("e"), Some(Constant::E));
        assert_eq!(Constant::from_name("pi"), Some(Constant::Pi));
        assert_eq!(Constant::from_name("ex"), None);
    }

    #[test]
    fn test_display() {
        let expr = Expr::binary(
            Operation::Mul,
            Expr::neg(Expr::Literal(2.5)),
            Expr::call(Function::Sin, Expr::Constant(Constant::Pi)),
        );
        assert_eq!(expr.to_string(), "((-2.5) * sin(π))");
    }
}
