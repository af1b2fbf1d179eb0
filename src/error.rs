use compact_str::CompactString;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Syntax error at position {pos}: {reason}")]
    Syntax { pos: usize, reason: SyntaxReason },
    #[error("Unbalanced parentheses")]
    UnbalancedParentheses,
    #[error("Invalid number at position {pos}")]
    InvalidNumber { pos: usize },
    #[error("Unknown function or constant: {0}")]
    UnknownFunctionOrConstant(CompactString),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Result is not a finite number")]
    NonFiniteResult,
}

impl EvalError {
    pub fn syntax(pos: usize, reason: SyntaxReason) -> Self {
        EvalError::Syntax { pos, reason }
    }

    /// Malformed input, as opposed to a well-formed expression that cannot be computed.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            EvalError::Syntax { .. } | EvalError::UnbalancedParentheses | EvalError::InvalidNumber { .. }
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxReason {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("expression cannot start with '*' or '/'")]
    LeadingOperator,
    #[error("operator cannot follow another operator")]
    OperatorAdjacency,
    #[error("expression cannot end with an operator")]
    TrailingOperator,
    #[error("'{0}' must be followed by '('")]
    MissingCallParen(CompactString),
    #[error("unexpected input after expression")]
    TrailingInput,
    #[error("empty expression")]
    Empty,
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
    #[error("input longer than {0} characters")]
    InputTooLong(usize),
}
