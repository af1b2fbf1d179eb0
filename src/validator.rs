use crate::error::{EvalError, SyntaxReason};
use crate::tokenizer::{Lexeme, Operation, Token};

// `+` and `-` after an operator or `(` are unary and pass through
pub fn validate(tokens: &[Lexeme]) -> Result<(), EvalError> {
    let mut depth = 0usize;
    let mut prev: Option<&Token> = None;

    for lexeme in tokens {
        match &lexeme.token {
            Token::LeftParen => depth += 1,
            Token::RightParen => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(EvalError::UnbalancedParentheses)?;
            }
            Token::Op(Operation::Mul | Operation::Div) => match prev {
                None | Some(Token::LeftParen) => {
                    return Err(EvalError::syntax(lexeme.pos, SyntaxReason::LeadingOperator))
                }
                Some(Token::Op(_)) => {
                    return Err(EvalError::syntax(
                        lexeme.pos,
                        SyntaxReason::OperatorAdjacency,
                    ))
                }
                _ => {}
            },
            Token::End => {
                if prev.is_none() {
                    return Err(EvalError::syntax(lexeme.pos, SyntaxReason::Empty));
                }
                if depth > 0 {
                    return Err(EvalError::UnbalancedParentheses);
                }
                if let Some(Token::Op(_)) = prev {
                    return Err(EvalError::syntax(
                        lexeme.pos,
                        SyntaxReason::TrailingOperator,
                    ));
                }
                return Ok(());
            }
            _ => {}
        }
        prev = Some(&lexeme.token);
    }

    // Stream without an End marker
    if depth > 0 {
        return Err(EvalError::UnbalancedParentheses);
    }
    Ok(())
}
