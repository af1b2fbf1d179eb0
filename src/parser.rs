use crate::ast::{Constant, Expr, Function};
use crate::error::{EvalError, SyntaxReason};
use crate::tokenizer::{Lexeme, Operation, Token};

pub const DEFAULT_MAX_DEPTH: usize = 256;

static END: Token = Token::End;

pub fn parse(tokens: &[Lexeme]) -> Result<Expr, EvalError> {
    parse_with_depth(tokens, DEFAULT_MAX_DEPTH)
}

/// Like [`parse`], failing with [`SyntaxReason::TooDeep`] once the tree would
/// grow taller than `max_depth`.
pub fn parse_with_depth(tokens: &[Lexeme], max_depth: usize) -> Result<Expr, EvalError> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        max_depth,
    };

    let expr = parser.expr()?;
    match parser.current() {
        Token::End => {}
        Token::RightParen => return Err(EvalError::UnbalancedParentheses),
        _ => {
            return Err(EvalError::syntax(
                parser.position(),
                SyntaxReason::TrailingInput,
            ))
        }
    }
    log::trace!("parsed: {expr}");
    Ok(expr)
}

struct Parser<'a> {
    tokens: &'a [Lexeme],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn current(&self) -> &'a Token {
        self.tokens.get(self.pos).map_or(&END, |l| &l.token)
    }

    fn position(&self) -> usize {
        match self.tokens.get(self.pos) {
            Some(lexeme) => lexeme.pos,
            None => self.tokens.last().map_or(0, |l| l.pos + 1),
        }
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn error(&self, reason: SyntaxReason) -> EvalError {
        EvalError::syntax(self.position(), reason)
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        if self.depth >= self.max_depth {
            return Err(self.error(SyntaxReason::TooDeep(self.max_depth)));
        }
        self.depth += 1;
        Ok(())
    }

    // expr := term (('+'|'-') term)*
    fn expr(&mut self) -> Result<Expr, EvalError> {
        let base = self.depth;
        let mut lhs = self.term()?;
        while let Token::Op(op @ (Operation::Add | Operation::Sub)) = self.current() {
            // Each link of a left-leaning chain adds a level to the tree
            self.enter()?;
            self.advance();
            let rhs = self.term()?;
            lhs = Expr::binary(*op, lhs, rhs);
        }
        self.depth = base;
        Ok(lhs)
    }

    // term := factor (('*'|'/') factor)*
    fn term(&mut self) -> Result<Expr, EvalError> {
        let base = self.depth;
        let mut lhs = self.factor()?;
        while let Token::Op(op @ (Operation::Mul | Operation::Div)) = self.current() {
            self.enter()?;
            self.advance();
            let rhs = self.factor()?;
            lhs = Expr::binary(*op, lhs, rhs);
        }
        self.depth = base;
        Ok(lhs)
    }

    // factor := ('-'|'+') factor | primary
    fn factor(&mut self) -> Result<Expr, EvalError> {
        self.enter()?;

        let expr = match self.current() {
            Token::Op(Operation::Sub) => {
                self.advance();
                Expr::neg(self.factor()?)
            }
            // Unary plus is a no-op
            Token::Op(Operation::Add) => {
                self.advance();
                self.factor()?
            }
            _ => self.primary()?,
        };

        self.depth -= 1;
        Ok(expr)
    }

    // primary := number | constant | '(' expr ')' | function '(' expr ')'
    fn primary(&mut self) -> Result<Expr, EvalError> {
        match self.current() {
            Token::Num(value) => {
                self.advance();
                Ok(Expr::Literal(*value))
            }
            Token::Ident(name) => {
                if let Some(constant) = Constant::from_name(name) {
                    self.advance();
                    return Ok(Expr::Constant(constant));
                }
                let Some(func) = Function::from_name(name) else {
                    return Err(EvalError::UnknownFunctionOrConstant(name.clone()));
                };
                self.advance();
                if *self.current() != Token::LeftParen {
                    return Err(self.error(SyntaxReason::MissingCallParen(name.clone())));
                }
                let arg = self.group()?;
                Ok(Expr::call(func, arg))
            }
            Token::LeftParen => self.group(),
            Token::End => Err(self.error(SyntaxReason::UnexpectedEnd)),
            _ => Err(self.error(SyntaxReason::UnexpectedToken)),
        }
    }

    /// `'(' expr ')'`, with the current token on the opening parenthesis.
    fn group(&mut self) -> Result<Expr, EvalError> {
        self.advance();
        let inner = self.expr()?;
        match self.current() {
            Token::RightParen => {
                self.advance();
                Ok(inner)
            }
            Token::End => Err(EvalError::UnbalancedParentheses),
            _ => Err(self.error(SyntaxReason::UnexpectedToken)),
        }
    }
}
