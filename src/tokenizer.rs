use crate::error::{EvalError, SyntaxReason};
use compact_str::{CompactString, ToCompactString};

#[derive(Debug, Default)]
enum TokenizerState {
    #[default]
    Clean,
    InNumber {
        start: usize,
        text: CompactString,
        has_point: bool,
    },
    InIdent {
        start: usize,
        name: CompactString,
    },
    // Single-character token, held until the next character arrives
    Single(Lexeme),
}

/// Streaming tokenizer: feed characters with [`Tokenizer::update`], then flush
/// with [`Tokenizer::finalize`]. Each call yields at most one finished token.
#[derive(Debug, Default)]
pub struct Tokenizer {
    state: TokenizerState,
    pos: usize,
}

impl Tokenizer {
    pub fn update(&mut self, c: char) -> Result<Option<Lexeme>, EvalError> {
        use TokenizerState::*;

        let pos = self.pos;
        self.pos += 1;

        let absorbed = match &mut self.state {
            Clean => false,
            InNumber {
                text, has_point, ..
            } => match c {
                '0'..='9' => {
                    text.push(c);
                    true
                }
                // Two points in one digit run
                '.' if *has_point => return Err(EvalError::InvalidNumber { pos }),
                '.' => {
                    *has_point = true;
                    text.push(c);
                    true
                }
                _ => false,
            },
            InIdent { name, .. } if c.is_ascii_alphabetic() => {
                name.push(c);
                true
            }
            InIdent { .. } | Single(_) => false,
        };
        if absorbed {
            return Ok(None);
        }

        let token = self.finalize()?;
        self.start(pos, c)?;
        Ok(token)
    }

    fn start(&mut self, pos: usize, c: char) -> Result<(), EvalError> {
        use TokenizerState::*;

        let single = |token| Single(Lexeme { token, pos });
        self.state = match c {
            '0'..='9' | '.' => InNumber {
                start: pos,
                text: c.to_compact_string(),
                has_point: c == '.',
            },
            'a'..='z' | 'A'..='Z' => InIdent {
                start: pos,
                name: c.to_compact_string(),
            },
            'π' | '√' => single(Token::Ident(c.to_compact_string())),
            '+' => single(Token::Op(Operation::Add)),
            '-' | '−' => single(Token::Op(Operation::Sub)),
            '*' | '×' => single(Token::Op(Operation::Mul)),
            '/' | '÷' => single(Token::Op(Operation::Div)),
            '(' => single(Token::LeftParen),
            ')' => single(Token::RightParen),
            // Ignore whitespace
            _ if c.is_whitespace() => Clean,
            _ => {
                return Err(EvalError::syntax(
                    pos,
                    SyntaxReason::UnexpectedCharacter(c),
                ))
            }
        };
        Ok(())
    }

    pub fn finalize(&mut self) -> Result<Option<Lexeme>, EvalError> {
        use TokenizerState::*;

        let lexeme = match std::mem::take(&mut self.state) {
            Clean => None,
            InNumber { start, text, .. } => {
                let Ok(value) = text.parse::<f64>() else {
                    return Err(EvalError::InvalidNumber { pos: start });
                };
                Some(Lexeme {
                    token: Token::Num(value),
                    pos: start,
                })
            }
            InIdent { start, name } => Some(Lexeme {
                token: Token::Ident(name),
                pos: start,
            }),
            Single(lexeme) => Some(lexeme),
        };
        Ok(lexeme)
    }

    /// Index of the next character to be fed.
    pub fn position(&self) -> usize {
        self.pos
    }
}

/// Splits `input` into tokens, terminated by [`Token::End`].
pub fn tokenize(input: &str) -> Result<Vec<Lexeme>, EvalError> {
    let mut tokens = vec![];
    let mut tokenizer = Tokenizer::default();
    for c in input.chars() {
        if let Some(lexeme) = tokenizer.update(c)? {
            tokens.push(lexeme);
        }
    }
    if let Some(lexeme) = tokenizer.finalize()? {
        tokens.push(lexeme);
    }
    tokens.push(Lexeme {
        token: Token::End,
        pos: tokenizer.position(),
    });
    log::trace!("tokens: {:?}", tokens);
    Ok(tokens)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Num(f64),
    Op(Operation),
    LeftParen,
    RightParen,
    Ident(CompactString),
    End,
}

/// A token and the character index it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub pos: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operation {
    pub fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Sub => '-',
            Operation::Mul => '*',
            Operation::Div => '/',
        }
    }
}
