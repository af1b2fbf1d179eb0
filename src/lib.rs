//! Arithmetic expression calculator.
//!
//! Text goes through [`tokenize`], [`validate`], [`parse`] and [`evaluate`];
//! [`calculate`] runs all four. [`Session`] adds keypad-style input
//! composition and a bounded history on top.

pub mod ast;
pub mod calculator;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod session;
pub mod tokenizer;
pub mod validator;

pub use ast::{Constant, Expr, Function};
pub use calculator::{calculate, calculate_with, format_value};
pub use config::{Config, ConfigError};
pub use error::{EvalError, SyntaxReason};
pub use evaluator::evaluate;
pub use parser::{parse, parse_with_depth};
pub use session::{HistoryEntry, Key, Screen, Session, HISTORY_LIMIT};
pub use tokenizer::{tokenize, Lexeme, Operation, Token, Tokenizer};
pub use validator::validate;
