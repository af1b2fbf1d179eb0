use crate::config::Config;
use crate::error::{EvalError, SyntaxReason};
use crate::evaluator::evaluate;
use crate::parser::parse_with_depth;
use crate::tokenizer::tokenize;
use crate::validator::validate;

/// Evaluates `input` with the default [`Config`].
pub fn calculate(input: &str) -> Result<f64, EvalError> {
    calculate_with(input, &Config::default())
}

/// Runs the whole pipeline: length check, tokenize, validate, parse, evaluate.
pub fn calculate_with(input: &str, config: &Config) -> Result<f64, EvalError> {
    let len = input.chars().count();
    if len > config.max_input_len {
        return Err(EvalError::syntax(
            config.max_input_len,
            SyntaxReason::InputTooLong(config.max_input_len),
        ));
    }

    let tokens = tokenize(input)?;
    validate(&tokens)?;
    let expr = parse_with_depth(&tokens, config.max_depth)?;
    evaluate(&expr)
}

/// Canonical display form of a result: shortest decimal that reads back to
/// the same value, without exponent notation.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        // Covers negative zero
        return String::from("0");
    }
    value.to_string()
}
