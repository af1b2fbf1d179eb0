use crate::ast::{Constant, Function};
use crate::calculator::{calculate_with, format_value};
use crate::config::Config;
use crate::error::EvalError;
use crate::tokenizer::Operation;
use std::collections::VecDeque;

/// Most entries kept in history; older ones are evicted.
pub const HISTORY_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: String,
}

/// A keypad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Point,
    Operator(Operation),
    LeftParen,
    RightParen,
    Constant(Constant),
    Function(Function),
}

impl Key {
    fn continues_result(self) -> bool {
        matches!(self, Key::Operator(_) | Key::RightParen)
    }
}

/// What a presenter should show for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen<'a> {
    Input(&'a str),
    Error(&'a EvalError),
}

#[derive(Debug, Default)]
pub struct Session {
    config: Config,
    input: String,
    pending_reset: bool,
    error: Option<EvalError>,
    history: VecDeque<HistoryEntry>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Evaluates `expression`. On success the entry is recorded at the front
    /// of history and becomes the current input; failures leave history alone.
    pub fn submit(&mut self, expression: &str) -> Result<HistoryEntry, EvalError> {
        self.pending_reset = true;

        match calculate_with(expression, &self.config) {
            Ok(value) => {
                let entry = HistoryEntry {
                    expression: expression.to_string(),
                    result: format_value(value),
                };
                log::debug!("{} = {}", entry.expression, entry.result);

                self.input.clone_from(&entry.result);
                self.error = None;
                self.history.push_front(entry.clone());
                self.history.truncate(HISTORY_LIMIT);
                Ok(entry)
            }
            Err(e) => {
                log::debug!("{expression:?} failed: {e}");
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Submits the displayed input.
    pub fn evaluate(&mut self) -> Result<HistoryEntry, EvalError> {
        let expression = self.display_input().to_string();
        self.submit(&expression)
    }

    /// After a result, keys that begin an operand replace the input while an
    /// operator or `)` continues from it. After an error every key starts over.
    pub fn press(&mut self, key: Key) {
        if key == Key::Point && self.current_number().contains('.') {
            // One point per number; still consumes a pending reset
            if !self.pending_reset {
                return;
            }
        }

        let text = match key {
            Key::Digit(d) => {
                debug_assert!(d <= 9, "digit key out of range: {d}");
                let Some(c) = char::from_digit(u32::from(d), 10) else {
                    return;
                };
                c.to_string()
            }
            Key::Point => String::from("."),
            Key::Operator(op) => op.symbol().to_string(),
            Key::LeftParen => String::from("("),
            Key::RightParen => String::from(")"),
            Key::Constant(c) => c.name().to_string(),
            Key::Function(f) => format!("{}(", f.name()),
        };
        self.compose(&text, key.continues_result());
    }

    /// Types a chunk of text. Text starting with `+ * / )` continues from the
    /// previous result; a leading `-` reads as a negative operand.
    pub fn type_text(&mut self, text: &str) {
        let continues = text
            .trim_start()
            .starts_with(&['+', '*', '/', '×', '÷', ')'][..]);
        self.compose(text, continues);
    }

    fn compose(&mut self, text: &str, continues: bool) {
        let failed = self.error.take().is_some();
        if std::mem::take(&mut self.pending_reset) && (failed || !continues) {
            self.input.clear();
        }
        if text.starts_with('.') && self.current_number().is_empty() {
            self.input.push('0');
        }
        self.input.push_str(text);
    }

    /// The digit run at the end of the input.
    fn current_number(&self) -> &str {
        let start = self
            .input
            .char_indices()
            .rev()
            .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
            .map_or(0, |(i, c)| i + c.len_utf8());
        &self.input[start..]
    }

    pub fn backspace(&mut self) {
        self.error = None;
        if std::mem::take(&mut self.pending_reset) {
            self.input.clear();
            return;
        }
        self.input.pop();
        if self.input == "-" {
            self.input.clear();
        }
    }

    /// Clears the input and any error. History is kept.
    pub fn reset_input(&mut self) {
        self.input.clear();
        self.error = None;
        self.pending_reset = false;
    }

    /// Result stored at `index` (0 is the most recent).
    pub fn reuse(&self, index: usize) -> Option<&str> {
        self.history.get(index).map(|entry| entry.result.as_str())
    }

    /// Loads the result at `index` as the current input, as if just computed.
    pub fn recall(&mut self, index: usize) -> Option<&str> {
        let result = self.reuse(index)?.to_string();
        self.input = result;
        self.error = None;
        self.pending_reset = true;
        Some(&self.input)
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Entries, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn screen(&self) -> Screen<'_> {
        match &self.error {
            Some(e) => Screen::Error(e),
            None => Screen::Input(self.display_input()),
        }
    }

    fn display_input(&self) -> &str {
        if self.input.is_empty() {
            "0"
        } else {
            &self.input
        }
    }

    pub fn pending_reset(&self) -> bool {
        self.pending_reset
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_all(session: &mut Session, keys: &[Key]) {
        for key in keys {
            session.press(*key);
        }
    }

    fn input(session: &Session) -> &str {
        match session.screen() {
            Screen::Input(text) => text,
            Screen::Error(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn test_submit_records_history() {
        let mut session = Session::default();
        let entry = session.submit("2+3*4").unwrap();
        assert_eq!(
            entry,
            HistoryEntry {
                expression: "2+3*4".into(),
                result: "14".into()
            }
        );
        assert_eq!(session.history().count(), 1);
        assert!(session.pending_reset());
        assert_eq!(input(&session), "14");
    }

    #[test]
    fn test_failure_keeps_history() {
        let mut session = Session::default();
        session.submit("1+1").unwrap();
        assert_eq!(session.submit("5/0"), Err(EvalError::DivisionByZero));
        assert_eq!(session.history().count(), 1);
        assert!(session.pending_reset());
        assert_eq!(session.screen(), Screen::Error(&EvalError::DivisionByZero));
    }

    #[test]
    fn test_history_bound() {
        let mut session = Session::default();
        for i in 0..25 {
            session.submit(&format!("{i}+0")).unwrap();
        }
        let results: Vec<&str> = session.history().map(|e| e.result.as_str()).collect();
        let expected: Vec<String> = (5..25).rev().map(|i| i.to_string()).collect();
        assert_eq!(results, expected);
    }

    #[test]
    fn test_reuse_and_clear() {
        let mut session = Session::default();
        session.submit("2*3").unwrap();
        session.submit("10/4").unwrap();
        assert_eq!(session.reuse(0), Some("2.5"));
        assert_eq!(session.reuse(1), Some("6"));
        assert_eq!(session.reuse(2), None);
        let before: Vec<HistoryEntry> = session.history().cloned().collect();
        session.reuse(1);
        assert_eq!(session.history().cloned().collect::<Vec<_>>(), before);

        session.clear();
        assert_eq!(session.history().count(), 0);
        assert_eq!(session.reuse(0), None);
    }

    #[test]
    fn test_resubmit_formatted_result() {
        let mut session = Session::default();
        let first = session.submit("1/3").unwrap();
        let second = session.submit(&first.result).unwrap();
        assert_eq!(first.result, second.result);
    }

    #[test]
    fn test_keypad_composition() {
        let mut session = Session::default();
        assert_eq!(input(&session), "0");
        press_all(
            &mut session,
            &[
                Key::Digit(1),
                Key::Point,
                Key::Digit(5),
                Key::Point,
                Key::Operator(Operation::Mul),
                Key::Point,
                Key::Digit(5),
            ],
        );
        assert_eq!(input(&session), "1.5*0.5");
        assert_eq!(session.evaluate().unwrap().result, "0.75");
    }

    #[test]
    fn test_pending_reset_digit_replaces() {
        let mut session = Session::default();
        session.submit("2+3").unwrap();
        session.press(Key::Digit(7));
        assert_eq!(input(&session), "7");
        assert!(!session.pending_reset());
    }

    #[test]
    fn test_pending_reset_operator_continues() {
        let mut session = Session::default();
        session.submit("2+3").unwrap();
        press_all(&mut session, &[Key::Operator(Operation::Mul), Key::Digit(2)]);
        assert_eq!(input(&session), "5*2");
        assert_eq!(session.evaluate().unwrap().result, "10");
    }

    #[test]
    fn test_pending_reset_function_and_constant() {
        let mut session = Session::default();
        session.submit("2+3").unwrap();
        press_all(
            &mut session,
            &[
                Key::Function(Function::Sqrt),
                Key::Digit(9),
                Key::RightParen,
                Key::Operator(Operation::Add),
                Key::Constant(Constant::E),
            ],
        );
        assert_eq!(input(&session), "√(9)+e");
    }

    #[test]
    fn test_error_then_operator_starts_fresh() {
        let mut session = Session::default();
        session.type_text("5/0");
        assert!(session.evaluate().is_err());
        session.press(Key::Operator(Operation::Sub));
        session.press(Key::Digit(4));
        assert_eq!(input(&session), "-4");
    }

    #[test]
    fn test_type_text() {
        let mut session = Session::default();
        session.type_text("6*7");
        session.evaluate().unwrap();
        session.type_text("/2");
        assert_eq!(input(&session), "42/2");
        session.evaluate().unwrap();
        session.type_text("100");
        assert_eq!(input(&session), "100");
    }

    #[test]
    fn test_type_text_leading_minus_starts_fresh() {
        let mut session = Session::default();
        session.type_text("10");
        session.evaluate().unwrap();
        session.type_text("-3+5");
        assert_eq!(session.evaluate().unwrap().result, "2");
        session.type_text("+1");
        assert_eq!(session.evaluate().unwrap().result, "3");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "digit key out of range")]
    fn test_digit_out_of_range() {
        Session::default().press(Key::Digit(10));
    }

    #[test]
    fn test_backspace() {
        let mut session = Session::default();
        session.type_text("-5");
        session.backspace();
        assert_eq!(input(&session), "0");
        session.type_text("12");
        session.backspace();
        assert_eq!(input(&session), "1");
        session.submit("3*3").unwrap();
        session.backspace();
        assert_eq!(input(&session), "0");
        assert!(!session.pending_reset());
    }

    #[test]
    fn test_recall() {
        let mut session = Session::default();
        session.submit("4*4").unwrap();
        session.submit("1+1").unwrap();
        assert_eq!(session.recall(1), Some("16"));
        session.press(Key::Operator(Operation::Div));
        session.press(Key::Digit(4));
        assert_eq!(session.evaluate().unwrap().result, "4");
        assert_eq!(session.recall(7), None);
    }

    #[test]
    fn test_reset_input_keeps_history() {
        let mut session = Session::default();
        session.submit("1+2").unwrap();
        session.reset_input();
        assert_eq!(input(&session), "0");
        assert!(!session.pending_reset());
        assert_eq!(session.history().count(), 1);
    }

    #[test]
    fn test_empty_input_evaluates_to_zero() {
        let mut session = Session::default();
        assert_eq!(session.evaluate().unwrap().result, "0");
    }
}
