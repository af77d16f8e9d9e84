//! Token Dispatcher
//!
//! `Interpreter` owns the session: the stacks, the dictionary, the return
//! value of the current line and the running/shutdown status. Every token
//! goes through `execute`:
//!
//! 1. Classify by first character (`token::classify`)
//! 2. Number: route `...e` literals to the reserved float path, otherwise
//!    parse as i64 and push
//! 3. Word: resolve composite-first, then native; composite bodies are
//!    executed token by token through this same procedure
//! 4. Anything else fails with `TokenNotCaught`
//!
//! Composite expansion does not recurse on the native call stack. Each
//! expanded word becomes a `Frame` on an explicit work list, and the list
//! length is the nesting depth. Expansion past `max_depth` fails with
//! `RecursionTooDeep`, whatever the limit is set to.

use tinyforth_core::NumericStack;
use tracing::{debug, info, trace};

use std::rc::Rc;

use crate::config::Config;
use crate::dictionary::{CompositeWord, Dictionary, WordBinding};
use crate::error::ForthError;
use crate::report::LineOutcome;
use crate::token::{self, SplitMode, TokenKind};
use crate::value::ReturnValue;

/// Default limit on nested composite expansion
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Session status. `Shutdown` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Running,
    Shutdown,
}

/// Mutable state native words operate on
#[derive(Debug, Default)]
pub struct State {
    pub int_stack: NumericStack<i64>,
    /// Reserved; no word reads or writes it yet
    pub float_stack: NumericStack<f64>,
    pub return_value: ReturnValue,
    pub status: Status,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A composite word being expanded, and the index of its next body token
#[derive(Debug)]
struct Frame {
    word: Rc<CompositeWord>,
    next: usize,
}

/// One interpreter session
#[derive(Debug)]
pub struct Interpreter {
    dictionary: Dictionary,
    state: State,
    max_depth: usize,
    split: SplitMode,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Dictionary::new())
    }
}

impl Interpreter {
    /// Fresh session with empty stacks over the given dictionary
    pub fn new(dictionary: Dictionary) -> Self {
        Interpreter {
            dictionary,
            state: State::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            split: SplitMode::default(),
        }
    }

    /// Fresh session configured from a loaded `Config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.dictionary())
            .with_max_depth(config.interpreter.max_depth)
            .with_split_mode(config.interpreter.split)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_split_mode(mut self, split: SplitMode) -> Self {
        self.split = split;
        self
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    /// Execute a single token against the session
    ///
    /// A composite word pushes a frame; the loop then feeds frame tokens
    /// back through dispatch until every frame is exhausted, the first
    /// error, or shutdown.
    pub fn execute(&mut self, token: &str) -> Result<(), ForthError> {
        let mut frames: Vec<Frame> = Vec::new();
        self.dispatch(token, &mut frames)?;

        while let Some(frame) = frames.last_mut() {
            if self.state.status == Status::Shutdown {
                break;
            }
            let word = Rc::clone(&frame.word);
            let index = frame.next;
            frame.next += 1;
            match word.token(index) {
                Some(sub) => self.dispatch(sub, &mut frames)?,
                None => {
                    frames.pop();
                }
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, token: &str, frames: &mut Vec<Frame>) -> Result<(), ForthError> {
        trace!(token, depth = frames.len(), "dispatch");
        match token::classify(token) {
            TokenKind::Number => self.handle_number(token, frames),
            TokenKind::Word => self.handle_word(token, frames),
            TokenKind::Unrecognized => Err(ForthError::TokenNotCaught {
                token: token.to_string(),
            }),
        }
    }

    fn handle_number(&mut self, token: &str, frames: &mut Vec<Frame>) -> Result<(), ForthError> {
        if token::is_float_literal(token) {
            return Err(ForthError::FloatUnsupported {
                token: token.to_string(),
            });
        }
        match token.parse::<i64>() {
            Ok(n) => {
                self.state.int_stack.push(n);
                Ok(())
            }
            // `-` starts both numbers and words; a failed literal that names
            // a word is that word.
            Err(_) if self.dictionary.contains(token) => self.handle_word(token, frames),
            Err(source) => Err(ForthError::ParseFailure {
                token: token.to_string(),
                source,
            }),
        }
    }

    fn handle_word(&mut self, token: &str, frames: &mut Vec<Frame>) -> Result<(), ForthError> {
        match self.dictionary.resolve(token) {
            Some(WordBinding::Composite(word)) => {
                if frames.len() >= self.max_depth {
                    return Err(ForthError::RecursionTooDeep {
                        word: word.name().to_string(),
                        limit: self.max_depth,
                    });
                }
                debug!(word = word.name(), depth = frames.len(), "expanding composite word");
                frames.push(Frame { word, next: 0 });
                Ok(())
            }
            Some(WordBinding::Native(builtin)) => builtin.apply(&mut self.state),
            None => Err(ForthError::WordDoesNotExist {
                word: token.to_string(),
            }),
        }
    }

    /// Execute one input line and produce its outcome
    ///
    /// The first failing token aborts the rest of the line. Shutdown is
    /// checked after each token, before its error. The return value is
    /// cleared whatever the outcome.
    pub fn eval_line(&mut self, line: &str) -> LineOutcome {
        let outcome = self.run_tokens(line);
        self.state.return_value = ReturnValue::None;
        debug!(line, ?outcome, "line evaluated");
        outcome
    }

    fn run_tokens(&mut self, line: &str) -> LineOutcome {
        if line.is_empty() {
            return LineOutcome::Completed(ReturnValue::None);
        }
        for token in self.split.split(line) {
            let result = self.execute(token);
            if self.state.status == Status::Shutdown {
                info!("shutdown requested");
                return LineOutcome::Shutdown;
            }
            if let Err(error) = result {
                return LineOutcome::Failed(error);
            }
        }
        LineOutcome::Completed(std::mem::take(&mut self.state.return_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::CompositeWord;

    fn run(interp: &mut Interpreter, tokens: &[&str]) -> Result<(), ForthError> {
        for token in tokens {
            interp.execute(token)?;
        }
        Ok(())
    }

    fn stack(interp: &Interpreter) -> Vec<i64> {
        interp.state().int_stack.iter().copied().collect()
    }

    #[test]
    fn test_numbers_are_pushed() {
        let mut interp = Interpreter::default();
        run(&mut interp, &["1", "-2", "30"]).unwrap();
        assert_eq!(stack(&interp), vec![30, -2, 1]);
    }

    #[test]
    fn test_subtraction_token_dispatches_as_word() {
        let mut interp = Interpreter::default();
        run(&mut interp, &["5", "3", "-"]).unwrap();
        assert_eq!(stack(&interp), vec![2]);
    }

    #[test]
    fn test_bad_literal_is_parse_failure_and_pushes_nothing() {
        let mut interp = Interpreter::default();
        let err = interp.execute("12x").unwrap_err();
        assert!(matches!(err, ForthError::ParseFailure { ref token, .. } if token == "12x"));
        assert!(interp.state().int_stack.is_empty());

        let err = interp.execute("99999999999999999999").unwrap_err();
        assert!(matches!(err, ForthError::ParseFailure { .. }));
    }

    #[test]
    fn test_float_literals_are_reserved() {
        let mut interp = Interpreter::default();
        assert_eq!(
            interp.execute("-e"),
            Err(ForthError::FloatUnsupported {
                token: "-e".to_string()
            })
        );
        assert!(interp.state().float_stack.is_empty());
    }

    #[test]
    fn test_unknown_word() {
        let mut interp = Interpreter::default();
        assert_eq!(
            interp.execute("foo"),
            Err(ForthError::WordDoesNotExist {
                word: "foo".to_string()
            })
        );
    }

    #[test]
    fn test_unrecognized_token() {
        let mut interp = Interpreter::default();
        assert_eq!(
            interp.execute("~"),
            Err(ForthError::TokenNotCaught {
                token: "~".to_string()
            })
        );
        assert_eq!(
            interp.execute(""),
            Err(ForthError::TokenNotCaught {
                token: String::new()
            })
        );
    }

    #[test]
    fn test_composite_expansion() {
        let dictionary = Dictionary::with_composites([CompositeWord::new("seven", "3 4 +")]);
        let mut interp = Interpreter::new(dictionary);
        run(&mut interp, &["seven", "seven", "*"]).unwrap();
        assert_eq!(stack(&interp), vec![49]);
    }

    #[test]
    fn test_composite_shadows_native() {
        let dictionary = Dictionary::with_composites([CompositeWord::new("+", "*")]);
        let mut interp = Interpreter::new(dictionary);
        run(&mut interp, &["3", "4", "+"]).unwrap();
        assert_eq!(stack(&interp), vec![12]);
    }

    #[test]
    fn test_composite_aborts_on_first_error() {
        let dictionary =
            Dictionary::with_composites([CompositeWord::new("broken", "1 nope 2")]);
        let mut interp = Interpreter::new(dictionary);
        assert_eq!(
            interp.execute("broken"),
            Err(ForthError::WordDoesNotExist {
                word: "nope".to_string()
            })
        );
        assert_eq!(stack(&interp), vec![1]);
    }

    #[test]
    fn test_nested_composites() {
        let dictionary = Dictionary::with_composites([
            CompositeWord::new("double", "2 *"),
            CompositeWord::new("quad", "double double"),
        ]);
        let mut interp = Interpreter::new(dictionary);
        run(&mut interp, &["5", "quad"]).unwrap();
        assert_eq!(stack(&interp), vec![20]);
    }

    #[test]
    fn test_self_recursion_is_bounded() {
        let dictionary = Dictionary::with_composites([CompositeWord::new("loop", "1 loop")]);
        let mut interp = Interpreter::new(dictionary).with_max_depth(10);
        assert_eq!(
            interp.execute("loop"),
            Err(ForthError::RecursionTooDeep {
                word: "loop".to_string(),
                limit: 10
            })
        );
        assert_eq!(interp.state().int_stack.len(), 10);
    }

    #[test]
    fn test_deep_expansion_does_not_overflow() {
        let dictionary = Dictionary::with_composites([CompositeWord::new("forever", "forever")]);
        let mut interp = Interpreter::new(dictionary).with_max_depth(200_000);
        assert_eq!(
            interp.eval_line("forever"),
            LineOutcome::Failed(ForthError::RecursionTooDeep {
                word: "forever".to_string(),
                limit: 200_000
            })
        );
        assert_eq!(interp.status(), Status::Running);
    }

    #[test]
    fn test_deep_chain_completes() {
        // Each level pushes a 1 before descending; the last level stops
        let depth = 50_000;
        let words = (0..depth).map(|i| {
            let body = if i + 1 == depth {
                "1".to_string()
            } else {
                format!("1 w{}", i + 1)
            };
            CompositeWord::new(format!("w{}", i), body)
        });
        let mut interp = Interpreter::new(Dictionary::with_composites(words)).with_max_depth(depth);
        interp.execute("w0").unwrap();
        assert_eq!(interp.state().int_stack.len(), depth);
    }

    #[test]
    fn test_mutual_recursion_is_bounded() {
        let dictionary = Dictionary::with_composites([
            CompositeWord::new("ping", "pong"),
            CompositeWord::new("pong", "ping"),
        ]);
        let mut interp = Interpreter::new(dictionary);
        assert!(matches!(
            interp.execute("ping"),
            Err(ForthError::RecursionTooDeep {
                limit: DEFAULT_MAX_DEPTH,
                ..
            })
        ));
    }

    #[test]
    fn test_shutdown_stops_composite_expansion() {
        let dictionary = Dictionary::with_composites([CompositeWord::new("quit", "1 bye 2")]);
        let mut interp = Interpreter::new(dictionary);
        interp.execute("quit").unwrap();
        assert_eq!(interp.status(), Status::Shutdown);
        assert_eq!(stack(&interp), vec![1]);
    }

    #[test]
    fn test_eval_line_reports_value() {
        let mut interp = Interpreter::default();
        assert_eq!(
            interp.eval_line("3 4 + ."),
            LineOutcome::Completed(ReturnValue::Integer(7))
        );
        assert!(interp.state().return_value.is_none());
        assert!(interp.state().int_stack.is_empty());
    }

    #[test]
    fn test_eval_line_without_value() {
        let mut interp = Interpreter::default();
        assert_eq!(
            interp.eval_line("1 2"),
            LineOutcome::Completed(ReturnValue::None)
        );
        assert_eq!(stack(&interp), vec![2, 1]);
    }

    #[test]
    fn test_eval_line_last_value_wins() {
        let mut interp = Interpreter::default();
        assert_eq!(
            interp.eval_line("1 2 . ."),
            LineOutcome::Completed(ReturnValue::Integer(1))
        );
    }

    #[test]
    fn test_eval_line_aborts_remaining_tokens() {
        let mut interp = Interpreter::default();
        let outcome = interp.eval_line("1 foo 2");
        assert_eq!(
            outcome,
            LineOutcome::Failed(ForthError::WordDoesNotExist {
                word: "foo".to_string()
            })
        );
        assert_eq!(stack(&interp), vec![1]);
        // The session survives
        assert_eq!(interp.status(), Status::Running);
    }

    #[test]
    fn test_eval_line_clears_value_after_error() {
        let mut interp = Interpreter::default();
        assert!(matches!(interp.eval_line("5 . ."), LineOutcome::Failed(_)));
        assert_eq!(
            interp.eval_line("1"),
            LineOutcome::Completed(ReturnValue::None)
        );
    }

    #[test]
    fn test_eval_line_shutdown_ignores_rest() {
        let mut interp = Interpreter::default();
        assert_eq!(interp.eval_line("1 bye foo"), LineOutcome::Shutdown);
        assert_eq!(stack(&interp), vec![1]);
    }

    #[test]
    fn test_eval_empty_line() {
        let mut interp = Interpreter::default();
        assert_eq!(
            interp.eval_line(""),
            LineOutcome::Completed(ReturnValue::None)
        );
    }

    #[test]
    fn test_double_space_is_empty_token() {
        let mut interp = Interpreter::default();
        assert_eq!(
            interp.eval_line("1  2"),
            LineOutcome::Failed(ForthError::TokenNotCaught {
                token: String::new()
            })
        );
    }

    #[test]
    fn test_whitespace_split_mode() {
        let mut interp = Interpreter::default().with_split_mode(SplitMode::Whitespace);
        assert_eq!(
            interp.eval_line(" 1  2\t+ . "),
            LineOutcome::Completed(ReturnValue::Integer(3))
        );
    }

    #[test]
    fn test_print_stack_line() {
        let mut interp = Interpreter::default();
        assert_eq!(
            interp.eval_line("1 2 3 .s"),
            LineOutcome::Completed(ReturnValue::Text("<3>  Top-->3,2,1".to_string()))
        );
    }
}
