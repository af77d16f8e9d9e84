//! tinyforth Runtime: the interpreter core
//!
//! Tokens typed by the user are either numeric literals, pushed onto the
//! integer stack, or words, resolved through a two-tier dictionary where
//! composite (token-sequence) definitions shadow native words.
//!
//! # Modules
//!
//! - `token`: first-character classification and line splitting
//! - `dictionary`: composite-first word resolution
//! - `builtins`: the closed set of native words
//! - `interpreter`: session state and the token dispatcher
//! - `report`: per-line outcome and its text form
//! - `session`: the read-eval-report loop and line sources
//! - `config`: TOML configuration and the default dictionary
//! - `error`: error types for all of the above
//!
//! # Example
//!
//! ```
//! use tinyforth_runtime::{Interpreter, LineOutcome, ReturnValue};
//!
//! let mut interp = Interpreter::default();
//! assert_eq!(
//!     interp.eval_line("3 4 + ."),
//!     LineOutcome::Completed(ReturnValue::Integer(7))
//! );
//! ```

pub mod builtins;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod interpreter;
pub mod report;
pub mod session;
pub mod token;
pub mod value;

pub use builtins::Builtin;
pub use config::{Config, InterpreterConfig};
pub use dictionary::{CompositeWord, Dictionary, WordBinding};
pub use error::{ConfigError, ForthError, SessionError};
pub use interpreter::{DEFAULT_MAX_DEPTH, Interpreter, State, Status};
pub use report::LineOutcome;
pub use session::{BufReadSource, LineSource, run};
pub use token::{SplitMode, TokenKind, classify};
pub use value::ReturnValue;

pub use tinyforth_core::{EmptyStack, NumericStack};
