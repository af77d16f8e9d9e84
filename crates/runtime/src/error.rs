//! Error types for the interpreter and its outer layers
//!
//! `ForthError` is what a token can fail with. Any `ForthError` aborts the
//! rest of its line but never the session. `ConfigError` and `SessionError`
//! belong to startup and to the line-reading loop respectively.

use std::num::ParseIntError;
use std::path::PathBuf;

use tinyforth_core::EmptyStack;

/// Failure while executing a single token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForthError {
    /// Pop or peek on an empty stack
    EmptyStack,
    /// A binary word found fewer operands than it needs
    TooFewItems { needed: usize, found: usize },
    /// A word token that resolves in neither dictionary table
    WordDoesNotExist { word: String },
    /// A token whose first character is neither a digit/`-` nor a word character
    TokenNotCaught { token: String },
    /// A numeric literal that is not a valid 64-bit signed integer
    ParseFailure { token: String, source: ParseIntError },
    /// `/` or `mod` with a zero divisor
    DivisionByZero { op: &'static str },
    /// Composite expansion nested deeper than the configured limit
    RecursionTooDeep { word: String, limit: usize },
    /// A numeric literal routed to the reserved float path
    FloatUnsupported { token: String },
}

impl ForthError {
    /// Payload of the second report line, if this error carries one
    ///
    /// The offending word for `WordDoesNotExist`, and the first character of
    /// the offending token for `TokenNotCaught`.
    pub fn context(&self) -> Option<String> {
        match self {
            ForthError::WordDoesNotExist { word } => Some(word.clone()),
            ForthError::TokenNotCaught { token } => {
                Some(token.chars().next().map(String::from).unwrap_or_default())
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ForthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForthError::EmptyStack => write!(f, "{}", EmptyStack),
            ForthError::TooFewItems { .. } => write!(f, "too few items on stack"),
            ForthError::WordDoesNotExist { .. } => {
                write!(f, "word does not exist in word dictionary")
            }
            ForthError::TokenNotCaught { .. } => write!(f, "token was not caught by switch"),
            ForthError::ParseFailure { token, source } => {
                write!(f, "could not parse \"{}\" as an integer: {}", token, source)
            }
            ForthError::DivisionByZero { op } => write!(f, "{}: division by zero", op),
            ForthError::RecursionTooDeep { word, limit } => write!(
                f,
                "word \"{}\" nested too deeply (limit {})",
                word, limit
            ),
            ForthError::FloatUnsupported { .. } => write!(f, "floats not yet implemented"),
        }
    }
}

impl std::error::Error for ForthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ForthError::ParseFailure { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<EmptyStack> for ForthError {
    fn from(_: EmptyStack) -> Self {
        ForthError::EmptyStack
    }
}

/// Failure while loading or validating configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The document is not valid TOML or does not match the schema
    Parse(toml::de::Error),
    /// The document parsed but holds an unusable value
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Failure of the session loop itself, as opposed to a failing line
#[derive(Debug)]
pub enum SessionError {
    /// Writing a report failed
    Io(std::io::Error),
    /// The input stream closed before `bye`
    EndOfInput,
    /// The line source failed for another reason
    Input(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Io(e) => write!(f, "I/O error: {}", e),
            SessionError::EndOfInput => write!(f, "Unable to read line: end of input"),
            SessionError::Input(msg) => write!(f, "Unable to read line: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        SessionError::Io(e)
    }
}
