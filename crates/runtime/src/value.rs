//! Values a line can report back to the user

use std::fmt;

/// Value set by the most recently executed word on a line
///
/// Cleared after every line is reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReturnValue {
    #[default]
    None,
    /// Set by `.`
    Integer(i64),
    /// Set by `.s`
    Text(String),
}

impl ReturnValue {
    pub fn is_none(&self) -> bool {
        matches!(self, ReturnValue::None)
    }
}

impl fmt::Display for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnValue::None => Ok(()),
            ReturnValue::Integer(n) => write!(f, "{}", n),
            ReturnValue::Text(s) => write!(f, "{}", s),
        }
    }
}
