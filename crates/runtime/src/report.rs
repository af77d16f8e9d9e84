//! Per-line reporting
//!
//! ```text
//!   7 OK!                      success with a return value
//!   OK!                        success without one
//!   Error!: <message>          failure, optionally followed by
//!     "<context>"              the offending word or character
//!   Exiting...                 shutdown
//! ```

use std::fmt;

use crate::error::ForthError;
use crate::value::ReturnValue;

/// What happened to one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Completed(ReturnValue),
    Failed(ForthError),
    Shutdown,
}

impl LineOutcome {
    pub fn is_shutdown(&self) -> bool {
        matches!(self, LineOutcome::Shutdown)
    }

    /// Report text for the line, newline-terminated
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LineOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineOutcome::Completed(ReturnValue::None) => writeln!(f, "  OK!"),
            LineOutcome::Completed(value) => writeln!(f, "  {} OK!", value),
            LineOutcome::Failed(error) => {
                writeln!(f, "  Error!: {}", error)?;
                if let Some(context) = error.context() {
                    writeln!(f, "    \"{}\"", context)?;
                }
                Ok(())
            }
            LineOutcome::Shutdown => writeln!(f, "  Exiting..."),
        }
    }
}
