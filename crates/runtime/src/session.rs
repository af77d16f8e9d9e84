//! Session Loop
//!
//! Reads a line, evaluates it, writes its report, and repeats until a line
//! reaches shutdown. End of input before `bye` is an input failure and is
//! returned to the caller as `SessionError::EndOfInput`.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::SessionError;
use crate::interpreter::Interpreter;

/// Somewhere lines of input come from
pub trait LineSource {
    /// Read one line without its delimiter. `Ok(None)` means end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, SessionError>;
}

/// Line source over any buffered reader (pipes, files, tests)
///
/// The prompt is ignored; there is no terminal to show it on. Bytes that
/// are not valid UTF-8 are replaced rather than rejected.
pub struct BufReadSource<R> {
    reader: R,
}

impl<R: BufRead> BufReadSource<R> {
    pub fn new(reader: R) -> Self {
        BufReadSource { reader }
    }
}

impl<R: BufRead> LineSource for BufReadSource<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>, SessionError> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        // Invalid UTF-8 becomes U+FFFD, which no token class accepts, so a
        // bad line fails on its own instead of ending the session.
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

/// Run the read-eval-report loop until shutdown or input failure
pub fn run<S, W>(
    interpreter: &mut Interpreter,
    source: &mut S,
    out: &mut W,
    prompt: &str,
) -> Result<(), SessionError>
where
    S: LineSource + ?Sized,
    W: Write + ?Sized,
{
    let mut lines = 0usize;
    loop {
        let Some(line) = source.read_line(prompt)? else {
            debug!(lines, "input closed before shutdown");
            return Err(SessionError::EndOfInput);
        };
        lines += 1;

        let outcome = interpreter.eval_line(&line);
        out.write_all(outcome.render().as_bytes())?;
        out.flush()?;

        if outcome.is_shutdown() {
            debug!(lines, "session finished");
            return Ok(());
        }
    }
}
