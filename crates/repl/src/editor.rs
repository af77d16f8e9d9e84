//! Terminal line source backed by rustyline

use std::path::PathBuf;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tinyforth_runtime::{LineSource, SessionError};
use tracing::{debug, warn};

/// History file name, relative to the home directory
const HISTORY_FILE: &str = ".tinyforth_history";

/// Default history file path
pub fn history_file() -> Option<PathBuf> {
    home::home_dir().map(|d| d.join(HISTORY_FILE))
}

/// Interactive line source with editing and optional persisted history
pub struct EditorSource {
    editor: DefaultEditor,
    history: Option<PathBuf>,
}

impl EditorSource {
    pub fn new(history: Option<PathBuf>) -> Result<Self, SessionError> {
        let mut editor = DefaultEditor::new()
            .map_err(|e| SessionError::Input(format!("cannot initialize line editor: {}", e)))?;
        if let Some(ref path) = history {
            // A missing history file is normal on first run
            if let Err(e) = editor.load_history(path) {
                debug!(path = %path.display(), error = %e, "no history loaded");
            }
        }
        Ok(EditorSource { editor, history })
    }

    /// Write history back to disk, if enabled
    pub fn save_history(&mut self) {
        if let Some(ref path) = self.history
            && let Err(e) = self.editor.save_history(path)
        {
            warn!(path = %path.display(), error = %e, "failed to save history");
        }
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, SessionError> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = self.editor.add_history_entry(line.as_str());
                    }
                    return Ok(Some(line));
                }
                Err(ReadlineError::Interrupted) => {
                    // Cancel the current input, keep the session
                    println!("^C");
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(SessionError::Input(e.to_string())),
            }
        }
    }
}
