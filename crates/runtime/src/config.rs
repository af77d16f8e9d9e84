//! Interpreter configuration
//!
//! Configuration is a TOML document with an `[interpreter]` table for
//! session settings and a `[words]` table seeding the composite dictionary:
//!
//! ```toml
//! [interpreter]
//! max_depth = 64
//! split = "whitespace"
//!
//! [words]
//! square = "dup *"
//! ```
//!
//! Missing keys fall back to the embedded defaults; unknown keys are
//! rejected.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::builtins::Builtin;
use crate::dictionary::{CompositeWord, Dictionary};
use crate::error::ConfigError;
use crate::interpreter::DEFAULT_MAX_DEPTH;
use crate::token::{self, SplitMode, TokenKind};

/// Embedded default configuration
pub static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Session settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterpreterConfig {
    /// Deepest allowed composite expansion
    pub max_depth: usize,
    /// How lines are cut into tokens
    pub split: SplitMode,
    /// Prompt shown before each line
    pub prompt: String,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            split: SplitMode::Space,
            prompt: String::new(),
        }
    }
}

/// Full configuration document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub interpreter: InterpreterConfig,
    /// Composite words by name
    #[serde(default)]
    pub words: BTreeMap<String, String>,
}

impl Config {
    /// Parse and validate a TOML document
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// The embedded default document
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml(DEFAULT_CONFIG)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Check values the schema alone cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interpreter.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "interpreter.max_depth must be at least 1".to_string(),
            ));
        }
        for (name, body) in &self.words {
            if !is_resolvable_name(name) {
                return Err(ConfigError::Invalid(format!(
                    "word '{}' can never be invoked: it does not read as a word",
                    name
                )));
            }
            if body.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "word '{}' has an empty body",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Build the session dictionary from the `[words]` table
    pub fn dictionary(&self) -> Dictionary {
        Dictionary::with_composites(self.words.iter().map(|(name, body)| {
            if Builtin::from_name(name).is_some() {
                warn!(word = %name, "composite definition shadows a native word");
            }
            CompositeWord::new(name.as_str(), body.as_str())
        }))
    }
}

/// Whether a token with this text would ever reach the dictionary
///
/// Word-class names always do. Number-class names only do when they are
/// neither float literals nor valid integers, since those are consumed as
/// numbers first.
fn is_resolvable_name(name: &str) -> bool {
    match token::classify(name) {
        TokenKind::Word => true,
        TokenKind::Number => !token::is_float_literal(name) && name.parse::<i64>().is_err(),
        TokenKind::Unrecognized => false,
    }
}
