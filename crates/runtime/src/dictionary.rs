//! Dictionary Resolver
//!
//! Two tables are consulted in order:
//! 1. Composite words: a name bound to a body of tokens in the same language
//! 2. Native words: the closed [`Builtin`] set
//!
//! A composite definition shadows a native word of the same name, so a
//! session can redefine any built-in without touching native code.

use std::collections::HashMap;
use std::rc::Rc;

use crate::builtins::Builtin;

/// A word defined as a sequence of other tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeWord {
    name: String,
    body: String,
    tokens: Vec<String>,
}

impl CompositeWord {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        let body = body.into();
        let tokens = body.split_whitespace().map(str::to_owned).collect();
        CompositeWord {
            name: name.into(),
            body,
            tokens,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Body split on whitespace, in execution order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// The `index`-th body token, if the body is that long
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }
}

/// Result of resolving a word name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordBinding {
    Composite(Rc<CompositeWord>),
    Native(Builtin),
}

/// The session's word tables
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    composites: HashMap<String, Rc<CompositeWord>>,
}

impl Dictionary {
    /// Dictionary with only the native words
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary seeded with the given composite words
    pub fn with_composites(words: impl IntoIterator<Item = CompositeWord>) -> Self {
        let mut dictionary = Self::new();
        for word in words {
            dictionary.define(word);
        }
        dictionary
    }

    /// Bind a composite word, replacing any previous composite of that name
    ///
    /// Returns the replaced definition, if there was one.
    pub fn define(&mut self, word: CompositeWord) -> Option<Rc<CompositeWord>> {
        self.composites.insert(word.name.clone(), Rc::new(word))
    }

    /// Resolve a name: composite table first, then native table
    pub fn resolve(&self, name: &str) -> Option<WordBinding> {
        if let Some(word) = self.composites.get(name) {
            return Some(WordBinding::Composite(Rc::clone(word)));
        }
        Builtin::from_name(name).map(WordBinding::Native)
    }

    /// Whether `name` resolves to anything
    pub fn contains(&self, name: &str) -> bool {
        self.composites.contains_key(name) || Builtin::from_name(name).is_some()
    }

    /// Composite words, sorted by name
    pub fn composites(&self) -> Vec<&CompositeWord> {
        let mut words: Vec<&CompositeWord> = self.composites.values().map(Rc::as_ref).collect();
        words.sort_by(|a, b| a.name.cmp(&b.name));
        words
    }
}
