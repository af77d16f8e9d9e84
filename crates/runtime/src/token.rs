//! Token classification and line splitting
//!
//! A token's kind is decided by its first character alone. Number
//! characters are checked before word characters, so `-` is a number even
//! though it is also in the word alphabet.

/// Characters that start a numeric literal
pub const NUMBER_CHARS: &str = "0123456789-";

/// Characters that start a word
pub const WORD_CHARS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ.!?<>,@:;+-*/$%^&#";

/// Classification of a single token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Word,
    Unrecognized,
}

/// Classify a token by its first character
pub fn classify(token: &str) -> TokenKind {
    match token.chars().next() {
        Some(c) if NUMBER_CHARS.contains(c) => TokenKind::Number,
        Some(c) if WORD_CHARS.contains(c) => TokenKind::Word,
        _ => TokenKind::Unrecognized,
    }
}

/// Whether a numeric token is routed to the float path
///
/// A trailing `e` marks a float literal. No integer literal ends in `e`, but
/// the rule is a heuristic rather than a grammar.
pub fn is_float_literal(token: &str) -> bool {
    token.ends_with('e')
}

/// How a line is cut into tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Split on every single ASCII space; runs of spaces yield empty tokens
    #[default]
    Space,
    /// Split on runs of any whitespace; no empty tokens
    Whitespace,
}

impl SplitMode {
    /// Split a line (delimiter already stripped) into tokens
    pub fn split<'a>(self, line: &'a str) -> Vec<&'a str> {
        match self {
            SplitMode::Space => line.split(' ').collect(),
            SplitMode::Whitespace => line.split_whitespace().collect(),
        }
    }
}

impl std::str::FromStr for SplitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "space" => Ok(SplitMode::Space),
            "whitespace" => Ok(SplitMode::Whitespace),
            other => Err(format!(
                "unknown split mode '{}' (expected 'space' or 'whitespace')",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_are_numbers() {
        assert_eq!(classify("0"), TokenKind::Number);
        assert_eq!(classify("42"), TokenKind::Number);
        assert_eq!(classify("9abc"), TokenKind::Number);
    }

    #[test]
    fn test_minus_is_a_number_first() {
        assert_eq!(classify("-"), TokenKind::Number);
        assert_eq!(classify("-17"), TokenKind::Number);
    }

    #[test]
    fn test_word_alphabet() {
        for token in ["bye", ".", ".s", "+", "*", "/", "mod", "Negate", "#x", "@", "^"] {
            assert_eq!(classify(token), TokenKind::Word, "token {:?}", token);
        }
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(classify(""), TokenKind::Unrecognized);
        assert_eq!(classify("~"), TokenKind::Unrecognized);
        assert_eq!(classify("(comment"), TokenKind::Unrecognized);
        assert_eq!(classify("\"str"), TokenKind::Unrecognized);
        assert_eq!(classify("\tdup"), TokenKind::Unrecognized);
    }

    #[test]
    fn test_float_heuristic() {
        assert!(is_float_literal("1e"));
        assert!(is_float_literal("-e"));
        assert!(!is_float_literal("10"));
        assert!(!is_float_literal("1e5"));
    }

    #[test]
    fn test_space_split_keeps_empty_tokens() {
        assert_eq!(SplitMode::Space.split("1  2"), vec!["1", "", "2"]);
        assert_eq!(SplitMode::Space.split(". "), vec![".", ""]);
        assert_eq!(SplitMode::Space.split("1\t2"), vec!["1\t2"]);
    }

    #[test]
    fn test_whitespace_split_drops_empty_tokens() {
        assert_eq!(SplitMode::Whitespace.split(" 1  2\t+ "), vec!["1", "2", "+"]);
        assert!(SplitMode::Whitespace.split("   ").is_empty());
    }

    #[test]
    fn test_split_mode_from_str() {
        assert_eq!("space".parse::<SplitMode>(), Ok(SplitMode::Space));
        assert_eq!("whitespace".parse::<SplitMode>(), Ok(SplitMode::Whitespace));
        assert!("tabs".parse::<SplitMode>().is_err());
    }
}
