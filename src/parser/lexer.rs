//! NC Lexer
//!
//! Regex-driven tokenization of one NC line. The format is small and ad hoc,
//! so one combined pattern pulls out comments, variable assignments and
//! address words in order of appearance.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::ast::BlockSkip;

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\([^)]*\)|#\d+=(?:\*+|-?[0-9.]+)|[A-Za-z](?:\*+|-?[0-9.]+)")
        .expect("invalid token regex")
});

static BLOCK_SKIP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/([1-9])?").expect("invalid block skip regex"));

/// Token types on an NC line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// Parenthesized comment like "(3-M10)"
    Comment,
    /// Address word like "X50." or "S****"
    Word,
    /// Variable assignment like "#100=1."
    Variable,
}

/// A token with its text and byte span within the line
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Strip a leading block skip marker, returning it with the rest of the line
pub fn split_block_skip(line: &str) -> (Option<BlockSkip>, &str) {
    match BLOCK_SKIP_PATTERN.captures(line) {
        Some(captures) => {
            let skip = match captures.get(1) {
                Some(digit) => BlockSkip::Switch(digit.as_str().parse().unwrap_or(1)),
                None => BlockSkip::Default,
            };
            let consumed = captures.get(0).map_or(0, |m| m.end());
            (Some(skip), &line[consumed..])
        }
        None => (None, line),
    }
}

/// Tokenize the body of a line (block skip already removed)
pub fn tokenize_line(line: &str) -> Vec<Token> {
    TOKEN_PATTERN
        .find_iter(line)
        .map(|m| {
            let text = m.as_str();
            let kind = match text.chars().next() {
                Some('(') => TokenKind::Comment,
                Some('#') => TokenKind::Variable,
                _ => TokenKind::Word,
            };
            Token {
                kind,
                text: text.to_string(),
                start: m.start(),
                end: m.end(),
            }
        })
        .collect()
}

/// Characters the tokens did not cover; these are lost on serialization
pub fn skipped_text(line: &str, tokens: &[Token]) -> String {
    let mut skipped = String::new();
    let mut cursor = 0;
    for token in tokens {
        skipped.push_str(&line[cursor..token.start]);
        cursor = token.end;
    }
    skipped.push_str(&line[cursor..]);
    skipped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_words() {
        let tokens = tokenize_line("G90G54G0X50.Y-12.5");

        assert_eq!(tokens.len(), 5);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Word));
        assert_eq!(tokens[3].text, "X50.");
        assert_eq!(tokens[4].text, "Y-12.5");
    }

    #[test]
    fn test_tokenize_placeholders() {
        let tokens = tokenize_line("M3S****");
        assert_eq!(tokens[1].text, "S****");
    }

    #[test]
    fn test_comment_hides_addresses() {
        let tokens = tokenize_line("G0(X10 DRILL)Z5.");

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::Comment);
        assert_eq!(tokens[1].text, "(X10 DRILL)");
        assert_eq!(tokens[2].text, "Z5.");
    }

    #[test]
    fn test_variable_assignment() {
        let tokens = tokenize_line("#100=-1.5X1.");

        assert_eq!(tokens[0].kind, TokenKind::Variable);
        assert_eq!(tokens[0].text, "#100=-1.5");
        assert_eq!(tokens[1].kind, TokenKind::Word);
    }

    #[test]
    fn test_block_skip_default_and_numbered() {
        assert_eq!(split_block_skip("/G0"), (Some(BlockSkip::Default), "G0"));
        assert_eq!(split_block_skip("/5G0"), (Some(BlockSkip::Switch(5)), "G0"));
        assert_eq!(split_block_skip("G0"), (None, "G0"));
    }

    #[test]
    fn test_skipped_text() {
        let line = "G0 X1. ;note";
        let tokens = tokenize_line(line);
        assert_eq!(skipped_text(line, &tokens), "  ;note");
        assert!(skipped_text("G0X1.", &tokenize_line("G0X1.")).is_empty());
    }
}
