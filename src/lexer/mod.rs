//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Whitespace skipping
//! - Recognition of keywords, identifiers and integer literals
//! - One character lookahead for two character operators
//! - Line and column tracking for error reporting

pub mod lexer;
pub mod tokens;
