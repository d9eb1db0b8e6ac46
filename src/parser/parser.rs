//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct. The parser pulls tokens from
//! the lexer one at a time and keeps exactly two of them: the current token
//! and the peek token. Expressions are parsed with a Pratt parser driven by
//! NUD/LED handlers looked up by token kind.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::collections::HashMap;

use log::{debug, trace, warn};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_stmt_recovering,
};

/// How deeply expressions may nest before parsing gives up on the statement.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The main parser structure that maintains parsing state.
///
/// A parser is single use: the lexer it owns is consumed by the first call to
/// [`Parser::parse_program`].
pub struct Parser {
    /// Source of tokens
    lexer: Lexer,
    /// The token being looked at
    current_token: Token,
    /// One token of lookahead
    peek_token: Token,
    /// Diagnostics recorded while parsing, in the order they were found
    errors: Vec<Error>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Set once `parse_program` has run
    consumed: bool,
    /// Open expression levels
    depth: usize,
}

impl Parser {
    /// Creates a new Parser reading from `lexer` and registers the grammar's
    /// handlers.
    pub fn new(mut lexer: Lexer) -> Self {
        let current_token = lexer.next_token();
        let peek_token = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current_token,
            peek_token,
            errors: vec![],
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            consumed: false,
            depth: 0,
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Parses statements until `EOF`.
    ///
    /// Never fails: syntax errors are collected in [`Parser::errors`] and the
    /// statements that could be parsed are returned. Calling this a second
    /// time returns an empty program, since the token stream is already used up.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::new();

        if self.consumed {
            warn!("parse_program called again on a consumed parser");
            return program;
        }
        self.consumed = true;

        while self.current_token_kind() != TokenKind::EOF {
            if let Some(stmt) = parse_stmt_recovering(self) {
                trace!("parsed statement `{}`", stmt);
                program.statements.push(stmt);
            }
            self.advance();
        }

        program
    }

    /// Errors found by `parse_program`. Empty means the program is well formed.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    pub fn push_error(&mut self, error: Error) {
        debug!("syntax error at {}: {}", error.get_position(), error);
        self.errors.push(error);
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current_token
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token.kind
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek_token.kind
    }

    /// Shifts the peek token into the current slot and pulls a new peek token.
    pub fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current_token = std::mem::replace(&mut self.peek_token, next);
    }

    /// Advances if the peek token is of the expected kind.
    ///
    /// # Returns
    ///
    /// Returns Ok(()) after advancing, otherwise an `UnexpectedToken` error
    /// positioned at the peek token. The parser does not move on failure.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<(), Error> {
        if self.peek_token_kind() == expected_kind {
            self.advance();
            Ok(())
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    got: self.peek_token_kind(),
                },
                self.peek_token.position,
            ))
        }
    }

    /// Skips ahead to the end of the failed statement: the next `;`, `EOF`,
    /// or the last token before a `}` or a statement keyword.
    pub fn synchronize(&mut self) {
        while !self.current_token_kind().is_terminator()
            && self.peek_token_kind() != TokenKind::CloseCurly
            && !self.stmt_lookup.contains_key(&self.peek_token_kind())
        {
            self.advance();
        }
    }

    /// Enters one level of expression nesting.
    ///
    /// Fails with `NestingTooDeep` once [`MAX_NESTING_DEPTH`] levels are open.
    /// Every successful call must be paired with [`Parser::leave_nesting`].
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.current_token.position,
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn leave_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn current_precedence(&self) -> BindingPower {
        self.precedence_of(self.current_token_kind())
    }

    pub fn peek_precedence(&self) -> BindingPower {
        self.precedence_of(self.peek_token_kind())
    }

    fn precedence_of(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Lowest)
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}
