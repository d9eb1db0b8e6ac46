use log::trace;

use crate::{Position, MK_MULTI_TOKEN, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Single pass scanner over a source string.
///
/// Tokens are produced on demand by [`Lexer::next_token`]. Once the source is
/// exhausted every further call returns an `EOF` token at the same position.
#[derive(Debug, Clone)]
pub struct Lexer {
    source: Vec<char>,
    /// Index of `ch` in `source`
    pos: usize,
    ch: Option<char>,
    line: u32,
    column: u32,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        let source: Vec<char> = source.chars().collect();
        let ch = source.first().copied();

        Lexer {
            source,
            pos: 0,
            ch,
            line: 1,
            column: 1,
        }
    }

    /// Scans and returns the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let position = self.current_position();

        let Some(ch) = self.ch else {
            return MK_TOKEN!(TokenKind::EOF, String::new(), position);
        };

        if starts_identifier(ch) {
            let literal = self.read_while(is_identifier);
            let kind = RESERVED_LOOKUP
                .get(literal.as_str())
                .copied()
                .unwrap_or(TokenKind::Identifier);

            return self.emit(MK_TOKEN!(kind, literal, position));
        }

        if ch.is_ascii_digit() {
            let literal = self.read_while(|c| c.is_ascii_digit());
            return self.emit(MK_TOKEN!(TokenKind::Integer, literal, position));
        }

        let (kind, literal) = match ch {
            '=' => MK_MULTI_TOKEN!(self, '=', TokenKind::Assign, ('='; TokenKind::Equals)),
            '!' => MK_MULTI_TOKEN!(self, '!', TokenKind::Not, ('='; TokenKind::NotEquals)),
            '+' => (TokenKind::Plus, String::from(ch)),
            '-' => (TokenKind::Dash, String::from(ch)),
            '*' => (TokenKind::Star, String::from(ch)),
            '/' => (TokenKind::Slash, String::from(ch)),
            '<' => (TokenKind::Less, String::from(ch)),
            '>' => (TokenKind::Greater, String::from(ch)),
            ';' => (TokenKind::Semicolon, String::from(ch)),
            ',' => (TokenKind::Comma, String::from(ch)),
            '(' => (TokenKind::OpenParen, String::from(ch)),
            ')' => (TokenKind::CloseParen, String::from(ch)),
            '{' => (TokenKind::OpenCurly, String::from(ch)),
            '}' => (TokenKind::CloseCurly, String::from(ch)),
            _ => (TokenKind::Illegal, String::from(ch)),
        };

        self.read_char();
        self.emit(MK_TOKEN!(kind, literal, position))
    }

    /// The (line, column) of the current character.
    pub fn current_position(&self) -> Position {
        Position(self.line, self.column)
    }

    pub fn at_eof(&self) -> bool {
        self.ch.is_none()
    }

    fn read_char(&mut self) {
        if self.at_eof() {
            return;
        }

        if self.ch == Some('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        self.pos += 1;
        self.ch = self.source.get(self.pos).copied();
    }

    fn peek_char(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    fn read_while(&mut self, accept: fn(char) -> bool) -> String {
        let start = self.pos;
        while matches!(self.ch, Some(c) if accept(c)) {
            self.read_char();
        }

        self.source[start..self.pos].iter().collect()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, Some(' ' | '\t' | '\n' | '\r')) {
            self.read_char();
        }
    }

    fn emit(&self, token: Token) -> Token {
        trace!("lexed {}", token);
        token
    }
}

/// Yields every token before `EOF`.
impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.kind == TokenKind::EOF {
            None
        } else {
            Some(token)
        }
    }
}

fn starts_identifier(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Collects the whole token stream of `source`, including the trailing `EOF`.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lex = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
