//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_MULTI_TOKEN!` - Picks between a one and a two character operator
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$literal` - The token's literal text
/// * `$position` - The (line, column) of the token's first character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, "42".to_string(), position);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $literal:expr, $position:expr) => {
        Token {
            kind: $kind,
            literal: $literal,
            position: $position,
        }
    };
}

/// Looks one character ahead to choose between a single character token and
/// its two character extension.
///
/// Expands to a `(TokenKind, String)` pair and consumes the second character
/// when it matches.
///
/// # Example
///
/// ```ignore
/// let (kind, literal) = MK_MULTI_TOKEN!(self, '=', TokenKind::Assign, ('='; TokenKind::Equals));
/// ```
#[macro_export]
macro_rules! MK_MULTI_TOKEN {
    ($lexer:expr, $first:expr, $single:expr, ($second:expr; $double:expr)) => {
        if $lexer.peek_char() == Some($second) {
            $lexer.read_char();
            ($double, format!("{}{}", $first, $second))
        } else {
            ($single, String::from($first))
        }
    };
}
