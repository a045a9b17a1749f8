//! CSS Token types per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
//!
//! "The output of the tokenization step is a stream of zero or more of the
//! following tokens: `<ident-token>`, `<function-token>`, `<at-keyword-token>`,
//! `<hash-token>`, `<string-token>`, `<bad-string-token>`, `<url-token>`,
//! `<bad-url-token>`, `<delim-token>`, `<number-token>`, `<percentage-token>`,
//! `<dimension-token>`, `<whitespace-token>`, `<CDO-token>`, `<CDC-token>`,
//! `<colon-token>`, `<semicolon-token>`, `<comma-token>`, `<[-token>`, `<]-token>`,
//! `<(-token>`, `<)-token>`, `<{-token>`, and `<}-token>`."
//!
//! On top of that list we keep the [CSS 2.1 § 4.1.1](https://www.w3.org/TR/CSS21/syndata.html#tokenization)
//! match operators (`~=`, `|=`, `^=`, `$=`, `*=`) and the column token `||`,
//! so the attribute selector grammar can dispatch on a single token.

use core::fmt;

use serde::Serialize;
use strum_macros::Display;

/// Whether a `<hash-token>` could be an id selector.
///
/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams):
/// "`<hash-token>` [has] a type flag set to either \"id\" or
/// \"unrestricted\". The type flag defaults to \"unrestricted\" if not
/// otherwise set."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashType {
    /// The value would start an identifier: `#main`, `#\31 23`.
    Id,
    /// Anything else: `#123`, `#-1`.
    Unrestricted,
}

/// Integer versus fractional numbers. The `An+B` grammar only accepts
/// the former.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericType {
    /// No `.` and no exponent.
    Integer,
    /// Has a fractional part or an exponent.
    Number,
}

/// One token. Variant names follow the token diagrams in CSS Syntax Level
/// 3; the match operators and `||` come from CSS 2.1.
///
/// Numeric tokens carry `int_value` alongside the float so that integer
/// consumers never round-trip through `f64`. It is `Some` exactly when
/// `numeric_type` is [`NumericType::Integer`] and the value fits in an `i64`.
#[derive(Debug, Clone, PartialEq)]
pub enum CSSToken {
    /// `foo`, `-webkit-x`, `\31 a` (escapes decoded)
    Ident(String),

    /// `is(`: the name without the `(`
    Function(String),

    /// `@media`: the name without the `@`
    AtKeyword(String),

    /// `#name`
    Hash {
        /// The name after `#`, escapes decoded.
        value: String,
        /// See [`HashType`].
        hash_type: HashType,
    },

    /// A quoted string with the quotes stripped.
    String(String),

    /// A string interrupted by a newline.
    BadString,

    /// `url(foo.png)` with an unquoted argument.
    Url(String),

    /// A malformed unquoted `url(`.
    BadUrl,

    /// Any single code point no other token claims.
    Delim(char),

    /// `3`, `+3`, `-1.5e2`
    Number {
        /// The parsed value.
        value: f64,
        /// The value as an integer, for integer tokens.
        int_value: Option<i64>,
        /// Integer or not.
        numeric_type: NumericType,
    },

    /// `50%`
    Percentage {
        /// The value before `%`.
        value: f64,
        /// The value as an integer, for integer tokens.
        int_value: Option<i64>,
        /// Integer or not.
        numeric_type: NumericType,
    },

    /// `2n`, `10px`, `2n-1` (the tokenizer folds `-1` into the unit)
    Dimension {
        /// The value before the unit.
        value: f64,
        /// The value as an integer, for integer tokens.
        int_value: Option<i64>,
        /// Integer or not.
        numeric_type: NumericType,
        /// The unit, as written.
        unit: String,
    },

    /// One or more whitespace characters.
    Whitespace,

    /// `<!--`
    CDO,

    /// `-->`
    CDC,

    /// `:`
    Colon,

    /// `;`
    Semicolon,

    /// `,`
    Comma,

    /// `[`
    LeftBracket,

    /// `]`
    RightBracket,

    /// `(`
    LeftParen,

    /// `)`
    RightParen,

    /// `{`
    LeftBrace,

    /// `}`
    RightBrace,

    /// `~=`
    IncludeMatch,

    /// `|=`
    DashMatch,

    /// `^=`
    PrefixMatch,

    /// `$=`
    SuffixMatch,

    /// `*=`
    SubstringMatch,

    /// `||`
    Column,

    /// End of input. Repeats forever once reached.
    EOF,
}

/// The type of a [`CSSToken`] without its value.
///
/// Used wherever the parser reasons about token kinds as a set: stream
/// boundaries, `skip_until` stop lists and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum TokenType {
    /// `<ident-token>`
    Ident,
    /// `<function-token>`
    Function,
    /// `<at-keyword-token>`
    AtKeyword,
    /// `<hash-token>`
    Hash,
    /// `<string-token>`
    String,
    /// `<bad-string-token>`
    BadString,
    /// `<url-token>`
    Url,
    /// `<bad-url-token>`
    BadUrl,
    /// `<delim-token>`
    Delim,
    /// `<number-token>`
    Number,
    /// `<percentage-token>`
    Percentage,
    /// `<dimension-token>`
    Dimension,
    /// `<whitespace-token>`
    Whitespace,
    /// `<CDO-token>`
    Cdo,
    /// `<CDC-token>`
    Cdc,
    /// `<colon-token>`
    Colon,
    /// `<semicolon-token>`
    Semicolon,
    /// `<comma-token>`
    Comma,
    /// `<[-token>`
    LeftBracket,
    /// `<]-token>`
    RightBracket,
    /// `<(-token>`
    LeftParen,
    /// `<)-token>`
    RightParen,
    /// `<{-token>`
    LeftBrace,
    /// `<}-token>`
    RightBrace,
    /// `~=`
    IncludeMatch,
    /// `|=`
    DashMatch,
    /// `^=`
    PrefixMatch,
    /// `$=`
    SuffixMatch,
    /// `*=`
    SubstringMatch,
    /// `||`
    Column,
    /// End of input
    Eof,
}

impl TokenType {
    /// The bit this type occupies in a boundary set.
    #[must_use]
    pub const fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// The closing token type for a block opened by this type, if any.
    ///
    /// [§ 5.4.8 Consume a simple block](https://www.w3.org/TR/css-syntax-3/#consume-simple-block):
    /// "The ending token is the mirror variant of the current input token."
    /// A `<function-token>` is closed by `<)-token>`.
    #[must_use]
    pub const fn closing(self) -> Option<Self> {
        match self {
            Self::LeftBracket => Some(Self::RightBracket),
            Self::LeftParen | Self::Function => Some(Self::RightParen),
            Self::LeftBrace => Some(Self::RightBrace),
            _ => None,
        }
    }

    /// Whether this type closes a block.
    #[must_use]
    pub const fn is_closing(self) -> bool {
        matches!(self, Self::RightBracket | Self::RightParen | Self::RightBrace)
    }
}

impl CSSToken {
    /// `Ident(value)`
    #[must_use]
    pub fn ident(value: impl Into<String>) -> Self {
        Self::Ident(value.into())
    }

    /// `Function(name)`
    #[must_use]
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function(name.into())
    }

    /// `String(value)`
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// `Delim(c)`
    #[must_use]
    pub const fn delim(c: char) -> Self {
        Self::Delim(c)
    }

    /// Whether this is [`CSSToken::EOF`].
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EOF)
    }

    /// Whether this is [`CSSToken::Whitespace`].
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace)
    }

    /// Whether this is the delim `c`.
    #[must_use]
    pub fn is_delim(&self, c: char) -> bool {
        *self == Self::Delim(c)
    }

    /// The value-less type of this token.
    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        match self {
            Self::Ident(_) => TokenType::Ident,
            Self::Function(_) => TokenType::Function,
            Self::AtKeyword(_) => TokenType::AtKeyword,
            Self::Hash { .. } => TokenType::Hash,
            Self::String(_) => TokenType::String,
            Self::BadString => TokenType::BadString,
            Self::Url(_) => TokenType::Url,
            Self::BadUrl => TokenType::BadUrl,
            Self::Delim(_) => TokenType::Delim,
            Self::Number { .. } => TokenType::Number,
            Self::Percentage { .. } => TokenType::Percentage,
            Self::Dimension { .. } => TokenType::Dimension,
            Self::Whitespace => TokenType::Whitespace,
            Self::CDO => TokenType::Cdo,
            Self::CDC => TokenType::Cdc,
            Self::Colon => TokenType::Colon,
            Self::Semicolon => TokenType::Semicolon,
            Self::Comma => TokenType::Comma,
            Self::LeftBracket => TokenType::LeftBracket,
            Self::RightBracket => TokenType::RightBracket,
            Self::LeftParen => TokenType::LeftParen,
            Self::RightParen => TokenType::RightParen,
            Self::LeftBrace => TokenType::LeftBrace,
            Self::RightBrace => TokenType::RightBrace,
            Self::IncludeMatch => TokenType::IncludeMatch,
            Self::DashMatch => TokenType::DashMatch,
            Self::PrefixMatch => TokenType::PrefixMatch,
            Self::SuffixMatch => TokenType::SuffixMatch,
            Self::SubstringMatch => TokenType::SubstringMatch,
            Self::Column => TokenType::Column,
            Self::EOF => TokenType::Eof,
        }
    }
}

/// Describes the token for error messages: `identifier 'foo'`, `'>'`,
/// `end of input`.
impl fmt::Display for CSSToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let punctuation = match self {
            Self::Ident(name) => return write!(f, "identifier '{name}'"),
            Self::Function(name) => return write!(f, "function '{name}('"),
            Self::AtKeyword(name) => return write!(f, "at-keyword '@{name}'"),
            Self::Hash { value, .. } => return write!(f, "hash '#{value}'"),
            Self::String(value) => return write!(f, "string {value:?}"),
            Self::Url(value) => return write!(f, "url '{value}'"),
            Self::Number { value, .. } => return write!(f, "number {value}"),
            Self::Percentage { value, .. } => return write!(f, "percentage {value}%"),
            Self::Dimension { value, unit, .. } => return write!(f, "dimension {value}{unit}"),
            Self::Delim(c) => return write!(f, "'{c}'"),
            Self::BadString => return f.write_str("unterminated string"),
            Self::BadUrl => return f.write_str("malformed url"),
            Self::Whitespace => return f.write_str("whitespace"),
            Self::EOF => return f.write_str("end of input"),
            Self::CDO => "<!--",
            Self::CDC => "-->",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::IncludeMatch => "~=",
            Self::DashMatch => "|=",
            Self::PrefixMatch => "^=",
            Self::SuffixMatch => "$=",
            Self::SubstringMatch => "*=",
            Self::Column => "||",
        };
        write!(f, "'{punctuation}'")
    }
}

/// A half-open range of char offsets into the tokenizer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    /// Offset of the first char of the token.
    pub start: usize,
    /// Offset one past the last char of the token.
    pub end: usize,
}

impl Span {
    /// Create a span covering `start..end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A token together with the source range it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    /// The decoded token.
    pub token: CSSToken,
    /// Where the token came from in the input.
    pub span: Span,
}
