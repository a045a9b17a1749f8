//! Selector parse errors.

use thiserror::Error;

use crate::tokenizer::Span;

/// Broad classes of selector parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required token or shape was missing or malformed.
    GrammarViolation,
    /// Valid grammar that this parser recognizes but does not support.
    Unimplemented,
    /// Extra tokens after an otherwise complete construct.
    TrailingInput,
}

/// An error produced while parsing a selector.
///
/// Every variant carries the span of the token where parsing stopped, in
/// char offsets into the parsed text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// A compound selector had neither a type selector nor any simple selector.
    #[error("no compound selector found at {span}")]
    NoCompoundSelector {
        /// Where a compound selector was expected.
        span: Span,
    },

    /// A specific token was required.
    #[error("expected {expected}, found {found} at {span}")]
    Expected {
        /// What the grammar wanted.
        expected: &'static str,
        /// The token that was there instead.
        found: String,
        /// Location of `found`.
        span: Span,
    },

    /// `#123`: a hash token whose value is not an identifier.
    #[error("'#{value}' is not a valid id selector at {span}")]
    InvalidId {
        /// The hash value.
        value: String,
        /// Location of the hash token.
        span: Span,
    },

    /// A pseudo-class or pseudo-element name that no table knows.
    #[error("unknown pseudo-class or pseudo-element '{name}' at {span}")]
    UnknownPseudo {
        /// The name as written.
        name: String,
        /// Location of the name token.
        span: Span,
    },

    /// `::hover`, or `:marker` for a pseudo-element without a legacy
    /// single-colon form.
    #[error("'{name}' cannot be used with {colons} colon(s) at {span}")]
    WrongColonCount {
        /// The name as written.
        name: String,
        /// How many colons preceded it.
        colons: usize,
        /// Location of the name token.
        span: Span,
    },

    /// `:host()`, `:host-context()` and `::slotted()` take exactly one selector.
    #[error(":{name}() takes exactly one selector, found {count} at {span}")]
    WrongSelectorCount {
        /// The pseudo name.
        name: String,
        /// How many selectors the list held.
        count: usize,
        /// Location of the closing token.
        span: Span,
    },

    /// An `An+B` expression that does not follow the micro-syntax.
    #[error("malformed An+B expression at {span}")]
    MalformedAnPlusB {
        /// Location of the offending token.
        span: Span,
    },

    /// `of <selector-list>` after `:nth-of-type()` or `:nth-last-of-type()`.
    #[error("'of <selector-list>' is not allowed in :{name}() at {span}")]
    OfNotAllowed {
        /// The pseudo name.
        name: String,
        /// Location of the `of` keyword.
        span: Span,
    },

    /// Recognized syntax with no implementation behind it.
    #[error("{feature} is not implemented (at {span})")]
    NotImplemented {
        /// What is missing.
        feature: &'static str,
        /// Where it was encountered.
        span: Span,
    },

    /// Tokens left over inside a block or after a selector.
    #[error("unexpected {found} at {span}")]
    TrailingInput {
        /// The first leftover token.
        found: String,
        /// Its location.
        span: Span,
    },
}

impl SelectorError {
    /// The class of failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotImplemented { .. } => ErrorKind::Unimplemented,
            Self::TrailingInput { .. } => ErrorKind::TrailingInput,
            Self::NoCompoundSelector { .. }
            | Self::Expected { .. }
            | Self::InvalidId { .. }
            | Self::UnknownPseudo { .. }
            | Self::WrongColonCount { .. }
            | Self::WrongSelectorCount { .. }
            | Self::MalformedAnPlusB { .. }
            | Self::OfNotAllowed { .. } => ErrorKind::GrammarViolation,
        }
    }

    /// Where parsing stopped.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::NoCompoundSelector { span }
            | Self::Expected { span, .. }
            | Self::InvalidId { span, .. }
            | Self::UnknownPseudo { span, .. }
            | Self::WrongColonCount { span, .. }
            | Self::WrongSelectorCount { span, .. }
            | Self::MalformedAnPlusB { span }
            | Self::OfNotAllowed { span, .. }
            | Self::NotImplemented { span, .. }
            | Self::TrailingInput { span, .. } => *span,
        }
    }
}
