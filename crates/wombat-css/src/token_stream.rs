//! A cursor over the CSS tokenizer with one-token lookahead.
//!
//! The selector grammar never indexes into a token vector. It works through
//! this stream, which adds four things on top of the tokenizer:
//!
//! - **Boundaries**: a set of token types at which [`TokenStream::at_end`]
//!   reports true, so a sub-grammar can stop in front of a terminator it
//!   does not own (the `)` of `:is(...)`, the `{` after a rule prelude).
//! - **Blocks**: [`TokenStream::consume_block`] runs a closure inside a
//!   `[...]`, `(...)`, `{...}` or `name(...)` block and always leaves the
//!   cursor just past the matching closer, whatever the closure did. This is
//!   how errors inside a block are recovered from.
//! - **Snapshots**: [`TokenStream::state`] / [`TokenStream::restore`] for
//!   backtracking over ambiguous productions.
//! - **Skipping**: [`TokenStream::skip_until`] with nested-block awareness.
//!
//! Every opener and closer that passes through [`TokenStream::consume`] is
//! tracked on a stack of expected closers, so nesting is known even when a
//! caller consumes a `(` by hand. Boundaries only apply at the depth where
//! they were installed.

use crate::tokenizer::{CSSToken, CSSTokenizer, Span, SpannedToken, TokenType};

/// A set of [`TokenType`]s that end the current sub-parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Boundaries(u32);

impl Boundaries {
    /// The empty set.
    pub const NONE: Self = Self(0);

    /// A set holding the given types.
    #[must_use]
    pub fn of(types: &[TokenType]) -> Self {
        types.iter().fold(Self::NONE, |set, &ty| set.with(ty))
    }

    /// This set plus `ty`.
    #[must_use]
    pub const fn with(self, ty: TokenType) -> Self {
        Self(self.0 | ty.bit())
    }

    /// Whether `ty` is a boundary.
    #[must_use]
    pub const fn contains(self, ty: TokenType) -> bool {
        self.0 & ty.bit() != 0
    }

    /// Whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A checkpoint of every piece of mutable stream state.
///
/// Restoring replaces the tokenizer cursor, the lookahead token, the open
/// block stack and the boundary set together; there is no partial restore.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamState {
    position: usize,
    lookahead: Option<SpannedToken>,
    open: Vec<TokenType>,
    boundaries: Boundaries,
    boundary_depth: usize,
}

/// Token cursor used by the selector grammar.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokenizer: CSSTokenizer,
    lookahead: Option<SpannedToken>,
    /// Closers of the blocks consumed so far and not yet closed.
    open: Vec<TokenType>,
    boundaries: Boundaries,
    /// The nesting depth at which `boundaries` apply.
    boundary_depth: usize,
}

impl TokenStream {
    /// Create a stream over `input` with no boundaries.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            tokenizer: CSSTokenizer::new(input),
            lookahead: None,
            open: Vec::new(),
            boundaries: Boundaries::NONE,
            boundary_depth: 0,
        }
    }

    /// The next token and its span, without advancing.
    pub fn peek_spanned(&mut self) -> &SpannedToken {
        let tokenizer = &mut self.tokenizer;
        self.lookahead.get_or_insert_with(|| tokenizer.next_token())
    }

    /// The next token, without advancing.
    ///
    /// Boundaries do not hide tokens: `peek` still shows a boundary token,
    /// only [`TokenStream::at_end`] treats it as the end.
    pub fn peek(&mut self) -> &CSSToken {
        &self.peek_spanned().token
    }

    /// The type of the next token.
    pub fn peek_type(&mut self) -> TokenType {
        self.peek().token_type()
    }

    /// The span of the next token.
    pub fn peek_span(&mut self) -> Span {
        self.peek_spanned().span
    }

    /// Whether the next token is the delim `c`.
    pub fn peek_is_delim(&mut self, c: char) -> bool {
        self.peek().is_delim(c)
    }

    /// Consume and return the next token. At end of input this keeps
    /// returning EOF.
    ///
    /// An opener pushes its closer onto the open block stack; the closer on
    /// top of the stack pops it. Any other closer leaves the stack alone.
    pub fn consume(&mut self) -> SpannedToken {
        let spanned = match self.lookahead.take() {
            Some(token) => token,
            None => self.tokenizer.next_token(),
        };
        let ty = spanned.token.token_type();
        if let Some(closer) = ty.closing() {
            self.open.push(closer);
        } else if self.open.last() == Some(&ty) {
            let _ = self.open.pop();
        }
        spanned
    }

    /// Consume any whitespace tokens. Returns whether anything was consumed.
    pub fn consume_whitespace(&mut self) -> bool {
        let mut consumed = false;
        while self.peek().is_whitespace() {
            let _ = self.consume();
            consumed = true;
        }
        consumed
    }

    /// True at end of input, or when the next token is a boundary and no
    /// block opened since the boundary was installed is still open.
    pub fn at_end(&mut self) -> bool {
        let ty = self.peek_type();
        ty == TokenType::Eof || self.is_boundary(ty)
    }

    fn is_boundary(&self, ty: TokenType) -> bool {
        self.open.len() == self.boundary_depth && self.boundaries.contains(ty)
    }

    /// The number of blocks consumed and not yet closed.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// The current boundary set.
    #[must_use]
    pub const fn boundaries(&self) -> Boundaries {
        self.boundaries
    }

    /// Replace the boundary set. It applies at the current depth.
    pub fn set_boundaries(&mut self, boundaries: Boundaries) {
        self.boundaries = boundaries;
        self.boundary_depth = self.open.len();
    }

    /// Run `body` with `ty` added to the boundary set.
    pub fn with_boundary<R>(&mut self, ty: TokenType, body: impl FnOnce(&mut Self) -> R) -> R {
        let saved = (self.boundaries, self.boundary_depth);
        self.boundaries = saved.0.with(ty);
        self.boundary_depth = self.open.len();
        let result = body(self);
        (self.boundaries, self.boundary_depth) = saved;
        result
    }

    /// [§ 5.4.8 Consume a simple block](https://www.w3.org/TR/css-syntax-3/#consume-simple-block)
    ///
    /// Consume the opening token (`[`, `(`, `{` or a function token), run
    /// `body` with the matching closer as the only boundary, then skip
    /// whatever `body` left unconsumed and consume the closer. On return the
    /// caller's boundary set is back in place and the cursor sits right after
    /// the block, whether `body` succeeded or not. Blocks `body` opened and
    /// left unclosed are skipped as a whole.
    ///
    /// If the next token does not open a block, `body` runs in place.
    pub fn consume_block<R, E>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<R, E>,
    ) -> Result<R, E> {
        let Some(closer) = self.peek_type().closing() else {
            return body(self);
        };
        let _ = self.consume();
        let depth = self.open.len();

        let saved = (self.boundaries, self.boundary_depth);
        self.boundaries = Boundaries::NONE.with(closer);
        self.boundary_depth = depth;
        let result = body(self);

        // Stop once our closer is consumed: either by us at `depth`, or by
        // `body` itself, which drops the stack below `depth`.
        while self.open.len() >= depth {
            if self.peek_type() == TokenType::Eof {
                self.open.truncate(depth - 1);
                break;
            }
            let _ = self.consume();
        }
        (self.boundaries, self.boundary_depth) = saved;
        result
    }

    /// Discard tokens until one of `stop` is next at the starting depth, a
    /// boundary is reached, or input ends. Blocks opened while skipping are
    /// skipped as a whole, so a stop type inside them does not count. A
    /// closer that matches no open block is skipped like any other token;
    /// one that closes a block opened before the call ends the skip.
    pub fn skip_until(&mut self, stop: &[TokenType]) {
        let base = self.open.len();
        while self.open.len() >= base {
            let ty = self.peek_type();
            if ty == TokenType::Eof {
                return;
            }
            if self.open.len() == base && (stop.contains(&ty) || self.is_boundary(ty)) {
                return;
            }
            let _ = self.consume();
        }
    }

    /// Snapshot the stream.
    #[must_use]
    pub fn state(&self) -> StreamState {
        StreamState {
            position: self.tokenizer.position(),
            lookahead: self.lookahead.clone(),
            open: self.open.clone(),
            boundaries: self.boundaries,
            boundary_depth: self.boundary_depth,
        }
    }

    /// Return to a snapshot taken with [`TokenStream::state`].
    pub fn restore(&mut self, state: StreamState) {
        self.tokenizer.seek(state.position);
        self.lookahead = state.lookahead;
        self.open = state.open;
        self.boundaries = state.boundaries;
        self.boundary_depth = state.boundary_depth;
    }

    /// The raw source text of `span`.
    #[must_use]
    pub fn source(&self, span: Span) -> String {
        self.tokenizer.slice(span)
    }
}
