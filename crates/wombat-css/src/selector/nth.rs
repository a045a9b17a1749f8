//! [CSS Syntax § 6 The An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
//!
//! "the An+B notation was originally defined using a slightly different
//! tokenizer than the rest of CSS, resulting in a somewhat odd definition
//! when expressed in terms of CSS tokens."
//!
//! The tokenizer fuses parts of the expression: `2n+1` arrives as the
//! dimension `2n` and the number `+1`, `2n-1` as a single dimension with
//! unit `n-1`, and `-n-1` as a single identifier. This module takes the
//! fused tokens apart again.

use crate::error::SelectorError;
use crate::token_stream::TokenStream;
use crate::tokenizer::{CSSToken, Span, SpannedToken};

use super::model::{AnPlusB, SelectorFlags};
use super::parser::{SelectorParser, trailing};
use super::pseudo::PseudoType;
use super::simple::inherit_nested_flags;

impl SelectorParser<'_> {
    /// [§ 4.10 Child-indexed pseudo-classes](https://www.w3.org/TR/selectors-4/#child-index)
    ///
    /// `An+B`, optionally followed by `of <complex-selector-list>` for
    /// `:nth-child()` and `:nth-last-child()`.
    pub(super) fn consume_nth_arguments(
        &self,
        stream: &mut TokenStream,
        pseudo_type: PseudoType,
        name: &str,
        flags: &mut SelectorFlags,
    ) -> Result<AnPlusB, SelectorError> {
        let (a, b) = consume_an_plus_b(stream)?;
        let mut nth = AnPlusB::new(a, b);

        let _ = stream.consume_whitespace();
        if stream.at_end() {
            return Ok(nth);
        }
        let SpannedToken { token, span } = stream.peek_spanned().clone();
        match token {
            CSSToken::Ident(keyword) if keyword.eq_ignore_ascii_case("of") => {
                if !pseudo_type.allows_of_selector() {
                    return Err(SelectorError::OfNotAllowed {
                        name: name.to_owned(),
                        span,
                    });
                }
                let _ = stream.consume();
                let list = self.consume_complex_selector_list(stream)?;
                inherit_nested_flags(flags, &list);
                nth.of = Some(list);
                Ok(nth)
            }
            other => Err(trailing(&other, span)),
        }
    }
}

/// Parse an `An+B` expression and return `(A, B)`.
///
/// # Errors
///
/// [`SelectorError::MalformedAnPlusB`] for anything outside the
/// micro-syntax, including values that do not fit in an `i32`.
pub fn consume_an_plus_b(stream: &mut TokenStream) -> Result<(i32, i32), SelectorError> {
    let SpannedToken { token, span } = stream.peek_spanned().clone();
    let (a, after_n) = match token {
        CSSToken::Ident(ident) if ident.eq_ignore_ascii_case("odd") => {
            let _ = stream.consume();
            return Ok((2, 1));
        }
        CSSToken::Ident(ident) if ident.eq_ignore_ascii_case("even") => {
            let _ = stream.consume();
            return Ok((2, 0));
        }
        // <integer>
        CSSToken::Number {
            int_value: Some(value),
            ..
        } => {
            let _ = stream.consume();
            return Ok((0, to_i32(value, span)?));
        }
        // <n-dimension>, <ndash-dimension>, <ndashdigit-dimension>
        CSSToken::Dimension {
            int_value: Some(value),
            unit,
            ..
        } => {
            let _ = stream.consume();
            (to_i32(value, span)?, strip_n(&unit, span)?)
        }
        // n, -n, n-, -n-, n-<digits>, -n-<digits>
        CSSToken::Ident(ident) => {
            let _ = stream.consume();
            match ident.strip_prefix('-') {
                Some(rest) => (-1, strip_n(rest, span)?),
                None => (1, strip_n(&ident, span)?),
            }
        }
        // '+'n, '+'n-, '+'n-<digits>. No whitespace after the '+'.
        CSSToken::Delim('+') => {
            let _ = stream.consume();
            let SpannedToken { token, span } = stream.peek_spanned().clone();
            match token {
                CSSToken::Ident(ident) if !ident.starts_with('-') => {
                    let _ = stream.consume();
                    (1, strip_n(&ident, span)?)
                }
                _ => return Err(SelectorError::MalformedAnPlusB { span }),
            }
        }
        _ => return Err(SelectorError::MalformedAnPlusB { span }),
    };

    let b = match after_n.as_str() {
        "" => consume_b(stream)?,
        "-" => {
            let _ = stream.consume_whitespace();
            -consume_unsigned_integer(stream)?
        }
        digits => digits
            .strip_prefix('-')
            .filter(|rest| !rest.is_empty() && rest.bytes().all(|byte| byte.is_ascii_digit()))
            .and_then(|_| digits.parse::<i32>().ok())
            .ok_or(SelectorError::MalformedAnPlusB { span })?,
    };
    Ok((a, b))
}

/// The text after the `n` of an `n`-unit or `n`-identifier, lower-cased.
fn strip_n(text: &str, span: Span) -> Result<String, SelectorError> {
    let lowered = text.to_ascii_lowercase();
    lowered
        .strip_prefix('n')
        .map(str::to_owned)
        .ok_or(SelectorError::MalformedAnPlusB { span })
}

/// The optional `B` after a bare `An`: `+3`, `-3`, `+ 3` or `- 3`. When
/// none follows, the stream is put back where it was.
fn consume_b(stream: &mut TokenStream) -> Result<i32, SelectorError> {
    let before = stream.state();
    let _ = stream.consume_whitespace();
    let SpannedToken { token, span } = stream.peek_spanned().clone();
    match token {
        CSSToken::Number {
            int_value: Some(value),
            ..
        } if is_signed(stream, span) => {
            let _ = stream.consume();
            to_i32(value, span)
        }
        CSSToken::Delim(sign @ ('+' | '-')) => {
            let _ = stream.consume();
            let _ = stream.consume_whitespace();
            let value = consume_unsigned_integer(stream)?;
            Ok(if sign == '-' { -value } else { value })
        }
        _ => {
            stream.restore(before);
            Ok(0)
        }
    }
}

fn consume_unsigned_integer(stream: &mut TokenStream) -> Result<i32, SelectorError> {
    let SpannedToken { token, span } = stream.peek_spanned().clone();
    match token {
        CSSToken::Number {
            int_value: Some(value),
            ..
        } if !is_signed(stream, span) => {
            let _ = stream.consume();
            to_i32(value, span)
        }
        _ => Err(SelectorError::MalformedAnPlusB { span }),
    }
}

/// A number token only records its value, so the sign is read back from
/// the source.
fn is_signed(stream: &TokenStream, span: Span) -> bool {
    stream.source(span).starts_with(['+', '-'])
}

fn to_i32(value: i64, span: Span) -> Result<i32, SelectorError> {
    i32::try_from(value).map_err(|_| SelectorError::MalformedAnPlusB { span })
}
