//! Compound and complex selector grammar.
//!
//! [§ 18 Grammar](https://www.w3.org/TR/selectors-4/#grammar)
//!
//! ```text
//! <selector-list>     = <complex-selector-list>
//! <complex-selector>  = <compound-selector> [ <combinator>? <compound-selector> ] *
//! <compound-selector> = [ <type-selector>? <subclass-selector> *
//!                         [ <pseudo-element-selector> <pseudo-class-selector> * ] * ]!
//! <combinator>        = '>' | '+' | '~'
//! ```
//!
//! Simple selectors live in `simple.rs` and the `An+B` micro-syntax in
//! `nth.rs`; both extend [`SelectorParser`].

use wombat_common::warning::warn_once;

use crate::error::SelectorError;
use crate::token_stream::TokenStream;
use crate::tokenizer::{CSSToken, Span, SpannedToken, TokenType};

use super::model::{ComplexSelector, QualifiedName, Relation, SelectorFlags, SimpleSelector};

/// Where the selector list being parsed sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NestingContext {
    /// A top-level style rule.
    #[default]
    None,
    /// A style rule nested inside another style rule. A selector that starts
    /// with a combinator is relative to the parent here.
    Nested,
}

/// Grammar state shared by every production. It holds no cursor; the
/// [`TokenStream`] is passed alongside so that blocks can be parsed through
/// [`TokenStream::consume_block`].
#[derive(Debug, Clone, Copy)]
pub(super) struct SelectorParser<'a> {
    pub(super) nesting: NestingContext,
    pub(super) parent_rule: Option<&'a [ComplexSelector]>,
}

/// Parse a selector list from `stream`.
///
/// The stream must be positioned at the start of the list. On success it is
/// left at the `{` that ends a rule prelude, at a boundary, or at end of
/// input. On failure it is left at the next top-level `,` or `{` after the
/// offending selector. Any invalid member fails the whole list.
///
/// `parent_rule` is the selector list of the enclosing rule, if any.
///
/// # Errors
///
/// Returns the first [`SelectorError`] met in any member of the list.
pub fn consume_selector(
    stream: &mut TokenStream,
    nesting: NestingContext,
    parent_rule: Option<&[ComplexSelector]>,
) -> Result<Vec<ComplexSelector>, SelectorError> {
    SelectorParser {
        nesting,
        parent_rule,
    }
    .consume_complex_selector_list(stream)
}

/// Parse all of `input` as a selector list.
///
/// # Errors
///
/// Fails if the list is invalid or anything, including `{`, follows it.
pub fn parse_selector_list(input: &str) -> Result<Vec<ComplexSelector>, SelectorError> {
    let mut stream = TokenStream::new(input);
    let list = consume_selector(&mut stream, NestingContext::None, None)?;
    expect_end_of_input(&mut stream)?;
    Ok(list)
}

/// Parse all of `input` as a single complex selector.
///
/// # Errors
///
/// Fails if the selector is invalid or anything, including a comma,
/// follows it.
pub fn parse_complex_selector(input: &str) -> Result<ComplexSelector, SelectorError> {
    let mut stream = TokenStream::new(input);
    let parser = SelectorParser {
        nesting: NestingContext::None,
        parent_rule: None,
    };
    let _ = stream.consume_whitespace();
    let selector = parser.consume_complex_selector(&mut stream)?;
    let _ = stream.consume_whitespace();
    expect_end_of_input(&mut stream)?;
    Ok(selector)
}

fn expect_end_of_input(stream: &mut TokenStream) -> Result<(), SelectorError> {
    let SpannedToken { token, span } = stream.peek_spanned().clone();
    if token.is_eof() {
        Ok(())
    } else {
        Err(trailing(&token, span))
    }
}

impl SelectorParser<'_> {
    /// [§ 4.1 Selector lists](https://www.w3.org/TR/selectors-4/#selector-list)
    pub(super) fn consume_complex_selector_list(
        &self,
        stream: &mut TokenStream,
    ) -> Result<Vec<ComplexSelector>, SelectorError> {
        consume_list(stream, |stream| self.consume_complex_selector(stream))
    }

    /// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
    pub(super) fn consume_complex_selector(
        &self,
        stream: &mut TokenStream,
    ) -> Result<ComplexSelector, SelectorError> {
        if self.nesting == NestingContext::Nested && peek_combinator(stream).is_some() {
            let span = stream.peek_span();
            warn_once(
                "Selectors",
                "relative selectors in nested style rules are not supported",
            );
            return Err(SelectorError::NotImplemented {
                feature: "relative selectors in nested style rules",
                span,
            });
        }
        self.consume_compound_chain(stream)
    }

    /// [§ 14 Relative selectors](https://www.w3.org/TR/selectors-4/#relative)
    ///
    /// One entry of `:has()`. The result starts with the relative anchor,
    /// and the first real compound carries the relative form of the leading
    /// combinator (descendant when none was written).
    pub(super) fn consume_relative_selector(
        &self,
        stream: &mut TokenStream,
    ) -> Result<ComplexSelector, SelectorError> {
        let leading = consume_combinator(stream);
        let ComplexSelector { selectors, flags } = self.consume_compound_chain(stream)?;
        let mut rest = selectors.into_iter();
        let mut anchored = vec![SimpleSelector::relative_anchor()];
        anchored.extend(rest.next().map(|first| first.with_relation(leading.to_relative())));
        anchored.extend(rest);
        Ok(ComplexSelector::new(
            anchored,
            flags | SelectorFlags::CONTAINS_COMPLEX_SELECTOR | SelectorFlags::CONTAINS_PSEUDO,
        ))
    }

    fn consume_compound_chain(
        &self,
        stream: &mut TokenStream,
    ) -> Result<ComplexSelector, SelectorError> {
        let (mut selectors, mut flags) = self.consume_compound_selector(stream)?;
        loop {
            let relation = consume_combinator(stream);
            if relation == Relation::None {
                break;
            }
            if stream.at_end() || matches!(stream.peek_type(), TokenType::Comma | TokenType::LeftBrace)
            {
                // Whitespace before the end of the selector is not a combinator.
                if relation == Relation::Descendant {
                    break;
                }
                let SpannedToken { token, span } = stream.peek_spanned().clone();
                return Err(expected("a selector after the combinator", &token, span));
            }

            let (compound, compound_flags) = self.consume_compound_selector(stream)?;
            let mut compound = compound.into_iter();
            selectors.extend(compound.next().map(|first| first.with_relation(relation)));
            selectors.extend(compound);
            flags |= compound_flags | SelectorFlags::CONTAINS_COMPLEX_SELECTOR;
        }
        Ok(ComplexSelector::new(selectors, flags))
    }

    /// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
    ///
    /// The type selector is read first but only materialized at the end: a
    /// universal selector with the default namespace says nothing once any
    /// other simple selector is present, so `*.foo` becomes `.foo`.
    fn consume_compound_selector(
        &self,
        stream: &mut TokenStream,
    ) -> Result<(Vec<SimpleSelector>, SelectorFlags), SelectorError> {
        let name = consume_name(stream);
        let mut flags = SelectorFlags::NONE;
        let mut selectors = Vec::new();
        while let Some(simple) = self.consume_simple_selector(stream, &mut flags)? {
            selectors.push(simple);
        }

        match name {
            Some(name) if !name.is_universal() => selectors.insert(0, SimpleSelector::tag(name)),
            Some(name) if selectors.is_empty() || !name.has_default_namespace() => {
                selectors.insert(0, SimpleSelector::tag(name));
            }
            Some(_) => {}
            None if selectors.is_empty() => {
                return Err(SelectorError::NoCompoundSelector {
                    span: stream.peek_span(),
                });
            }
            None => {}
        }
        Ok((selectors, flags))
    }
}

/// Parse `item (',' item)*`, stopping at `{`, a boundary or end of input.
/// On any failure skip to the next `,` or `{` and return the error.
pub(super) fn consume_list(
    stream: &mut TokenStream,
    mut item: impl FnMut(&mut TokenStream) -> Result<ComplexSelector, SelectorError>,
) -> Result<Vec<ComplexSelector>, SelectorError> {
    const RECOVERY: &[TokenType] = &[TokenType::Comma, TokenType::LeftBrace];

    let _ = stream.consume_whitespace();
    let mut list = Vec::new();
    loop {
        match item(stream) {
            Ok(selector) => list.push(selector),
            Err(err) => {
                stream.skip_until(RECOVERY);
                return Err(err);
            }
        }
        let _ = stream.consume_whitespace();

        if stream.at_end() || stream.peek_type() == TokenType::LeftBrace {
            return Ok(list);
        }
        if stream.peek_type() == TokenType::Comma {
            let _ = stream.consume();
            let _ = stream.consume_whitespace();
            continue;
        }

        let SpannedToken { token, span } = stream.peek_spanned().clone();
        stream.skip_until(RECOVERY);
        return Err(trailing(&token, span));
    }
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// Whitespace alone is the descendant combinator; whitespace around `>`,
/// `+` and `~` is insignificant.
fn consume_combinator(stream: &mut TokenStream) -> Relation {
    let skipped_whitespace = stream.consume_whitespace();
    match peek_combinator(stream) {
        Some(relation) => {
            let _ = stream.consume();
            let _ = stream.consume_whitespace();
            relation
        }
        None if skipped_whitespace => Relation::Descendant,
        None => Relation::None,
    }
}

fn peek_combinator(stream: &mut TokenStream) -> Option<Relation> {
    match stream.peek() {
        CSSToken::Delim('>') => Some(Relation::Child),
        CSSToken::Delim('+') => Some(Relation::DirectAdjacent),
        CSSToken::Delim('~') => Some(Relation::IndirectAdjacent),
        _ => None,
    }
}

/// [§ 5.3 Namespaces in elemental selectors](https://www.w3.org/TR/selectors-4/#type-nmsp)
///
/// ```text
/// <wq-name>   = <ns-prefix>? <ident-token>
/// <ns-prefix> = [ <ident-token> | '*' ]? '|'
/// ```
///
/// Accepts `name`, `*`, `ns|name`, `ns|*`, `*|name`, `*|*`, `|name` and
/// `|*`. When the token after `|` is neither an identifier nor `*` the `|`
/// is given back and only the prefix is returned as a name (or nothing, for
/// a leading `|`).
pub(super) fn consume_name(stream: &mut TokenStream) -> Option<QualifiedName> {
    let prefix = match stream.peek() {
        CSSToken::Ident(name) => Some(name.clone()),
        CSSToken::Delim('*') => Some("*".to_owned()),
        CSSToken::Delim('|') => None,
        _ => return None,
    };
    if prefix.is_some() {
        let _ = stream.consume();
    }
    if !stream.peek_is_delim('|') {
        return prefix.map(QualifiedName::new);
    }

    let before_bar = stream.state();
    let _ = stream.consume();
    let local_name = match stream.peek() {
        CSSToken::Ident(name) => name.clone(),
        CSSToken::Delim('*') => "*".to_owned(),
        _ => {
            stream.restore(before_bar);
            return prefix.map(QualifiedName::new);
        }
    };
    let _ = stream.consume();
    Some(QualifiedName::with_namespace(
        prefix.unwrap_or_default(),
        local_name,
    ))
}

pub(super) fn expected(expected: &'static str, found: &CSSToken, span: Span) -> SelectorError {
    SelectorError::Expected {
        expected,
        found: found.to_string(),
        span,
    }
}

pub(super) fn trailing(found: &CSSToken, span: Span) -> SelectorError {
    SelectorError::TrailingInput {
        found: found.to_string(),
        span,
    }
}
