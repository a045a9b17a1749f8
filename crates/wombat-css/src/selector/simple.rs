//! Simple selectors: id, class, `&`, attribute, pseudo-class and
//! pseudo-element.
//!
//! [§ 18 Grammar](https://www.w3.org/TR/selectors-4/#grammar)
//!
//! ```text
//! <subclass-selector> = <id-selector> | <class-selector> |
//!                       <attribute-selector> | <pseudo-class-selector>
//! <id-selector>       = <hash-token>
//! <class-selector>    = '.' <ident-token>
//! <attribute-selector> = '[' <wq-name> ']' |
//!                        '[' <wq-name> <attr-matcher> [ <string-token> | <ident-token> ] <attr-modifier>? ']'
//! <pseudo-class-selector> = ':' <ident-token> |
//!                           ':' <function-token> <any-value> ')'
//! <pseudo-element-selector> = ':' <pseudo-class-selector> | <legacy-pseudo-element-selector>
//! ```

use wombat_common::warning::warn_once;

use crate::error::SelectorError;
use crate::serialize::serialize_selector_list;
use crate::token_stream::TokenStream;
use crate::tokenizer::{CSSToken, HashType, SpannedToken, TokenType};

use super::model::{
    AttributeCase, AttributeMatch, AttributeMatcher, ComplexSelector, PseudoArguments, PseudoData,
    SelectorFlags, SimpleSelector,
};
use super::parser::{SelectorParser, consume_list, consume_name, expected, trailing};
use super::pseudo::{ArgumentShape, PseudoType, lookup_with_arguments, lookup_without_arguments};

impl SelectorParser<'_> {
    /// Parse one simple selector, or return `None` when the next token cannot
    /// start one. `None` is how a compound selector ends.
    pub(super) fn consume_simple_selector(
        &self,
        stream: &mut TokenStream,
        flags: &mut SelectorFlags,
    ) -> Result<Option<SimpleSelector>, SelectorError> {
        if stream.at_end() {
            return Ok(None);
        }
        let delim = match stream.peek() {
            CSSToken::Delim(c) => Some(*c),
            _ => None,
        };
        let simple = match (stream.peek_type(), delim) {
            (TokenType::Hash, _) => consume_id(stream)?,
            (TokenType::LeftBracket, _) => stream.consume_block(consume_attribute)?,
            (TokenType::Colon, _) => self.consume_pseudo(stream, flags)?,
            (_, Some('.')) => consume_class(stream)?,
            (_, Some('&')) => return Err(self.consume_nesting_selector(stream, flags)),
            _ => return Ok(None),
        };
        Ok(Some(simple))
    }

    /// [CSS Nesting § 3.1 The nesting selector](https://www.w3.org/TR/css-nesting-1/#nest-selector)
    ///
    /// Recognized, flagged and rejected.
    fn consume_nesting_selector(
        &self,
        stream: &mut TokenStream,
        flags: &mut SelectorFlags,
    ) -> SelectorError {
        let span = stream.consume().span;
        *flags |= SelectorFlags::CONTAINS_SCOPE_OR_PARENT;
        match self.parent_rule {
            Some(parent) => warn_once(
                "Selectors",
                &format!(
                    "the nesting selector '&' (parent rule '{}') is not supported",
                    serialize_selector_list(parent)
                ),
            ),
            None => warn_once("Selectors", "the nesting selector '&' is not supported"),
        }
        SelectorError::NotImplemented {
            feature: "the nesting selector '&'",
            span,
        }
    }

    /// [§ 3.6 Pseudo-classes and pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    ///
    /// One colon introduces a pseudo-class, two a pseudo-element. The four
    /// legacy pseudo-elements also accept a single colon.
    fn consume_pseudo(
        &self,
        stream: &mut TokenStream,
        flags: &mut SelectorFlags,
    ) -> Result<SimpleSelector, SelectorError> {
        let _ = stream.consume();
        let mut colons = 1;
        if stream.peek_type() == TokenType::Colon {
            let _ = stream.consume();
            colons = 2;
        }

        let SpannedToken { token, span } = stream.peek_spanned().clone();
        let (name, functional) = match token {
            CSSToken::Ident(name) => (name, false),
            CSSToken::Function(name) => (name, true),
            other => {
                return Err(expected(
                    "a pseudo-class or pseudo-element name",
                    &other,
                    span,
                ));
            }
        };

        let lowered = name.to_ascii_lowercase();
        let found = if functional {
            lookup_with_arguments(&lowered)
        } else {
            lookup_without_arguments(&lowered)
        };
        let Some(pseudo_type) = found else {
            return Err(SelectorError::UnknownPseudo { name, span });
        };

        let element = if pseudo_type.is_vendor_sentinel() {
            warn_once(
                "Selectors",
                &format!("treating '{name}' as an opaque vendor pseudo-selector"),
            );
            colons == 2
        } else {
            match (colons, pseudo_type.is_element()) {
                (1, false) => false,
                (2, true) => true,
                (1, true) if pseudo_type.is_legacy_element() => true,
                _ => return Err(SelectorError::WrongColonCount { name, colons, span }),
            }
        };

        *flags |= SelectorFlags::CONTAINS_PSEUDO;
        if pseudo_type == PseudoType::Scope {
            *flags |= SelectorFlags::CONTAINS_SCOPE_OR_PARENT;
        }

        let arguments = if functional {
            stream.consume_block(|stream| {
                self.consume_pseudo_arguments(stream, pseudo_type, &name, flags)
            })?
        } else {
            let _ = stream.consume();
            PseudoArguments::None
        };

        Ok(SimpleSelector::pseudo(
            PseudoData {
                pseudo_type,
                name,
                arguments,
            },
            element,
        ))
    }

    /// Parse the inside of `name( ... )`. The stream is bounded by the `)`.
    fn consume_pseudo_arguments(
        &self,
        stream: &mut TokenStream,
        pseudo_type: PseudoType,
        name: &str,
        flags: &mut SelectorFlags,
    ) -> Result<PseudoArguments, SelectorError> {
        let _ = stream.consume_whitespace();
        let arguments = match pseudo_type.argument_shape() {
            ArgumentShape::AnPlusB => {
                PseudoArguments::Nth(self.consume_nth_arguments(stream, pseudo_type, name, flags)?)
            }
            ArgumentShape::SelectorList => {
                let list = self.consume_complex_selector_list(stream)?;
                if pseudo_type.requires_single_selector() && list.len() != 1 {
                    return Err(SelectorError::WrongSelectorCount {
                        name: name.to_owned(),
                        count: list.len(),
                        span: stream.peek_span(),
                    });
                }
                inherit_nested_flags(flags, &list);
                PseudoArguments::SelectorList(list)
            }
            // [§ 4.5 The Relational Pseudo-class](https://www.w3.org/TR/selectors-4/#relational)
            ArgumentShape::RelativeSelectorList => {
                let list = consume_list(stream, |stream| self.consume_relative_selector(stream))?;
                inherit_nested_flags(flags, &list);
                *flags |= SelectorFlags::CONTAINS_COMPLEX_SELECTOR;
                PseudoArguments::SelectorList(list)
            }
            ArgumentShape::Identifiers => PseudoArguments::Identifiers(consume_identifiers(stream)?),
            ArgumentShape::ArgumentList => {
                PseudoArguments::ArgumentList(consume_argument_list(stream)?)
            }
            ArgumentShape::SingleArgument => PseudoArguments::Argument(consume_argument(stream)?),
            ArgumentShape::None => PseudoArguments::None,
        };

        let _ = stream.consume_whitespace();
        if !stream.at_end() {
            let SpannedToken { token, span } = stream.peek_spanned().clone();
            return Err(trailing(&token, span));
        }
        Ok(arguments)
    }
}

/// Only the scope-or-parent fact crosses a functional pseudo; combinators
/// and pseudos inside an argument belong to the argument.
pub(super) fn inherit_nested_flags(flags: &mut SelectorFlags, list: &[ComplexSelector]) {
    if list
        .iter()
        .any(|selector| selector.flags.contains(SelectorFlags::CONTAINS_SCOPE_OR_PARENT))
    {
        *flags |= SelectorFlags::CONTAINS_SCOPE_OR_PARENT;
    }
}

/// [§ 6.7 ID selectors](https://www.w3.org/TR/selectors-4/#id-selectors)
///
/// "An ID selector consists of a 'number sign' (U+0023, #) immediately
/// followed by the ID value, which must be a CSS identifier."
fn consume_id(stream: &mut TokenStream) -> Result<SimpleSelector, SelectorError> {
    let SpannedToken { token, span } = stream.consume();
    match token {
        CSSToken::Hash {
            value,
            hash_type: HashType::Id,
        } => Ok(SimpleSelector::id(value)),
        CSSToken::Hash { value, .. } => Err(SelectorError::InvalidId { value, span }),
        other => Err(expected("an id selector", &other, span)),
    }
}

/// [§ 6.6 Class selectors](https://www.w3.org/TR/selectors-4/#class-html)
fn consume_class(stream: &mut TokenStream) -> Result<SimpleSelector, SelectorError> {
    let _ = stream.consume();
    let SpannedToken { token, span } = stream.peek_spanned().clone();
    match token {
        CSSToken::Ident(name) => {
            let _ = stream.consume();
            Ok(SimpleSelector::class(name))
        }
        other => Err(expected("a class name after '.'", &other, span)),
    }
}

/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// Runs inside the `[...]` block.
fn consume_attribute(stream: &mut TokenStream) -> Result<SimpleSelector, SelectorError> {
    let _ = stream.consume_whitespace();
    let span = stream.peek_span();
    let name = match consume_name(stream) {
        Some(name) if !name.is_universal() => name,
        _ => {
            let found = stream.peek().clone();
            return Err(expected("an attribute name", &found, span));
        }
    };
    let mut matcher = AttributeMatcher {
        namespace: name.namespace,
        name: name.local_name,
        value: String::new(),
        case: AttributeCase::Sensitive,
    };

    let _ = stream.consume_whitespace();
    if stream.at_end() {
        return Ok(SimpleSelector::attribute(AttributeMatch::Set, matcher));
    }

    // [§ 6.1 Attribute presence and value selectors](https://www.w3.org/TR/selectors-4/#attribute-representation)
    // [§ 6.2 Substring matching attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-substrings)
    let SpannedToken { token, span } = stream.peek_spanned().clone();
    let test = match token {
        CSSToken::Delim('=') => AttributeMatch::Exact,
        CSSToken::IncludeMatch => AttributeMatch::List,
        CSSToken::DashMatch => AttributeMatch::Hyphen,
        CSSToken::PrefixMatch => AttributeMatch::Begin,
        CSSToken::SuffixMatch => AttributeMatch::End,
        CSSToken::SubstringMatch => AttributeMatch::Contain,
        other => return Err(expected("an attribute match operator", &other, span)),
    };
    let _ = stream.consume();
    let _ = stream.consume_whitespace();

    let SpannedToken { token, span } = stream.peek_spanned().clone();
    matcher.value = match token {
        CSSToken::Ident(value) | CSSToken::String(value) => value,
        other => return Err(expected("an attribute value", &other, span)),
    };
    let _ = stream.consume();
    let _ = stream.consume_whitespace();

    // [§ 6.3 Case-sensitivity](https://www.w3.org/TR/selectors-4/#attribute-case)
    if let CSSToken::Ident(modifier) = stream.peek() {
        matcher.case = match modifier.as_str() {
            "i" | "I" => AttributeCase::Insensitive,
            "s" | "S" => AttributeCase::AlwaysSensitive,
            _ => AttributeCase::Sensitive,
        };
        let _ = stream.consume();
        let _ = stream.consume_whitespace();
    }

    if !stream.at_end() {
        let SpannedToken { token, span } = stream.peek_spanned().clone();
        return Err(trailing(&token, span));
    }
    Ok(SimpleSelector::attribute(test, matcher))
}

/// `::part(label icon)`: one or more whitespace-separated identifiers.
fn consume_identifiers(stream: &mut TokenStream) -> Result<Vec<String>, SelectorError> {
    let mut identifiers = Vec::new();
    loop {
        let _ = stream.consume_whitespace();
        if stream.at_end() && !identifiers.is_empty() {
            return Ok(identifiers);
        }
        let SpannedToken { token, span } = stream.peek_spanned().clone();
        match token {
            CSSToken::Ident(identifier) => {
                let _ = stream.consume();
                identifiers.push(identifier);
            }
            other => return Err(expected("an identifier", &other, span)),
        }
    }
}

/// `:lang(en, "fr-*")`: one or more comma-separated identifiers or strings.
fn consume_argument_list(stream: &mut TokenStream) -> Result<Vec<String>, SelectorError> {
    let mut arguments = vec![consume_argument(stream)?];
    loop {
        let _ = stream.consume_whitespace();
        if stream.peek_type() != TokenType::Comma {
            return Ok(arguments);
        }
        let _ = stream.consume();
        let _ = stream.consume_whitespace();
        arguments.push(consume_argument(stream)?);
    }
}

/// A single identifier or string.
fn consume_argument(stream: &mut TokenStream) -> Result<String, SelectorError> {
    let _ = stream.consume_whitespace();
    let SpannedToken { token, span } = stream.peek_spanned().clone();
    match token {
        CSSToken::Ident(value) | CSSToken::String(value) => {
            let _ = stream.consume();
            Ok(value)
        }
        other => Err(expected("an identifier or string", &other, span)),
    }
}
