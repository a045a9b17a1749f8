//! Selector serialization per [CSSOM § 6.7.2 Serializing Selectors](https://drafts.csswg.org/cssom/#serializing-selectors).
//!
//! The output is canonical rather than faithful to the input: `*.foo`
//! becomes `.foo`, legacy `:before` becomes `::before`, attribute values
//! are always quoted. Parsing the output yields an equal selector.

use core::fmt::{self, Write};

use crate::selector::{
    AnPlusB, AttributeCase, AttributeMatch, AttributeMatcher, ComplexSelector, MatchKind,
    PseudoArguments, PseudoData, QualifiedName, Relation, SelectorData, SimpleSelector,
};

/// [CSSOM § 2.1 Common Serializing Idioms](https://drafts.csswg.org/cssom/#serialize-an-identifier)
///
/// "To serialize an identifier means to create a string represented by the
/// concatenation of, for each character of the identifier: ..."
#[must_use]
pub fn serialize_identifier(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    let first = ident.chars().next();
    for (index, c) in ident.chars().enumerate() {
        match c {
            // "If the character is NULL (U+0000), then the REPLACEMENT CHARACTER (U+FFFD)."
            '\0' => out.push('\u{FFFD}'),
            // "If the character is in the range [\1-\1f] (U+0001 to U+001F) or is
            // U+007F, then the character escaped as code point."
            '\u{1}'..='\u{1f}' | '\u{7f}' => escape_code_point(&mut out, c),
            // "If the character is the first character and is in the range [0-9]
            // (U+0030 to U+0039), then the character escaped as code point."
            // "If the character is the second character and is in the range [0-9]
            // (U+0030 to U+0039) and the first character is a "-" (U+002D), then
            // the character escaped as code point."
            '0'..='9' if index == 0 || (index == 1 && first == Some('-')) => {
                escape_code_point(&mut out, c);
            }
            // "If the character is the first character and is a "-" (U+002D), and
            // there is no second character, then the escaped character."
            '-' if index == 0 && ident.chars().nth(1).is_none() => out.push_str("\\-"),
            // "If the character is not handled by one of the above rules and is
            // greater than or equal to U+0080, is "-" (U+002D) or "_" (U+005F), or
            // is in one of the ranges [0-9], [A-Z], or [a-z], then the character itself."
            c if c >= '\u{80}' || c == '-' || c == '_' || c.is_ascii_alphanumeric() => {
                out.push(c);
            }
            // "Otherwise, the escaped character."
            c => {
                out.push('\\');
                out.push(c);
            }
        }
    }
    out
}

/// [CSSOM § 2.1](https://drafts.csswg.org/cssom/#serialize-a-string)
///
/// "To serialize a string means to create a string represented by '"'
/// (U+0022), followed by the result of applying the rules below to each
/// character of the given string, followed by '"' (U+0022)."
#[must_use]
pub fn serialize_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\0' => out.push('\u{FFFD}'),
            '\u{1}'..='\u{1f}' | '\u{7f}' => escape_code_point(&mut out, c),
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// "To escape a character as code point means to create a string of "\"
/// (U+005C), followed by the Unicode code point as the smallest possible
/// number of hexadecimal digits in the range 0-9 a-f (U+0030 to U+0039 and
/// U+0061 to U+0066) to represent the code point in base 16, followed by a
/// single SPACE (U+0020)."
fn escape_code_point(out: &mut String, c: char) {
    let _ = write!(out, "\\{:x} ", u32::from(c));
}

/// A bare argument is written as an identifier when that needs no
/// escaping, and as a string otherwise.
fn serialize_argument(value: &str) -> String {
    let ident = serialize_identifier(value);
    if !value.is_empty() && ident == value {
        ident
    } else {
        serialize_string(value)
    }
}

/// "To serialize a group of selectors serialize each selector in the group
/// of selectors and then serialize a comma-separated list of these
/// serializations."
#[must_use]
pub fn serialize_selector_list(list: &[ComplexSelector]) -> String {
    list.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace.as_deref() {
            None => {}
            Some("*") => f.write_str("*|")?,
            Some(prefix) => write!(f, "{}|", serialize_identifier(prefix))?,
        }
        if self.is_universal() {
            f.write_str("*")
        } else {
            f.write_str(&serialize_identifier(&self.local_name))
        }
    }
}

impl fmt::Display for AnPlusB {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.a {
            0 => write!(f, "{}", self.b)?,
            a => {
                match a {
                    1 => f.write_str("n")?,
                    -1 => f.write_str("-n")?,
                    a => write!(f, "{a}n")?,
                }
                if self.b != 0 {
                    write!(f, "{:+}", self.b)?;
                }
            }
        }
        if let Some(of) = &self.of {
            write!(f, " of {}", serialize_selector_list(of))?;
        }
        Ok(())
    }
}

fn fmt_attribute(
    f: &mut fmt::Formatter<'_>,
    test: AttributeMatch,
    matcher: &AttributeMatcher,
) -> fmt::Result {
    f.write_str("[")?;
    match matcher.namespace.as_deref() {
        None => {}
        Some("*") => f.write_str("*|")?,
        Some(prefix) => write!(f, "{}|", serialize_identifier(prefix))?,
    }
    f.write_str(&serialize_identifier(&matcher.name))?;
    let operator = match test {
        AttributeMatch::Set => return f.write_str("]"),
        AttributeMatch::Exact => "=",
        AttributeMatch::Hyphen => "|=",
        AttributeMatch::List => "~=",
        AttributeMatch::Contain => "*=",
        AttributeMatch::Begin => "^=",
        AttributeMatch::End => "$=",
    };
    write!(f, "{operator}{}", serialize_string(&matcher.value))?;
    match matcher.case {
        AttributeCase::Sensitive => {}
        AttributeCase::Insensitive => f.write_str(" i")?,
        AttributeCase::AlwaysSensitive => f.write_str(" s")?,
    }
    f.write_str("]")
}

fn fmt_pseudo(f: &mut fmt::Formatter<'_>, data: &PseudoData, element: bool) -> fmt::Result {
    f.write_str(if element { "::" } else { ":" })?;
    f.write_str(&serialize_identifier(&data.name))?;
    match &data.arguments {
        PseudoArguments::None => Ok(()),
        PseudoArguments::Argument(value) => write!(f, "({})", serialize_argument(value)),
        PseudoArguments::ArgumentList(values) => {
            let values: Vec<String> = values
                .iter()
                .map(String::as_str)
                .map(serialize_argument)
                .collect();
            write!(f, "({})", values.join(", "))
        }
        PseudoArguments::Identifiers(idents) => {
            let idents: Vec<String> = idents
                .iter()
                .map(String::as_str)
                .map(serialize_identifier)
                .collect();
            write!(f, "({})", idents.join(" "))
        }
        PseudoArguments::SelectorList(list) => write!(f, "({})", serialize_selector_list(list)),
        PseudoArguments::Nth(nth) => write!(f, "({nth})"),
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.data, self.match_kind) {
            (SelectorData::Tag(name), _) => write!(f, "{name}"),
            (SelectorData::Value(value), MatchKind::Id) => {
                write!(f, "#{}", serialize_identifier(value))
            }
            (SelectorData::Value(value), _) => write!(f, ".{}", serialize_identifier(value)),
            (SelectorData::Attribute(matcher), MatchKind::Attribute(test)) => {
                fmt_attribute(f, test, matcher)
            }
            (SelectorData::Attribute(matcher), _) => fmt_attribute(f, AttributeMatch::Set, matcher),
            (SelectorData::Pseudo(_), _) if self.is_relative_anchor() => Ok(()),
            (SelectorData::Pseudo(data), kind) => {
                fmt_pseudo(f, data, kind == MatchKind::PseudoElement)
            }
        }
    }
}

impl fmt::Display for ComplexSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for simple in &self.selectors {
            let combinator = match simple.relation {
                Relation::None | Relation::RelativeDescendant => "",
                Relation::Descendant => " ",
                Relation::Child => " > ",
                Relation::DirectAdjacent => " + ",
                Relation::IndirectAdjacent => " ~ ",
                Relation::RelativeChild => "> ",
                Relation::RelativeDirectAdjacent => "+ ",
                Relation::RelativeIndirectAdjacent => "~ ",
            };
            write!(f, "{combinator}{simple}")?;
        }
        Ok(())
    }
}
