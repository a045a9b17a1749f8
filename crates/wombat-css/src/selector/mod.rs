//! CSS selector parsing per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
//!
//! The entry point is [`consume_selector`], which reads a selector list from
//! a [`TokenStream`](crate::token_stream::TokenStream) positioned at the
//! start of a rule prelude. [`parse_selector_list`] and
//! [`parse_complex_selector`] wrap it for whole strings.
//!
//! ```text
//! "div.note > p:is(.a, .b)"
//!
//! ComplexSelector (CONTAINS_COMPLEX_SELECTOR | CONTAINS_PSEUDO)
//!   Tag div
//!   Class note
//!   Tag p             relation: Child
//!   PseudoClass is    arguments: SelectorList [.a] [.b]
//! ```

mod model;
mod nth;
mod parser;
mod pseudo;
mod simple;
mod specificity;

pub use model::{
    AnPlusB, AttributeCase, AttributeMatch, AttributeMatcher, ComplexSelector, MatchKind,
    PseudoArguments, PseudoData, QualifiedName, Relation, SelectorData, SelectorFlags,
    SimpleSelector,
};
pub use nth::consume_an_plus_b;
pub use parser::{NestingContext, consume_selector, parse_complex_selector, parse_selector_list};
pub use pseudo::{ArgumentShape, PseudoType, lookup_with_arguments, lookup_without_arguments};
pub use specificity::Specificity;
