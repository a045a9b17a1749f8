//! CSS tokenizer and Selectors Level 4 grammar for Wombat.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - All token types, plus the attribute match operators and `||`
//!   - Source spans for every token
//!   - A seekable cursor for backtracking
//!
//! - **Token Stream**
//!   - One-token lookahead, boundary sets, block recovery, snapshots
//!
//! - **CSS Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, universal, id, class and attribute selectors, with namespaces
//!   - Pseudo-classes and pseudo-elements, including `:is()`, `:not()`,
//!     `:where()`, `:has()`, the `:nth-*()` family with `An+B of S`,
//!     `:lang()`, `:dir()`, `::part()`, `:host()` and `::slotted()`
//!   - Combinators (descendant, child, next-sibling, subsequent-sibling)
//!   - Specificity calculation
//!   - Serialization back to canonical text
//!
//! # Not Yet Implemented
//!
//! - The nesting selector `&` and relative selectors in nested rules
//!   (recognized and rejected)
//! - Forgiving selector lists
//! - Selector matching

/// Selector parse errors.
pub mod error;
/// Selector grammar and data model per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// Selector serialization per [CSSOM § 6.7.2](https://drafts.csswg.org/cssom/#serializing-selectors).
pub mod serialize;
/// Token cursor with boundaries, block recovery and snapshots.
pub mod token_stream;
/// CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;

pub use error::{ErrorKind, SelectorError};
pub use selector::{
    ComplexSelector, NestingContext, SimpleSelector, Specificity, consume_selector,
    parse_complex_selector, parse_selector_list,
};
pub use token_stream::{Boundaries, StreamState, TokenStream};
