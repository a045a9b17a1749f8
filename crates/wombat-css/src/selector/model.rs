//! The parsed selector tree.
//!
//! A [`ComplexSelector`] is a flat, left-to-right run of [`SimpleSelector`]s.
//! Compound boundaries are implicit: a simple selector whose
//! [`Relation`] is not [`Relation::None`] starts a new compound, and the
//! relation says how that compound relates to the one before it.
//!
//! ```text
//! div.a > p:hover
//! [Tag div, None] [Class a, None] [Tag p, Child] [PseudoClass hover, None]
//! ```

use core::ops::{BitOr, BitOrAssign};

use serde::Serialize;

use super::pseudo::PseudoType;

/// Facts about a selector collected while parsing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SelectorFlags(u8);

impl SelectorFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// The selector has at least one combinator, or contains `:has()`.
    pub const CONTAINS_COMPLEX_SELECTOR: Self = Self(1);
    /// The selector has a pseudo-class or pseudo-element.
    pub const CONTAINS_PSEUDO: Self = Self(1 << 1);
    /// The selector references `:scope` or the nesting selector `&`.
    pub const CONTAINS_SCOPE_OR_PARENT: Self = Self(1 << 2);

    /// Whether every flag in `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The raw bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for SelectorFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SelectorFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttributeMatch {
    /// `[att]`: "Represents an element with the att attribute, whatever the
    /// value of the attribute."
    Set,
    /// `[att=val]`: value is exactly `val`.
    Exact,
    /// `[att|=val]`: value is `val` or begins with `val-`.
    Hyphen,
    /// `[att~=val]`: value is a whitespace-separated list containing `val`.
    List,
    /// `[att*=val]`: value contains `val`.
    Contain,
    /// `[att^=val]`: value begins with `val`.
    Begin,
    /// `[att$=val]`: value ends with `val`.
    End,
}

/// What a [`SimpleSelector`] tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchKind {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    Tag,
    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    UniversalTag,
    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    Id,
    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    Class,
    /// [§ 3.6.1 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    PseudoClass,
    /// [§ 3.6.2 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements)
    PseudoElement,
    /// One of the seven attribute tests.
    Attribute(AttributeMatch),
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// How a simple selector relates to the one before it. Only the first
/// simple selector of a compound carries anything other than `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Relation {
    /// Same element as the previous simple selector.
    #[default]
    None,
    /// `A B`
    Descendant,
    /// `A > B`
    Child,
    /// `A + B`
    DirectAdjacent,
    /// `A ~ B`
    IndirectAdjacent,
    /// `:has(B)`, relative to the `:has()` anchor.
    RelativeDescendant,
    /// `:has(> B)`
    RelativeChild,
    /// `:has(+ B)`
    RelativeDirectAdjacent,
    /// `:has(~ B)`
    RelativeIndirectAdjacent,
}

impl Relation {
    /// Whether this relation only appears right after a `:has()` anchor.
    #[must_use]
    pub const fn is_relative(self) -> bool {
        matches!(
            self,
            Self::RelativeDescendant
                | Self::RelativeChild
                | Self::RelativeDirectAdjacent
                | Self::RelativeIndirectAdjacent
        )
    }

    /// The relative counterpart used inside `:has()`. A missing combinator
    /// means descendant.
    #[must_use]
    pub const fn to_relative(self) -> Self {
        match self {
            Self::Child | Self::RelativeChild => Self::RelativeChild,
            Self::DirectAdjacent | Self::RelativeDirectAdjacent => Self::RelativeDirectAdjacent,
            Self::IndirectAdjacent | Self::RelativeIndirectAdjacent => {
                Self::RelativeIndirectAdjacent
            }
            Self::None | Self::Descendant | Self::RelativeDescendant => Self::RelativeDescendant,
        }
    }
}

/// [§ 5.3 Namespaces in elemental selectors](https://www.w3.org/TR/selectors-4/#type-nmsp)
///
/// `namespace` is `None` when no `|` was written, `Some("")` for `|name`
/// (no namespace) and `Some("*")` for `*|name` (any namespace).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualifiedName {
    /// The namespace prefix, if one was written.
    pub namespace: Option<String>,
    /// The local name, or `*`.
    pub local_name: String,
}

impl QualifiedName {
    /// A name without a namespace prefix.
    #[must_use]
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// A name with an explicit namespace prefix.
    #[must_use]
    pub fn with_namespace(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Whether the local name is the `*` wildcard.
    #[must_use]
    pub fn is_universal(&self) -> bool {
        self.local_name == "*"
    }

    /// Whether the namespace prefix puts no constraint on the element
    /// (absent, or `*|`).
    #[must_use]
    pub fn has_default_namespace(&self) -> bool {
        matches!(self.namespace.as_deref(), None | Some("*"))
    }
}

/// [§ 6.3 Case-sensitivity](https://www.w3.org/TR/selectors-4/#attribute-case)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AttributeCase {
    /// No flag: the document language decides.
    #[default]
    Sensitive,
    /// `i`: ASCII case-insensitive.
    Insensitive,
    /// `s`: case-sensitive even where the document language says otherwise.
    AlwaysSensitive,
}

/// The payload of an attribute selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeMatcher {
    /// Namespace prefix, with the same encoding as [`QualifiedName::namespace`].
    pub namespace: Option<String>,
    /// The attribute name.
    pub name: String,
    /// The expected value. Empty for [`AttributeMatch::Set`].
    pub value: String,
    /// The trailing `i`/`s` flag.
    pub case: AttributeCase,
}

/// [CSS Syntax § 6 The An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnPlusB {
    /// The step.
    pub a: i32,
    /// The offset.
    pub b: i32,
    /// The `of <selector-list>` filter of `:nth-child()` / `:nth-last-child()`.
    pub of: Option<Vec<ComplexSelector>>,
}

impl AnPlusB {
    /// An `An+B` without an `of` clause.
    #[must_use]
    pub const fn new(a: i32, b: i32) -> Self {
        Self { a, b, of: None }
    }

    /// Whether the 1-based `index` is `a*n + b` for some integer `n >= 0`.
    #[must_use]
    pub fn matches_index(&self, index: i32) -> bool {
        let diff = i64::from(index) - i64::from(self.b);
        let a = i64::from(self.a);
        if a == 0 {
            return diff == 0;
        }
        diff % a == 0 && diff / a >= 0
    }
}

/// The arguments of a pseudo-class or pseudo-element. Which variant is used
/// is fixed by the pseudo's [`PseudoType::argument_shape`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PseudoArguments {
    /// `:hover`, and the bare forms of `:host` / `::cue`.
    None,
    /// `:dir(ltr)`, `:state(checked)`, `::highlight(name)`
    Argument(String),
    /// `:lang(en, "fr-*")`
    ArgumentList(Vec<String>),
    /// `:is()`, `:not()`, `:where()`, `:has()`, `:host()`, `:host-context()`,
    /// `::slotted()`, `::cue()`
    SelectorList(Vec<ComplexSelector>),
    /// `::part(label icon)`, `:active-view-transition-type(a b)`
    Identifiers(Vec<String>),
    /// The `:nth-*()` family
    Nth(AnPlusB),
}

/// The payload of a pseudo-class or pseudo-element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PseudoData {
    /// The resolved type.
    pub pseudo_type: PseudoType,
    /// The name as written, without colons or `(`.
    pub name: String,
    /// The parsed arguments.
    pub arguments: PseudoArguments,
}

impl PseudoData {
    /// The single string argument. For `:lang()` this is the first entry
    /// of the list, which is what single-argument callers expect.
    #[must_use]
    pub fn argument(&self) -> Option<&str> {
        match &self.arguments {
            PseudoArguments::Argument(value) => Some(value.as_str()),
            PseudoArguments::ArgumentList(values) => values.first().map(String::as_str),
            _ => None,
        }
    }

    /// The nested selector list, from either a selector-list pseudo or the
    /// `of` clause of `:nth-child()`.
    #[must_use]
    pub fn selector_list(&self) -> Option<&[ComplexSelector]> {
        match &self.arguments {
            PseudoArguments::SelectorList(list) => Some(list),
            PseudoArguments::Nth(nth) => nth.of.as_deref(),
            _ => None,
        }
    }

    /// The `An+B` data of an `:nth-*()` pseudo.
    #[must_use]
    pub const fn nth(&self) -> Option<&AnPlusB> {
        match &self.arguments {
            PseudoArguments::Nth(nth) => Some(nth),
            _ => None,
        }
    }
}

/// What a simple selector carries beyond its [`MatchKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SelectorData {
    /// Id and class names.
    Value(String),
    /// Type and universal selectors.
    Tag(QualifiedName),
    /// Attribute selectors.
    Attribute(AttributeMatcher),
    /// Pseudo-classes and pseudo-elements.
    Pseudo(Box<PseudoData>),
}

/// One matching unit of a selector.
///
/// Built through the constructors below so that `match_kind` and `data`
/// always agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleSelector {
    /// What is tested.
    pub match_kind: MatchKind,
    /// The payload.
    pub data: SelectorData,
    /// Relation to the previous simple selector.
    pub relation: Relation,
}

impl SimpleSelector {
    /// A type selector, or a universal selector if the local name is `*`.
    #[must_use]
    pub fn tag(name: QualifiedName) -> Self {
        let match_kind = if name.is_universal() {
            MatchKind::UniversalTag
        } else {
            MatchKind::Tag
        };
        Self::with(match_kind, SelectorData::Tag(name))
    }

    /// `#name`
    #[must_use]
    pub fn id(name: impl Into<String>) -> Self {
        Self::with(MatchKind::Id, SelectorData::Value(name.into()))
    }

    /// `.name`
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::with(MatchKind::Class, SelectorData::Value(name.into()))
    }

    /// `[...]`
    #[must_use]
    pub fn attribute(test: AttributeMatch, matcher: AttributeMatcher) -> Self {
        Self::with(MatchKind::Attribute(test), SelectorData::Attribute(matcher))
    }

    /// A pseudo-class, or a pseudo-element when `element` is set.
    #[must_use]
    pub fn pseudo(data: PseudoData, element: bool) -> Self {
        let match_kind = if element {
            MatchKind::PseudoElement
        } else {
            MatchKind::PseudoClass
        };
        Self::with(match_kind, SelectorData::Pseudo(Box::new(data)))
    }

    /// The synthetic first element of every selector inside `:has()`.
    #[must_use]
    pub fn relative_anchor() -> Self {
        Self::pseudo(
            PseudoData {
                pseudo_type: PseudoType::RelativeAnchor,
                name: String::new(),
                arguments: PseudoArguments::None,
            },
            false,
        )
    }

    const fn with(match_kind: MatchKind, data: SelectorData) -> Self {
        Self {
            match_kind,
            data,
            relation: Relation::None,
        }
    }

    /// This selector with `relation` set.
    #[must_use]
    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relation = relation;
        self
    }

    /// The id or class name.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match &self.data {
            SelectorData::Value(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// The qualified name of a type or universal selector.
    #[must_use]
    pub const fn tag_name(&self) -> Option<&QualifiedName> {
        match &self.data {
            SelectorData::Tag(name) => Some(name),
            _ => None,
        }
    }

    /// The attribute test payload.
    #[must_use]
    pub const fn attribute_matcher(&self) -> Option<&AttributeMatcher> {
        match &self.data {
            SelectorData::Attribute(matcher) => Some(matcher),
            _ => None,
        }
    }

    /// The pseudo payload.
    #[must_use]
    pub fn pseudo_data(&self) -> Option<&PseudoData> {
        match &self.data {
            SelectorData::Pseudo(data) => Some(data.as_ref()),
            _ => None,
        }
    }

    /// The pseudo type, if this is a pseudo-class or pseudo-element.
    #[must_use]
    pub fn pseudo_type(&self) -> Option<PseudoType> {
        self.pseudo_data().map(|data| data.pseudo_type)
    }

    /// Whether this is the `:has()` anchor.
    #[must_use]
    pub fn is_relative_anchor(&self) -> bool {
        self.pseudo_type() == Some(PseudoType::RelativeAnchor)
    }
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// "A complex selector is a chain of one or more compound selectors
/// separated by combinators."
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplexSelector {
    /// The simple selectors, left to right. Never empty once parsed; the
    /// first one always has [`Relation::None`].
    pub selectors: Vec<SimpleSelector>,
    /// Flags accumulated over every simple selector, including nested lists.
    pub flags: SelectorFlags,
}

impl ComplexSelector {
    /// Wrap already-built simple selectors.
    #[must_use]
    pub const fn new(selectors: Vec<SimpleSelector>, flags: SelectorFlags) -> Self {
        Self { selectors, flags }
    }

    /// Number of simple selectors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Whether there are no simple selectors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// The compound selectors, left to right.
    #[must_use]
    pub fn compounds(&self) -> Vec<&[SimpleSelector]> {
        let mut compounds = Vec::new();
        let mut start = 0;
        for (index, simple) in self.selectors.iter().enumerate() {
            if index > 0 && simple.relation != Relation::None {
                compounds.push(&self.selectors[start..index]);
                start = index;
            }
        }
        if start < self.selectors.len() {
            compounds.push(&self.selectors[start..]);
        }
        compounds
    }

    /// Whether this selector came from `:has()` and starts with the anchor.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.selectors
            .first()
            .is_some_and(SimpleSelector::is_relative_anchor)
    }
}
