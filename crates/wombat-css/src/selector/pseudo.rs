//! Pseudo-class and pseudo-element names.
//!
//! Names are resolved in two steps. [`PseudoType`]'s `FromStr` (from
//! `strum`) maps a lower-cased name to a type; the two lookup functions then
//! keep only types that can be written the way the name was written, bare
//! (`:hover`) or functional (`:is(`). `host` and `cue` exist in both forms.

use core::str::FromStr;

use serde::Serialize;
use strum_macros::EnumString;

/// How the arguments of a functional pseudo are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentShape {
    /// No parentheses.
    None,
    /// `An+B`, optionally followed by `of <selector-list>`.
    AnPlusB,
    /// A comma-separated list of complex selectors.
    SelectorList,
    /// A comma-separated list of relative selectors (`:has()`).
    RelativeSelectorList,
    /// Whitespace-separated identifiers.
    Identifiers,
    /// Comma-separated identifiers or strings.
    ArgumentList,
    /// Exactly one identifier or string.
    SingleArgument,
}

/// Every pseudo-class and pseudo-element the parser knows.
///
/// The kebab-case form of each variant is its CSS name. The last three
/// variants are sentinels that cannot be spelled directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum PseudoType {
    // [Selectors 4: Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    /// `:active`
    Active,
    /// `:active-view-transition`
    ActiveViewTransition,
    /// `:active-view-transition-type(<ident>+)`
    ActiveViewTransitionType,
    /// `:any-link`
    AnyLink,
    /// `:autofill`
    Autofill,
    /// `:blank`
    Blank,
    /// `:checked`
    Checked,
    /// `:default`
    Default,
    /// `:defined`
    Defined,
    /// `:dir(ltr)`
    Dir,
    /// `:disabled`
    Disabled,
    /// `:empty`
    Empty,
    /// `:enabled`
    Enabled,
    /// `:first-child`
    FirstChild,
    /// `:first-of-type`
    FirstOfType,
    /// `:focus`
    Focus,
    /// `:focus-visible`
    FocusVisible,
    /// `:focus-within`
    FocusWithin,
    /// `:fullscreen`
    Fullscreen,
    /// `:future`
    Future,
    /// `:has(<relative-selector-list>)`
    Has,
    /// `:host` and `:host(<compound-selector>)`
    Host,
    /// `:host-context(<compound-selector>)`
    HostContext,
    /// `:hover`
    Hover,
    /// `:in-range`
    InRange,
    /// `:indeterminate`
    Indeterminate,
    /// `:invalid`
    Invalid,
    /// `:is(<selector-list>)`
    Is,
    /// `:lang(<ident> | <string>, ...)`
    Lang,
    /// `:last-child`
    LastChild,
    /// `:last-of-type`
    LastOfType,
    /// `:link`
    Link,
    /// `:local-link`
    LocalLink,
    /// `:modal`
    Modal,
    /// `:not(<selector-list>)`
    Not,
    /// `:nth-child(An+B [of S]?)`
    NthChild,
    /// `:nth-last-child(An+B [of S]?)`
    NthLastChild,
    /// `:nth-last-of-type(An+B)`
    NthLastOfType,
    /// `:nth-of-type(An+B)`
    NthOfType,
    /// `:only-child`
    OnlyChild,
    /// `:only-of-type`
    OnlyOfType,
    /// `:optional`
    Optional,
    /// `:out-of-range`
    OutOfRange,
    /// `:past`
    Past,
    /// `:paused`
    Paused,
    /// `:picture-in-picture`
    PictureInPicture,
    /// `:placeholder-shown`
    PlaceholderShown,
    /// `:playing`
    Playing,
    /// `:popover-open`
    PopoverOpen,
    /// `:read-only`
    ReadOnly,
    /// `:read-write`
    ReadWrite,
    /// `:required`
    Required,
    /// `:root`
    Root,
    /// `:scope`
    Scope,
    /// `:state(<ident>)`
    State,
    /// `:target`
    Target,
    /// `:target-within`
    TargetWithin,
    /// `:user-invalid`
    UserInvalid,
    /// `:user-valid`
    UserValid,
    /// `:valid`
    Valid,
    /// `:visited`
    Visited,
    /// `:where(<selector-list>)`, which adds no specificity
    Where,

    // [CSS Pseudo-Elements Level 4](https://www.w3.org/TR/css-pseudo-4/)
    /// `::after`, also `:after`
    After,
    /// `::backdrop`
    Backdrop,
    /// `::before`, also `:before`
    Before,
    /// `::cue` and `::cue(<compound-selector>)`
    Cue,
    /// `::details-content`
    DetailsContent,
    /// `::file-selector-button`
    FileSelectorButton,
    /// `::first-letter`, also `:first-letter`
    FirstLetter,
    /// `::first-line`, also `:first-line`
    FirstLine,
    /// `::grammar-error`
    GrammarError,
    /// `::highlight(<ident>)`
    Highlight,
    /// `::marker`
    Marker,
    /// `::part(<ident>+)`
    Part,
    /// `::placeholder`
    Placeholder,
    /// `::selection`
    Selection,
    /// `::slotted(<compound-selector>)`
    Slotted,
    /// `::spelling-error`
    SpellingError,
    /// `::target-text`
    TargetText,
    /// `::view-transition`
    ViewTransition,

    /// An unknown name starting with `-webkit-`.
    #[strum(disabled)]
    WebkitCustom,
    /// An unknown name starting with `-internal-`.
    #[strum(disabled)]
    InternalCustom,
    /// The synthetic anchor that starts every selector inside `:has()`.
    #[strum(disabled)]
    RelativeAnchor,
}

impl PseudoType {
    /// How this pseudo's arguments are parsed when written as a function.
    #[must_use]
    pub const fn argument_shape(self) -> ArgumentShape {
        match self {
            Self::NthChild | Self::NthLastChild | Self::NthOfType | Self::NthLastOfType => {
                ArgumentShape::AnPlusB
            }
            Self::Is
            | Self::Not
            | Self::Where
            | Self::Host
            | Self::HostContext
            | Self::Slotted
            | Self::Cue => ArgumentShape::SelectorList,
            Self::Has => ArgumentShape::RelativeSelectorList,
            Self::Part | Self::ActiveViewTransitionType => ArgumentShape::Identifiers,
            Self::Lang => ArgumentShape::ArgumentList,
            Self::Dir | Self::State | Self::Highlight => ArgumentShape::SingleArgument,
            _ => ArgumentShape::None,
        }
    }

    /// Whether the name may be written without parentheses.
    #[must_use]
    pub const fn allows_bare(self) -> bool {
        matches!(self.argument_shape(), ArgumentShape::None)
            || matches!(self, Self::Host | Self::Cue)
    }

    /// Whether the name may be written as a function.
    #[must_use]
    pub const fn allows_arguments(self) -> bool {
        !matches!(self.argument_shape(), ArgumentShape::None)
    }

    /// Whether this is a pseudo-element.
    #[must_use]
    pub const fn is_element(self) -> bool {
        matches!(
            self,
            Self::After
                | Self::Backdrop
                | Self::Before
                | Self::Cue
                | Self::DetailsContent
                | Self::FileSelectorButton
                | Self::FirstLetter
                | Self::FirstLine
                | Self::GrammarError
                | Self::Highlight
                | Self::Marker
                | Self::Part
                | Self::Placeholder
                | Self::Selection
                | Self::Slotted
                | Self::SpellingError
                | Self::TargetText
                | Self::ViewTransition
        )
    }

    /// [§ 3.6.3 Legacy pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-element-syntax):
    /// "user agents must also accept the previous one-colon notation for
    /// these four pseudo-elements."
    #[must_use]
    pub const fn is_legacy_element(self) -> bool {
        matches!(
            self,
            Self::Before | Self::After | Self::FirstLine | Self::FirstLetter
        )
    }

    /// Whether `An+B` may be followed by `of <selector-list>`.
    #[must_use]
    pub const fn allows_of_selector(self) -> bool {
        matches!(self, Self::NthChild | Self::NthLastChild)
    }

    /// Whether the selector list argument must hold exactly one selector.
    #[must_use]
    pub const fn requires_single_selector(self) -> bool {
        matches!(self, Self::Host | Self::HostContext | Self::Slotted)
    }

    /// Whether this is one of the vendor or internal sentinels.
    #[must_use]
    pub const fn is_vendor_sentinel(self) -> bool {
        matches!(self, Self::WebkitCustom | Self::InternalCustom)
    }
}

/// Resolve a lower-cased name written without parentheses.
#[must_use]
pub fn lookup_without_arguments(name: &str) -> Option<PseudoType> {
    PseudoType::from_str(name)
        .ok()
        .filter(|ty| ty.allows_bare())
        .or_else(|| vendor_sentinel(name))
}

/// Resolve a lower-cased name written as a function.
#[must_use]
pub fn lookup_with_arguments(name: &str) -> Option<PseudoType> {
    PseudoType::from_str(name)
        .ok()
        .filter(|ty| ty.allows_arguments())
}

fn vendor_sentinel(name: &str) -> Option<PseudoType> {
    if name.len() > "-webkit-".len() && name.starts_with("-webkit-") {
        Some(PseudoType::WebkitCustom)
    } else if name.len() > "-internal-".len() && name.starts_with("-internal-") {
        Some(PseudoType::InternalCustom)
    } else {
        None
    }
}
