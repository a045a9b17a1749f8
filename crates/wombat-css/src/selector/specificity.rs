//! [§ 17 Calculating a selector's specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)

use core::fmt;
use core::ops::{Add, AddAssign};

use serde::Serialize;

use super::model::{ComplexSelector, MatchKind, PseudoData, SimpleSelector};
use super::pseudo::PseudoType;

/// "A selector's specificity is calculated for a given element as follows:
///  - count the number of ID selectors in the selector (= A)
///  - count the number of class selectors, attributes selectors, and pseudo-classes in the selector (= B)
///  - count the number of type selectors and pseudo-elements in the selector (= C)
///
/// Specificities are compared by comparing the three components in order."
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Create a new specificity with (A, B, C) components.
    #[must_use]
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self(a, b, c)
    }

    /// "the specificity of the most specific complex selector in its
    /// selector list argument". Zero for an empty list.
    #[must_use]
    pub fn max_of(list: &[ComplexSelector]) -> Self {
        list.iter()
            .map(ComplexSelector::specificity)
            .max()
            .unwrap_or_default()
    }
}

impl Add for Specificity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

impl AddAssign for Specificity {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0, self.1, self.2)
    }
}

const ID: Specificity = Specificity(1, 0, 0);
const CLASS: Specificity = Specificity(0, 1, 0);
const TYPE: Specificity = Specificity(0, 0, 1);
const ZERO: Specificity = Specificity(0, 0, 0);

impl ComplexSelector {
    /// The sum of the specificities of every simple selector.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        self.selectors
            .iter()
            .fold(ZERO, |total, simple| total + simple.specificity())
    }
}

impl SimpleSelector {
    /// This selector's share of its complex selector's specificity.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        match self.match_kind {
            MatchKind::Id => ID,
            MatchKind::Class | MatchKind::Attribute(_) => CLASS,
            MatchKind::Tag => TYPE,
            // "ignore the universal selector"
            MatchKind::UniversalTag => ZERO,
            MatchKind::PseudoClass => self.pseudo_data().map_or(CLASS, |data| pseudo(data, CLASS)),
            MatchKind::PseudoElement => self.pseudo_data().map_or(TYPE, |data| pseudo(data, TYPE)),
        }
    }
}

fn pseudo(data: &PseudoData, own: Specificity) -> Specificity {
    match data.pseudo_type {
        // "The specificity of a :where() pseudo-class is replaced by zero."
        PseudoType::Where | PseudoType::RelativeAnchor => ZERO,
        // "The specificity of an :is(), :not(), or :has() pseudo-class is
        // replaced by the specificity of the most specific complex selector
        // in its selector list argument."
        PseudoType::Is | PseudoType::Not | PseudoType::Has => {
            Specificity::max_of(data.selector_list().unwrap_or_default())
        }
        // "the specificity of an :nth-child() or :nth-last-child() selector
        // is the specificity of the pseudo class itself (counting as one
        // pseudo-class selector) plus the specificity of the most specific
        // complex selector in its selector list argument (if any)."
        //
        // The same holds for :host(), :host-context() and ::slotted().
        _ => own + Specificity::max_of(data.selector_list().unwrap_or_default()),
    }
}
