//! The impedance node: the common interface of leaves and composites.

use std::fmt;

use num_complex::Complex64;

use super::composite::Composite;
use super::element::LumpedElement;
use super::types::{ConnectionKind, ElementKind, NodeKind, Subscript};
use super::Overrides;
use crate::error::{FastzError, Result};

/// A node of an impedance tree.
///
/// Each node exclusively owns its children. Labels are derived on demand
/// from prefix and subscript, so re-labelling a node takes effect
/// immediately.
#[derive(Debug, Clone, PartialEq)]
pub enum Impedance {
    Element(LumpedElement),
    Composite(Composite),
}

impl Impedance {
    /// Create a resistor leaf.
    pub fn resistor(subscript: impl Into<Subscript>, ohms: Option<f64>) -> Self {
        Impedance::Element(LumpedElement::new(ElementKind::Resistor, subscript, ohms))
    }

    /// Create an inductor leaf.
    pub fn inductor(subscript: impl Into<Subscript>, henries: Option<f64>) -> Self {
        Impedance::Element(LumpedElement::new(ElementKind::Inductor, subscript, henries))
    }

    /// Create a capacitor leaf.
    pub fn capacitor(subscript: impl Into<Subscript>, farads: Option<f64>) -> Self {
        Impedance::Element(LumpedElement::new(ElementKind::Capacitor, subscript, farads))
    }

    /// Create a leaf with no bound value.
    pub fn unbound(kind: ElementKind, subscript: impl Into<Subscript>) -> Self {
        Impedance::Element(LumpedElement::unbound(kind, subscript))
    }

    /// Reference designator prefix: `R`, `L`, `C`, or `Z` for composites.
    pub fn prefix(&self) -> &'static str {
        match self {
            Impedance::Element(e) => e.kind.prefix(),
            Impedance::Composite(_) => ConnectionKind::PREFIX,
        }
    }

    /// The node's subscript.
    pub fn subscript(&self) -> &Subscript {
        match self {
            Impedance::Element(e) => &e.subscript,
            Impedance::Composite(c) => &c.subscript,
        }
    }

    /// Label used for lookup: prefix followed by subscript.
    pub fn label(&self) -> String {
        format!("{}{}", self.prefix(), self.subscript())
    }

    /// Concrete kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Impedance::Element(e) => NodeKind::Element(e.kind),
            Impedance::Composite(c) => NodeKind::Connection(c.kind),
        }
    }

    /// Re-label this node in place.
    pub fn set_subscript(&mut self, subscript: impl Into<Subscript>) -> &mut Self {
        let subscript = subscript.into();
        match self {
            Impedance::Element(e) => e.subscript = subscript,
            Impedance::Composite(c) => c.subscript = subscript,
        }
        self
    }

    /// Label this node and hand it back, for use at the end of a
    /// composition expression.
    pub fn with_subscript(mut self, subscript: impl Into<Subscript>) -> Self {
        self.set_subscript(subscript);
        self
    }

    /// Connect `other` in series with this impedance.
    ///
    /// If this node is already a series composite, `other` is merged into it
    /// (flattening a series `other` into individual children). Otherwise a
    /// new two-child series composite is created.
    pub fn series(self, other: Impedance) -> Result<Self> {
        self.combine(ConnectionKind::Series, other)
    }

    /// Connect `other` in parallel with this impedance.
    ///
    /// Flattens exactly like [`Impedance::series`].
    pub fn parallel(self, other: Impedance) -> Result<Self> {
        self.combine(ConnectionKind::Parallel, other)
    }

    fn combine(self, kind: ConnectionKind, other: Impedance) -> Result<Self> {
        match self {
            Impedance::Composite(mut composite) if composite.kind == kind => {
                composite.merge(other);
                Ok(Impedance::Composite(composite))
            }
            this => Ok(Impedance::Composite(Composite::new(kind, vec![this, other])?)),
        }
    }

    /// Child nodes, empty for leaves.
    pub fn children(&self) -> &[Impedance] {
        match self {
            Impedance::Element(_) => &[],
            Impedance::Composite(c) => c.children(),
        }
    }

    /// Complex impedance at cyclic `frequency` (Hz).
    ///
    /// `overrides` maps element labels to values that replace the bound
    /// values for this call only. Keys that match no element are ignored;
    /// see [`validate_overrides`](super::validate_overrides) for a strict check.
    pub fn evaluate(&self, frequency: f64, overrides: &Overrides) -> Result<Complex64> {
        match self {
            Impedance::Element(e) => e.evaluate(frequency, overrides),
            Impedance::Composite(c) => c.evaluate(frequency, overrides),
        }
    }

    /// Complex impedance at each frequency of `frequencies`, in order.
    pub fn evaluate_sweep(&self, frequencies: &[f64], overrides: &Overrides) -> Result<Vec<Complex64>> {
        match self {
            Impedance::Element(e) => e.evaluate_sweep(frequencies, overrides),
            Impedance::Composite(c) => c.evaluate_sweep(frequencies, overrides),
        }
    }

    /// First node matching `label`, depth-first and left to right, starting
    /// with this node itself.
    ///
    /// Labels are not required to be unique; with duplicates the first one
    /// in traversal order wins.
    pub fn subz(&self, label: &str) -> Result<&Impedance> {
        self.find(label)
            .ok_or_else(|| FastzError::label_not_found(label, self))
    }

    /// Mutable variant of [`Impedance::subz`], for re-labelling nodes
    /// inside an existing tree.
    pub fn subz_mut(&mut self, label: &str) -> Result<&mut Impedance> {
        if self.find(label).is_none() {
            return Err(FastzError::label_not_found(label, &*self));
        }
        Ok(self.find_mut(label))
    }

    fn find(&self, label: &str) -> Option<&Impedance> {
        if self.label() == label {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(label))
    }

    // Caller guarantees a match exists somewhere under `self`.
    fn find_mut(&mut self, label: &str) -> &mut Impedance {
        if self.label() == label {
            return self;
        }
        let position = self
            .children()
            .iter()
            .position(|child| child.find(label).is_some());
        match (self, position) {
            (Impedance::Composite(c), Some(i)) => c.children_mut()[i].find_mut(label),
            (this, _) => this,
        }
    }

    /// Depth-first iterator over this node and all of its descendants.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Leaf elements of the tree, depth-first.
    pub fn elements(&self) -> impl Iterator<Item = &LumpedElement> {
        self.iter().filter_map(|node| match node {
            Impedance::Element(e) => Some(e),
            Impedance::Composite(_) => None,
        })
    }
}

/// Depth-first, left-to-right traversal of an impedance tree.
pub struct Iter<'a> {
    stack: Vec<&'a Impedance>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Impedance;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

impl From<LumpedElement> for Impedance {
    fn from(element: LumpedElement) -> Self {
        Impedance::Element(element)
    }
}

impl From<Composite> for Impedance {
    fn from(composite: Composite) -> Self {
        Impedance::Composite(composite)
    }
}

impl fmt::Display for Impedance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impedance::Element(e) => write!(f, "{}", e),
            Impedance::Composite(c) => write!(f, "{}", c),
        }
    }
}
