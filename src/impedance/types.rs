//! Core types for impedance tree representation.

use std::fmt;

use num_complex::Complex64;

use crate::TWO_PI;

/// Subscript attached to a node's prefix to form its label.
///
/// Subscripts are either free text (`"a"`, `"die"`) or integers (`1`).
/// Only the string form takes part in label matching, so `Text("1")` and
/// `Index(1)` produce the same label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subscript {
    /// Free-text subscript
    Text(String),
    /// Integer subscript
    Index(i64),
}

impl Subscript {
    /// The empty subscript.
    pub fn none() -> Self {
        Subscript::Text(String::new())
    }

    /// True for an empty text subscript. Integer subscripts are never empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Subscript::Text(s) if s.is_empty())
    }
}

impl Default for Subscript {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for Subscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subscript::Text(s) => write!(f, "{}", s),
            Subscript::Index(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Subscript {
    fn from(s: &str) -> Self {
        Subscript::Text(s.to_string())
    }
}

impl From<String> for Subscript {
    fn from(s: String) -> Self {
        Subscript::Text(s)
    }
}

impl From<&String> for Subscript {
    fn from(s: &String) -> Self {
        Subscript::Text(s.clone())
    }
}

impl From<i32> for Subscript {
    fn from(n: i32) -> Self {
        Subscript::Index(i64::from(n))
    }
}

impl From<i64> for Subscript {
    fn from(n: i64) -> Self {
        Subscript::Index(n)
    }
}

/// Lumped element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Resistor (Ω)
    Resistor,
    /// Inductor (H)
    Inductor,
    /// Capacitor (F)
    Capacitor,
}

impl ElementKind {
    /// Reference designator prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            ElementKind::Resistor => "R",
            ElementKind::Inductor => "L",
            ElementKind::Capacitor => "C",
        }
    }

    /// Unit symbol, used for display only.
    pub fn unit(&self) -> &'static str {
        match self {
            ElementKind::Resistor => "Ω",
            ElementKind::Inductor => "H",
            ElementKind::Capacitor => "F",
        }
    }

    /// Kind for a reference designator prefix character.
    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            'R' => Some(ElementKind::Resistor),
            'L' => Some(ElementKind::Inductor),
            'C' => Some(ElementKind::Capacitor),
            _ => None,
        }
    }

    /// Complex impedance of an element of this kind at cyclic `frequency` (Hz).
    ///
    /// A capacitor at 0 Hz (or with a zero value) divides by zero; the
    /// resulting non-finite value is returned as-is.
    pub fn impedance(&self, frequency: f64, value: f64) -> Complex64 {
        let omega = TWO_PI * frequency;
        match self {
            ElementKind::Resistor => Complex64::new(value, 0.0),
            ElementKind::Inductor => Complex64::new(0.0, omega * value),
            ElementKind::Capacitor => 1.0 / (Complex64::i() * omega * value),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Resistor => "resistor",
            ElementKind::Inductor => "inductor",
            ElementKind::Capacitor => "capacitor",
        };
        write!(f, "{}", name)
    }
}

/// Connection topology of a composite node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    /// Series connection (impedances add)
    Series,
    /// Parallel connection (admittances add)
    Parallel,
}

impl ConnectionKind {
    /// Prefix shared by every composite node.
    pub const PREFIX: &'static str = "Z";

    /// Operator symbol used when rendering.
    pub fn operator(&self) -> &'static str {
        match self {
            ConnectionKind::Series => "+",
            ConnectionKind::Parallel => "‖",
        }
    }

    /// Aggregate the children's impedances at one frequency point.
    ///
    /// Parallel connections invert the summed admittance with no guard
    /// against zero-impedance children.
    pub fn combine<I>(&self, values: I) -> Complex64
    where
        I: IntoIterator<Item = Complex64>,
    {
        match self {
            ConnectionKind::Series => values.into_iter().sum(),
            ConnectionKind::Parallel => {
                1.0 / values.into_iter().map(|z| 1.0 / z).sum::<Complex64>()
            }
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionKind::Series => write!(f, "series"),
            ConnectionKind::Parallel => write!(f, "parallel"),
        }
    }
}

/// Concrete kind of any node in an impedance tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A lumped element leaf
    Element(ElementKind),
    /// A series or parallel composite
    Connection(ConnectionKind),
}

impl NodeKind {
    /// The element kind, if this is a leaf.
    pub fn element(&self) -> Option<ElementKind> {
        match self {
            NodeKind::Element(kind) => Some(*kind),
            NodeKind::Connection(_) => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Element(kind) => write!(f, "{}", kind),
            NodeKind::Connection(kind) => write!(f, "{}", kind),
        }
    }
}

/// Format a bound element value the way it is shown in renderings.
///
/// Mid-range magnitudes print as plain decimals, everything else in
/// scientific notation (`1e-9` rather than `0.000000001`).
pub(crate) fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || !value.is_finite() || (1e-4..1e6).contains(&magnitude) {
        format!("{}", value)
    } else {
        format!("{:e}", value)
    }
}
