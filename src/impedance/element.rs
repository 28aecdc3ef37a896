//! Lumped elements: Resistor, Inductor, Capacitor.

use std::fmt;

use num_complex::Complex64;

use super::types::{format_value, ElementKind, Subscript};
use super::Overrides;
use crate::error::{FastzError, Result};

/// A lumped-parameter element, the leaf of an impedance tree.
///
/// The bound value (Ω, H or F) is fixed at construction. An element without
/// a bound value can still be evaluated when an override is supplied under
/// its label.
#[derive(Debug, Clone, PartialEq)]
pub struct LumpedElement {
    pub kind: ElementKind,
    pub subscript: Subscript,
    value: Option<f64>,
}

impl LumpedElement {
    /// Create a new element.
    pub fn new(kind: ElementKind, subscript: impl Into<Subscript>, value: Option<f64>) -> Self {
        Self {
            kind,
            subscript: subscript.into(),
            value,
        }
    }

    /// Create a resistor with a bound resistance in ohms.
    pub fn resistor(subscript: impl Into<Subscript>, ohms: f64) -> Self {
        Self::new(ElementKind::Resistor, subscript, Some(ohms))
    }

    /// Create an inductor with a bound inductance in henries.
    pub fn inductor(subscript: impl Into<Subscript>, henries: f64) -> Self {
        Self::new(ElementKind::Inductor, subscript, Some(henries))
    }

    /// Create a capacitor with a bound capacitance in farads.
    pub fn capacitor(subscript: impl Into<Subscript>, farads: f64) -> Self {
        Self::new(ElementKind::Capacitor, subscript, Some(farads))
    }

    /// Create an element whose value must come from overrides.
    pub fn unbound(kind: ElementKind, subscript: impl Into<Subscript>) -> Self {
        Self::new(kind, subscript, None)
    }

    /// The bound value, if any.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Label formed by prefix and subscript.
    pub fn label(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.subscript)
    }

    /// Value to use for one evaluation: the override under this element's
    /// label if present, otherwise the bound value.
    pub fn resolve_value(&self, overrides: &Overrides) -> Result<f64> {
        let label = self.label();
        overrides
            .get(&label)
            .copied()
            .or(self.value)
            .ok_or(FastzError::ValueNotFound { label })
    }

    /// Complex impedance at `frequency` (Hz).
    pub fn evaluate(&self, frequency: f64, overrides: &Overrides) -> Result<Complex64> {
        let value = self.resolve_value(overrides)?;
        Ok(self.kind.impedance(frequency, value))
    }

    /// Complex impedance at every frequency of a sweep.
    pub fn evaluate_sweep(&self, frequencies: &[f64], overrides: &Overrides) -> Result<Vec<Complex64>> {
        let value = self.resolve_value(overrides)?;
        Ok(frequencies
            .iter()
            .map(|&f| self.kind.impedance(f, value))
            .collect())
    }
}

impl fmt::Display for LumpedElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{}{}[{}{}]", self.kind.prefix(), self.subscript, format_value(v), self.kind.unit()),
            None => write!(f, "{}{}", self.kind.prefix(), self.subscript),
        }
    }
}
