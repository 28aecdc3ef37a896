//! Composite nodes: series and parallel connections.

use std::fmt;

use num_complex::Complex64;
use tracing::{debug, trace};

use super::types::{ConnectionKind, Subscript};
use super::{Impedance, Overrides};
use crate::error::{FastzError, Result};

/// Series or parallel connection of two or more sub-impedances.
///
/// A composite always holds at least two children; the only mutation it
/// exposes is [`Composite::merge`], which only ever adds children.
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    pub kind: ConnectionKind,
    pub subscript: Subscript,
    children: Vec<Impedance>,
}

impl Composite {
    /// Create a composite from its children, in order.
    pub fn new(kind: ConnectionKind, children: Vec<Impedance>) -> Result<Self> {
        if children.len() < 2 {
            return Err(FastzError::TooFewChildren {
                connection: kind.to_string(),
                given: children.len(),
            });
        }
        debug!(connection = %kind, children = children.len(), "composite impedance created");
        Ok(Self {
            kind,
            subscript: Subscript::none(),
            children,
        })
    }

    /// Create a series composite.
    pub fn series(children: Vec<Impedance>) -> Result<Self> {
        Self::new(ConnectionKind::Series, children)
    }

    /// Create a parallel composite.
    pub fn parallel(children: Vec<Impedance>) -> Result<Self> {
        Self::new(ConnectionKind::Parallel, children)
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[Impedance] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Impedance] {
        &mut self.children
    }

    /// Label formed by the `Z` prefix and subscript.
    pub fn label(&self) -> String {
        format!("{}{}", ConnectionKind::PREFIX, self.subscript)
    }

    /// Merge another impedance into this composite.
    ///
    /// A composite of the same connection kind contributes each of its
    /// children individually; anything else is appended as one child.
    pub fn merge(&mut self, other: Impedance) {
        match other {
            Impedance::Composite(other) if other.kind == self.kind => {
                trace!(
                    connection = %self.kind,
                    merged = other.children.len(),
                    "flattening same-kind composite"
                );
                self.children.extend(other.children);
            }
            other => {
                trace!(connection = %self.kind, child = %other.label(), "appending child");
                self.children.push(other);
            }
        }
    }

    /// Complex impedance at `frequency` (Hz).
    pub fn evaluate(&self, frequency: f64, overrides: &Overrides) -> Result<Complex64> {
        let values = self
            .children
            .iter()
            .map(|child| child.evaluate(frequency, overrides))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.kind.combine(values))
    }

    /// Complex impedance at every frequency of a sweep.
    ///
    /// Each child is evaluated over the whole sweep once, then the results
    /// are combined point by point with [`ConnectionKind::combine`].
    pub fn evaluate_sweep(&self, frequencies: &[f64], overrides: &Overrides) -> Result<Vec<Complex64>> {
        let responses = self
            .children
            .iter()
            .map(|child| child.evaluate_sweep(frequencies, overrides))
            .collect::<Result<Vec<_>>>()?;

        Ok((0..frequencies.len())
            .map(|i| self.kind.combine(responses.iter().map(|response| response[i])))
            .collect())
    }
}

impl fmt::Display for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = format!(" {} ", self.kind.operator());
        let text = self
            .children
            .iter()
            .map(|child| child.to_string())
            .collect::<Vec<_>>()
            .join(&separator);

        if self.subscript.is_empty() {
            write!(f, "({})", text)
        } else {
            write!(f, "{}:({})", self.label(), text)
        }
    }
}
