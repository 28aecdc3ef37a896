//! Break-frequency calculation between two lumped elements of a tree.
//!
//! The break frequency is where the impedance magnitudes of two elements of
//! different kinds are equal:
//!
//! | Pair | Break frequency |
//! |------|-----------------|
//! | R, C | 1 / (2π·R·C) |
//! | R, L | R / (2π·L) |
//! | L, C | 1 / (2π·√(L·C)) |

use std::collections::HashMap;

use super::types::{ElementKind, NodeKind};
use super::{Impedance, Overrides};
use crate::error::{FastzError, Result};
use crate::TWO_PI;

impl Impedance {
    /// Break frequency (Hz) of the two elements named by whitespace-separated
    /// `labels`, using their bound values.
    pub fn breakfreq(&self, labels: &str) -> Result<f64> {
        self.breakfreq_with(labels, &Overrides::new())
    }

    /// Break frequency (Hz) with element values resolved through `overrides`
    /// first, exactly as evaluation resolves them.
    pub fn breakfreq_with(&self, labels: &str, overrides: &Overrides) -> Result<f64> {
        let nodes = labels
            .split_whitespace()
            .map(|label| self.subz(label))
            .collect::<Result<Vec<_>>>()?;

        let mut by_kind: HashMap<NodeKind, &Impedance> = HashMap::new();
        for node in nodes.iter().copied() {
            by_kind.entry(node.kind()).or_insert(node);
        }

        if nodes.len() != 2 || by_kind.len() != 2 {
            return Err(FastzError::domain(
                labels,
                format!(
                    "expected two lumped elements of different type, got {} unique types out of {} total",
                    by_kind.len(),
                    nodes.len()
                ),
            ));
        }

        let elements = nodes
            .iter()
            .filter_map(|node| match node {
                Impedance::Element(element) => Some(element),
                Impedance::Composite(_) => None,
            })
            .collect::<Vec<_>>();
        if elements.len() != 2 {
            let kinds = nodes.iter().map(|n| n.kind().to_string()).collect::<Vec<_>>();
            return Err(FastzError::domain(
                labels,
                format!("expected lumped elements of type R, L, and C, got {}", kinds.join(" ")),
            ));
        }

        let mut values: HashMap<ElementKind, f64> = HashMap::new();
        for element in elements {
            values.insert(element.kind, element.resolve_value(overrides)?);
        }

        let get = |kind: ElementKind| values.get(&kind).copied();
        let frequency = match (
            get(ElementKind::Resistor),
            get(ElementKind::Inductor),
            get(ElementKind::Capacitor),
        ) {
            (Some(r), None, Some(c)) => 1.0 / (TWO_PI * r * c),
            (Some(r), Some(l), None) => r / (TWO_PI * l),
            (None, Some(l), Some(c)) => 1.0 / (TWO_PI * (l * c).sqrt()),
            _ => return Err(FastzError::domain(labels, "unsupported element pair")),
        };
        Ok(frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn network() -> Impedance {
        Impedance::resistor("", Some(10.0))
            .series(Impedance::inductor("", Some(100e-6)))
            .unwrap()
            .series(Impedance::capacitor("", Some(1e-6)))
            .unwrap()
            .with_subscript("s")
            .parallel(Impedance::capacitor("1", Some(10e-6)))
            .unwrap()
    }

    #[test]
    fn test_rc() {
        assert_relative_eq!(network().breakfreq("R C").unwrap(), 1.0 / 2.0 / PI / 10.0 / 1e-6, max_relative = 1e-12);
        // order does not matter
        assert_relative_eq!(network().breakfreq("C R").unwrap(), 1.0 / 2.0 / PI / 10.0 / 1e-6, max_relative = 1e-12);
    }

    #[test]
    fn test_rl() {
        assert_relative_eq!(network().breakfreq("R L").unwrap(), 10.0 / 2.0 / PI / 100e-6, max_relative = 1e-12);
    }

    #[test]
    fn test_lc() {
        assert_relative_eq!(
            network().breakfreq("L C").unwrap(),
            1.0 / 2.0 / PI / (100e-6f64 * 1e-6).sqrt(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_domain_errors() {
        let z = network();
        for labels in ["L", "R R", "R L C", "Zs C1", "", "C C1"] {
            let err = z.breakfreq(labels).unwrap_err();
            assert!(matches!(err, FastzError::Domain { .. }), "{labels}: {err}");
        }
    }

    #[test]
    fn test_unknown_label_is_not_found() {
        let err = network().breakfreq("R Lx").unwrap_err();
        assert!(matches!(err, FastzError::LabelNotFound { .. }));
    }

    #[test]
    fn test_unbound_value() {
        let z = Impedance::resistor("", Some(10.0))
            .parallel(Impedance::capacitor("x", None))
            .unwrap();
        assert!(matches!(z.breakfreq("R Cx").unwrap_err(), FastzError::ValueNotFound { .. }));

        let mut overrides = Overrides::new();
        overrides.insert("Cx".to_string(), 1e-6);
        overrides.insert("R".to_string(), 20.0);
        assert_relative_eq!(
            z.breakfreq_with("R Cx", &overrides).unwrap(),
            1.0 / (2.0 * PI * 20.0 * 1e-6),
            max_relative = 1e-12
        );
    }
}
