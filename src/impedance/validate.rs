//! Override validation.

use tracing::debug;

use super::{Impedance, Overrides};
use crate::error::{FastzError, Result};

/// Check that every override key names a lumped element of the tree.
///
/// Evaluation itself ignores keys that match nothing, so a typo in a label
/// silently leaves the bound value in place. Call this first when that
/// should be an error instead.
pub fn validate_overrides(network: &Impedance, overrides: &Overrides) -> Result<()> {
    let mut unmatched = unused_overrides(network, overrides);
    if unmatched.is_empty() {
        debug!(count = overrides.len(), "all overrides matched");
        return Ok(());
    }
    unmatched.sort();
    Err(FastzError::ParameterMismatch {
        labels: unmatched,
        within: network.to_string(),
    })
}

/// Override keys that match no lumped element label in the tree.
pub fn unused_overrides(network: &Impedance, overrides: &Overrides) -> Vec<String> {
    overrides
        .keys()
        .filter(|key| !network.elements().any(|e| e.label() == **key))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> Impedance {
        Impedance::resistor("1", Some(10.0))
            .parallel(Impedance::capacitor("1", None))
            .unwrap()
            .with_subscript("p")
    }

    #[test]
    fn test_matching_overrides_pass() {
        let mut overrides = Overrides::new();
        overrides.insert("R1".to_string(), 5.0);
        overrides.insert("C1".to_string(), 1e-9);
        assert!(validate_overrides(&network(), &overrides).is_ok());
        assert!(validate_overrides(&network(), &Overrides::new()).is_ok());
    }

    #[test]
    fn test_unmatched_overrides_reported() {
        let mut overrides = Overrides::new();
        overrides.insert("R1".to_string(), 5.0);
        overrides.insert("R2".to_string(), 5.0);
        overrides.insert("Zp".to_string(), 5.0);
        match validate_overrides(&network(), &overrides) {
            Err(FastzError::ParameterMismatch { labels, .. }) => {
                assert_eq!(labels, vec!["R2".to_string(), "Zp".to_string()]);
            }
            other => panic!("expected parameter mismatch, got {other:?}"),
        }
    }
}
