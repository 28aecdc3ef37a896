//! Frequency sweep generation.

use crate::error::{FastzError, Result};

/// Generates `points` linearly spaced frequencies in [start, stop] (Hz).
pub fn linspace(start: f64, stop: f64, points: usize) -> Result<Vec<f64>> {
    if !start.is_finite() || !stop.is_finite() {
        return Err(FastzError::invalid_sweep(format!(
            "bounds must be finite, got {} to {}",
            start, stop
        )));
    }
    Ok(match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (points as f64 - 1.0);
            (0..points).map(|i| start + step * i as f64).collect()
        }
    })
}

/// Generates `points` logarithmically spaced frequencies between `start` and
/// `stop` (Hz), both ends included.
pub fn logspace(start: f64, stop: f64, points: usize) -> Result<Vec<f64>> {
    if !(start > 0.0 && stop > 0.0 && start.is_finite() && stop.is_finite()) {
        return Err(FastzError::invalid_sweep(format!(
            "logarithmic bounds must be positive and finite, got {} to {}",
            start, stop
        )));
    }
    Ok(match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let log_start = start.log10();
            let step = (stop.log10() - log_start) / (points as f64 - 1.0);
            (0..points)
                .map(|i| 10f64.powf(log_start + step * i as f64))
                .collect()
        }
    })
}
