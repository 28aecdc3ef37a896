//! # fastz
//!
//! Composable impedance networks evaluated in the frequency domain.
//!
//! This library provides:
//! - An impedance tree of lumped elements (R, L, C) joined by series and
//!   parallel connections, with flattening of same-kind connections
//! - Complex impedance evaluation at one frequency or over a sweep, with
//!   per-call value overrides keyed by element label
//! - Label-based lookup of sub-impedances and break-frequency calculation
//!   between pairs of elements
//! - A text notation for networks and the data behind Bode magnitude plots
//!
//! ## Architecture
//!
//! - [`impedance`] - Tree model, evaluation, lookup and break frequencies
//! - [`dsl`] - Parser for the impedance expression notation
//! - [`bode`] - Magnitude curves and annotations for plotting
//! - [`sweep`] - Linear and logarithmic frequency sweeps
//!
//! ## Usage
//!
//! ### Library
//!
//! ```
//! use fastz::{Impedance, Overrides};
//!
//! let z = Impedance::resistor("", Some(10.0))
//!     .parallel(Impedance::capacitor("", Some(1e-6)))?
//!     .with_subscript("p");
//!
//! let corner = z.breakfreq("R C")?;
//! let at_corner = z.evaluate(corner, &Overrides::new())?;
//! assert!((at_corner.norm() - 10.0 / 2f64.sqrt()).abs() < 1e-9);
//! # Ok::<(), fastz::FastzError>(())
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! fastz eval "Z1:(Zp:(R[10] ‖ C[0.2e-9] ‖ La[100e-9]) + Lb[5e-9])" --freq 10e6
//! fastz bode "(R[10] || C[1e-6])" --start 1e3 --stop 1e6 --refzlines "R C" > bode.csv
//! ```

pub mod bode;
pub mod dsl;
pub mod error;
pub mod impedance;
pub mod sweep;

// Re-export main types for convenience
pub use error::{FastzError, Result};
pub use impedance::{Impedance, Overrides};
pub use num_complex::Complex64;

/// 2π, converting cyclic frequency (Hz) to angular frequency (rad/s).
pub const TWO_PI: f64 = 2.0 * std::f64::consts::PI;
