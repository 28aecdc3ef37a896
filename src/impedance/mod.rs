//! Impedance tree model and its evaluation/query engine.
//!
//! An impedance network is a tree: leaves are lumped elements (R, L, C),
//! internal nodes are series or parallel connections of two or more
//! sub-impedances. Trees are built bottom-up with [`Impedance::series`] and
//! [`Impedance::parallel`], which flatten same-kind connections so that
//! `a + b + c` becomes a single three-child series node.
//!
//! Every node has a label made of its prefix (`R`, `L`, `C`, or `Z` for
//! composites) and a subscript. Labels are used to look nodes up with
//! [`Impedance::subz`], to override element values during evaluation, and
//! to name the element pair for [`Impedance::breakfreq`].
//!
//! # Example
//!
//! ```
//! use fastz::impedance::{Impedance, Overrides};
//!
//! let z = Impedance::resistor("", Some(10.0))
//!     .parallel(Impedance::capacitor("", Some(0.2e-9)))?
//!     .parallel(Impedance::inductor("a", Some(100e-9)))?
//!     .with_subscript("p")
//!     .series(Impedance::inductor("b", Some(5e-9)))?
//!     .with_subscript(1);
//!
//! assert_eq!(z.label(), "Z1");
//! assert_eq!(z.subz("Zp")?.children().len(), 3);
//! let at_10mhz = z.evaluate(10e6, &Overrides::new())?;
//! assert!(at_10mhz.norm() > 0.0);
//! # Ok::<(), fastz::FastzError>(())
//! ```

mod breakfreq;
mod composite;
mod element;
mod node;
mod types;
mod validate;

pub use composite::Composite;
pub use element::LumpedElement;
pub use node::{Impedance, Iter};
pub use types::{ConnectionKind, ElementKind, NodeKind, Subscript};
pub use validate::{unused_overrides, validate_overrides};

/// Element values keyed by label, replacing bound values for one call.
pub type Overrides = std::collections::HashMap<String, f64>;
