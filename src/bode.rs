//! Bode magnitude data for impedance networks.
//!
//! This is the data side of a log-log magnitude plot: which curves to draw,
//! their magnitudes over a sweep, how each curve is annotated and where the
//! annotation sits. Rendering is left to the caller.

use tracing::debug;

use crate::error::{FastzError, Result};
use crate::impedance::{ElementKind, Impedance, Overrides};

/// How a curve should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Solid impedance curve (the network or one of its sub-impedances)
    Impedance,
    /// Dashed reference asymptote, usually a single R, L or C
    Reference,
}

/// A requested curve: node label plus optional annotation position (Hz).
#[derive(Debug, Clone, PartialEq)]
pub struct LineSpec {
    pub label: String,
    pub position: Option<f64>,
}

/// Magnitude of one sub-impedance over a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct MagnitudeCurve {
    pub label: String,
    pub annotation: String,
    pub style: LineStyle,
    /// |Z| in ohms, one entry per sweep frequency
    pub magnitudes: Vec<f64>,
    /// Index into the sweep where the annotation is placed
    pub annotation_index: usize,
}

/// Annotation text for a node: the reactance formula for inductors and
/// capacitors, the bare label otherwise.
pub fn annotation_for(node: &Impedance) -> String {
    let text = format!("{}_{{{}}}", node.prefix(), node.subscript());
    match node.kind().element() {
        Some(ElementKind::Capacitor) => format!("$\\frac{{1}}{{\\omega {}}}$", text),
        Some(ElementKind::Inductor) => format!("$\\omega {}$", text),
        _ => format!("${}$", text),
    }
}

/// Parse whitespace-separated `label[:position]` entries.
///
/// A repeated label keeps its first place in the order but takes the
/// position given last.
pub fn parse_line_specs(text: &str) -> Result<Vec<LineSpec>> {
    let mut specs: Vec<LineSpec> = Vec::new();
    for arg in text.split_whitespace() {
        let spec = match arg.split_once(':') {
            Some((label, position)) => {
                let position = position.parse::<f64>().map_err(|e| FastzError::InvalidLineSpec {
                    spec: arg.to_string(),
                    message: e.to_string(),
                })?;
                LineSpec {
                    label: label.to_string(),
                    position: Some(position),
                }
            }
            None => LineSpec {
                label: arg.to_string(),
                position: None,
            },
        };
        match specs.iter_mut().find(|s| s.label == spec.label) {
            Some(existing) => existing.position = spec.position,
            None => specs.push(spec),
        }
    }
    Ok(specs)
}

/// Index of the sweep frequency closest to `position`.
fn nearest_index(frequencies: &[f64], position: f64) -> usize {
    frequencies
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - position).abs().total_cmp(&(*b - position).abs()))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn curve(
    node: &Impedance,
    frequencies: &[f64],
    annotation_index: usize,
    style: LineStyle,
    overrides: &Overrides,
) -> Result<MagnitudeCurve> {
    let magnitudes = node
        .evaluate_sweep(frequencies, overrides)?
        .into_iter()
        .map(|z| z.norm())
        .collect();
    Ok(MagnitudeCurve {
        label: node.label(),
        annotation: annotation_for(node),
        style,
        magnitudes,
        annotation_index,
    })
}

/// Build the curves of a Bode magnitude plot.
///
/// The target network comes first, then every `zlines` sub-impedance, then
/// every `refzlines` reference curve. Impedance annotations default to the
/// last sweep frequency, reference annotations to the first. A `zlines`
/// entry naming the target only positions the target's annotation.
pub fn bode_curves(
    target: &Impedance,
    frequencies: &[f64],
    zlines: &str,
    refzlines: &str,
    overrides: &Overrides,
) -> Result<Vec<MagnitudeCurve>> {
    let (first, last) = match (frequencies.first(), frequencies.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Err(FastzError::invalid_sweep("no frequencies to plot")),
    };

    let mut zline_specs = parse_line_specs(zlines)?;
    let reference_specs = parse_line_specs(refzlines)?;

    let target_label = target.label();
    let target_position = match zline_specs.iter().position(|s| s.label == target_label) {
        Some(i) => zline_specs.remove(i).position.unwrap_or(last),
        None => last,
    };

    let mut curves = Vec::with_capacity(1 + zline_specs.len() + reference_specs.len());
    curves.push(curve(
        target,
        frequencies,
        nearest_index(frequencies, target_position),
        LineStyle::Impedance,
        overrides,
    )?);

    for spec in &zline_specs {
        let index = nearest_index(frequencies, spec.position.unwrap_or(last));
        curves.push(curve(target.subz(&spec.label)?, frequencies, index, LineStyle::Impedance, overrides)?);
    }
    for spec in &reference_specs {
        let index = nearest_index(frequencies, spec.position.unwrap_or(first));
        curves.push(curve(target.subz(&spec.label)?, frequencies, index, LineStyle::Reference, overrides)?);
    }

    debug!(curves = curves.len(), points = frequencies.len(), "bode curves assembled");
    Ok(curves)
}
