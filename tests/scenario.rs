//! End-to-end scenario: a labelled RLC tank in series with a lead inductance.

use approx::assert_relative_eq;
use fastz::impedance::{ConnectionKind, NodeKind};
use fastz::{dsl, FastzError, Impedance, Overrides, TWO_PI};

fn tank() -> Impedance {
    Impedance::resistor("", Some(10.0))
        .parallel(Impedance::capacitor("", Some(0.2e-9)))
        .unwrap()
        .parallel(Impedance::inductor("a", Some(100e-9)))
        .unwrap()
        .with_subscript("p")
        .series(Impedance::inductor("b", Some(5e-9)))
        .unwrap()
        .with_subscript(1)
}

#[test]
fn test_structure() {
    let z = tank();
    assert_eq!(z.label(), "Z1");
    assert_eq!(z.kind(), NodeKind::Connection(ConnectionKind::Series));
    assert_eq!(z.children().len(), 2);

    let zp = z.subz("Zp").unwrap();
    assert_eq!(zp.kind(), NodeKind::Connection(ConnectionKind::Parallel));
    assert_eq!(zp.children().len(), 3);
    assert_eq!(z.subz("Z1").unwrap(), &z);
}

#[test]
fn test_evaluation_at_10mhz() {
    let z = tank();
    let none = Overrides::new();
    let f = 10e6;
    let omega = TWO_PI * f;

    let y = 1.0 / 10.0 + num_complex::Complex64::new(0.0, omega * 0.2e-9)
        + 1.0 / num_complex::Complex64::new(0.0, omega * 100e-9);
    let expected = 1.0 / y + num_complex::Complex64::new(0.0, omega * 5e-9);

    let value = z.evaluate(f, &none).unwrap();
    assert_relative_eq!(value.re, expected.re, max_relative = 1e-9);
    assert_relative_eq!(value.im, expected.im, max_relative = 1e-9);

    let parts = z.subz("Zp").unwrap().evaluate(f, &none).unwrap() + z.subz("Lb").unwrap().evaluate(f, &none).unwrap();
    assert_relative_eq!(value.re, parts.re, max_relative = 1e-12);
    assert_relative_eq!(value.im, parts.im, max_relative = 1e-12);
}

#[test]
fn test_break_frequencies() {
    let z = tank();
    assert_relative_eq!(z.breakfreq("R La").unwrap(), 10.0 / (TWO_PI * 100e-9), max_relative = 1e-12);
    assert_relative_eq!(z.breakfreq("R C").unwrap(), 1.0 / (TWO_PI * 10.0 * 0.2e-9), max_relative = 1e-12);
    assert_relative_eq!(
        z.breakfreq("C Lb").unwrap(),
        1.0 / (TWO_PI * (5e-9f64 * 0.2e-9).sqrt()),
        max_relative = 1e-12
    );
    assert!(matches!(z.breakfreq("La Lb"), Err(FastzError::Domain { .. })));
    assert!(matches!(z.breakfreq("Zp Lb"), Err(FastzError::Domain { .. })));
}

#[test]
fn test_overrides_apply_per_call() {
    let z = tank();
    let mut overrides = Overrides::new();
    overrides.insert("Lb".to_string(), 0.0);
    let f = 10e6;
    let with = z.evaluate(f, &overrides).unwrap();
    let parallel_only = z.subz("Zp").unwrap().evaluate(f, &Overrides::new()).unwrap();
    assert_relative_eq!(with.re, parallel_only.re, max_relative = 1e-12);
    assert_relative_eq!(with.im, parallel_only.im, max_relative = 1e-12);

    // the bound value is unchanged afterwards
    let without = z.evaluate(f, &Overrides::new()).unwrap();
    assert!((without - with).norm() > 0.0);
}

#[test]
fn test_notation_matches_builder() {
    let parsed = dsl::parse("Z1:( Zp:(R[10] ‖ C[0.2e-9] ‖ La[100e-9]) + Lb[5e-9] )").unwrap();
    assert_eq!(parsed, tank());
    assert_eq!(parsed.to_string(), tank().to_string());
}

#[test]
fn test_package_model_sweep() {
    // four bond balls in parallel, in series with the die
    let ball = || dsl::parse("Zball:(Rp[1.8e-3] + Lp[64e-12])").unwrap();
    let package = ball()
        .parallel(ball())
        .unwrap()
        .parallel(ball())
        .unwrap()
        .parallel(ball())
        .unwrap()
        .with_subscript("pkg");
    let die = dsl::parse("Zdie:(Cd[1e-9] + Rd[40e-3])").unwrap();
    let zin = package.series(die).unwrap().with_subscript("in");

    assert_eq!(zin.label(), "Zin");
    assert_eq!(zin.children().len(), 2);
    let pkg = zin.subz("Zpkg").unwrap();
    assert_eq!(pkg.kind(), NodeKind::Connection(ConnectionKind::Parallel));
    assert_eq!(pkg.children().len(), 4);
    assert_eq!(zin.subz("Zdie").unwrap().children().len(), 2);

    let ff = fastz::sweep::logspace(1e7, 1e10, 50).unwrap();
    let none = Overrides::new();
    let sweep = zin.evaluate_sweep(&ff, &none).unwrap();
    assert_eq!(sweep.len(), 50);
    assert!(sweep.iter().all(|z| z.is_finite()));

    let parts = pkg.evaluate(ff[0], &none).unwrap() + zin.subz("Zdie").unwrap().evaluate(ff[0], &none).unwrap();
    assert_relative_eq!(sweep[0].re, parts.re, max_relative = 1e-9);
    assert_relative_eq!(sweep[0].im, parts.im, max_relative = 1e-9);
}

#[test]
fn test_parallel_merge_absorbs_die() {
    // parallel-combining into the package node merges the die into it
    let package = dsl::parse("Zpkg:((Rp[1.8e-3] + Lp[64e-12]) ‖ (Rp[1.8e-3] + Lp[64e-12]))").unwrap();
    let die = dsl::parse("Zdie:(Cd[1e-9] + Rd[40e-3])").unwrap();
    let zin = package.parallel(die).unwrap().with_subscript("in");
    assert_eq!(zin.children().len(), 3);
    assert!(zin.subz("Zpkg").is_err());
    assert!(zin.subz("Zdie").is_ok());
}
