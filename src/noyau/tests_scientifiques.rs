//! Tests scientifiques (campagne) : propriétés observables de `parse`.
//!
//! - arités
//! - multiplications implicites
//! - repli
//! - évaluations connues
//! - suppression des erreurs de domaine (0, jamais NaN/∞)

use pretty_assertions::assert_eq;

use super::{parse, Arity, Bindings, Var};

fn liaisons(paires: &[(Var, f64)]) -> Bindings {
    paires.iter().copied().collect()
}

fn eval(expr: &str, paires: &[(Var, f64)]) -> f64 {
    parse(expr).evaluate(&liaisons(paires))
}

fn assert_proche(expr: &str, paires: &[(Var, f64)], attendu: f64) {
    let v = eval(expr, paires);
    assert!(
        (v - attendu).abs() < 1e-9,
        "expr={expr:?} : {v} au lieu de {attendu}"
    );
}

/* ------------------------ Arités ------------------------ */

#[test]
fn sci_arites() {
    assert_eq!(parse("x").arity, Arity::Single);
    assert_eq!(parse("x^2+y^2").arity, Arity::Bivariate);
    assert_eq!(parse("x+y+z").arity, Arity::Trivariate);
    assert_eq!(parse("x+y+z+t").arity, Arity::Parametric);
}

#[test]
fn sci_ordre_fixe_des_variables() {
    assert_eq!(parse("y+x").variables, vec![Var::X, Var::Y]);
    assert_eq!(parse("v+u+t").variables, vec![Var::T, Var::U, Var::V]);
}

/* ------------------------ Multiplications implicites ------------------------ */

#[test]
fn sci_multiplication_implicite() {
    assert_eq!(eval("2x", &[(Var::X, 3.0)]), 6.0);
    assert_eq!(eval("xy", &[(Var::X, 2.0), (Var::Y, 5.0)]), 10.0);
    assert_eq!(eval("(x+1)x", &[(Var::X, 2.0)]), 6.0);
    assert_eq!(eval("x(x+1)", &[(Var::X, 2.0)]), 6.0);
}

#[test]
fn sci_x2y_trois_facteurs() {
    let f = parse("x2y");
    assert_eq!(f.expression, "x*2*y");
    assert_eq!(f.evaluate(&liaisons(&[(Var::X, 3.0), (Var::Y, 5.0)])), 30.0);
}

/* ------------------------ Repli ------------------------ */

#[test]
fn sci_repli_entree_vide() {
    let f = parse("");
    assert_eq!(f.variables, vec![Var::X, Var::Y]);
    assert_eq!(f.arity, Arity::Bivariate);
    assert_eq!(f.evaluate(&liaisons(&[(Var::X, 1.0), (Var::Y, 1.0)])), 0.0);
}

/* ------------------------ Évaluations connues ------------------------ */

#[test]
fn sci_evaluations_connues() {
    assert_eq!(eval("x^2+y^2", &[(Var::X, 3.0), (Var::Y, 4.0)]), 25.0);
    assert_eq!(eval("sin(x)", &[(Var::X, 0.0)]), 0.0);
    assert_proche("sin(x)*cos(y)", &[(Var::X, 0.5), (Var::Y, 0.25)], 0.5f64.sin() * 0.25f64.cos());
    assert_proche("ln(x)", &[(Var::X, std::f64::consts::E)], 1.0);
    assert_proche("exp(0)+abs(-2)+sqrt(9)", &[], 6.0);
    assert_proche("2pi", &[], std::f64::consts::TAU);
}

/* ------------------------ Domaines ------------------------ */

#[test]
fn sci_erreurs_de_domaine_a_zero() {
    assert_eq!(eval("sqrt(x)", &[(Var::X, -4.0)]), 0.0);
    assert_eq!(eval("1/x", &[(Var::X, 0.0)]), 0.0);
    assert_eq!(eval("log(x)", &[(Var::X, 0.0)]), 0.0);
    assert_eq!(eval("log(x)", &[(Var::X, -1.0)]), 0.0);
    assert_eq!(eval("acos(x)", &[(Var::X, 2.0)]), 0.0);
}

#[test]
fn sci_non_finis_a_zero() {
    // débordement => ∞ => 0
    assert_eq!(eval("exp(x)", &[(Var::X, 1000.0)]), 0.0);
    assert_eq!(eval("x^x", &[(Var::X, 1000.0)]), 0.0);
    // NaN : (-8)^(1/3) en réel
    assert_eq!(eval("x^(1/3)", &[(Var::X, -8.0)]), 0.0);
    // liaison NaN
    assert_eq!(eval("x+1", &[(Var::X, f64::NAN)]), 0.0);
}

#[test]
fn sci_entrees_hostiles() {
    for s in [
        "((((",
        "))))",
        "+-*/^",
        "\u{0}\u{7}x",
        "x\u{1b}[31m",
        "日本語",
        "sin(cos(tan(",
        "2^^2",
        "--",
        "πππ",
    ] {
        let f = parse(s);
        let v = f.evaluate(&liaisons(&[(Var::X, 1.0), (Var::Y, 1.0)]));
        assert!(v.is_finite(), "entrée {s:?}");
    }
}
