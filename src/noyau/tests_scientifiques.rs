//! Tests scientifiques (campagne) : invariants du pipeline.
//!
//! - précédence / associativité sur des cas de référence
//! - équivalence infixe <-> postfixe (même valeur, même trace)
//! - arrondi par étapes, pour chaque mode
//! - pipeline “touches” == pipeline “texte”

use super::commandes::{Calculator, EvaluateRequest, KeyPressRequest};
use super::erreurs::CalcError;
use super::expressions::ExpressionMode;
use super::reglages::{RoundingMode, SettingsOverrides};

fn req(expr: &str, mode: ExpressionMode) -> EvaluateRequest {
    EvaluateRequest {
        expression: expr.into(),
        mode,
        return_trace: true,
        settings: None,
    }
}

fn eval_ok(expr: &str) -> String {
    Calculator::default()
        .evaluate(&req(expr, ExpressionMode::Infix))
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .value_text()
}

fn eval_arrondi(expr: &str, digits: u32, rounding: RoundingMode) -> String {
    let r = EvaluateRequest {
        settings: Some(SettingsOverrides {
            precision: Some(digits),
            rounding: Some(rounding),
        }),
        ..req(expr, ExpressionMode::Infix)
    };
    Calculator::default()
        .evaluate(&r)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .value_text()
}

/* ------------------------ Précédence ------------------------ */

#[test]
fn sci_precedence_reference() {
    assert_eq!(eval_ok("2+3*4"), "14");
    assert_eq!(eval_ok("8/4+6"), "8");
    assert_eq!(eval_ok("5*3-4"), "11");
    assert_eq!(eval_ok("2^3"), "8");
    assert_eq!(eval_ok("2*3^2"), "18");
}

#[test]
fn sci_associativite() {
    assert_eq!(eval_ok("10-4-3"), "3");
    assert_eq!(eval_ok("64/4/2"), "8");
    // droite : 2^(3^2) = 512, pas (2^3)^2 = 64
    assert_eq!(eval_ok("2^3^2"), "512");
}

#[test]
fn sci_unaires() {
    assert_eq!(eval_ok("-3 + 5"), "2");
    assert_eq!(eval_ok("2 * -3"), "-6");
    assert_eq!(eval_ok("-(2 + 3) * 2"), "-10");
    assert_eq!(eval_ok("+4 - +1"), "3");
    // l'unaire sort dès l'opérateur suivant : (-2)^2
    assert_eq!(eval_ok("-2^2"), "4");
    assert_eq!(eval_ok("2^-1"), "0.5");
}

#[test]
fn sci_exemple_long() {
    // 3 + 4*2 / (1-5)^(2^3) = 3 + 8/65536
    assert_eq!(eval_ok("3 + 4 * 2 / (1 - 5) ^ 2 ^ 3"), "3.0001220703125");
}

/* ------------------------ Équivalence infixe / postfixe ------------------------ */

#[test]
fn sci_infixe_equivaut_postfixe() {
    let calc = Calculator::default();
    for (infixe, postfixe) in [
        ("3 + 4 * 2", "3 4 2 * +"),
        ("(1.5 + 2.25) / 3", "1.5 2.25 + 3 /"),
        ("-3 + 5", "3 neg 5 +"),
        ("2 ^ 0.5", "2 0.5 ^"),
    ] {
        let a = calc.evaluate(&req(infixe, ExpressionMode::Infix)).unwrap();
        let b = calc.evaluate(&req(postfixe, ExpressionMode::Postfix)).unwrap();
        assert_eq!(a.value(), b.value(), "{infixe:?} vs {postfixe:?}");
        assert_eq!(a.trace(), b.trace(), "{infixe:?} vs {postfixe:?}");
    }
}

/* ------------------------ Arrondi par étapes ------------------------ */

#[test]
fn sci_arrondi_etapes_vs_final() {
    assert_eq!(eval_arrondi("1.234 + 1.111", 2, RoundingMode::AwayFromZero), "2.34");
    assert_eq!(eval_arrondi("1.235 + 1.115", 2, RoundingMode::AwayFromZero), "2.36");
    assert_eq!(eval_arrondi("1.235 + 1.115", 2, RoundingMode::ToEven), "2.36");
    assert_eq!(eval_arrondi("1.225 + 1.115", 2, RoundingMode::ToEven), "2.34");
}

#[test]
fn sci_modes_diriges() {
    assert_eq!(eval_arrondi("2 / 3", 3, RoundingMode::ToZero), "0.666");
    assert_eq!(eval_arrondi("2 / 3", 3, RoundingMode::ToEven), "0.667");
    assert_eq!(eval_arrondi("-2 / 3", 3, RoundingMode::ToNegativeInfinity), "-0.667");
    assert_eq!(eval_arrondi("-2 / 3", 3, RoundingMode::ToPositiveInfinity), "-0.666");
}

#[test]
fn sci_precision_par_defaut() {
    assert_eq!(eval_ok("1 / 3"), "0.333333333333333");
    assert_eq!(eval_ok("2 / 3"), "0.666666666666667");
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn sci_erreurs_typees() {
    let calc = Calculator::default();
    let e = |s: &str| calc.evaluate(&req(s, ExpressionMode::Infix)).unwrap_err();

    assert_eq!(e("5 / 0"), CalcError::DivideByZero);
    assert_eq!(e("5 / (2 - 2)"), CalcError::DivideByZero);
    assert!(matches!(e("2 & 3"), CalcError::Tokenization(m) if m.contains("position 2")));
    assert!(matches!(e("(1 + 2"), CalcError::Tokenization(_)));
    assert!(matches!(e("1 +"), CalcError::Evaluation(_)));
    assert!(matches!(e("0 ^ -1"), CalcError::Evaluation(_)));
    assert!(matches!(e(""), CalcError::Validation(_)));
}

/* ------------------------ Touches ------------------------ */

#[test]
fn sci_touches_equivaut_texte() {
    let calc = Calculator::default();
    let touches = ["(", "1", "2", "-", "2", ")", "/", "4", "="];
    let kr = KeyPressRequest {
        keys: touches.map(String::from).to_vec(),
        mode: ExpressionMode::Infix,
        return_trace: true,
        settings: None,
    };
    let a = calc.process_keys(&kr).unwrap();
    let b = calc.evaluate(&req("(12 - 2) / 4", ExpressionMode::Infix)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.value_text(), "2.5");
}

#[test]
fn sci_touches_postfixe() {
    let kr = KeyPressRequest {
        keys: ["1", "2", "3", "BACKSPACE", "*", "="].map(String::from).to_vec(),
        mode: ExpressionMode::Postfix,
        return_trace: false,
        settings: None,
    };
    assert_eq!(Calculator::default().process_keys(&kr).unwrap().value_text(), "2");
}
