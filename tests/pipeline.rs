use calculatrice_rpn::noyau::{
    catalogue, interpret, parse_rpn, to_rpn, tokenize, CalcError, Calculator, ErrorCategory,
    EvaluateRequest, EvaluateResponse, ExpressionMode, InfixExpression, KeyPressRequest,
    RoundingMode, SettingsOverrides,
};
use rstest::rstest;

fn requete(expr: &str, mode: ExpressionMode) -> EvaluateRequest {
    EvaluateRequest {
        expression: expr.to_string(),
        mode,
        return_trace: true,
        settings: None,
    }
}

fn postfixe_texte(expr: &str) -> String {
    let infix = InfixExpression::new(expr).unwrap();
    let jetons = tokenize(&infix, catalogue()).unwrap();
    to_rpn(&jetons).unwrap().to_text()
}

#[rstest]
#[case("3 + 4 * 2 / (1 - 5) ^ 2 ^ 3", "3 4 2 * 1 5 - 2 3 ^ ^ / +")]
#[case("2 + 3 * 4", "2 3 4 * +")]
#[case("(2 + 3) * 4", "2 3 + 4 *")]
#[case("10 - 4 - 3", "10 4 - 3 -")]
#[case("2 ^ 3 ^ 2", "2 3 2 ^ ^")]
#[case("-3 + 5", "3 u- 5 +")]
#[case("2 * -3", "2 3 u- *")]
#[case("+4", "4 u+")]
#[case("1.50 + .5", "1.50 .5 +")]
fn infixe_vers_postfixe(#[case] infixe: &str, #[case] attendu: &str) {
    assert_eq!(postfixe_texte(infixe), attendu);
}

#[rstest]
#[case("3 4 2 * 1 5 - 2 3 ^ ^ / +")]
#[case("12 3 -")]
#[case("3 neg 5 +")]
#[case("2.5 pos")]
fn postfixe_relu_puis_reecrit(#[case] texte: &str) {
    let rpn = parse_rpn(texte, catalogue()).unwrap();
    let relu = parse_rpn(&rpn.to_text(), catalogue()).unwrap();
    assert_eq!(relu, rpn);
}

#[rstest]
#[case("2 + 3 * 4", "14")]
#[case("(1 + 2) * (3 + 4)", "21")]
#[case("7 / 2", "3.5")]
#[case("-(4 - 6)", "2")]
#[case("1.1 * 3", "3.3")]
#[case("2 ^ 10", "1024")]
#[case("9 ^ 0.5", "3")]
#[case("3 + 4 * 2 / (1 - 5) ^ 2 ^ 3", "3.0001220703125")]
#[case("1.50 * 2", "3.00")]
#[case("1.5 + 1.50", "3.00")]
#[case("1.00 / 2", "0.50")]
#[case("-2.50", "-2.50")]
fn valeurs_infixes(#[case] expr: &str, #[case] attendu: &str) {
    let r = Calculator::default()
        .evaluate(&requete(expr, ExpressionMode::Infix))
        .unwrap();
    assert_eq!(r.value_text(), attendu);
}

#[rstest]
#[case("5 1 2 + 4 * + 3 -", "14")]
#[case("2 3 ^", "8")]
#[case("-2 3 *", "-6")]
#[case("4 neg 2 /", "-2")]
fn valeurs_postfixes(#[case] expr: &str, #[case] attendu: &str) {
    let r = Calculator::default()
        .evaluate(&requete(expr, ExpressionMode::Postfix))
        .unwrap();
    assert_eq!(r.value_text(), attendu);
}

#[rstest]
#[case(RoundingMode::ToEven, "2.5 + 0", 1, "2.5")]
#[case(RoundingMode::ToEven, "0.125 + 0", 2, "0.12")]
#[case(RoundingMode::AwayFromZero, "0.125 + 0", 2, "0.13")]
#[case(RoundingMode::ToZero, "-0.129 + 0", 2, "-0.12")]
#[case(RoundingMode::ToNegativeInfinity, "0.129 - 0.001", 2, "0.12")]
#[case(RoundingMode::ToPositiveInfinity, "0.121 + 0", 2, "0.13")]
fn arrondi_par_mode(
    #[case] rounding: RoundingMode,
    #[case] expr: &str,
    #[case] digits: u32,
    #[case] attendu: &str,
) {
    let r = Calculator::default()
        .evaluate(&EvaluateRequest {
            settings: Some(SettingsOverrides {
                precision: Some(digits),
                rounding: Some(rounding),
            }),
            ..requete(expr, ExpressionMode::Infix)
        })
        .unwrap();
    assert_eq!(r.value_text(), attendu);
}

#[test]
fn trace_infixe() {
    let r = Calculator::default()
        .evaluate(&requete("-3 + 5", ExpressionMode::Infix))
        .unwrap();
    assert_eq!(r.trace(), ["push 3", "apply u- -> -3", "push 5", "apply + -> 2"]);
}

#[rstest]
#[case("5 / 0", ExpressionMode::Infix, ErrorCategory::DivideByZero)]
#[case("2 $ 3", ExpressionMode::Infix, ErrorCategory::DomainViolation)]
#[case("(1 + 2", ExpressionMode::Infix, ErrorCategory::DomainViolation)]
#[case("1 2 3 +", ExpressionMode::Postfix, ErrorCategory::DomainViolation)]
#[case("1 2 %", ExpressionMode::Postfix, ErrorCategory::DomainViolation)]
#[case("   ", ExpressionMode::Infix, ErrorCategory::InvalidRequest)]
fn categories_erreurs(
    #[case] expr: &str,
    #[case] mode: ExpressionMode,
    #[case] categorie: ErrorCategory,
) {
    let e = Calculator::default()
        .evaluate(&requete(expr, mode))
        .unwrap_err();
    assert_eq!(e.category(), categorie, "{expr:?} -> {e}");
}

#[test]
fn precision_hors_bornes_refusee() {
    let e = Calculator::default()
        .evaluate(&EvaluateRequest {
            settings: Some(SettingsOverrides {
                precision: Some(0),
                rounding: None,
            }),
            ..requete("1 + 1", ExpressionMode::Infix)
        })
        .unwrap_err();
    assert!(matches!(e, CalcError::Validation(_)));
    assert_eq!(e.category().exit_code(), 4);
}

#[rstest]
#[case(&["1", "2", "+", "3", "="], ExpressionMode::Infix, "12 + 3", true)]
#[case(&["1", "+", "C", "4"], ExpressionMode::Infix, "4", false)]
#[case(&["(", "2", ")", "BACKSPACE", "BACKSPACE"], ExpressionMode::Infix, "( 2", false)]
#[case(&["12", "3", "-", "="], ExpressionMode::Postfix, "12 3 -", true)]
#[case(&["12", "3", "BACKSPACE", "4"], ExpressionMode::Postfix, "12 4", false)]
fn flux_de_touches(
    #[case] keys: &[&str],
    #[case] mode: ExpressionMode,
    #[case] expression: &str,
    #[case] evaluer: bool,
) {
    let r = interpret(keys, mode);
    assert_eq!(r.expression, expression);
    assert_eq!(r.should_evaluate, evaluer);
}

#[test]
fn touches_vides_donnent_zero() {
    let r = Calculator::default()
        .process_keys(&KeyPressRequest {
            keys: vec!["1".into(), "CE".into()],
            ..Default::default()
        })
        .unwrap();
    assert_eq!(r.value_text(), "0");
    assert!(r.rpn_tokens().is_empty());
    assert!(r.trace().is_empty());
}

#[test]
fn reponse_json() {
    let r = Calculator::default()
        .evaluate(&requete("1.50 * 2", ExpressionMode::Infix))
        .unwrap();
    let json = serde_json::to_value(EvaluateResponse::from_result(&r, ExpressionMode::Infix)).unwrap();
    assert_eq!(json["result"], "3.00");
    assert_eq!(json["mode"], "Infix");
    assert_eq!(json["rpn"], serde_json::json!(["1.50", "2", "*"]));
    assert_eq!(
        json["trace"],
        serde_json::json!(["push 1.50", "push 2", "apply * -> 3.00"])
    );
}

#[test]
fn requete_json_camel_case() {
    let r: EvaluateRequest = serde_json::from_str(
        r#"{"expression":"2 3 +","mode":"Rpn","returnTrace":true,"settings":{"precision":2}}"#,
    )
    .unwrap();
    assert_eq!(r.mode, ExpressionMode::Postfix);
    assert!(r.return_trace);
    assert_eq!(Calculator::default().evaluate(&r).unwrap().value_text(), "5");
}
