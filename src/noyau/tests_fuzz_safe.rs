//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - erreurs acceptées : division par zéro, `^` non fini
//! - invariant clé : une expression infixe bien formée se réduit toujours à UNE valeur
//!   (jamais d'erreur structurelle : jetons, conversion, pile)

use std::time::{Duration, Instant};

use super::commandes::{Calculator, EvaluateRequest};
use super::erreurs::CalcError;
use super::expressions::ExpressionMode;
use super::reglages::{Precision, RoundingMode, SettingsOverrides};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let entier = rng.pick(20);
    match rng.pick(4) {
        0 => format!("{entier}.{}", rng.pick(1000)),
        1 => format!(".{}", rng.pick(100)),
        _ => format!("{entier}"),
    }
}

/// Atome : nombre ou (expr), éventuellement précédé d'UN signe unaire.
fn gen_atome(rng: &mut Rng, depth: usize) -> String {
    let base = if depth > 0 && rng.pick(4) == 0 {
        format!("({})", gen_expr(rng, depth - 1))
    } else {
        gen_nombre(rng)
    };

    match rng.pick(6) {
        0 => format!("-{base}"),
        1 => format!("+{base}"),
        _ => base,
    }
}

fn gen_op(rng: &mut Rng) -> &'static str {
    match rng.pick(9) {
        0 | 1 => "+",
        2 | 3 => "-",
        4 | 5 => "*",
        6 | 7 => "/",
        _ => "^",
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    let mut s = gen_atome(rng, depth);
    let n = rng.pick(4);
    for _ in 0..n {
        let sep = if rng.coin() { " " } else { "" };
        s = format!("{s}{sep}{}{sep}{}", gen_op(rng), gen_atome(rng, depth));
    }
    s
}

fn is_erreur_attendue(e: &CalcError) -> bool {
    match e {
        CalcError::DivideByZero => true,
        CalcError::Evaluation(msg) => msg.contains("non-finite"),
        _ => false,
    }
}

fn chiffres_apres_virgule(texte: &str) -> usize {
    texte.split_once('.').map_or(0, |(_, f)| f.len())
}

#[test]
fn fuzz_infixe_toujours_une_valeur() {
    let start = Instant::now();
    let max = Duration::from_secs(20);
    let calc = Calculator::default();
    let mut rng = Rng::new(0xC0FFEE);

    let mut ok = 0usize;
    for _ in 0..600 {
        budget(start, max);
        let expr = gen_expr(&mut rng, 3);
        let req = EvaluateRequest {
            expression: expr.clone(),
            mode: ExpressionMode::Infix,
            return_trace: false,
            settings: None,
        };
        match calc.evaluate(&req) {
            Ok(r) => {
                ok += 1;
                assert!(
                    chiffres_apres_virgule(&r.value_text()) <= 15,
                    "expr={expr:?} valeur={}",
                    r.value_text()
                );
            }
            Err(e) => assert!(is_erreur_attendue(&e), "expr={expr:?} erreur inattendue: {e:?}"),
        }
    }
    // la grande majorité doit passer
    assert!(ok > 300, "seulement {ok} évaluations réussies");
}

#[test]
fn fuzz_deterministe() {
    let calc = Calculator::default();
    let mut a = Rng::new(7);
    let mut b = Rng::new(7);

    for _ in 0..100 {
        let ea = gen_expr(&mut a, 2);
        let eb = gen_expr(&mut b, 2);
        assert_eq!(ea, eb);

        let req = EvaluateRequest {
            expression: ea,
            return_trace: true,
            ..Default::default()
        };
        assert_eq!(calc.evaluate(&req), calc.evaluate(&req));
    }
}

#[test]
fn fuzz_precision_respectee() {
    let start = Instant::now();
    let max = Duration::from_secs(20);
    let calc = Calculator::default();
    let mut rng = Rng::new(42);

    for _ in 0..300 {
        budget(start, max);
        let digits = 1 + rng.pick(Precision::MAX);
        let rounding = RoundingMode::ALL[rng.pick(5) as usize];
        let req = EvaluateRequest {
            expression: gen_expr(&mut rng, 2),
            return_trace: true,
            settings: Some(SettingsOverrides {
                precision: Some(digits),
                rounding: Some(rounding),
            }),
            ..Default::default()
        };

        if let Ok(r) = calc.evaluate(&req) {
            assert!(chiffres_apres_virgule(&r.value_text()) <= digits as usize);
            for ligne in r.trace() {
                let v = ligne.rsplit(' ').next().unwrap_or("");
                assert!(
                    chiffres_apres_virgule(v) <= digits as usize,
                    "trace {ligne:?} dépasse {digits} chiffres"
                );
            }
        }
    }
}

#[test]
fn fuzz_caracteres_hostiles() {
    // jamais de panique : seulement des erreurs typées
    let calc = Calculator::default();
    let mut rng = Rng::new(99);
    let alphabet: Vec<char> = "0123456789.+-*/^() &%xπ\t".chars().collect();

    for _ in 0..500 {
        let len = 1 + rng.pick(12) as usize;
        let s: String = (0..len)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
            .collect();
        let _ = calc.evaluate(&EvaluateRequest {
            expression: s,
            ..Default::default()
        });
    }
}
