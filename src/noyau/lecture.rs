// src/noyau/lecture.rs
//
// Domaine décimal : lecture des littéraux, arrondi par étapes, affichage.
// Une valeur est un BigRational exact; après arrondi elle tient en
// `digits` chiffres après la virgule.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::reglages::RoundingMode;

/// Au-delà, l'affichage tronque (valeur non décimale finie, jamais après arrondi).
const ECHELLE_AFFICHAGE_MAX: u32 = 64;

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

/* ------------------------ Lecture ------------------------ */

/// Lit un littéral décimal : signe optionnel, chiffres, au plus un '.'.
/// ".5" et "5." sont acceptés; ".", "1.2.3" et "" ne le sont pas.
pub fn parse_decimal(texte: &str) -> Option<BigRational> {
    let (negatif, corps) = match texte.as_bytes().first() {
        Some(b'-') => (true, &texte[1..]),
        Some(b'+') => (false, &texte[1..]),
        _ => (false, texte),
    };

    let (entier, frac) = corps.split_once('.').unwrap_or((corps, ""));
    if entier.is_empty() && frac.is_empty() {
        return None;
    }
    if !entier.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let chiffres = format!("{entier}{frac}");
    let mantisse = BigInt::parse_bytes(chiffres.as_bytes(), 10)?;
    let valeur = BigRational::new(mantisse, pow10(frac.len() as u32));

    Some(if negatif { -valeur } else { valeur })
}

/* ------------------------ Arrondi ------------------------ */

/// Arrondit à `digits` chiffres après la virgule selon `mode`.
pub fn arrondir(valeur: &BigRational, digits: u32, mode: RoundingMode) -> BigRational {
    let echelle = BigRational::from_integer(pow10(digits));
    let scaled = valeur * &echelle;
    if scaled.is_integer() {
        return valeur.clone();
    }

    let tronque = scaled.trunc();
    let loin = if scaled.is_negative() {
        &tronque - BigRational::one()
    } else {
        &tronque + BigRational::one()
    };

    let entier = match mode {
        RoundingMode::ToZero => tronque,
        RoundingMode::ToNegativeInfinity => scaled.floor(),
        RoundingMode::ToPositiveInfinity => scaled.ceil(),
        RoundingMode::AwayFromZero | RoundingMode::ToEven => {
            let reste = (&scaled - &tronque).abs();
            let demi = BigRational::new(BigInt::one(), BigInt::from(2));
            match reste.cmp(&demi) {
                Ordering::Less => tronque,
                Ordering::Greater => loin,
                Ordering::Equal => {
                    let pair = (tronque.to_integer() % BigInt::from(2)).is_zero();
                    if mode == RoundingMode::ToEven && pair {
                        tronque
                    } else {
                        loin
                    }
                }
            }
        }
    };

    entier / echelle
}

/* ------------------------ Affichage ------------------------ */

/// Convertit un entier “scalé” (×10^digits) en texte décimal à `digits` décimales.
fn scaled_to_decimal(mut scaled: BigInt, digits: u32) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let signe = if neg { "-" } else { "" };
    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = (&scaled % &scale).to_str_radix(10);
    while frac.len() < digits as usize {
        frac.insert(0, '0');
    }
    format!("{signe}{int_part}.{frac}")
}

/// Plus petite échelle >= `depuis` où la valeur s'écrit exactement.
/// Valeur non décimale finie : ECHELLE_AFFICHAGE_MAX.
pub fn echelle_minimale(valeur: &BigRational, depuis: u32) -> u32 {
    (depuis..=ECHELLE_AFFICHAGE_MAX)
        .find(|&digits| (valeur.numer() * pow10(digits) % valeur.denom()).is_zero())
        .unwrap_or(ECHELLE_AFFICHAGE_MAX)
}

/// Nombre de décimales écrites dans un littéral ("1.50" -> 2, "5." -> 0).
pub fn echelle_litterale(texte: &str) -> u32 {
    texte
        .split_once('.')
        .map_or(0, |(_, frac)| frac.len() as u32)
}

/// Texte décimal positionnel (pas d'exposant, pas de zéros inutiles).
pub fn format_decimal(valeur: &BigRational) -> String {
    let digits = echelle_minimale(valeur, 0);
    let tronque = (valeur.numer() * pow10(digits)) / valeur.denom();
    let mut texte = scaled_to_decimal(tronque, digits);
    if texte.contains('.') {
        while texte.ends_with('0') {
            texte.pop();
        }
        if texte.ends_with('.') {
            texte.pop();
        }
    }
    texte
}

/// Texte décimal à `echelle` décimales, zéros finaux conservés ("3.00").
/// Si la valeur ne tient pas à cette échelle : forme normalisée.
pub fn format_decimal_echelle(valeur: &BigRational, echelle: u32) -> String {
    let num = valeur.numer() * pow10(echelle);
    if (&num % valeur.denom()).is_zero() {
        scaled_to_decimal(num / valeur.denom(), echelle)
    } else {
        format_decimal(valeur)
    }
}

/* ------------------------ Pont flottant (^) ------------------------ */

pub fn vers_f64(valeur: &BigRational) -> f64 {
    // le texte décimal se relit en f64 correctement arrondi
    format_decimal(valeur).parse::<f64>().unwrap_or(f64::NAN)
}

/// Relit un f64 fini via son texte le plus court (aller-retour exact).
pub fn depuis_f64(x: f64) -> Option<BigRational> {
    if !x.is_finite() {
        return None;
    }
    parse_decimal(&x.to_string())
}
