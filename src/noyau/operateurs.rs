// src/noyau/operateurs.rs
//
// Catalogue des opérateurs.
// - binaires : + - * / ^ (table construite une fois)
// - unaires  : u+ u- (fabriqués à la demande, jamais enregistrés)
//
// Un opérateur est une donnée (symbole, précédence, associativité, arité);
// son comportement est choisi par `OperatorKind`.

use std::fmt;
use std::sync::OnceLock;

use num_rational::BigRational;
use num_traits::Zero;

use super::erreurs::{CalcError, CalcResult};
use super::lecture::{depuis_f64, echelle_minimale, vers_f64};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fixity {
    Unary,
    Binary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Plus,
    Negate,
}

#[derive(Clone, Copy, Debug)]
pub struct Operator {
    kind: OperatorKind,
    symbol: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
}

impl Operator {
    const fn binaire(
        kind: OperatorKind,
        symbol: &'static str,
        precedence: u8,
        associativity: Associativity,
    ) -> Self {
        Self {
            kind,
            symbol,
            precedence,
            associativity,
            fixity: Fixity::Binary,
        }
    }

    const fn unaire(kind: OperatorKind, symbol: &'static str) -> Self {
        Self {
            kind,
            symbol,
            precedence: 4,
            associativity: Associativity::Right,
            fixity: Fixity::Unary,
        }
    }

    pub fn kind(&self) -> OperatorKind {
        self.kind
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn precedence(&self) -> u8 {
        self.precedence
    }

    pub fn associativity(&self) -> Associativity {
        self.associativity
    }

    pub fn fixity(&self) -> Fixity {
        self.fixity
    }

    pub fn arity(&self) -> usize {
        match self.fixity {
            Fixity::Unary => 1,
            Fixity::Binary => 2,
        }
    }

    /// f(gauche, droite). Seulement pour un opérateur binaire.
    pub fn apply_binary(&self, left: &BigRational, right: &BigRational) -> CalcResult<BigRational> {
        match self.kind {
            OperatorKind::Add => Ok(left + right),
            OperatorKind::Subtract => Ok(left - right),
            OperatorKind::Multiply => Ok(left * right),
            OperatorKind::Divide => {
                if right.is_zero() {
                    return Err(CalcError::DivideByZero);
                }
                Ok(left / right)
            }
            OperatorKind::Power => puissance(left, right),
            OperatorKind::Plus | OperatorKind::Negate => {
                Err(CalcError::UnsupportedOperator(self.symbol.to_string()))
            }
        }
    }

    /// f(x). Seulement pour un opérateur unaire.
    pub fn apply_unary(&self, value: &BigRational) -> CalcResult<BigRational> {
        match self.kind {
            OperatorKind::Plus => Ok(value.clone()),
            OperatorKind::Negate => Ok(-value),
            _ => Err(CalcError::UnsupportedOperator(self.symbol.to_string())),
        }
    }

    /// Décimales du résultat, à la manière d'un type décimal à échelle :
    /// somme -> max, produit -> somme, quotient -> au plus court à partir de
    /// `gauche - droite`, puissance -> au plus court. Unaire : celle de l'opérande (`left`).
    pub fn result_scale(&self, left: u32, right: u32, result: &BigRational) -> u32 {
        match self.kind {
            OperatorKind::Add | OperatorKind::Subtract => left.max(right),
            OperatorKind::Multiply => left + right,
            OperatorKind::Divide => echelle_minimale(result, left.saturating_sub(right)),
            OperatorKind::Power => echelle_minimale(result, 0),
            OperatorKind::Plus | OperatorKind::Negate => left,
        }
    }
}

/// Égalité par symbole + arité (jamais par identité).
impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol && self.fixity == other.fixity
    }
}

impl Eq for Operator {}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}

/// `^` passe par le flottant : (f64 gauche).powf(f64 droite), relu en décimal.
/// Perte de précision acceptée (les sorties de référence en dépendent).
fn puissance(base: &BigRational, exposant: &BigRational) -> CalcResult<BigRational> {
    let r = vers_f64(base).powf(vers_f64(exposant));
    depuis_f64(r).ok_or_else(|| {
        CalcError::Evaluation("operator '^' produced a non-finite result".to_string())
    })
}

const BINAIRES: [Operator; 5] = [
    Operator::binaire(OperatorKind::Add, "+", 1, Associativity::Left),
    Operator::binaire(OperatorKind::Subtract, "-", 1, Associativity::Left),
    Operator::binaire(OperatorKind::Multiply, "*", 2, Associativity::Left),
    Operator::binaire(OperatorKind::Divide, "/", 2, Associativity::Left),
    Operator::binaire(OperatorKind::Power, "^", 3, Associativity::Right),
];

/// Table immuable des opérateurs; passée par référence au lexeur et au convertisseur.
#[derive(Clone, Debug)]
pub struct OperatorCatalog {
    binaires: Vec<Operator>,
}

impl OperatorCatalog {
    pub fn standard() -> Self {
        Self {
            binaires: BINAIRES.to_vec(),
        }
    }

    pub fn get_binary(&self, symbol: &str) -> CalcResult<Operator> {
        self.binaires
            .iter()
            .find(|op| op.symbol == symbol)
            .copied()
            .ok_or_else(|| CalcError::UnsupportedOperator(symbol.to_string()))
    }

    /// "+" -> u+, "-" -> u-.
    pub fn get_unary(&self, symbol: &str) -> CalcResult<Operator> {
        match symbol {
            "+" => Ok(Operator::unaire(OperatorKind::Plus, "u+")),
            "-" => Ok(Operator::unaire(OperatorKind::Negate, "u-")),
            _ => Err(CalcError::UnsupportedOperator(symbol.to_string())),
        }
    }

    pub fn is_operator(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        let s: &str = c.encode_utf8(&mut buf);
        self.binaires.iter().any(|op| op.symbol == s)
    }
}

impl Default for OperatorCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

static CATALOGUE: OnceLock<OperatorCatalog> = OnceLock::new();

/// Catalogue partagé du processus (construit au premier appel).
pub fn catalogue() -> &'static OperatorCatalog {
    CATALOGUE.get_or_init(OperatorCatalog::standard)
}
