// src/noyau/jetons.rs

use std::fmt;

use num_rational::BigRational;
use tracing::debug;

use super::erreurs::{CalcError, CalcResult};
use super::expressions::InfixExpression;
use super::lecture::{echelle_litterale, parse_decimal};
use super::operateurs::{Operator, OperatorCatalog};

/// Littéral numérique : valeur + orthographe d'origine (pour l'affichage RPN).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberLiteral {
    value: BigRational,
    text: String,
}

impl NumberLiteral {
    pub fn new(value: BigRational, text: impl Into<String>) -> Self {
        Self {
            value,
            text: text.into(),
        }
    }

    /// Lit `text` comme littéral décimal; None si mal formé.
    pub fn parse(text: &str) -> Option<Self> {
        parse_decimal(text).map(|value| Self::new(value, text))
    }

    pub fn value(&self) -> &BigRational {
        &self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Décimales écrites ("1.50" -> 2).
    pub fn scale(&self) -> u32 {
        echelle_litterale(&self.text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Number(NumberLiteral),
    Operator(Operator),
    Parenthesis { is_opening: bool },
}

impl Token {
    pub fn number(text: &str) -> Option<Self> {
        NumberLiteral::parse(text).map(Token::Number)
    }

    pub fn is_parenthesis(&self) -> bool {
        matches!(self, Token::Parenthesis { .. })
    }

    pub fn as_operator(&self) -> Option<&Operator> {
        match self {
            Token::Operator(op) => Some(op),
            _ => None,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Token::Number(n) => n.text(),
            Token::Operator(op) => op.symbol(),
            Token::Parenthesis { is_opening: true } => "(",
            Token::Parenthesis { is_opening: false } => ")",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Tokenize une expression infixe, de gauche à droite, sans retour arrière.
/// - espaces ignorés
/// - nombre : commence par un chiffre ou '.', avale chiffres et '.'
/// - ( ) : parenthèses
/// - + - * / ^ : opérateurs; unaire en tête, après '(' ou après un opérateur
/// - parenthèses vérifiées à la fin (profondeur jamais < 0, finale = 0)
pub fn tokenize(expression: &InfixExpression, catalogue: &OperatorCatalog) -> CalcResult<Vec<Token>> {
    let mut out: Vec<Token> = Vec::new();
    let chars: Vec<char> = expression.as_str().chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre (plusieurs '.' laissés à la lecture décimale)
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            let token = Token::number(&literal).ok_or_else(|| {
                CalcError::Tokenization(format!("invalid numeric literal '{literal}'"))
            })?;
            out.push(token);
            continue;
        }

        if c == '(' || c == ')' {
            out.push(Token::Parenthesis {
                is_opening: c == '(',
            });
            i += 1;
            continue;
        }

        if catalogue.is_operator(c) {
            let symbol = c.to_string();
            let op = if position_unaire(&out) {
                catalogue.get_unary(&symbol)?
            } else {
                catalogue.get_binary(&symbol)?
            };
            out.push(Token::Operator(op));
            i += 1;
            continue;
        }

        return Err(CalcError::Tokenization(format!(
            "unexpected character '{c}' at position {i}"
        )));
    }

    verifie_parentheses(&out)?;
    debug!(jetons = out.len(), "infix tokenized");
    Ok(out)
}

/// Jamais unaire après un nombre ou une parenthèse fermante.
fn position_unaire(precedents: &[Token]) -> bool {
    match precedents.last() {
        None => true,
        Some(Token::Parenthesis { is_opening }) => *is_opening,
        Some(Token::Operator(_)) => true,
        Some(Token::Number(_)) => false,
    }
}

fn verifie_parentheses(tokens: &[Token]) -> CalcResult<()> {
    let mut profondeur: i64 = 0;
    for t in tokens {
        match t {
            Token::Parenthesis { is_opening: true } => profondeur += 1,
            Token::Parenthesis { is_opening: false } => profondeur -= 1,
            _ => {}
        }
        if profondeur < 0 {
            return Err(CalcError::Tokenization(
                "closing parenthesis without matching opening parenthesis".into(),
            ));
        }
    }
    if profondeur != 0 {
        return Err(CalcError::Tokenization("unbalanced parentheses detected".into()));
    }
    Ok(())
}

/// Format utilitaire (trace/CLI) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::text)
        .collect::<Vec<_>>()
        .join(" ")
}
