// src/noyau/expressions.rs
//
// Expressions d'entrée/sortie du pipeline : infixe (texte) et postfixe (jetons).

use serde::{Deserialize, Serialize};

use super::erreurs::{CalcError, CalcResult};
use super::jetons::{format_tokens, Token};

/// Forme de la source : infixe ("3 + 4") ou postfixe ("3 4 +").
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpressionMode {
    #[default]
    Infix,
    #[serde(rename = "Rpn", alias = "Postfix")]
    Postfix,
}

/// Texte infixe non vide (validé à la construction, avant tout lexage).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfixExpression(String);

impl InfixExpression {
    pub fn new(expression: impl Into<String>) -> CalcResult<Self> {
        let expression = expression.into();
        if expression.trim().is_empty() {
            return Err(CalcError::Validation("expression is required".to_string()));
        }
        Ok(Self(expression))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Suite postfixe, jamais de parenthèse.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RpnExpression {
    tokens: Vec<Token>,
}

impl RpnExpression {
    /// Construit depuis des jetons déjà en ordre postfixe.
    pub fn new(tokens: Vec<Token>) -> CalcResult<Self> {
        if tokens.iter().any(Token::is_parenthesis) {
            return Err(CalcError::Validation(
                "postfix expression cannot contain parentheses".to_string(),
            ));
        }
        Ok(Self { tokens })
    }

    /// Pour le convertisseur et la lecture postfixe, qui garantissent l'invariant.
    pub(crate) fn from_tokens(tokens: Vec<Token>) -> Self {
        debug_assert!(!tokens.iter().any(Token::is_parenthesis));
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// "3 4 2 * +"
    pub fn to_text(&self) -> String {
        format_tokens(&self.tokens)
    }
}
