// src/noyau/rpn.rs
//
// Shunting-yard -> RPN, et lecture directe d'un texte déjà postfixé.
//
// Règles (jeton par jeton) :
// - Nombre : sortie directe.
// - Opérateur courant : dépile vers la sortie tant que le sommet est un
//   opérateur qui doit sortir (`doit_depiler`), puis empile.
// - '(' : empile. ')' : dépile jusqu'à '(' (jetée).
// - Fin : vide la pile; une '(' restante = parenthèses non fermées.

use tracing::debug;

use super::erreurs::{CalcError, CalcResult};
use super::expressions::RpnExpression;
use super::jetons::Token;
use super::operateurs::{Associativity, Fixity, Operator, OperatorCatalog};

/// Un unaire au sommet sort toujours (il s'applique à l'opérande qui vient d'être lu).
/// Sinon : gauche => précédence >= ; droite => strictement >.
fn doit_depiler(top: &Operator, courant: &Operator) -> bool {
    if top.fixity() == Fixity::Unary {
        return true;
    }
    match courant.associativity() {
        Associativity::Left => top.precedence() >= courant.precedence(),
        Associativity::Right => top.precedence() > courant.precedence(),
    }
}

/// Convertit une suite de jetons infixe en RPN (notation polonaise inversée).
///
/// Exemple:
///   jetons: 3 + 4 * 2
///   rpn:    3 4 2 * +
pub fn to_rpn(tokens: &[Token]) -> CalcResult<RpnExpression> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Token> = Vec::new();

    for tok in tokens.iter().cloned() {
        match tok {
            Token::Number(_) => out.push(tok),

            Token::Operator(courant) => {
                while let Some(Token::Operator(top)) = ops.last() {
                    if !doit_depiler(top, &courant) {
                        break;
                    }
                    if let Some(t) = ops.pop() {
                        out.push(t);
                    }
                }
                ops.push(Token::Operator(courant));
            }

            Token::Parenthesis { is_opening: true } => ops.push(tok),

            Token::Parenthesis { is_opening: false } => depile_jusqu_ouvrante(&mut out, &mut ops)?,
        }
    }

    // vide la pile ops
    while let Some(t) = ops.pop() {
        if t.is_parenthesis() {
            return Err(CalcError::Conversion("unbalanced parentheses detected".into()));
        }
        out.push(t);
    }

    let rpn = RpnExpression::from_tokens(out);
    debug!(rpn = %rpn.to_text(), "infix converted");
    Ok(rpn)
}

fn depile_jusqu_ouvrante(out: &mut Vec<Token>, ops: &mut Vec<Token>) -> CalcResult<()> {
    while let Some(t) = ops.pop() {
        match t {
            Token::Parenthesis { is_opening: true } => return Ok(()),
            // ne doit jamais arriver : une ')' n'est jamais empilée
            Token::Parenthesis { is_opening: false } => {
                return Err(CalcError::Conversion("mismatched parentheses detected".into()));
            }
            _ => out.push(t),
        }
    }
    Err(CalcError::Conversion(
        "closing parenthesis without matching opening parenthesis".into(),
    ))
}

/// Lit un texte déjà postfixé ("3 4 + u-").
/// Chaque morceau : nombre si possible, sinon u-/neg, u+/pos, sinon opérateur binaire.
pub fn parse_rpn(texte: &str, catalogue: &OperatorCatalog) -> CalcResult<RpnExpression> {
    let tokens = texte
        .split_whitespace()
        .map(|part| lire_morceau(part, catalogue))
        .collect::<CalcResult<Vec<_>>>()?;

    debug!(jetons = tokens.len(), "postfix parsed");
    Ok(RpnExpression::from_tokens(tokens))
}

fn lire_morceau(part: &str, catalogue: &OperatorCatalog) -> CalcResult<Token> {
    if let Some(n) = Token::number(part) {
        return Ok(n);
    }
    let op = match part {
        "u-" | "neg" => catalogue.get_unary("-")?,
        "u+" | "pos" => catalogue.get_unary("+")?,
        _ => catalogue.get_binary(part)?,
    };
    Ok(Token::Operator(op))
}
