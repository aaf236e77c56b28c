// src/noyau/touches.rs
//
// Assemble une expression à partir des touches pressées.
// Indépendant du pipeline jetons -> RPN -> évaluation : on ne produit que du texte.
//
// Touches de contrôle (égalité exacte) :
// - "CE"        : vide le tampon
// - "C"         : vide le tampon + annule la demande d'évaluation
// - "BACKSPACE" : retire le dernier élément (caractère en infixe, jeton en RPN)
// - "="         : demande l'évaluation (jamais ajouté au tampon)
//
// Toute autre touche est acceptée telle quelle; c'est le lexeur qui la refusera.

use super::expressions::ExpressionMode;

pub const KEY_CLEAR_ENTRY: &str = "CE";
pub const KEY_CLEAR: &str = "C";
pub const KEY_BACKSPACE: &str = "BACKSPACE";
pub const KEY_EVALUATE: &str = "=";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyStreamResult {
    pub expression: String,
    pub should_evaluate: bool,
}

pub fn interpret<S: AsRef<str>>(keys: &[S], mode: ExpressionMode) -> KeyStreamResult {
    match mode {
        ExpressionMode::Infix => interpret_infix(keys),
        ExpressionMode::Postfix => interpret_postfix(keys),
    }
}

/// Chiffre ou '.' : collé aux chiffres précédents (nombres à plusieurs chiffres).
fn est_touche_chiffre(key: &str) -> bool {
    let mut it = key.chars();
    matches!((it.next(), it.next()), (Some(c), None) if c.is_ascii_digit() || c == '.')
}

fn interpret_infix<S: AsRef<str>>(keys: &[S]) -> KeyStreamResult {
    let mut tampon = String::new();
    let mut evaluer = false;

    for key in keys.iter().map(AsRef::as_ref) {
        match key {
            KEY_CLEAR_ENTRY => tampon.clear(),
            KEY_CLEAR => {
                tampon.clear();
                evaluer = false;
            }
            KEY_BACKSPACE => {
                tampon.pop();
            }
            KEY_EVALUATE => evaluer = true,
            _ if est_touche_chiffre(key) => tampon.push_str(key),
            _ => {
                // opérateur, parenthèse, ou touche inconnue : entouré d'espaces
                if !tampon.is_empty() && !tampon.ends_with(' ') {
                    tampon.push(' ');
                }
                tampon.push_str(key);
                tampon.push(' ');
            }
        }
    }

    KeyStreamResult {
        expression: tampon.trim().to_string(),
        should_evaluate: evaluer,
    }
}

fn interpret_postfix<S: AsRef<str>>(keys: &[S]) -> KeyStreamResult {
    let mut jetons: Vec<&str> = Vec::new();
    let mut evaluer = false;

    for key in keys.iter().map(AsRef::as_ref) {
        match key {
            KEY_CLEAR_ENTRY => jetons.clear(),
            KEY_CLEAR => {
                jetons.clear();
                evaluer = false;
            }
            KEY_BACKSPACE => {
                jetons.pop();
            }
            KEY_EVALUATE => evaluer = true,
            _ => jetons.push(key),
        }
    }

    KeyStreamResult {
        expression: jetons.join(" "),
        should_evaluate: evaluer,
    }
}
