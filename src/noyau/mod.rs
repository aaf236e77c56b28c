//! Noyau RPN
//!
//! Organisation interne :
//! - erreurs.rs     : taxonomie CalcError + catégories stables
//! - reglages.rs    : précision, mode d'arrondi, CalcSettings
//! - lecture.rs     : domaine décimal (lecture, arrondi par étapes, affichage)
//! - operateurs.rs  : catalogue + sémantique des opérateurs
//! - jetons.rs      : jetons + tokenisation infixe
//! - expressions.rs : InfixExpression / RpnExpression / ExpressionMode
//! - rpn.rs         : shunting-yard + lecture postfixe
//! - eval.rs        : machine à pile (valeur + trace)
//! - touches.rs     : touches -> texte d'expression
//! - commandes.rs   : pipeline complet (Evaluate, ProcessKeys)
//! - memoire.rs     : registre mémoire par session

pub mod commandes;
pub mod erreurs;
pub mod eval;
pub mod expressions;
pub mod jetons;
pub mod lecture;
pub mod memoire;
pub mod operateurs;
pub mod reglages;
pub mod rpn;
pub mod touches;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use commandes::{Calculator, EvaluateRequest, EvaluateResponse, KeyPressRequest};
pub use erreurs::{CalcError, CalcResult, ErrorCategory};
pub use eval::{evaluate, EvaluationResult};
pub use expressions::{ExpressionMode, InfixExpression, RpnExpression};
pub use jetons::{tokenize, NumberLiteral, Token};
pub use operateurs::{catalogue, Associativity, Fixity, Operator, OperatorCatalog, OperatorKind};
pub use reglages::{CalcSettings, Precision, RoundingMode, SettingsOverrides};
pub use rpn::{parse_rpn, to_rpn};
pub use touches::{interpret, KeyStreamResult};
