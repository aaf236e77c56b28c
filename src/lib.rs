//! Calculatrice RPN — bibliothèque
//!
//! - noyau  : pipeline jetons -> RPN -> évaluation + touches + mémoire
//! - config : fichier de configuration (réglages par défaut, journal)

pub mod config;
pub mod noyau;

pub use noyau::{
    CalcError, CalcResult, CalcSettings, Calculator, EvaluateRequest, EvaluateResponse,
    EvaluationResult, ExpressionMode, KeyPressRequest, RoundingMode,
};
