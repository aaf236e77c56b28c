// src/noyau/erreurs.rs
//
// Taxonomie des échecs du noyau.
// Chaque étape (jetons, RPN, évaluation) renvoie un CalcError; rien n'est
// rattrapé en interne, l'appel entier échoue.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Littéral mal formé, caractère inconnu, parenthèses déséquilibrées.
    #[error("{0}")]
    Tokenization(String),

    /// Parenthèses incohérentes découvertes par le shunting-yard.
    #[error("{0}")]
    Conversion(String),

    /// Nombre d'opérandes incorrect, ou pile finale != 1 valeur.
    #[error("{0}")]
    Evaluation(String),

    /// Échec arithmétique de `/` (diviseur exactement nul).
    #[error("division by zero")]
    DivideByZero,

    #[error("unsupported operator '{0}'")]
    UnsupportedOperator(String),

    /// Entrée invalide à la construction (expression vide, précision hors bornes…).
    #[error("{0}")]
    Validation(String),
}

pub type CalcResult<T> = Result<T, CalcError>;

/// Catégorie stable exposée aux appelants (CLI, UI).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    DomainViolation,
    DivideByZero,
    InvalidRequest,
}

impl ErrorCategory {
    pub fn title(self) -> &'static str {
        match self {
            ErrorCategory::DomainViolation => "Domain violation",
            ErrorCategory::DivideByZero => "Divide by zero",
            ErrorCategory::InvalidRequest => "Invalid request",
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCategory::DomainViolation => 2,
            ErrorCategory::DivideByZero => 3,
            ErrorCategory::InvalidRequest => 4,
        }
    }
}

impl CalcError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CalcError::Tokenization(_)
            | CalcError::Conversion(_)
            | CalcError::Evaluation(_)
            | CalcError::UnsupportedOperator(_) => ErrorCategory::DomainViolation,
            CalcError::DivideByZero => ErrorCategory::DivideByZero,
            CalcError::Validation(_) => ErrorCategory::InvalidRequest,
        }
    }

    /// Nom machine du type d'erreur (journal, JSON).
    pub fn code(&self) -> &'static str {
        match self {
            CalcError::Tokenization(_) => "tokenization",
            CalcError::Conversion(_) => "conversion",
            CalcError::Evaluation(_) => "evaluation",
            CalcError::DivideByZero => "divide_by_zero",
            CalcError::UnsupportedOperator(_) => "unsupported_operator",
            CalcError::Validation(_) => "validation",
        }
    }
}
