//! Noyau — commandes (pipeline complet)
//!
//! Evaluate   : texte -> jetons -> RPN (si infixe) -> évaluation
//! ProcessKeys: touches -> texte -> Evaluate (si le texte n'est pas vide)
//!
//! Aucun état entre deux appels : un `Calculator` peut être partagé librement.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::erreurs::{CalcError, CalcResult};
use super::eval::{evaluate, EvaluationResult};
use super::expressions::{ExpressionMode, InfixExpression, RpnExpression};
use super::jetons::tokenize;
use super::operateurs::{catalogue, OperatorCatalog};
use super::reglages::{CalcSettings, SettingsOverrides};
use super::rpn::{parse_rpn, to_rpn};
use super::touches::interpret;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub expression: String,
    #[serde(default)]
    pub mode: ExpressionMode,
    #[serde(default)]
    pub return_trace: bool,
    #[serde(default)]
    pub settings: Option<SettingsOverrides>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPressRequest {
    pub keys: Vec<String>,
    #[serde(default)]
    pub mode: ExpressionMode,
    #[serde(default)]
    pub return_trace: bool,
    #[serde(default)]
    pub settings: Option<SettingsOverrides>,
}

/// Réponse “transport” : valeur en texte + RPN (orthographe d'origine) + trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub result: String,
    pub mode: ExpressionMode,
    pub rpn: Vec<String>,
    pub trace: Vec<String>,
}

impl EvaluateResponse {
    pub fn from_result(result: &EvaluationResult, mode: ExpressionMode) -> Self {
        Self {
            result: result.value_text(),
            mode,
            rpn: result.rpn_tokens().iter().map(|t| t.text().to_string()).collect(),
            trace: result.trace().to_vec(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Calculator<'a> {
    catalogue: &'a OperatorCatalog,
    defauts: CalcSettings,
}

impl Default for Calculator<'static> {
    fn default() -> Self {
        Self::new(catalogue(), CalcSettings::default())
    }
}

impl<'a> Calculator<'a> {
    pub fn new(catalogue: &'a OperatorCatalog, defauts: CalcSettings) -> Self {
        Self {
            catalogue,
            defauts,
        }
    }

    pub fn default_settings(&self) -> CalcSettings {
        self.defauts
    }

    fn settings(&self, overrides: Option<&SettingsOverrides>) -> CalcResult<CalcSettings> {
        match overrides {
            Some(o) => o.resolve(self.defauts),
            None => Ok(self.defauts),
        }
    }

    /// Construit la suite postfixe selon le mode de la source.
    pub fn postfix(&self, expression: &str, mode: ExpressionMode) -> CalcResult<RpnExpression> {
        match mode {
            ExpressionMode::Infix => {
                let infix = InfixExpression::new(expression)?;
                let jetons = tokenize(&infix, self.catalogue)?;
                to_rpn(&jetons)
            }
            ExpressionMode::Postfix => parse_rpn(expression, self.catalogue),
        }
    }

    pub fn evaluate(&self, request: &EvaluateRequest) -> CalcResult<EvaluationResult> {
        let resultat = self.evaluate_inner(request);
        if let Err(e) = &resultat {
            warn!(code = e.code(), erreur = %e, expression = %request.expression, "evaluation failed");
        }
        resultat
    }

    fn evaluate_inner(&self, request: &EvaluateRequest) -> CalcResult<EvaluationResult> {
        if request.expression.trim().is_empty() {
            return Err(CalcError::Validation("expression is required".into()));
        }

        let settings = self.settings(request.settings.as_ref())?;
        let rpn = self.postfix(&request.expression, request.mode)?;
        let r = evaluate(&rpn, &settings, request.return_trace)?;

        debug!(
            mode = ?request.mode,
            precision = settings.precision.digits(),
            rounding = %settings.rounding,
            valeur = %r.value_text(),
            "expression evaluated"
        );
        Ok(r)
    }

    /// Touches -> expression -> évaluation. Une expression vide donne zéro
    /// (sans jetons ni trace). `should_evaluate` n'intervient pas ici.
    pub fn process_keys(&self, request: &KeyPressRequest) -> CalcResult<EvaluationResult> {
        let flux = interpret(request.keys.as_slice(), request.mode);
        debug!(expression = %flux.expression, evaluer = flux.should_evaluate, "keys interpreted");

        if flux.expression.trim().is_empty() {
            return Ok(EvaluationResult::empty());
        }

        self.evaluate(&EvaluateRequest {
            expression: flux.expression,
            mode: request.mode,
            return_trace: request.return_trace,
            settings: request.settings,
        })
    }
}
