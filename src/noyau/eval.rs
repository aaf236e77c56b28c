//! Noyau — évaluation postfixe (machine à pile)
//!
//! Une seule pile décimale, lue de gauche à droite :
//! - nombre    : arrondi puis empilé            (trace "push <v>")
//! - unaire    : 1 opérande, appliqué, arrondi  (trace "apply <op> -> <v>")
//! - binaire   : dépile droite puis gauche, f(gauche, droite), arrondi
//! - fin       : exactement une valeur, sinon erreur
//!
//! L'arrondi est fait à CHAQUE empilement : les valeurs intermédiaires sont
//! déjà réduites à la précision demandée avant d'être recombinées.
//!
//! Chaque valeur garde son échelle (décimales écrites) : "1.50 2 *" donne
//! "push 1.50" puis "apply * -> 3.00". L'arrondi la borne à `precision`.

use num_rational::BigRational;
use num_traits::Zero;
use tracing::trace;

use super::erreurs::{CalcError, CalcResult};
use super::expressions::RpnExpression;
use super::jetons::Token;
use super::lecture::{arrondir, format_decimal_echelle};
use super::operateurs::{Fixity, Operator};
use super::reglages::CalcSettings;

/// Instantané immuable d'une évaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationResult {
    value: BigRational,
    scale: u32,
    rpn_tokens: Vec<Token>,
    trace: Vec<String>,
}

impl EvaluationResult {
    /// Résultat “neutre” : zéro, sans jetons ni trace.
    pub fn empty() -> Self {
        Self {
            value: BigRational::zero(),
            scale: 0,
            rpn_tokens: Vec::new(),
            trace: Vec::new(),
        }
    }

    pub fn value(&self) -> &BigRational {
        &self.value
    }

    /// Décimales du résultat.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Valeur en texte décimal, échelle comprise ("2.34", "3.00").
    pub fn value_text(&self) -> String {
        format_decimal_echelle(&self.value, self.scale)
    }

    pub fn rpn_tokens(&self) -> &[Token] {
        &self.rpn_tokens
    }

    pub fn trace(&self) -> &[String] {
        &self.trace
    }
}

/// Valeur de pile : nombre exact + décimales écrites.
struct Valeur {
    nombre: BigRational,
    echelle: u32,
}

impl Valeur {
    fn texte(&self) -> String {
        format_decimal_echelle(&self.nombre, self.echelle)
    }
}

struct Machine<'a> {
    pile: Vec<Valeur>,
    trace: Vec<String>,
    avec_trace: bool,
    settings: &'a CalcSettings,
}

impl Machine<'_> {
    fn arrondi(&self, v: &BigRational, echelle: u32) -> Valeur {
        let digits = self.settings.precision.digits();
        Valeur {
            nombre: arrondir(v, digits, self.settings.rounding),
            echelle: echelle.min(digits),
        }
    }

    fn note(&mut self, ligne: impl FnOnce() -> String) {
        if self.avec_trace {
            let l = ligne();
            trace!(etape = %l);
            self.trace.push(l);
        }
    }

    fn empile_nombre(&mut self, v: &BigRational, echelle: u32) {
        let r = self.arrondi(v, echelle);
        self.note(|| format!("push {}", r.texte()));
        self.pile.push(r);
    }

    fn applique(&mut self, op: &Operator) -> CalcResult<()> {
        if self.pile.len() < op.arity() {
            return Err(CalcError::Evaluation(format!(
                "operator '{}' requires {} operand(s)",
                op.symbol(),
                op.arity()
            )));
        }

        let (brut, echelle) = match op.fixity() {
            Fixity::Unary => {
                let v = self.depile()?;
                let brut = op.apply_unary(&v.nombre)?;
                let echelle = op.result_scale(v.echelle, 0, &brut);
                (brut, echelle)
            }
            Fixity::Binary => {
                // droite d'abord : empilée en dernier
                let droite = self.depile()?;
                let gauche = self.depile()?;
                let brut = op.apply_binary(&gauche.nombre, &droite.nombre)?;
                let echelle = op.result_scale(gauche.echelle, droite.echelle, &brut);
                (brut, echelle)
            }
        };

        let r = self.arrondi(&brut, echelle);
        self.note(|| format!("apply {} -> {}", op.symbol(), r.texte()));
        self.pile.push(r);
        Ok(())
    }

    fn depile(&mut self) -> CalcResult<Valeur> {
        self.pile
            .pop()
            .ok_or_else(|| CalcError::Evaluation("stack underflow".into()))
    }
}

/// Évalue une expression postfixe avec arrondi par étapes.
pub fn evaluate(
    expression: &RpnExpression,
    settings: &CalcSettings,
    include_trace: bool,
) -> CalcResult<EvaluationResult> {
    let mut m = Machine {
        pile: Vec::with_capacity(expression.tokens().len()),
        trace: Vec::new(),
        avec_trace: include_trace,
        settings,
    };

    for tok in expression.tokens() {
        match tok {
            Token::Number(n) => m.empile_nombre(n.value(), n.scale()),
            Token::Operator(op) => m.applique(op)?,
            Token::Parenthesis { .. } => {
                return Err(CalcError::Evaluation(
                    "unexpected parenthesis in postfix expression".into(),
                ));
            }
        }
    }

    if m.pile.len() != 1 {
        return Err(CalcError::Evaluation(
            "expression evaluation ended with unexpected stack state".into(),
        ));
    }
    let fin = m.depile()?;

    Ok(EvaluationResult {
        value: fin.nombre,
        scale: fin.echelle,
        rpn_tokens: expression.tokens().to_vec(),
        trace: m.trace,
    })
}
