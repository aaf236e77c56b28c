//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état du pavé (mode, suite de touches, expression assemblée,
//! affichage, RPN, trace, erreur, mémoire, réglages) et les opérations sur cet état.
//!
//! Contrats :
//! - Chaque touche relance l’interprète de touches sur TOUTE la suite.
//! - "=" passe par le pipeline complet (Calculator::process_keys) puis vide la suite.
//! - Changer de mode remet tout à zéro.

use num_rational::BigRational;
use num_traits::Zero;

use calculatrice_rpn::noyau::lecture::format_decimal;
use calculatrice_rpn::noyau::memoire::{apply_memory_command, InMemoryStore, MemoryCommand};
use calculatrice_rpn::noyau::touches::{
    interpret, KEY_BACKSPACE, KEY_CLEAR, KEY_CLEAR_ENTRY, KEY_EVALUATE,
};
use calculatrice_rpn::noyau::{
    CalcError, CalcSettings, Calculator, EvaluationResult, ExpressionMode, KeyPressRequest,
    SettingsOverrides,
};

/// Une seule session mémoire pour l’application de bureau.
const SESSION: &str = "local";

#[derive(Debug)]
pub struct AppCalc {
    // --- saisie ---
    pub mode: ExpressionMode,
    pub touches: Vec<String>,
    /// Nombre en cours de frappe (RPN seulement : un jeton = une touche).
    pub saisie: String,
    pub expression: String,

    // --- sorties ---
    pub affichage: String,
    pub rpn: String,
    pub trace: Vec<String>,
    pub erreur: String,
    pub dernier: Option<BigRational>,

    // --- mémoire ---
    pub memoire: String,
    store: InMemoryStore,

    // --- paramètres ---
    pub reglages: CalcSettings,
    pub avec_trace: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(CalcSettings::default())
    }
}

impl AppCalc {
    pub fn new(reglages: CalcSettings) -> Self {
        Self {
            mode: ExpressionMode::Infix,
            touches: Vec::new(),
            saisie: String::new(),
            expression: String::new(),
            affichage: "0".to_string(),
            rpn: String::new(),
            trace: Vec::new(),
            erreur: String::new(),
            dernier: None,
            memoire: "0".to_string(),
            store: InMemoryStore::new(),
            reglages,
            avec_trace: true,
        }
    }

    /* ------------------------ Touches ------------------------ */

    /// Point d’entrée unique des touches (boutons + clavier).
    pub fn presser(&mut self, key: &str) {
        match key {
            KEY_EVALUATE => self.evaluer(),
            KEY_CLEAR | KEY_CLEAR_ENTRY => self.vider_suite(),
            KEY_BACKSPACE if !self.saisie.is_empty() => {
                self.saisie.pop();
            }
            _ if self.mode == ExpressionMode::Postfix && est_chiffre(key) => {
                self.saisie.push_str(key);
            }
            _ => {
                self.valider_saisie();
                self.touches.push(key.to_string());
            }
        }
        self.rafraichir_expression();
    }

    /// RPN : pousse le nombre en cours comme un jeton.
    pub fn pousser(&mut self) {
        self.valider_saisie();
        self.rafraichir_expression();
    }

    fn valider_saisie(&mut self) {
        if !self.saisie.is_empty() {
            self.touches.push(std::mem::take(&mut self.saisie));
        }
    }

    fn vider_suite(&mut self) {
        self.touches.clear();
        self.saisie.clear();
    }

    fn rafraichir_expression(&mut self) {
        let flux = interpret(self.touches.as_slice(), self.mode);
        self.expression = if self.saisie.is_empty() {
            flux.expression
        } else if flux.expression.is_empty() {
            self.saisie.clone()
        } else {
            format!("{} {}", flux.expression, self.saisie)
        };
    }

    /// "=" : pipeline complet sur la suite courante.
    fn evaluer(&mut self) {
        self.valider_saisie();
        let mut keys = std::mem::take(&mut self.touches);
        keys.push(KEY_EVALUATE.to_string());

        let requete = KeyPressRequest {
            keys,
            mode: self.mode,
            return_trace: self.avec_trace,
            settings: Some(SettingsOverrides {
                precision: Some(self.reglages.precision.digits()),
                rounding: Some(self.reglages.rounding),
            }),
        };

        match Calculator::default().process_keys(&requete) {
            Ok(r) => self.set_resultat(&r),
            Err(e) => self.set_erreur(&e),
        }
    }

    pub fn set_resultat(&mut self, r: &EvaluationResult) {
        self.erreur.clear();
        self.affichage = r.value_text();
        self.rpn = r
            .rpn_tokens()
            .iter()
            .map(|t| t.text())
            .collect::<Vec<_>>()
            .join(" ");
        self.trace = r.trace().to_vec();
        self.dernier = Some(r.value().clone());
    }

    /// On conserve le dernier affichage; RPN et trace ne sont plus fiables.
    pub fn set_erreur(&mut self, e: &CalcError) {
        self.erreur = format!("{}: {}", e.category().title(), e);
        self.rpn.clear();
        self.trace.clear();
    }

    /* ------------------------ Mode / réglages ------------------------ */

    pub fn changer_mode(&mut self, mode: ExpressionMode) {
        if mode == self.mode {
            return;
        }
        let reglages = self.reglages;
        let avec_trace = self.avec_trace;
        let memoire = std::mem::take(&mut self.store);
        let valeur_memoire = std::mem::take(&mut self.memoire);

        *self = Self::new(reglages);
        self.mode = mode;
        self.avec_trace = avec_trace;
        self.store = memoire;
        self.memoire = valeur_memoire;
    }

    /* ------------------------ Mémoire ------------------------ */

    pub fn memoire(&mut self, commande: MemoryCommand) {
        let valeur = match commande {
            MemoryCommand::Store | MemoryCommand::Add | MemoryCommand::Subtract => {
                match &self.dernier {
                    Some(v) => Some(v.clone()),
                    None => {
                        self.erreur = "Invalid request: no result to store".to_string();
                        return;
                    }
                }
            }
            MemoryCommand::Recall if self.attend_operateur() => {
                self.erreur = "Invalid request: type an operator before MR".to_string();
                return;
            }
            MemoryCommand::Clear | MemoryCommand::Recall => None,
        };

        match apply_memory_command(&self.store, SESSION, commande, valeur) {
            Ok(v) => {
                self.memoire = format_decimal(&v);
                if commande == MemoryCommand::Recall {
                    self.inserer_valeur(&v);
                }
            }
            Err(e) => self.set_erreur(&e),
        }
    }

    /// Infixe : l'expression finit par un opérande ; une valeur rappelée
    /// s'y collerait ("1" + MR(6) -> "16").
    fn attend_operateur(&self) -> bool {
        self.mode == ExpressionMode::Infix
            && self
                .expression
                .chars()
                .last()
                .is_some_and(|c| c.is_ascii_digit() || c == '.' || c == ')')
    }

    /// MR : la valeur rappelée entre dans la suite comme si elle avait été tapée.
    fn inserer_valeur(&mut self, v: &BigRational) {
        let texte = format_decimal(v);
        match self.mode {
            ExpressionMode::Infix => {
                self.valider_saisie();
                if v < &BigRational::zero() {
                    // "-" seul : unaire selon sa position
                    self.touches.push("-".to_string());
                }
                self.touches
                    .extend(texte.trim_start_matches('-').chars().map(String::from));
            }
            ExpressionMode::Postfix => {
                self.valider_saisie();
                self.touches.push(texte);
            }
        }
        self.rafraichir_expression();
    }
}

fn est_chiffre(key: &str) -> bool {
    key.len() == 1 && key.chars().all(|c| c.is_ascii_digit() || c == '.')
}
