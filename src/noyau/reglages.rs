// src/noyau/reglages.rs
//
// Réglages de calcul : précision (chiffres après la virgule) + mode d'arrondi.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::erreurs::{CalcError, CalcResult};

/// Précision par défaut (chiffres après la virgule).
const DIGITS_DEFAUT: u32 = 15;

/// Mode d'arrondi appliqué à chaque empilement et après chaque opérateur.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Milieu vers le chiffre pair (arrondi bancaire).
    #[default]
    ToEven,
    /// Milieu loin de zéro.
    AwayFromZero,
    ToZero,
    ToNegativeInfinity,
    ToPositiveInfinity,
}

impl RoundingMode {
    pub const ALL: [RoundingMode; 5] = [
        RoundingMode::ToEven,
        RoundingMode::AwayFromZero,
        RoundingMode::ToZero,
        RoundingMode::ToNegativeInfinity,
        RoundingMode::ToPositiveInfinity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RoundingMode::ToEven => "ToEven",
            RoundingMode::AwayFromZero => "AwayFromZero",
            RoundingMode::ToZero => "ToZero",
            RoundingMode::ToNegativeInfinity => "ToNegativeInfinity",
            RoundingMode::ToPositiveInfinity => "ToPositiveInfinity",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoundingMode {
    type Err = CalcError;

    /// Accepte le nom exact ("AwayFromZero") ou une forme tiretée ("away-from-zero").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cle: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        RoundingMode::ALL
            .into_iter()
            .find(|m| m.name().to_ascii_lowercase() == cle)
            .ok_or_else(|| CalcError::Validation(format!("unknown rounding mode '{s}'")))
    }
}

/// Nombre de chiffres après la virgule, borné à [1, 28].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Precision(u32);

impl Precision {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 28;

    pub fn new(digits: u32) -> CalcResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&digits) {
            return Err(CalcError::Validation(format!(
                "precision must be between {} and {} (got {digits})",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(digits))
    }

    pub fn digits(self) -> u32 {
        self.0
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(DIGITS_DEFAUT)
    }
}

impl TryFrom<u32> for Precision {
    type Error = CalcError;

    fn try_from(digits: u32) -> Result<Self, Self::Error> {
        Precision::new(digits)
    }
}

impl From<Precision> for u32 {
    fn from(p: Precision) -> Self {
        p.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalcSettings {
    pub precision: Precision,
    pub rounding: RoundingMode,
}

impl CalcSettings {
    pub fn new(precision: Precision, rounding: RoundingMode) -> Self {
        Self {
            precision,
            rounding,
        }
    }
}

/// Réglages partiels d'une requête; les champs absents retombent sur les défauts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsOverrides {
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub rounding: Option<RoundingMode>,
}

impl SettingsOverrides {
    pub fn resolve(&self, defauts: CalcSettings) -> CalcResult<CalcSettings> {
        let precision = match self.precision {
            Some(d) => Precision::new(d)?,
            None => defauts.precision,
        };
        Ok(CalcSettings {
            precision,
            rounding: self.rounding.unwrap_or(defauts.rounding),
        })
    }
}
