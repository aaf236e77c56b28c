// src/config.rs
//
// Configuration (TOML) : réglages de calcul par défaut + filtre de journal.
//
//   [settings]
//   precision = 15
//   rounding = "ToEven"
//
//   [logging]
//   filter = "warn"

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::noyau::erreurs::CalcError;
use crate::noyau::reglages::{CalcSettings, SettingsOverrides};

const DOSSIER_APP: &str = "calculatrice-rpn";
const FICHIER: &str = "config.toml";
const FILTRE_DEFAUT: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: CalcError,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: FILTRE_DEFAUT.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub settings: SettingsOverrides,
    pub logging: LoggingConfig,
}

impl Config {
    /// `<config_dir>/calculatrice-rpn/config.toml`, si le système en a un.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(DOSSIER_APP).join(FICHIER))
    }

    pub fn from_toml(texte: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(texte).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        // valide tout de suite : une précision hors bornes est une erreur de config
        config.settings().map_err(|source| ConfigError::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// Chemin explicite : doit exister. Sinon chemin par défaut, absent => défauts.
    pub fn load(explicite: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, obligatoire) = match explicite {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        match fs::read_to_string(&path) {
            Ok(texte) => Self::from_toml(&texte, &path),
            Err(e) if e.kind() == io::ErrorKind::NotFound && !obligatoire => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io { path, source }),
        }
    }

    /// Réglages par défaut des requêtes (CalcSettings::default() si rien n'est fixé).
    pub fn settings(&self) -> Result<CalcSettings, CalcError> {
        self.settings.resolve(CalcSettings::default())
    }
}
